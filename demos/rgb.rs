//! Predicting the brightness of colors, using ranges to work with real-world values.

use neurite::{LayerSpec, Network};

fn main() {
    env_logger::init();

    // Red, green and blue in 0-255, brightness as a percentage
    let mut rgb = Network::new(&[
        LayerSpec::new(8).inputs(3).range(vec![(0.0, 255.0); 3]),
        LayerSpec::new(8),
        LayerSpec::new(1).range(vec![(0.0, 100.0)]),
    ])
    .unwrap();

    let light = [100.0];
    let dark = [0.0];
    let colors = [
        ([0.0, 255.0, 0.0], light),
        ([0.0, 0.0, 255.0], light),
        ([0.0, 0.0, 0.0], dark),
        ([100.0, 100.0, 100.0], light),
        ([107.0, 181.0, 255.0], light),
        ([0.0, 53.0, 105.0], dark),
        ([150.0, 150.0, 75.0], light),
        ([75.0, 75.0, 0.0], dark),
        ([0.0, 75.0, 75.0], dark),
        ([150.0, 74.0, 142.0], light),
        ([50.0, 50.0, 75.0], dark),
        ([103.0, 22.0, 94.0], dark),
    ];

    println!("255, 255, 255 [100] -> {:?}", rgb.think(&[255.0, 255.0, 255.0]).unwrap());
    println!("0, 0, 0 [0] -> {:?}", rgb.think(&[0.0, 0.0, 0.0]).unwrap());

    for i in 0..=2000 {
        // Raw values skip the ranges
        let mut loss = rgb.learn_raw(&[1.0, 0.0, 0.0], &[1.0]).unwrap();
        for (color, brightness) in &colors {
            loss += rgb.learn(color, brightness).unwrap();
        }
        loss /= (colors.len() + 1) as f64;

        if i % 500 == 0 {
            println!("iteration {}, loss {:.6}", i, loss);
        }
    }

    println!("255, 255, 255 [100] -> {:?}", rgb.think(&[255.0, 255.0, 255.0]).unwrap());
    println!("0, 0, 0 [0] -> {:?}", rgb.think(&[0.0, 0.0, 0.0]).unwrap());

    println!("new colors:");
    println!("243, 179, 10 [100] -> {:?}", rgb.think(&[243.0, 179.0, 10.0]).unwrap());
    println!("75, 50, 50 [0] -> {:?}", rgb.think(&[75.0, 50.0, 50.0]).unwrap());
    println!("95, 99, 104 [100] -> {:?}", rgb.think(&[95.0, 99.0, 104.0]).unwrap());
    println!("65, 38, 70 [0] -> {:?}", rgb.think(&[65.0, 38.0, 70.0]).unwrap());

    println!("raw:");
    println!("0.254, 0.149, 0.274 [0.0] -> {:?}", rgb.think_raw(&[0.254, 0.149, 0.274]).unwrap());
}
