//! Learning xor with a genetic algorithm. Requires the `json` feature.

use std::time::Instant;

use neurite::{Evolve, LayerSpec, Loss, Network};

const XOR: [([f64; 2], f64); 4] = [
    ([0.0, 0.0], 0.0),
    ([1.0, 0.0], 1.0),
    ([0.0, 1.0], 1.0),
    ([1.0, 1.0], 0.0),
];

fn print_xor(network: &mut Network) {
    for (inputs, expected) in &XOR {
        let output = network.think(inputs).unwrap();
        println!("{:?} [{}] -> {:.6}", inputs, expected, output[0]);
    }
}

fn main() {
    env_logger::init();

    let mut xor = Network::new(&[
        LayerSpec::new(3).inputs(2),
        LayerSpec::new(3),
        LayerSpec::new(1).loss(Loss::Mse),
    ])
    .unwrap();

    println!("before evolving:");
    print_xor(&mut xor);

    let config = Evolve {
        population: 20,
        mutate: 0.05,
        crossover: 0.5,
        elitism: 5,
        epochs: 100,
        iterations: 50,
        threshold: 0.00005,
        dataset: vec![
            (vec![0.0, 0.0], vec![0.0]),
            (vec![1.0, 0.0], vec![1.0]),
            (vec![0.0, 1.0], vec![1.0]),
            (vec![1.0, 1.0], vec![0.0]),
        ],
    };

    let start = Instant::now();
    let mut best = xor
        .evolve(&config, |epoch, loss| {
            if epoch % 10 == 0 || epoch == 99 {
                println!(
                    "epoch {}, loss {:.6}, elapsed {:?}",
                    epoch,
                    loss,
                    start.elapsed()
                );
            }
            true
        })
        .unwrap();

    println!("after evolving:");
    print_xor(&mut best);

    println!("{}", best.to_string().unwrap());
}
