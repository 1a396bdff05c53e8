//! Learning xor by backpropagation, then saving and loading the network. Requires the `json`
//! feature.

use neurite::{LayerSpec, Network};

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
        LayerSpec::new(16).inputs(2),
        LayerSpec::new(16),
        LayerSpec::new(1),
    ])
    .unwrap();

    let dataset = vec![
        (vec![0.0, 0.0], vec![0.0]),
        (vec![1.0, 0.0], vec![1.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 1.0], vec![0.0]),
    ];

    println!("before learning:");
    print_xor(&mut xor);

    for i in 0..=5000 {
        let loss = xor.learns(&dataset).unwrap();
        if i % 1000 == 0 {
            println!("iteration {}, loss {:.6}", i, loss);
        }
    }

    println!("after learning:");
    print_xor(&mut xor);

    // Save the network, load it back and clean up
    let path = "test_output/xor.json";
    xor.to_file(path, true).unwrap();
    let mut loaded = Network::load_file(path).unwrap();
    Network::delete_file(path).unwrap();

    println!("loaded from file:");
    print_xor(&mut loaded);

    // The exported bytes can be sent anywhere and imported again
    let bytes = xor.export().unwrap();
    println!("{}", String::from_utf8_lossy(&bytes));
    let mut copy = Network::import(&bytes).unwrap();
    println!("imported copy:");
    print_xor(&mut copy);
}
