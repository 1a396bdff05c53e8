// End-to-end tests for building, training, evolving and saving networks

use assert_approx_eq::assert_approx_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use neurite::{Activation, Error, Evolve, LayerSpec, Network};

fn xor_dataset() -> Vec<(Vec<f64>, Vec<f64>)> {
    vec![
        (vec![0.0, 0.0], vec![0.0]),
        (vec![1.0, 0.0], vec![1.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 1.0], vec![0.0]),
    ]
}

fn xor_network(rng: &mut StdRng) -> Network {
    Network::with_rng(
        &[
            LayerSpec::new(3).inputs(2),
            LayerSpec::new(3),
            LayerSpec::new(1),
        ],
        rng,
    )
    .unwrap()
}

fn solves_xor(network: &mut Network) -> bool {
    xor_dataset().iter().all(|(inputs, expected)| {
        let output = network.think(inputs).unwrap();
        (output[0] - expected[0]).abs() < 0.1
    })
}

#[test]
fn test_xor_backpropagation() {
    let mut network = xor_network(&mut StdRng::seed_from_u64(2));
    let dataset = xor_dataset();

    for _ in 0..5000 {
        network.learns(&dataset).unwrap();
    }

    for (inputs, expected) in &dataset {
        let output = network.think(inputs).unwrap();
        assert!(
            (output[0] - expected[0]).abs() < 0.1,
            "{:?} -> {}, expected {}",
            inputs,
            output[0],
            expected[0]
        );
    }
}

#[test]
fn test_xor_backpropagation_seeds() {
    let dataset = xor_dataset();

    // Only the layers after the first one learn, so a few starting points are tried
    let solved = (0..10).any(|seed| {
        let mut network = xor_network(&mut StdRng::seed_from_u64(seed));

        for round in 1..=50 {
            for _ in 0..1000 {
                network.learns(&dataset).unwrap();
            }

            if round >= 5 && solves_xor(&mut network) {
                return true;
            }
        }

        false
    });

    assert!(solved, "no network learned xor");
}

#[test]
fn test_mean_loss_decreases() {
    let mut network = xor_network(&mut StdRng::seed_from_u64(0));
    let dataset = xor_dataset();

    let first = network.learns(&dataset).unwrap();
    for _ in 0..2000 {
        network.learns(&dataset).unwrap();
    }

    assert!(network.loss() < first);
}

#[test]
fn test_arbitrary_values() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut network = Network::with_rng(
        &[
            LayerSpec::new(8).inputs(3).range(vec![(0.0, 255.0); 3]),
            LayerSpec::new(8),
            LayerSpec::new(1).range(vec![(0.0, 100.0)]),
        ],
        &mut rng,
    )
    .unwrap();

    assert_eq!(
        vec![1.0, 0.0, 1.0],
        network.input_values_to_raw(&[255.0, 0.0, 255.0]).unwrap()
    );

    // Outputs are reported in the declared range
    for inputs in [[255.0, 255.0, 255.0], [0.0, 0.0, 0.0], [107.0, 181.0, 255.0]] {
        let output = network.think(&inputs).unwrap();
        assert!((0.0..=100.0).contains(&output[0]));

        let raw_inputs = network.input_values_to_raw(&inputs).unwrap();
        let raw = network.think_raw(&raw_inputs).unwrap();
        assert_approx_eq!(raw[0] * 100.0, output[0]);
    }

    assert_eq!(
        Error::DimensionMismatch(3, 2),
        network.think(&[1.0, 2.0]).unwrap_err()
    );
}

#[cfg(feature = "json")]
#[test]
fn test_save_and_load() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut network = Network::with_rng(
        &[
            LayerSpec::new(4).inputs(2).activation(Activation::Tanh),
            LayerSpec::new(1).activation(Activation::Relu),
        ],
        &mut rng,
    )
    .unwrap();
    for _ in 0..50 {
        network.learns(&xor_dataset()).unwrap();
    }

    let path = format!(
        "{}/test_output/tests_save_and_load/network.json",
        env!("CARGO_MANIFEST_DIR")
    );
    network.to_file(&path, true).unwrap();
    let mut loaded = Network::load_file(&path).unwrap();
    Network::delete_file(&path).unwrap();

    for (inputs, _) in xor_dataset() {
        assert_eq!(
            network.think_raw(&inputs).unwrap(),
            loaded.think_raw(&inputs).unwrap()
        );
    }

    let mut imported = Network::import(&network.export().unwrap()).unwrap();
    for (inputs, _) in xor_dataset() {
        assert_eq!(
            network.think_raw(&inputs).unwrap(),
            imported.think_raw(&inputs).unwrap()
        );
    }
}

#[test]
fn test_evolve_respects_epochs() {
    let mut rng = StdRng::seed_from_u64(3);
    let seed = xor_network(&mut rng);
    let dataset = xor_dataset();
    let initial = seed.clone().learns(&dataset).unwrap();

    let config = Evolve {
        population: 10,
        mutate: 0.05,
        elitism: 3,
        epochs: 10,
        iterations: 20,
        threshold: -1.0,
        dataset,
        ..Default::default()
    };

    let mut epochs = 0;
    let best = seed
        .evolve_with_rng(&config, &mut rng, |_, _| {
            epochs += 1;
            true
        })
        .unwrap();

    assert_eq!(10, epochs);
    assert!(best.loss() <= initial);
}
