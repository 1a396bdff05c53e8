//! Genetic training of networks.
//!
//! A population of clones of a seed network is mutated and trained every epoch, ranked by loss,
//! and the least fit individuals are replaced by children of the fittest.

use log::{debug, info};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::network::{Error, Network};

/// The population size unless one is given.
pub const DEFAULT_POPULATION: usize = 20;
/// The mutation probability unless one is given.
pub const DEFAULT_MUTATE: f64 = 0.01;
/// The crossover dominance probability unless one is given.
pub const DEFAULT_CROSSOVER: f64 = 0.5;
/// The number of elites unless one is given.
pub const DEFAULT_ELITISM: usize = 5;
/// The number of training rounds per epoch unless one is given.
pub const DEFAULT_ITERATIONS: usize = 1;

/// The configuration of an evolution run. Fields left at zero take their defaults, except
/// `epochs`, which must be set.
///
/// # Examples
///
/// ```
/// use neurite::{Evolve, LayerSpec, Network};
///
/// let seed = Network::new(&[LayerSpec::new(2).inputs(2), LayerSpec::new(1)]).unwrap();
///
/// let config = Evolve {
///     epochs: 5,
///     iterations: 10,
///     dataset: vec![
///         (vec![0.0, 0.0], vec![0.0]),
///         (vec![1.0, 1.0], vec![1.0]),
///     ],
///     ..Default::default()
/// };
///
/// let best = seed.evolve(&config, |epoch, loss| {
///     println!("epoch {}: loss {}", epoch, loss);
///     true
/// })
/// .unwrap();
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Evolve {
    /// The number of individuals.
    pub population: usize,
    /// The probability of each weight and bias being replaced before an epoch's training.
    pub mutate: f64,
    /// The probability of a child taking each value from the elite parent.
    pub crossover: f64,
    /// The number of fittest individuals that breed every epoch.
    pub elitism: usize,
    /// The maximum number of epochs.
    pub epochs: usize,
    /// The number of passes over the dataset per individual and epoch.
    pub iterations: usize,
    /// The run stops once the best loss is at or below this value.
    pub threshold: f64,
    /// `(inputs, outputs)` pairs of arbitrary values.
    pub dataset: Vec<(Vec<f64>, Vec<f64>)>,
}

impl Evolve {
    /// Returns a copy with zero fields replaced by their defaults.
    fn with_defaults(&self) -> Result<Self, Error> {
        if self.epochs == 0 {
            return Err(Error::MissingEpochs);
        }

        fn or<T: PartialEq + Default>(value: T, default: T) -> T {
            if value == T::default() {
                default
            } else {
                value
            }
        }

        let population = or(self.population, DEFAULT_POPULATION);

        Ok(Self {
            population,
            mutate: or(self.mutate, DEFAULT_MUTATE),
            crossover: or(self.crossover, DEFAULT_CROSSOVER),
            elitism: or(self.elitism, DEFAULT_ELITISM).min(population),
            epochs: self.epochs,
            iterations: or(self.iterations, DEFAULT_ITERATIONS),
            threshold: self.threshold,
            dataset: self.dataset.clone(),
        })
    }
}

/// Why an evolution run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stop {
    Threshold,
    Callback,
    Epochs,
}

impl Network {
    /// Evolves a population of clones of this network, using the thread local random number
    /// generator. See [`Network::evolve_with_rng`].
    pub fn evolve<F>(&self, config: &Evolve, callback: F) -> Result<Network, Error>
    where
        F: FnMut(usize, f64) -> bool,
    {
        self.evolve_with_rng(config, &mut rand::thread_rng(), callback)
    }

    /// Evolves a population of clones of this network and returns the fittest individual.
    ///
    /// Every epoch, each individual is mutated and then trained `iterations` times on the
    /// dataset with [`Network::learns`]. The population is ranked by the resulting loss and
    /// `callback` is called with the epoch index and the best loss. The run ends when the
    /// callback returns `false`, the best loss reaches the threshold, or the epochs run out.
    /// Otherwise each elite breeds with a random individual and the children replace the least
    /// fit individuals.
    ///
    /// Returns [`Error::MissingEpochs`] if `config.epochs` is zero, and any error raised while
    /// training on the dataset.
    pub fn evolve_with_rng<R, F>(
        &self,
        config: &Evolve,
        rng: &mut R,
        mut callback: F,
    ) -> Result<Network, Error>
    where
        R: Rng + ?Sized,
        F: FnMut(usize, f64) -> bool,
    {
        let config = config.with_defaults()?;
        let mut population = vec![self.clone(); config.population];
        let mut stop = Stop::Epochs;

        for epoch in 0..config.epochs {
            for individual in &mut population {
                individual.mutate(config.mutate, rng);
            }

            train(&mut population, &config)?;

            population.sort_by(|a, b| a.loss().total_cmp(&b.loss()));
            let best = population[0].loss();
            debug!("epoch {}: best loss {}", epoch, best);

            if !callback(epoch, best) {
                stop = Stop::Callback;
                break;
            }

            if best <= config.threshold {
                stop = Stop::Threshold;
                break;
            }

            if epoch + 1 == config.epochs {
                break;
            }

            let size = population.len();
            for p in 0..config.elitism {
                let mate = rng.gen_range(0..size);
                let child = population[p].crossover(&population[mate], config.crossover, rng)?;
                population[size - 1 - p] = child;
            }
        }

        info!(
            "evolution stopped ({:?}) with best loss {}",
            stop,
            population[0].loss()
        );

        Ok(population.swap_remove(0))
    }
}

/// Trains every individual of the population. Returns once all of them are done.
#[cfg(not(feature = "parallel"))]
fn train(population: &mut [Network], config: &Evolve) -> Result<(), Error> {
    population
        .iter_mut()
        .try_for_each(|individual| train_one(individual, config))
}

/// Trains every individual of the population on the rayon thread pool. Returns once all of them
/// are done.
#[cfg(feature = "parallel")]
fn train(population: &mut [Network], config: &Evolve) -> Result<(), Error> {
    population
        .par_iter_mut()
        .try_for_each(|individual| train_one(individual, config))
}

fn train_one(individual: &mut Network, config: &Evolve) -> Result<(), Error> {
    for _ in 0..config.iterations {
        individual.learns(&config.dataset)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{Activation, LayerSpec};

    fn seed_network(rng: &mut StdRng) -> Network {
        let specs = vec![
            LayerSpec::new(2)
                .inputs(2)
                .activation(Activation::Linear)
                .rate(0.01)
                .momentum(0.0),
            LayerSpec::new(1)
                .activation(Activation::Linear)
                .rate(0.01)
                .momentum(0.0),
        ];
        Network::with_rng(&specs, rng).unwrap()
    }

    #[test]
    fn test_missing_epochs() {
        let mut rng = StdRng::seed_from_u64(0);
        let seed = seed_network(&mut rng);

        assert_eq!(
            Error::MissingEpochs,
            seed.evolve_with_rng(&Evolve::default(), &mut rng, |_, _| true)
                .unwrap_err()
        );
    }

    #[test]
    fn test_defaults() {
        let config = Evolve {
            epochs: 3,
            elitism: 50,
            ..Default::default()
        }
        .with_defaults()
        .unwrap();

        assert_eq!(DEFAULT_POPULATION, config.population);
        assert_eq!(DEFAULT_MUTATE, config.mutate);
        assert_eq!(DEFAULT_CROSSOVER, config.crossover);
        assert_eq!(DEFAULT_POPULATION, config.elitism);
        assert_eq!(DEFAULT_ITERATIONS, config.iterations);
        assert_eq!(3, config.epochs);
    }

    #[test]
    fn test_runs_every_epoch() {
        let mut rng = StdRng::seed_from_u64(1);
        let seed = seed_network(&mut rng);
        let config = Evolve {
            epochs: 7,
            threshold: -1.0,
            population: 6,
            elitism: 2,
            dataset: vec![(vec![0.5, 0.5], vec![0.25])],
            ..Default::default()
        };

        let mut epochs = Vec::new();
        let best = seed
            .evolve_with_rng(&config, &mut rng, |epoch, _| {
                epochs.push(epoch);
                true
            })
            .unwrap();

        assert_eq!((0..7).collect::<Vec<_>>(), epochs);
        assert_eq!(2, best.num_inputs());
    }

    #[test]
    fn test_callback_stops() {
        let mut rng = StdRng::seed_from_u64(2);
        let seed = seed_network(&mut rng);
        let config = Evolve {
            epochs: 100,
            threshold: -1.0,
            dataset: vec![(vec![0.5, 0.5], vec![0.25])],
            ..Default::default()
        };

        let mut calls = 0;
        seed.evolve_with_rng(&config, &mut rng, |_, _| {
            calls += 1;
            calls < 3
        })
        .unwrap();

        assert_eq!(3, calls);
    }

    #[test]
    fn test_threshold_stops() {
        let mut rng = StdRng::seed_from_u64(3);
        let seed = seed_network(&mut rng);
        let config = Evolve {
            epochs: 100,
            threshold: f64::INFINITY,
            dataset: vec![(vec![0.5, 0.5], vec![0.25])],
            ..Default::default()
        };

        let mut calls = 0;
        seed.evolve_with_rng(&config, &mut rng, |_, _| {
            calls += 1;
            true
        })
        .unwrap();

        assert_eq!(1, calls);
    }

    #[test]
    fn test_improves_on_seed() {
        let mut rng = StdRng::seed_from_u64(4);
        let seed = seed_network(&mut rng);
        let dataset = vec![(vec![0.5, -0.5], vec![0.8])];

        let initial = seed.clone().learns(&dataset).unwrap();

        let config = Evolve {
            epochs: 3,
            iterations: 20,
            threshold: -1.0,
            dataset: dataset.clone(),
            ..Default::default()
        };
        let mut losses = Vec::new();
        let mut best = seed
            .evolve_with_rng(&config, &mut rng, |_, loss| {
                losses.push(loss);
                true
            })
            .unwrap();

        assert!(best.loss() <= initial);
        assert_eq!(Some(&best.loss()), losses.last());
        assert!(best.learns(&dataset).unwrap() <= initial);
    }

    #[test]
    fn test_dataset_errors() {
        let mut rng = StdRng::seed_from_u64(5);
        let seed = seed_network(&mut rng);
        let config = Evolve {
            epochs: 2,
            dataset: vec![(vec![0.5], vec![0.25])],
            ..Default::default()
        };

        assert_eq!(
            Error::DimensionMismatch(2, 1),
            seed.evolve_with_rng(&config, &mut rng, |_, _| true)
                .unwrap_err()
        );
    }
}
