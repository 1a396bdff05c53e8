//! A small feed-forward neural network engine. A [`Network`] is built from a list of
//! [`LayerSpec`]s, evaluated with [`Network::think`], trained by backpropagation with momentum
//! through [`Network::learn`], or trained genetically with [`Network::evolve`]. Networks can be
//! saved to and loaded from JSON.
//!
//! # Examples
//!
//! ```no_run
//! use neurite::{LayerSpec, Network};
//!
//! let mut network = Network::new(&[
//!     LayerSpec::new(8).inputs(3).range(vec![(0.0, 255.0); 3]),
//!     LayerSpec::new(8),
//!     LayerSpec::new(1).range(vec![(0.0, 100.0)]),
//! ])
//! .unwrap();
//!
//! // Train with real-world values, converted through the declared ranges
//! network.learn(&[255.0, 255.0, 255.0], &[100.0]).unwrap();
//!
//! // Save the network and load it back
//! network.to_file("brightness.json", false).unwrap();
//! let mut network = Network::load_file("brightness.json").unwrap();
//!
//! let brightness = network.think(&[0.0, 53.0, 105.0]).unwrap();
//! ```

// Values outside of the activation ranges don't cause any problems. Operations on non-normal
// numbers result in non-normal numbers, never panicking.

pub mod activation;
#[cfg(feature = "json")]
pub mod encoding;
pub mod evolve;
pub mod layer;
pub mod loss;
pub mod network;
pub mod neuron;

pub use self::activation::Activation;
pub use self::evolve::Evolve;
pub use self::layer::{Layer, LayerSpec};
pub use self::loss::Loss;
pub use self::network::{Error, Network, ValueRange};
pub use self::neuron::Neuron;
