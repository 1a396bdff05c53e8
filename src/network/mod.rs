//! The neural network struct.

mod error;
mod learn;
mod range;

pub use error::Error;
pub use range::{range_map, ValueRange};

use rand::Rng;

#[cfg(feature = "json")]
use std::path::Path;

#[cfg(feature = "json")]
use crate::encoding;
use crate::layer::{Layer, LayerSpec};
use range::Direction;

/// A feed-forward neural network: an ordered sequence of fully connected layers.
///
/// The first layer receives the network inputs and the last layer produces the network outputs.
/// Every layer takes the outputs of the layer before it as inputs.
///
/// Networks work on *raw* values, the values their weights were trained on. [`Network::think`]
/// and [`Network::learn`] additionally convert *arbitrary* (real-world) values through the value
/// ranges of the first and last layers; the `_raw` methods skip that conversion.
///
/// Evaluating and training mutate cached per-neuron state, so a `Network` can't be shared between
/// threads while in use. Cloning a `Network` copies its weights only; the clone has no training
/// history.
///
/// # Examples
///
/// ```
/// use neurite::{LayerSpec, Network};
///
/// let mut xor = Network::new(&[
///     LayerSpec::new(3).inputs(2),
///     LayerSpec::new(3),
///     LayerSpec::new(1),
/// ])
/// .unwrap();
///
/// let dataset = vec![
///     (vec![0.0, 0.0], vec![0.0]),
///     (vec![1.0, 0.0], vec![1.0]),
///     (vec![0.0, 1.0], vec![1.0]),
///     (vec![1.0, 1.0], vec![0.0]),
/// ];
///
/// for _ in 0..100 {
///     xor.learns(&dataset).unwrap();
/// }
///
/// let output = xor.think(&[1.0, 0.0]).unwrap();
/// assert_eq!(1, output.len());
/// ```
#[derive(Clone, Debug)]
pub struct Network {
    // The layers in propagation order
    layers: Vec<Layer>,
    // The mean loss of the last `learns`/`learns_raw` call
    loss: f64,
}

impl Network {
    /// Builds a network from layer specs, drawing the initial weights and biases from the thread
    /// local random number generator.
    pub fn new(specs: &[LayerSpec]) -> Result<Self, Error> {
        Self::with_rng(specs, &mut rand::thread_rng())
    }

    /// Builds a network from layer specs, drawing the initial weights and biases uniformly from
    /// `[-1, 1]` using `rng`.
    ///
    /// The first spec must declare its number of inputs. Each following layer takes the previous
    /// layer's units as inputs unless it declares otherwise, in which case the declared count
    /// must match.
    pub fn with_rng<R: Rng + ?Sized>(specs: &[LayerSpec], rng: &mut R) -> Result<Self, Error> {
        if specs.is_empty() {
            return Err(Error::EmptyNetwork);
        }

        let mut layers = Vec::with_capacity(specs.len());
        let mut previous_units = None;

        for (i, spec) in specs.iter().enumerate() {
            let num_inputs = match (spec.inputs, previous_units) {
                (Some(inputs), Some(previous)) if inputs != previous => {
                    return Err(Error::DimensionMismatch(previous, inputs));
                }
                (Some(inputs), _) if inputs > 0 => inputs,
                (_, Some(previous)) => previous,
                (_, None) => return Err(Error::MissingInputSize),
            };

            if spec.units == 0 {
                return Err(Error::InvalidUnitCount(i));
            }

            layers.push(Layer::new(spec, num_inputs, rng)?);
            previous_units = Some(spec.units);
        }

        Self::from_layers(layers)
    }

    /// Assembles a network from existing layers, checking that each layer takes the previous
    /// layer's units as inputs and that the value ranges fit the network inputs and outputs.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, Error> {
        if layers.is_empty() {
            return Err(Error::EmptyNetwork);
        }

        for (i, layer) in layers.iter().enumerate() {
            if layer.num_units() == 0 {
                return Err(Error::InvalidUnitCount(i));
            }
        }

        for pair in layers.windows(2) {
            if pair[1].num_inputs() != pair[0].num_units() {
                return Err(Error::DimensionMismatch(
                    pair[0].num_units(),
                    pair[1].num_inputs(),
                ));
            }
        }

        // The first layer maps network inputs, every other layer its own outputs
        for (i, layer) in layers.iter().enumerate() {
            let expected = if i == 0 {
                layer.num_inputs()
            } else {
                layer.num_units()
            };
            let found = layer.range().len();

            if found != 0 && found != expected {
                return Err(Error::DimensionMismatch(expected, found));
            }
        }

        // A single layer uses its table for both the network inputs and outputs
        if let [layer] = layers.as_slice() {
            if !layer.range().is_empty() && layer.num_inputs() != layer.num_units() {
                return Err(Error::DimensionMismatch(layer.num_inputs(), layer.num_units()));
            }
        }

        Ok(Self { layers, loss: 0.0 })
    }

    /// Returns the layers of this network in propagation order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns a mutable reference to the layer at `index`, if it exists.
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Returns the number of inputs required by the network.
    pub fn num_inputs(&self) -> usize {
        self.input_layer().num_inputs()
    }

    /// Returns the number of network outputs.
    pub fn num_outputs(&self) -> usize {
        self.output_layer().num_units()
    }

    /// Returns the mean loss of the last [`Network::learns`] or [`Network::learns_raw`] call.
    pub fn loss(&self) -> f64 {
        self.loss
    }

    // `from_layers` guarantees at least one layer, so these can't fail
    fn input_layer(&self) -> &Layer {
        &self.layers[0]
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Evaluates the network with raw inputs, returning the raw outputs of the last layer.
    pub fn think_raw(&mut self, inputs: &[f64]) -> Result<Vec<f64>, Error> {
        let mut layers = self.layers.iter_mut();
        // `layers` is never empty
        let mut outputs = match layers.next() {
            Some(first) => first.think(inputs)?,
            None => return Err(Error::EmptyNetwork),
        };

        for layer in layers {
            outputs = layer.think(&outputs)?;
        }

        Ok(outputs)
    }

    /// Evaluates the network with arbitrary inputs, returning arbitrary outputs. Values are
    /// converted through the value ranges of the first and last layers.
    pub fn think(&mut self, inputs: &[f64]) -> Result<Vec<f64>, Error> {
        let raw = self.input_values_to_raw(inputs)?;
        let outputs = self.think_raw(&raw)?;
        self.output_values_from_raw(&outputs)
    }

    /// Converts arbitrary input values to raw values using the first layer's value ranges.
    pub fn input_values_to_raw(&self, inputs: &[f64]) -> Result<Vec<f64>, Error> {
        range::convert(inputs, self.input_layer().range(), Direction::ToRaw)
    }

    /// Converts arbitrary output values to raw values using the last layer's value ranges.
    pub fn output_values_to_raw(&self, outputs: &[f64]) -> Result<Vec<f64>, Error> {
        range::convert(outputs, self.output_layer().range(), Direction::ToRaw)
    }

    /// Converts raw output values to arbitrary values using the last layer's value ranges.
    pub fn output_values_from_raw(&self, outputs: &[f64]) -> Result<Vec<f64>, Error> {
        range::convert(outputs, self.output_layer().range(), Direction::FromRaw)
    }

    /// Sets the learning rate of every layer.
    pub fn set_rate(&mut self, rate: f64) {
        for layer in &mut self.layers {
            layer.set_rate(rate);
        }
    }

    /// Sets the momentum factor of every layer.
    pub fn set_momentum(&mut self, momentum: f64) {
        for layer in &mut self.layers {
            layer.set_momentum(momentum);
        }
    }

    /// Replaces each weight and bias of the network, independently with the given probability,
    /// by a fresh random value.
    pub fn mutate<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) {
        for layer in &mut self.layers {
            layer.mutate(probability, rng);
        }
    }

    /// Returns a child network whose weights and biases each come from either `self` or
    /// `other`, taking the value of `self` with probability `dominant`.
    ///
    /// Both networks must have the same shape.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        other: &Network,
        dominant: f64,
        rng: &mut R,
    ) -> Result<Network, Error> {
        if other.layers.len() != self.layers.len() {
            return Err(Error::DimensionMismatch(
                self.layers.len(),
                other.layers.len(),
            ));
        }

        let layers = self
            .layers
            .iter()
            .zip(&other.layers)
            .map(|(a, b)| a.crossover(b, dominant, rng))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { layers, loss: 0.0 })
    }

    /// Randomizes every weight and bias and clears the training history.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for layer in &mut self.layers {
            layer.reset(rng);
        }
    }
}

#[cfg(feature = "json")]
impl Network {
    /// Encodes the network's weights, biases, activations, losses and value ranges. Learning
    /// rates, momentum factors and training history are not saved.
    pub fn export(&self) -> Result<Vec<u8>, encoding::Error> {
        encoding::to_vec(self.to_serializable())
    }

    /// Decodes a network previously encoded with [`Network::export`]. Learning rates and
    /// momentum factors take their default values.
    pub fn import(bytes: &[u8]) -> Result<Self, encoding::Error> {
        encoding::load_slice(bytes)
    }

    /// Saves the network to a string. See [`Network::export`].
    pub fn to_string(&self) -> Result<String, encoding::Error> {
        encoding::to_string(self.to_serializable())
    }

    /// Loads a previously-saved network from a string.
    pub fn load_str(s: &str) -> Result<Self, encoding::Error> {
        encoding::load_str(s)
    }

    /// Saves the network to a file.
    ///
    /// Recursively creates missing directories if `create_dirs` is `true`.
    pub fn to_file<P: AsRef<Path>>(
        &self,
        path: P,
        create_dirs: bool,
    ) -> Result<(), encoding::Error> {
        encoding::to_file(self.to_serializable(), path, create_dirs)
    }

    /// Loads a previously-saved network from a file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, encoding::Error> {
        encoding::load_file(path)
    }

    /// Deletes a previously-saved network file.
    pub fn delete_file<P: AsRef<Path>>(path: P) -> Result<(), encoding::Error> {
        encoding::delete_file(path)
    }

    /// Converts the network to a serializable format. This can be used to save it in a format
    /// other than JSON. See [`PortableNetwork`][encoding::PortableNetwork] for deserialization
    /// from different formats.
    pub fn to_serializable(&self) -> encoding::PortableNetwork {
        encoding::v1::Data::new(self).into()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::activation::Activation;
    use crate::neuron::Neuron;

    pub(crate) fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn xor_specs() -> Vec<LayerSpec> {
        vec![
            LayerSpec::new(3).inputs(2),
            LayerSpec::new(3),
            LayerSpec::new(1),
        ]
    }

    /// Returns every weight and bias of the network in order.
    pub(crate) fn parameters(network: &Network) -> Vec<f64> {
        network
            .layers()
            .iter()
            .flat_map(|layer| layer.neurons())
            .flat_map(|neuron| neuron.weights().iter().copied().chain(Some(neuron.bias())))
            .collect()
    }

    fn linear_layer(neurons: Vec<Neuron>) -> Layer {
        Layer::from_parts(neurons, Activation::Linear, None, 0.01, 0.0, Vec::new()).unwrap()
    }

    #[test]
    fn test_build_threads_unit_counts() {
        let specs = vec![
            LayerSpec::new(5).inputs(4),
            LayerSpec::new(7),
            LayerSpec::new(2).inputs(7),
            LayerSpec::new(1),
        ];
        let net = Network::with_rng(&specs, &mut rng()).unwrap();

        assert_eq!(4, net.layers().len());
        assert_eq!(4, net.num_inputs());
        assert_eq!(1, net.num_outputs());
        for pair in net.layers().windows(2) {
            assert_eq!(pair[0].num_units(), pair[1].num_inputs());
        }
    }

    #[test]
    fn test_build_errors() {
        assert_eq!(
            Error::EmptyNetwork,
            Network::with_rng(&[], &mut rng()).unwrap_err()
        );
        assert_eq!(
            Error::MissingInputSize,
            Network::with_rng(&[LayerSpec::new(2)], &mut rng()).unwrap_err()
        );
        assert_eq!(
            Error::MissingInputSize,
            Network::with_rng(&[LayerSpec::new(2).inputs(0)], &mut rng()).unwrap_err()
        );
        assert_eq!(
            Error::InvalidUnitCount(1),
            Network::with_rng(&[LayerSpec::new(2).inputs(1), LayerSpec::new(0)], &mut rng())
                .unwrap_err()
        );
        assert_eq!(
            Error::DimensionMismatch(2, 3),
            Network::with_rng(
                &[LayerSpec::new(2).inputs(1), LayerSpec::new(1).inputs(3)],
                &mut rng()
            )
            .unwrap_err()
        );
        assert_eq!(
            Error::DimensionMismatch(2, 1),
            Network::with_rng(
                &[LayerSpec::new(3).inputs(2).range(vec![(0.0, 1.0)])],
                &mut rng()
            )
            .unwrap_err()
        );
    }

    #[test]
    fn test_single_layer_range() {
        // The one table must fit both the inputs and the outputs
        assert_eq!(
            Error::DimensionMismatch(2, 1),
            Network::with_rng(
                &[LayerSpec::new(1).inputs(2).range(vec![(0.0, 10.0); 2])],
                &mut rng()
            )
            .unwrap_err()
        );

        let mut net = Network::with_rng(
            &[LayerSpec::new(2)
                .inputs(2)
                .activation(Activation::Tanh)
                .range(vec![(0.0, 10.0); 2])],
            &mut rng(),
        )
        .unwrap();

        let output = net.think(&[5.0, 10.0]).unwrap();
        assert_eq!(2, output.len());
        assert!(output.iter().all(|v| (0.0..=10.0).contains(v)));
        net.learn(&[5.0, 10.0], &[2.0, 8.0]).unwrap();
    }

    #[test]
    fn test_think_raw_zero_weights() {
        let layers = vec![
            linear_layer(vec![Neuron::from_parts(vec![0.0; 3], 0.0); 4]),
            linear_layer(vec![Neuron::from_parts(vec![0.0; 4], 0.0); 2]),
        ];
        let mut net = Network::from_layers(layers).unwrap();

        for inputs in [[1.0, 2.0, 3.0], [-7.5, 0.0, 1e6]] {
            assert_eq!(vec![0.0, 0.0], net.think_raw(&inputs).unwrap());
        }
    }

    #[test]
    fn test_think_raw() {
        let layers = vec![
            linear_layer(vec![
                Neuron::from_parts(vec![1.0, 2.0], 0.5),
                Neuron::from_parts(vec![-1.0, 1.0], 0.0),
            ]),
            Layer::from_parts(
                vec![Neuron::from_parts(vec![1.0, 1.0], -1.0)],
                Activation::Sigmoid,
                None,
                0.01,
                0.0,
                Vec::new(),
            )
            .unwrap(),
        ];
        let mut net = Network::from_layers(layers).unwrap();

        // Hidden: [1 + 4 + 0.5, -1 + 2] = [5.5, 1.0], output: sigmoid(5.5 + 1.0 - 1.0)
        let output = net.think_raw(&[1.0, 2.0]).unwrap();
        assert_eq!(1, output.len());
        assert_approx_eq!(0.9959298622841039, output[0]);

        assert_eq!(
            Error::DimensionMismatch(2, 1),
            net.think_raw(&[1.0]).unwrap_err()
        );
    }

    #[test]
    fn test_input_values_to_raw() {
        let specs = vec![
            LayerSpec::new(2).inputs(1).range(vec![(0.0, 255.0)]),
            LayerSpec::new(1),
        ];
        let net = Network::with_rng(&specs, &mut rng()).unwrap();

        assert_eq!(&[ValueRange::new(0.0, 255.0, 0.0, 1.0)], net.layers()[0].range());
        assert_approx_eq!(1.0, net.input_values_to_raw(&[255.0]).unwrap()[0]);
        assert_approx_eq!(0.0, net.input_values_to_raw(&[0.0]).unwrap()[0]);
        assert_eq!(
            Error::DimensionMismatch(1, 2),
            net.input_values_to_raw(&[0.0, 1.0]).unwrap_err()
        );
    }

    #[test]
    fn test_output_values_round_trip() {
        let specs = vec![
            LayerSpec::new(2).inputs(2),
            LayerSpec::new(2)
                .activation(Activation::Tanh)
                .range(vec![(0.0, 100.0), (-50.0, 50.0)]),
        ];
        let mut net = Network::with_rng(&specs, &mut rng()).unwrap();

        let values = [25.0, 10.0];
        let raw = net.output_values_to_raw(&values).unwrap();
        assert_approx_eq!(-0.5, raw[0]);
        assert_approx_eq!(0.2, raw[1]);

        let back = net.output_values_from_raw(&raw).unwrap();
        assert_approx_eq!(values[0], back[0]);
        assert_approx_eq!(values[1], back[1]);

        // `think` reports outputs in the arbitrary domain
        let raw_output = net.think_raw(&[0.3, 0.6]).unwrap();
        let output = net.think(&[0.3, 0.6]).unwrap();
        let expected = net.output_values_from_raw(&raw_output).unwrap();
        assert_approx_eq!(expected[0], output[0]);
        assert_approx_eq!(expected[1], output[1]);
    }

    #[test]
    fn test_set_rate_momentum() {
        let mut net = Network::with_rng(&xor_specs(), &mut rng()).unwrap();

        net.set_rate(0.25);
        net.set_momentum(0.5);
        for layer in net.layers() {
            assert_approx_eq!(0.25, layer.rate());
            assert_approx_eq!(0.5, layer.momentum());
        }
    }

    #[test]
    fn test_mutate() {
        let mut rng = rng();
        let mut net = Network::with_rng(&xor_specs(), &mut rng).unwrap();
        let before = parameters(&net);

        net.mutate(0.0, &mut rng);
        assert_eq!(before, parameters(&net));

        net.mutate(1.0, &mut rng);
        for (old, new) in before.iter().zip(parameters(&net)) {
            assert_ne!(*old, new);
        }
    }

    #[test]
    fn test_crossover() {
        let mut rng = rng();
        let a = Network::with_rng(&xor_specs(), &mut rng).unwrap();
        let b = Network::with_rng(&xor_specs(), &mut rng).unwrap();

        let child = a.crossover(&b, 0.5, &mut rng).unwrap();
        let (pa, pb) = (parameters(&a), parameters(&b));
        for (i, value) in parameters(&child).into_iter().enumerate() {
            assert!(value == pa[i] || value == pb[i]);
        }

        let shallow = Network::with_rng(&[LayerSpec::new(3).inputs(2)], &mut rng).unwrap();
        assert_eq!(
            Error::DimensionMismatch(3, 1),
            a.crossover(&shallow, 0.5, &mut rng).unwrap_err()
        );
    }

    #[test]
    fn test_clone_and_reset() {
        let mut rng = rng();
        let mut net = Network::with_rng(&xor_specs(), &mut rng).unwrap();
        let clone = net.clone();
        assert_eq!(parameters(&net), parameters(&clone));

        net.reset(&mut rng);
        assert_ne!(parameters(&net), parameters(&clone));
        assert!(parameters(&net).iter().all(|w| (-1.0..=1.0).contains(w)));
    }
}
