//! Layers of neurons and the specifications they're built from.

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::loss::Loss;
use crate::network::{Error, ValueRange};
use crate::neuron::Neuron;

/// The learning rate of a layer unless one is given.
pub const DEFAULT_RATE: f64 = 0.001;
/// The momentum factor of a layer unless one is given.
pub const DEFAULT_MOMENTUM: f64 = 0.999;

/// A description of a layer, used to build a [`Network`][crate::Network].
///
/// Only the first layer must declare its inputs; every following layer takes the previous
/// layer's units as inputs unless it declares otherwise.
///
/// # Examples
///
/// ```
/// use neurite::{Activation, LayerSpec, Network};
///
/// let network = Network::new(&[
///     LayerSpec::new(3).inputs(2),
///     LayerSpec::new(3).activation(Activation::Tanh),
///     LayerSpec::new(1).range(vec![(0.0, 100.0)]),
/// ])
/// .unwrap();
///
/// assert_eq!(2, network.num_inputs());
/// assert_eq!(1, network.num_outputs());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerSpec {
    pub inputs: Option<usize>,
    pub units: usize,
    pub activation: Option<Activation>,
    pub loss: Option<Loss>,
    pub rate: Option<f64>,
    pub momentum: Option<f64>,
    /// The arbitrary `(min, max)` of each value; see [`Layer::range`]. A network made of one
    /// layer uses the same table for its inputs and outputs, so `inputs` must equal `units`.
    pub range: Vec<(f64, f64)>,
}

impl LayerSpec {
    /// Returns a spec for a layer of `units` neurons with every other setting left at its
    /// default.
    pub fn new(units: usize) -> Self {
        Self {
            units,
            ..Default::default()
        }
    }

    pub fn inputs(mut self, inputs: usize) -> Self {
        self.inputs = Some(inputs);
        self
    }

    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = Some(activation);
        self
    }

    pub fn loss(mut self, loss: Loss) -> Self {
        self.loss = Some(loss);
        self
    }

    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn momentum(mut self, momentum: f64) -> Self {
        self.momentum = Some(momentum);
        self
    }

    pub fn range(mut self, range: Vec<(f64, f64)>) -> Self {
        self.range = range;
        self
    }
}

/// An ordered set of neurons sharing one activation, learning rate and momentum factor.
#[derive(Clone, Debug)]
pub struct Layer {
    num_inputs: usize,
    neurons: Vec<Neuron>,
    activation: Activation,
    loss: Option<Loss>,
    rate: f64,
    momentum: f64,
    range: Vec<ValueRange>,
}

impl Layer {
    /// Builds a layer from its spec, taking `num_inputs` inputs. Weights and biases are drawn
    /// from `rng`.
    ///
    /// The declared `(min, max)` ranges are completed with the activation's own range. If the
    /// activation declares none, the layer passes values through unchanged.
    pub fn new<R: Rng + ?Sized>(
        spec: &LayerSpec,
        num_inputs: usize,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let activation = spec.activation.unwrap_or_default();

        let range = match activation.range::<f64>() {
            Some((to_min, to_max)) => spec
                .range
                .iter()
                .map(|&(from_min, from_max)| ValueRange::new(from_min, from_max, to_min, to_max))
                .collect(),
            None => Vec::new(),
        };

        let neurons = (0..spec.units)
            .map(|_| Neuron::new(num_inputs, rng))
            .collect();

        Self::assemble(
            num_inputs,
            neurons,
            activation,
            spec.loss,
            spec.rate.unwrap_or(DEFAULT_RATE),
            spec.momentum.unwrap_or(DEFAULT_MOMENTUM),
            range,
        )
    }

    /// Assembles a layer from existing neurons. The number of inputs is taken from the first
    /// neuron; every neuron must take that many.
    pub fn from_parts(
        neurons: Vec<Neuron>,
        activation: Activation,
        loss: Option<Loss>,
        rate: f64,
        momentum: f64,
        range: Vec<ValueRange>,
    ) -> Result<Self, Error> {
        let num_inputs = neurons.first().map(Neuron::num_inputs).unwrap_or(0);

        if let Some(bad) = neurons.iter().find(|n| n.num_inputs() != num_inputs) {
            return Err(Error::DimensionMismatch(num_inputs, bad.num_inputs()));
        }

        Self::assemble(num_inputs, neurons, activation, loss, rate, momentum, range)
    }

    fn assemble(
        num_inputs: usize,
        neurons: Vec<Neuron>,
        activation: Activation,
        loss: Option<Loss>,
        rate: f64,
        momentum: f64,
        range: Vec<ValueRange>,
    ) -> Result<Self, Error> {
        for r in &range {
            r.validate()?;
        }

        Ok(Self {
            num_inputs,
            neurons,
            activation,
            loss,
            rate,
            momentum,
            range,
        })
    }

    /// Returns the number of inputs taken by this layer.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Returns the number of neurons in this layer.
    pub fn num_units(&self) -> usize {
        self.neurons.len()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Changes the activation function of this layer.
    pub fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }

    /// Changes the activation function of this layer by name.
    pub fn set_activation_name(&mut self, name: &str) -> Result<(), Error> {
        self.activation = name.parse()?;
        Ok(())
    }

    /// Returns the loss reported by this layer if it was given one.
    pub fn loss(&self) -> Option<Loss> {
        self.loss
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn set_momentum(&mut self, momentum: f64) {
        self.momentum = momentum;
    }

    /// Returns the value ranges of this layer. Empty unless the layer converts arbitrary values.
    ///
    /// The first layer of a network holds one range per network input, the last layer one per
    /// network output.
    pub fn range(&self) -> &[ValueRange] {
        &self.range
    }

    /// Evaluates every neuron of the layer with the same inputs.
    pub fn think(&mut self, inputs: &[f64]) -> Result<Vec<f64>, Error> {
        if inputs.len() != self.num_inputs {
            return Err(Error::DimensionMismatch(self.num_inputs, inputs.len()));
        }

        let activation = self.activation;
        Ok(self
            .neurons
            .iter_mut()
            .map(|neuron| neuron.think(inputs, activation))
            .collect())
    }

    /// Applies one gradient descent step to every neuron of the layer.
    pub(crate) fn descend(&mut self) {
        let (rate, momentum) = (self.rate, self.momentum);

        for neuron in &mut self.neurons {
            neuron.descend(rate, momentum);
        }
    }

    /// Mutates every neuron with the given probability. See [`Neuron::mutate`].
    pub fn mutate<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) {
        for neuron in &mut self.neurons {
            neuron.mutate(probability, rng);
        }
    }

    /// Returns a child layer with the configuration of `self` and neurons crossed over unit by
    /// unit. See [`Neuron::crossover`].
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        other: &Layer,
        dominant: f64,
        rng: &mut R,
    ) -> Result<Layer, Error> {
        if other.num_units() != self.num_units() {
            return Err(Error::DimensionMismatch(self.num_units(), other.num_units()));
        }
        if other.num_inputs != self.num_inputs {
            return Err(Error::DimensionMismatch(self.num_inputs, other.num_inputs));
        }

        let neurons = self
            .neurons
            .iter()
            .zip(&other.neurons)
            .map(|(a, b)| a.crossover(b, dominant, rng))
            .collect();

        Ok(Layer {
            num_inputs: self.num_inputs,
            neurons,
            activation: self.activation,
            loss: self.loss,
            rate: self.rate,
            momentum: self.momentum,
            range: self.range.clone(),
        })
    }

    /// Randomizes every neuron and clears their training history.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for neuron in &mut self.neurons {
            neuron.reset(rng);
        }
    }
}
