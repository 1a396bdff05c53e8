//! A single neuron: a weight per input, a bias, and the state needed to train them.

use rand::Rng;

use crate::activation::Activation;

/// A neuron of a [`Layer`][crate::Layer].
///
/// The neuron itself doesn't know its layer. The layer's activation, learning rate and momentum
/// factor are passed in by the layer whenever they're needed.
#[derive(Debug)]
pub struct Neuron {
    weights: Vec<f64>,
    bias: f64,
    // One momentum per weight, plus a final one for the bias
    momentums: Vec<f64>,
    // The inputs of the last evaluation, needed to compute weight gradients
    last_inputs: Vec<f64>,
    // The output of the last evaluation
    pub(crate) activation: f64,
    pub(crate) delta: f64,
    pub(crate) error: f64,
}

impl Neuron {
    /// Returns a new `Neuron` taking `num_inputs` inputs, with weights and bias drawn uniformly
    /// from `[-1, 1]`.
    pub fn new<R: Rng + ?Sized>(num_inputs: usize, rng: &mut R) -> Self {
        let weights = (0..num_inputs).map(|_| random_weight(rng)).collect();
        let bias = random_weight(rng);

        Self::from_parts(weights, bias)
    }

    /// Returns a new `Neuron` with the given weights and bias and no training history.
    pub fn from_parts(weights: Vec<f64>, bias: f64) -> Self {
        let num_inputs = weights.len();

        Self {
            weights,
            bias,
            momentums: vec![0.0; num_inputs + 1],
            last_inputs: vec![0.0; num_inputs],
            activation: 0.0,
            delta: 0.0,
            error: 0.0,
        }
    }

    /// Returns the number of inputs this `Neuron` takes.
    pub fn num_inputs(&self) -> usize {
        self.weights.len()
    }

    /// Returns the weights of this `Neuron`.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns the bias of this `Neuron`.
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Returns the output of the last evaluation.
    pub fn activation(&self) -> f64 {
        self.activation
    }

    /// Evaluates the neuron. `inputs` must have exactly one value per weight; the caller checks
    /// this.
    pub(crate) fn think(&mut self, inputs: &[f64], activation: Activation) -> f64 {
        debug_assert_eq!(inputs.len(), self.weights.len());

        let mut sum = self.bias;

        for ((weight, input), last) in self
            .weights
            .iter()
            .zip(inputs)
            .zip(self.last_inputs.iter_mut())
        {
            sum += input * weight;
            *last = *input;
        }

        self.activation = activation.apply(sum);
        self.activation
    }

    /// Folds `gradient` into the momentum at `index` and returns the step to add to the matching
    /// weight. `index == num_inputs()` refers to the bias.
    pub(crate) fn apply_gradient(&mut self, index: usize, gradient: f64, momentum: f64) -> f64 {
        let slot = &mut self.momentums[index];
        *slot = gradient + momentum * *slot;
        *slot
    }

    /// Applies one gradient descent step using the `delta` computed by backpropagation.
    pub(crate) fn descend(&mut self, rate: f64, momentum: f64) {
        let delta = self.delta;

        for w in 0..self.weights.len() {
            let gradient = self.last_inputs[w] * delta * rate;
            self.weights[w] += self.apply_gradient(w, gradient, momentum);
        }

        let bias_index = self.weights.len();
        self.bias += self.apply_gradient(bias_index, delta * rate, momentum);
    }

    /// Replaces each weight and the bias, independently with the given probability, by a fresh
    /// random value. The momentum of every replaced value is cleared.
    pub fn mutate<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) {
        for (weight, momentum) in self.weights.iter_mut().zip(self.momentums.iter_mut()) {
            if rng.gen::<f64>() < probability {
                *weight = random_weight(rng);
                *momentum = 0.0;
            }
        }

        if rng.gen::<f64>() < probability {
            self.bias = random_weight(rng);
            if let Some(momentum) = self.momentums.last_mut() {
                *momentum = 0.0;
            }
        }
    }

    /// Returns a child taking each weight and the bias from either `self` or `other`. Each value
    /// comes from `self` with probability `dominant`.
    ///
    /// Both neurons must take the same number of inputs; the caller checks this.
    pub fn crossover<R: Rng + ?Sized>(&self, other: &Neuron, dominant: f64, rng: &mut R) -> Neuron {
        debug_assert_eq!(self.weights.len(), other.weights.len());

        let mut pick = |a: f64, b: f64| if rng.gen::<f64>() < dominant { a } else { b };

        let weights = self
            .weights
            .iter()
            .zip(&other.weights)
            .map(|(a, b)| pick(*a, *b))
            .collect();
        let bias = pick(self.bias, other.bias);

        Neuron::from_parts(weights, bias)
    }

    /// Randomizes all weights and the bias and clears the training history.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for weight in &mut self.weights {
            *weight = random_weight(rng);
        }
        self.bias = random_weight(rng);

        for momentum in &mut self.momentums {
            *momentum = 0.0;
        }
    }
}

/// Clones the weights and bias only. The clone starts without momentum or cached values.
impl Clone for Neuron {
    fn clone(&self) -> Self {
        Neuron::from_parts(self.weights.clone(), self.bias)
    }
}

/// Draws a weight uniformly from `[-1, 1]`.
pub(crate) fn random_weight<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-1.0..=1.0)
}
