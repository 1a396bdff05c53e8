//! Training of networks by backpropagation with momentum.

use super::{Error, Network};
use crate::layer::Layer;

impl Network {
    /// Trains the network on one example of raw values, returning the loss of the network's
    /// output *before* the update.
    ///
    /// Errors are propagated from the output layer towards the first layer. Once the errors of a
    /// layer are known, the layer after it takes a gradient step, so the first layer keeps its
    /// weights and only the layers after it learn.
    pub fn learn_raw(&mut self, inputs: &[f64], expected: &[f64]) -> Result<f64, Error> {
        self.check_example(inputs, expected)?;

        // Caches every neuron's inputs and output
        self.think_raw(inputs)?;

        Ok(backpropagate(&mut self.layers, expected))
    }

    /// Trains the network on one example of arbitrary values. Both vectors are converted to raw
    /// values before training; see [`Network::learn_raw`].
    pub fn learn(&mut self, inputs: &[f64], expected: &[f64]) -> Result<f64, Error> {
        let inputs = self.input_values_to_raw(inputs)?;
        let expected = self.output_values_to_raw(expected)?;
        self.learn_raw(&inputs, &expected)
    }

    /// Trains the network once on every `(inputs, outputs)` pair of raw values in order,
    /// returning the mean loss. The result is also kept as [`Network::loss`].
    ///
    /// An empty dataset has a loss of zero. If any pair doesn't fit the network, an error is
    /// returned before the network is changed.
    pub fn learns_raw(&mut self, dataset: &[(Vec<f64>, Vec<f64>)]) -> Result<f64, Error> {
        self.learns_with(dataset, true)
    }

    /// Trains the network once on every `(inputs, outputs)` pair of arbitrary values in order,
    /// returning the mean loss. The result is also kept as [`Network::loss`].
    ///
    /// An empty dataset has a loss of zero. If any pair doesn't fit the network, an error is
    /// returned before the network is changed.
    pub fn learns(&mut self, dataset: &[(Vec<f64>, Vec<f64>)]) -> Result<f64, Error> {
        self.learns_with(dataset, false)
    }

    fn learns_with(&mut self, dataset: &[(Vec<f64>, Vec<f64>)], raw: bool) -> Result<f64, Error> {
        // Every pair is checked before the first update
        let converted: Vec<(Vec<f64>, Vec<f64>)>;
        let dataset = if raw {
            for (inputs, outputs) in dataset {
                self.check_example(inputs, outputs)?;
            }
            dataset
        } else {
            converted = dataset
                .iter()
                .map(|(inputs, outputs)| {
                    let inputs = self.input_values_to_raw(inputs)?;
                    let outputs = self.output_values_to_raw(outputs)?;
                    self.check_example(&inputs, &outputs)?;
                    Ok((inputs, outputs))
                })
                .collect::<Result<_, Error>>()?;
            converted.as_slice()
        };

        let mut total = 0.0;

        for (inputs, outputs) in dataset {
            total += self.learn_raw(inputs, outputs)?;
        }

        self.loss = if dataset.is_empty() {
            0.0
        } else {
            total / dataset.len() as f64
        };

        Ok(self.loss)
    }

    fn check_example(&self, inputs: &[f64], outputs: &[f64]) -> Result<(), Error> {
        if outputs.len() != self.num_outputs() {
            return Err(Error::DimensionMismatch(self.num_outputs(), outputs.len()));
        }
        if inputs.len() != self.num_inputs() {
            return Err(Error::DimensionMismatch(self.num_inputs(), inputs.len()));
        }
        Ok(())
    }
}

/// Propagates the output error back through `layers` and updates their weights. The layers must
/// hold the cached state of an evaluation, and `expected` must have one value per output.
fn backpropagate(layers: &mut [Layer], expected: &[f64]) -> f64 {
    let last = layers.len() - 1;

    let output_layer = &mut layers[last];
    let activation = output_layer.activation();
    let loss = output_layer.loss().unwrap_or_default();

    for (neuron, target) in output_layer.neurons_mut().iter_mut().zip(expected) {
        neuron.error = target - neuron.activation;
        neuron.delta = activation.derivative(neuron.activation) * neuron.error;
    }

    let loss = loss.reduce(output_layer.neurons().iter().map(|n| n.error));

    for l in (0..last).rev() {
        let (head, tail) = layers.split_at_mut(l + 1);
        let layer = &mut head[l];
        let next = &mut tail[0];

        let activation = layer.activation();
        for (h, hidden) in layer.neurons_mut().iter_mut().enumerate() {
            // Uses the weights of `next` from before its update below
            hidden.error = next
                .neurons()
                .iter()
                .map(|n| n.weights()[h] * n.delta)
                .sum();
            hidden.delta = activation.derivative(hidden.activation) * hidden.error;
        }

        next.descend();
    }

    loss
}
