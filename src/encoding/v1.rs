//! Version one of the encoding.

use serde::{Deserialize, Serialize};

use crate::layer::{Layer, DEFAULT_MOMENTUM, DEFAULT_RATE};
use crate::network::{Error, ValueRange};
use crate::neuron::Neuron;
use crate::{Activation, Loss, Network};

/// A type for encoding a [`Network`][crate::Network] in version one of the format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub layers: Vec<LayerData>,
}

/// An encoded [`Layer`][crate::Layer].
///
/// The activation is omitted when it is the default (sigmoid), the loss when none was given, and
/// the range when the layer doesn't convert values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    pub neurons: Vec<NeuronData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub range: Vec<ValueRange>,
}

/// An encoded [`Neuron`][crate::Neuron].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeuronData {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl Data {
    /// Encodes the persistent state of `network`.
    pub fn new(network: &Network) -> Self {
        let layers = network
            .layers()
            .iter()
            .map(|layer| LayerData {
                neurons: layer
                    .neurons()
                    .iter()
                    .map(|neuron| NeuronData {
                        weights: neuron.weights().to_vec(),
                        bias: neuron.bias(),
                    })
                    .collect(),
                activation: if layer.activation().is_default() {
                    None
                } else {
                    Some(layer.activation().name().to_string())
                },
                loss: layer.loss().map(|loss| loss.name().to_string()),
                range: layer.range().to_vec(),
            })
            .collect();

        Self { layers }
    }

    /// Rebuilds the [`Network`]. Input and unit counts are recovered from the weights, learning
    /// rates and momentum factors take their defaults, and no training history is restored.
    pub fn build(self) -> Result<Network, Error> {
        let layers = self
            .layers
            .into_iter()
            .enumerate()
            .map(|(i, layer)| {
                if layer.neurons.is_empty() {
                    return Err(Error::InvalidUnitCount(i));
                }

                let activation = layer
                    .activation
                    .as_deref()
                    .unwrap_or_default()
                    .parse::<Activation>()?;
                let loss = layer
                    .loss
                    .as_deref()
                    .map(str::parse::<Loss>)
                    .transpose()?;
                let neurons = layer
                    .neurons
                    .into_iter()
                    .map(|n| Neuron::from_parts(n.weights, n.bias))
                    .collect();

                Layer::from_parts(
                    neurons,
                    activation,
                    loss,
                    DEFAULT_RATE,
                    DEFAULT_MOMENTUM,
                    layer.range,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Network::from_layers(layers)
    }
}
