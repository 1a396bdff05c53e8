//! Handling of neuron activation functions.

use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::network::Error;

/// Represents which activation function a [`Layer`][crate::Layer] applies to its neurons.
///
/// Every variant carries a forward function and its derivative. The derivative is expressed in
/// terms of the activation's *output* rather than the weighted sum, so neurons only need to cache
/// their last output to be trained.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Activation {
    /// Identity function. Outputs `x`.
    Linear,
    /// Logistic function. Outputs `1 / (1 + exp(-x))`.
    #[cfg_attr(feature = "serde", serde(alias = ""))]
    Sigmoid,
    /// Hyperbolic tangent function. Outputs `tanh(x)`.
    Tanh,
    /// Rectified linear unit. Outputs `max(x, 0)`.
    Relu,
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Sigmoid
    }
}

impl Activation {
    /// Applies the activation function to the weighted sum `x`.
    pub fn apply<T: Float>(&self, x: T) -> T {
        match self {
            Activation::Linear => linear(x),
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => tanh(x),
            Activation::Relu => relu(x),
        }
    }

    /// Applies the derivative of the activation function, given the activation's output `a`.
    pub fn derivative<T: Float>(&self, a: T) -> T {
        match self {
            Activation::Linear => T::one(),
            Activation::Sigmoid => a * (T::one() - a),
            Activation::Tanh => T::one() - a * a,
            Activation::Relu => {
                if a > T::zero() {
                    T::one()
                } else {
                    T::zero()
                }
            }
        }
    }

    /// Returns the range of raw values this activation is expected to produce, if it declares
    /// one. Used to complete a layer's value ranges.
    ///
    /// The range of `Relu` is a scaling convention, not a bound on its output.
    pub fn range<T: Float>(&self) -> Option<(T, T)> {
        match self {
            Activation::Linear => None,
            Activation::Sigmoid | Activation::Relu => Some((T::zero(), T::one())),
            Activation::Tanh => Some((-T::one(), T::one())),
        }
    }

    /// Returns the name of this activation as used in saved networks.
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Linear => "linear",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::Relu => "relu",
        }
    }

    pub(crate) fn is_default(&self) -> bool {
        *self == Activation::default()
    }
}

impl FromStr for Activation {
    type Err = Error;

    /// Looks up an activation by name. The empty name selects `Sigmoid`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Activation::Linear),
            "" | "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "relu" => Ok(Activation::Relu),
            other => Err(Error::InvalidActivation(other.to_string())),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outputs `x`.
pub fn linear<T>(x: T) -> T {
    x
}

/// Logistic function. Outputs `1 / (1 + exp(-x))`.
pub fn sigmoid<T: Float>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

/// Outputs `tanh(x)`.
pub fn tanh<T: Float>(x: T) -> T {
    x.tanh()
}

/// Rectified linear unit. Outputs `max(0, x)`.
pub fn relu<T: Float>(x: T) -> T {
    x.max(T::zero())
}
