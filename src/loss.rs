//! Loss functions reported by training.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::network::Error;

/// Represents which loss an output [`Layer`][crate::Layer] reports while learning.
///
/// Backpropagation always descends the squared error; the loss only decides how the per-unit
/// errors are summarized into the value returned by
/// [`Network::learn_raw`][crate::Network::learn_raw].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Loss {
    /// Mean squared error over the output units.
    Mse,
}

impl Default for Loss {
    fn default() -> Self {
        Loss::Mse
    }
}

impl Loss {
    /// Reduces the per-unit errors (`expected - actual`) of one example to a single loss value.
    pub fn reduce<I: IntoIterator<Item = f64>>(&self, errors: I) -> f64 {
        match self {
            Loss::Mse => {
                let (sum, count) = errors
                    .into_iter()
                    .fold((0.0, 0usize), |(sum, count), e| (sum + e * e, count + 1));

                if count == 0 {
                    0.0
                } else {
                    sum / count as f64
                }
            }
        }
    }

    /// Returns the name of this loss as used in saved networks.
    pub fn name(&self) -> &'static str {
        match self {
            Loss::Mse => "mse",
        }
    }
}

impl FromStr for Loss {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "mse" => Ok(Loss::Mse),
            other => Err(Error::InvalidLoss(other.to_string())),
        }
    }
}

impl fmt::Display for Loss {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
