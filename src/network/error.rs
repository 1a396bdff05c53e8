//! The error type for creating, evaluating and training networks.

use std::{error, fmt};

/// The reason why a network couldn't be built or an operation on it failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// No layers were given.
    EmptyNetwork,
    /// The first layer does not declare its number of inputs.
    MissingInputSize,
    /// A layer has no units. Contains the index of the layer.
    InvalidUnitCount(usize),
    /// An evolution run was started without a number of epochs.
    MissingEpochs,
    /// An activation name is not recognized. Contains the name.
    InvalidActivation(String),
    /// A loss name is not recognized. Contains the name.
    InvalidLoss(String),
    /// A vector does not have the length required by a layer or range table. Contains the
    /// expected and the actual length.
    DimensionMismatch(usize, usize),
    /// A value range has equal bounds on one of its sides, so values can't be mapped through it.
    InvalidRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EmptyNetwork => write!(f, "network has no layers"),
            Self::MissingInputSize => write!(f, "first layer needs a defined number of inputs"),
            Self::InvalidUnitCount(index) => write!(f, "layer {} has no units", index),
            Self::MissingEpochs => write!(f, "number of epochs must be set to evolve"),
            Self::InvalidActivation(name) => write!(f, "invalid activation name {:?}", name),
            Self::InvalidLoss(name) => write!(f, "invalid loss name {:?}", name),
            Self::DimensionMismatch(expected, found) => write!(
                f,
                "dimension mismatch: expected {} values, found {}",
                expected, found
            ),
            Self::InvalidRange => write!(f, "value range has equal bounds"),
        }
    }
}

impl error::Error for Error {}
