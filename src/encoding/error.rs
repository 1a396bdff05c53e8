use std::{error, fmt, io};

use crate::network;

/// An error while loading or saving a [`Network`][crate::Network] from/to the encoding.
///
/// Data that parses but doesn't describe a valid network keeps the reason as its source.
///
/// # Examples
///
/// ```
/// use std::error::Error as _;
///
/// use neurite::encoding::Error;
/// use neurite::Network;
///
/// let error = Network::load_str(r#"{"version": "1", "network": {"layers": []}}"#).unwrap_err();
///
/// assert!(matches!(error, Error::Network(neurite::Error::EmptyNetwork)));
/// assert_eq!("network has no layers", error.source().unwrap().to_string());
/// ```
#[derive(Debug)]
pub enum Error {
    /// An error during serialization or deserialization.
    Serde(serde_json::Error),
    /// An error while reading from, writing to or deleting a file.
    Io(io::Error),
    /// The decoded data does not describe a valid [`Network`][crate::Network].
    Network(network::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Serde(e) => write!(f, "de/serialization error: {}", e),
            Self::Io(e) => write!(f, "io error: {}", e),
            Self::Network(e) => write!(f, "network error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Serde(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Network(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<network::Error> for Error {
    fn from(e: network::Error) -> Self {
        Self::Network(e)
    }
}
