//! A portable encoding for [`Network`]s. See [`PortableNetwork`].
//!
//! Only the persistent state of a network is encoded: the weights and bias of every neuron and
//! each layer's activation, loss and value ranges. Learning rates, momentum factors and
//! training history are left out, so a loaded network starts training afresh with the default
//! learning rate and momentum factor.

mod error;
mod functions;
pub mod v1;

use serde::{Deserialize, Serialize};

use crate::Network;

pub use error::Error;
pub(crate) use functions::*;

/// The latest encoding version.
pub type Data = v1::Data;

/// The portable encoding type, which can be serialized and deserialized to save and load
/// [`Network`]s.
///
/// [`Network::load_file`], [`Network::to_file`], and related methods are more convenient to use,
/// but this type must be used when deserializing from a format other than JSON. See
/// [`Network::to_serializable`] for serialization to different formats.
///
/// # Examples
///
/// ```
/// # let string =
/// #     include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/linear_v1.json"));
/// use neurite::encoding::PortableNetwork;
///
/// // Any format supported by `serde` can be used here
/// let deserialized: PortableNetwork = serde_json::from_str(&string).unwrap();
/// let network = deserialized.build().unwrap();
///
/// assert_eq!(2, network.num_inputs());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "version", content = "network")]
pub enum PortableNetwork {
    /// Version one of the encoding.
    #[serde(rename = "1")]
    V1(v1::Data),
}

impl PortableNetwork {
    /// Builds the `PortableNetwork` into a [`Network`].
    pub fn build(self) -> Result<Network, Error> {
        match self {
            Self::V1(data) => data.build().map_err(Into::into),
        }
    }
}

impl From<v1::Data> for PortableNetwork {
    fn from(data: v1::Data) -> Self {
        Self::V1(data)
    }
}
