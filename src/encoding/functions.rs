//! Functions that wrap up the encoding functionality.

use log::debug;

use std::fs::{self, DirBuilder, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::{Error, PortableNetwork};
use crate::network::Network;

/// Loads encoded data of any version from a string.
pub(crate) fn load_str(s: &str) -> Result<Network, Error> {
    serde_json::from_str::<PortableNetwork>(s)?.build()
}

/// Loads encoded data of any version from bytes.
pub(crate) fn load_slice(bytes: &[u8]) -> Result<Network, Error> {
    serde_json::from_slice::<PortableNetwork>(bytes)?.build()
}

/// Loads encoded data of any version from a file.
pub(crate) fn load_file<P: AsRef<Path>>(path: P) -> Result<Network, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let network = serde_json::from_reader::<_, PortableNetwork>(reader)?.build()?;

    debug!("loaded network from {}", path.display());
    Ok(network)
}

/// Encodes data in a specific encoding version to a string.
pub(crate) fn to_string(serializable: PortableNetwork) -> Result<String, Error> {
    serde_json::to_string_pretty(&serializable).map_err(Into::into)
}

/// Encodes data in a specific encoding version to compact bytes.
pub(crate) fn to_vec(serializable: PortableNetwork) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(&serializable).map_err(Into::into)
}

/// Encodes data in a specific encoding version to a file.
///
/// Recursively creates missing directories if `create_dirs` is `true`.
pub(crate) fn to_file<P: AsRef<Path>>(
    serializable: PortableNetwork,
    path: P,
    create_dirs: bool,
) -> Result<(), Error> {
    let path = path.as_ref();

    if create_dirs {
        if let Some(parent) = path.parent() {
            DirBuilder::new().recursive(true).create(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &serializable)?;

    writer.flush()?;

    debug!("saved network to {}", path.display());
    Ok(())
}

/// Deletes a previously saved file.
pub(crate) fn delete_file<P: AsRef<Path>>(path: P) -> Result<(), Error> {
    let path = path.as_ref();
    fs::remove_file(path)?;

    debug!("deleted network file {}", path.display());
    Ok(())
}
