//! Reading and writing `spindet` input and result files.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{self, format_err};
use bincode;
use serde::{de::DeserializeOwned, Serialize};
use serde_yaml;

pub(crate) mod format;

#[cfg(test)]
#[path = "io_tests.rs"]
mod io_tests;

/// An enumerated type for `spindet` binary file types.
pub enum SpinDetFileType {
    /// Variant for binary files containing excitation-analysis results.
    Exc,
}

impl SpinDetFileType {
    /// Returns the extension of the file type.
    pub fn ext(&self) -> String {
        match self {
            SpinDetFileType::Exc => "spindet.exc".to_string(),
        }
    }
}

/// Reads a `spindet` binary file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (without `spindet`-specific extensions).
/// * `file_type` - The type of the `spindet` file to be read in.
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_spindet_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: SpinDetFileType,
) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut reader = BufReader::new(File::open(path).map_err(|err| format_err!(err))?);
    bincode::deserialize_from(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes into a `spindet` binary file.
///
/// # Arguments
///
/// * `name` - The name of the file to be written (without `spindet`-specific extensions).
/// * `file_type` - The type of the `spindet` file to be written.
///
/// # Returns
///
/// A `Result` indicating if the serialisation and writing processes have been successful.
pub fn write_spindet_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: SpinDetFileType,
    value: &T,
) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|err| format_err!(err))
}

/// Reads a `spindet` input YAML file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (with its `.yml` or `.yaml` extension).
pub fn read_spindet_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(File::open(name).map_err(|err| format_err!(err))?);
    serde_yaml::from_reader(&mut reader).map_err(|err| format_err!(err))
}
