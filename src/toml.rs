//! TOML configuration files.
//!
//! This module lets you read [`ClientOpt`] out of [toml] configuration, such as:
//!
//! ```toml
//! url_root = "https://foldbeam.example.org/api/"
//! ```
//!
//! Missing keys take their default value.
//!
//! [toml]: https://crates.io/crates/toml

use std::fmt;
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};
use toml::{self, from_str};

use crate::client::ClientOpt;

/// Possible error that might occur while reading TOML configuration.
#[derive(Debug)]
pub enum ConfigError {
  /// An error in [toml](https://crates.io/crates/toml).
  Toml(toml::de::Error),
  /// The configuration file failed to open or could not be read.
  CannotReadFile(PathBuf, io::Error),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ConfigError::Toml(ref e) => write!(f, "TOML error: {}", e),

      ConfigError::CannotReadFile(ref path, ref e) => {
        write!(f, "cannot read file {}: {}", path.display(), e)
      }
    }
  }
}

impl std::error::Error for ConfigError {}

impl ClientOpt {
  /// Read options from TOML source.
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    from_str(source).map_err(ConfigError::Toml)
  }

  /// Read options from a TOML file.
  pub fn from_toml_file<P>(path: P) -> Result<Self, ConfigError>
  where P: AsRef<Path> {
    let path = path.as_ref();
    let source =
      read_to_string(path).map_err(|ioerr| ConfigError::CannotReadFile(path.to_owned(), ioerr))?;

    Self::from_toml_str(&source)
  }
}
