//! Dissection configuration
//!
//! A capture of HCI traffic does not say which controller vendor defined the OGF 0x3F opcodes
//! in it, so the choice is left to the application. The configuration is process wide, like the
//! registration maps: install it with [`set`] before dissecting packets.

use std::io::Read;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::default());
}

/// Which vendor command set decodes HCI vendor specific (OGF 0x3F) commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HciVendor {
    /// Pick the registered vendor whose OCF range contains the command's OCF.
    #[default]
    Auto,
    Android,
    Intel,
    /// Keep vendor command parameters as raw bytes.
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub hci_vendor: HciVendor,

    /// Treat HCI command parameter bytes that no field accounts for as an error instead of
    /// keeping them as `unparsed`.
    pub strict_parameter_length: bool,

    /// Decode EIR and advertising data into AD structures. When off the data is kept raw.
    pub decode_ad_structures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hci_vendor: HciVendor::Auto,
            strict_parameter_length: false,
            decode_ad_structures: true,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(|e| Error::ConfigError(e.to_string()))
    }
}

/// Installs `config` for all subsequent dissection.
pub fn set(config: Config) -> Result<(), Error> {
    let mut current = CONFIG
        .write()
        .map_err(|_| Error::ConfigError("configuration lock poisoned".to_string()))?;

    #[cfg(feature = "logging")]
    log::debug!("dissection config: {:?}", config);

    *current = config;
    Ok(())
}

/// A copy of the configuration in effect.
pub fn get() -> Config {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json_str(r#"{"hci_vendor": "intel"}"#).unwrap();
        assert_eq!(config.hci_vendor, HciVendor::Intel);
        assert!(!config.strict_parameter_length);
        assert!(config.decode_ad_structures);
    }

    #[test]
    fn unknown_field_rejected() {
        let config = Config::from_json_str(r#"{"vendor": "intel"}"#);
        assert!(matches!(config, Err(Error::ConfigError(_))));
    }

    #[test]
    fn from_reader_works() {
        let json = br#"{"strict_parameter_length": true, "hci_vendor": "none"}"#;
        let config = Config::from_reader(&json[..]).unwrap();
        assert!(config.strict_parameter_length);
        assert_eq!(config.hci_vendor, HciVendor::None);
    }
}
