// src/config.rs
//! Runtime configuration.
//!
//! Values are layered, later sources winning:
//! 1. Built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. Environment variables prefixed with `DID`, using `__` as the section
//!    separator, e.g. `DID__SERVER__PORT=8080` or `DID__DOCUMENT__PROOF=placeholder`

use ::config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;

use crate::error::ValidationError;
use crate::models::did::DidMethod;
use crate::services::document_builder::{DocumentBuilder, ProofPolicy, DEFAULT_SERVICE_ENDPOINT};
use crate::utils::clock::Clock;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub document: DocumentSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Settings applied to every document the server builds.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSettings {
    pub method: DidMethod,
    pub default_service_endpoint: String,
    pub proof: ProofPolicy,
}

impl Settings {
    /// Loads settings from defaults, the optional config file and the environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if a source cannot be read or a value has the
    /// wrong type (e.g. a non-numeric port or an unknown DID method).
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("DID")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000_i64)?
            .set_default("document.method", "eth")?
            .set_default("document.default_service_endpoint", DEFAULT_SERVICE_ENDPOINT)?
            .set_default("document.proof", "omit")
    }

    /// Address the HTTP server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}

impl DocumentSettings {
    /// Creates a document builder configured from these settings.
    ///
    /// # Errors
    /// `InvalidServiceEndpoint` if the configured default endpoint is not a URL.
    pub fn builder<C: Clock>(&self, clock: C) -> Result<DocumentBuilder<C>, ValidationError> {
        DocumentBuilder::with_clock(clock)
            .method(self.method)
            .proof_policy(self.proof)
            .default_service_endpoint(self.default_service_endpoint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::SystemClock;

    #[test]
    fn test_defaults() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.document.method, DidMethod::Eth);
        assert_eq!(settings.document.proof, ProofPolicy::Omit);
        assert_eq!(
            settings.socket_addr().unwrap().to_string(),
            "127.0.0.1:3000"
        );
        assert!(settings.document.builder(SystemClock).is_ok());
    }

    #[test]
    fn test_overrides() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .set_override("document.proof", "placeholder")
            .unwrap()
            .set_override("document.default_service_endpoint", "not a url")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.document.proof, ProofPolicy::Placeholder);
        assert!(settings.document.builder(SystemClock).is_err());
    }
}
