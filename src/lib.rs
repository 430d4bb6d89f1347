// src/lib.rs
//! # DID Wizard
//!
//! Connect a wallet, generate a W3C DID Document for the account, and view it.
//!
//! ## Architecture Overview
//! 1. **Models**: `DidDocument` and the closed set of DID methods and key types
//! 2. **Services**: the document builder and validator (the core), the viewer,
//!    the wizard flow and the HTTP API
//! 3. **Wallet**: supplies the controller address, real or demo
//! 4. **Utilities**: injected clock, serialization, placeholder proof material
//!
//! Nothing here signs, resolves or stores documents.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod wallet;

pub use error::{ParseError, ValidationError, ViewError};
pub use models::did::DidDocument;
pub use services::document_builder::{DocumentBuilder, DocumentOptions};
pub use services::validator::validate;
