// src/models/did.rs
//! Decentralized Identifier (DID) data model implementation.
//!
//! Defines the core structure for W3C-compliant DID Documents following the
//! [DID Core Specification](https://www.w3.org/TR/did-core/), plus the closed
//! set of DID methods and key types this system knows how to emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base JSON-LD context every DID Document starts with.
pub const DID_CONTEXT_V1: &str = "https://www.w3.org/ns/did/v1";

/// Fragment of the single verification method in a built document.
pub const KEY_FRAGMENT: &str = "key-1";

/// Fragment of the single service in a built document.
pub const SERVICE_FRAGMENT: &str = "service-1";

/// Service type assigned to the linked endpoint.
pub const LINKED_DOMAINS: &str = "LinkedDomains";

/// DID method used to derive document identifiers.
///
/// Only one method exists today. New methods are added as variants; the
/// builder only ever asks the method for its name and key type.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DidMethod {
    /// `did:eth:<account address>`
    #[default]
    Eth,
}

impl DidMethod {
    /// Method name as it appears in `did:<method>:<id>`.
    pub fn name(&self) -> &'static str {
        match self {
            DidMethod::Eth => "eth",
        }
    }

    /// Key type of the verification method bound to a DID of this method.
    pub fn key_type(&self) -> KeyType {
        match self {
            DidMethod::Eth => KeyType::EcdsaSecp256k1VerificationKey2019,
        }
    }

    /// Formats the DID for a method-specific identifier.
    ///
    /// # Example
    /// ```
    /// use did_wizard::models::did::DidMethod;
    /// assert_eq!(DidMethod::Eth.did("0xabc"), "did:eth:0xabc");
    /// ```
    pub fn did(&self, method_specific_id: &str) -> String {
        format!("did:{}:{}", self.name(), method_specific_id)
    }
}

impl fmt::Display for DidMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DidMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eth" => Ok(DidMethod::Eth),
            other => Err(format!("unsupported DID method: {}", other)),
        }
    }
}

/// Verification method key types.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    EcdsaSecp256k1VerificationKey2019,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::EcdsaSecp256k1VerificationKey2019 => "EcdsaSecp256k1VerificationKey2019",
        }
    }

    /// JSON-LD security suite context describing this key type.
    pub fn context(&self) -> &'static str {
        match self {
            KeyType::EcdsaSecp256k1VerificationKey2019 => {
                "https://w3id.org/security/suites/secp256k1-2019/v1"
            }
        }
    }
}

/// A verification method binding key material to the DID.
///
/// The `type` is kept as a plain string so that documents produced elsewhere
/// still deserialize; documents built here always carry a [`KeyType`] name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// Full ID of this key
    /// Example: "did:eth:0x52908400098527886e0f7030069857d2e4169ee7#key-1"
    pub id: String,

    #[serde(rename = "type")]
    pub type_: String,

    /// Controller DID
    pub controller: String,

    /// Hex key material. For `did:eth` this is the account address itself
    /// rather than a public key.
    #[serde(default)]
    pub public_key_hex: String,
}

/// A service endpoint advertised by the DID subject.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default)]
    pub type_: String,

    /// Absolute URL of the service
    /// Example: "https://identity.example.com"
    #[serde(default)]
    pub service_endpoint: String,
}

/// Placeholder proof attached to a document when explicitly requested.
///
/// Nothing signs documents in this system. The `unverified` marker is always
/// `true` and the `jws` value is not a signature.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderProof {
    #[serde(rename = "type")]
    pub type_: String,
    pub created: DateTime<Utc>,
    pub verification_method: String,
    pub proof_purpose: String,
    pub jws: String,
    pub unverified: bool,
}

/// A DID Document representing a decentralized identity.
///
/// Implements the basic structure of a DID Document according to W3C standards,
/// containing the verification material and service endpoints needed to
/// interact with the DID subject.
///
/// # DID Format
/// The `id` field follows DID syntax:
/// ```text
/// did:<method>:<method-specific-id>
/// ```
///
/// # Deserialization
/// The relationship and service arrays default to empty when missing, so a
/// pasted document that lacks them is reported by the validator instead of
/// failing to parse.
///
/// # Security Considerations
/// - Documents are never signed; see [`PlaceholderProof`]
/// - Documents from outside this crate must go through
///   [`validate`](crate::services::validator::validate) before use
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    /// JSON-LD contexts
    #[serde(rename = "@context", default)]
    pub context: Vec<String>,

    /// The complete DID string identifier
    /// Example: "did:eth:0x52908400098527886e0f7030069857d2e4169ee7"
    pub id: String,

    /// Controller identifier, echoed from the builder input
    pub controller: String,

    pub created: DateTime<Utc>,

    /// Equal to `created` for every freshly built document
    pub updated: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub verification_method: Vec<VerificationMethod>,

    /// References (by id) to verification methods usable for authentication
    #[serde(default)]
    pub authentication: Vec<String>,

    /// References (by id) to verification methods usable for assertions
    #[serde(default)]
    pub assertion_method: Vec<String>,

    #[serde(default)]
    pub service: Vec<Service>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<PlaceholderProof>,
}

impl DidDocument {
    /// Looks up a verification method by its full id.
    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.iter().find(|vm| vm.id == id)
    }

    /// Last colon-separated segment of the DID (the method-specific id for
    /// simple methods such as `did:eth`).
    pub fn method_specific_id(&self) -> &str {
        self.id.rsplit(':').next().unwrap_or(&self.id)
    }
}
