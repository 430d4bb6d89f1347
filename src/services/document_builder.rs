// src/services/document_builder.rs
//! DID Document assembly.
//!
//! Turns a controller identifier and a handful of optional user fields into a
//! complete DID Document. The builder is stateless between calls: every call
//! to [`DocumentBuilder::build`] produces a brand-new, immutable document.
//!
//! # Determinism
//! The only time source is the injected [`Clock`]. Two builds with identical
//! inputs and an identical clock reading serialize to identical bytes.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::did::{
    DidDocument, DidMethod, PlaceholderProof, Service, VerificationMethod, DID_CONTEXT_V1,
    KEY_FRAGMENT, LINKED_DOMAINS, SERVICE_FRAGMENT,
};
use crate::services::validator::{validate, validate_endpoint};
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::crypto::placeholder_jws;

/// Endpoint used when the caller does not supply one.
pub const DEFAULT_SERVICE_ENDPOINT: &str = "https://identity.example.com";

pub const DEFAULT_NAME: &str = "Unnamed DID";

pub const DEFAULT_DESCRIPTION: &str = "A decentralized identity document";

/// Proof type of the placeholder block. Deliberately not a real suite name.
pub const PLACEHOLDER_PROOF_TYPE: &str = "UnverifiedPlaceholderProof";

/// Optional user-supplied fields.
///
/// Blank strings are treated the same as absent values.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_endpoint: Option<String>,
}

impl DocumentOptions {
    pub fn with_service_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.service_endpoint = Some(endpoint.into());
        self
    }
}

/// Whether built documents carry a placeholder `proof` block.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProofPolicy {
    /// No `proof` field at all
    #[default]
    Omit,
    /// A `proof` block explicitly marked `"unverified": true`
    Placeholder,
}

/// Assembles DID Documents for a fixed DID method.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use did_wizard::services::document_builder::{DocumentBuilder, DocumentOptions};
/// use did_wizard::utils::clock::FixedClock;
///
/// let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
/// let doc = DocumentBuilder::with_clock(clock)
///     .build("0xabc", &DocumentOptions::default())
///     .unwrap();
/// assert_eq!(doc.id, "did:eth:0xabc");
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder<C = SystemClock> {
    method: DidMethod,
    default_service_endpoint: String,
    proof_policy: ProofPolicy,
    clock: C,
}

impl DocumentBuilder<SystemClock> {
    /// Builder reading wall-clock time, with default settings.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for DocumentBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DocumentBuilder<C> {
    /// Builder reading time from `clock`, with default settings.
    pub fn with_clock(clock: C) -> Self {
        Self {
            method: DidMethod::default(),
            default_service_endpoint: DEFAULT_SERVICE_ENDPOINT.to_string(),
            proof_policy: ProofPolicy::default(),
            clock,
        }
    }

    pub fn method(mut self, method: DidMethod) -> Self {
        self.method = method;
        self
    }

    pub fn proof_policy(mut self, policy: ProofPolicy) -> Self {
        self.proof_policy = policy;
        self
    }

    /// Replaces the fallback service endpoint.
    ///
    /// # Errors
    /// `InvalidServiceEndpoint` if `endpoint` is not an absolute URL with a host.
    pub fn default_service_endpoint(
        mut self,
        endpoint: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let endpoint = endpoint.into();
        validate_endpoint(&endpoint)?;
        self.default_service_endpoint = endpoint;
        Ok(self)
    }

    /// Builds a DID Document for `controller`.
    ///
    /// # Arguments
    /// * `controller` - Controller identifier, e.g. an account address. Embedded verbatim.
    /// * `options` - Optional display name, description and service endpoint
    ///
    /// # Returns
    /// A document with exactly one verification method, both verification
    /// relationships referencing it, one service, and `created == updated`.
    ///
    /// # Errors
    /// - `EmptyController` if `controller` is empty or whitespace-only
    /// - `InvalidServiceEndpoint` if a supplied endpoint is not an absolute URL
    pub fn build(
        &self,
        controller: &str,
        options: &DocumentOptions,
    ) -> Result<DidDocument, ValidationError> {
        if controller.trim().is_empty() {
            return Err(ValidationError::EmptyController);
        }

        let endpoint = match non_blank(&options.service_endpoint) {
            Some(endpoint) => {
                validate_endpoint(endpoint)?;
                endpoint.to_string()
            }
            None => self.default_service_endpoint.clone(),
        };

        let did = self.method.did(controller);
        let key_id = format!("{}#{}", did, KEY_FRAGMENT);
        let key_type = self.method.key_type();
        let now = self.clock.now();

        let proof = match self.proof_policy {
            ProofPolicy::Omit => None,
            ProofPolicy::Placeholder => Some(PlaceholderProof {
                type_: PLACEHOLDER_PROOF_TYPE.to_string(),
                created: now,
                verification_method: key_id.clone(),
                proof_purpose: "assertionMethod".to_string(),
                jws: placeholder_jws(controller),
                unverified: true,
            }),
        };

        let document = DidDocument {
            context: vec![DID_CONTEXT_V1.to_string(), key_type.context().to_string()],
            id: did.clone(),
            controller: controller.to_string(),
            created: now,
            updated: now,
            name: Some(non_blank(&options.name).unwrap_or(DEFAULT_NAME).to_string()),
            description: Some(
                non_blank(&options.description)
                    .unwrap_or(DEFAULT_DESCRIPTION)
                    .to_string(),
            ),
            verification_method: vec![VerificationMethod {
                id: key_id.clone(),
                type_: key_type.as_str().to_string(),
                controller: did.clone(),
                public_key_hex: controller.to_string(),
            }],
            authentication: vec![key_id.clone()],
            assertion_method: vec![key_id],
            service: vec![Service {
                id: format!("{}#{}", did, SERVICE_FRAGMENT),
                type_: LINKED_DOMAINS.to_string(),
                service_endpoint: endpoint,
            }],
            proof,
        };

        validate(&document)?;
        log::debug!("Built DID document {}", document.id);

        Ok(document)
    }
}

/// Trimmed value of an optional field, or `None` when absent or blank.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
