// src/services/validator.rs
//! Structural validation of DID Documents.
//!
//! The validator is run twice in the life of a document: by the builder on
//! its own output before returning it, and by the viewer on any JSON it is
//! asked to render. It checks shape only. It does not resolve the DID, look
//! at key material, or verify proofs.

use url::Url;

use crate::error::ValidationError;
use crate::models::did::DidDocument;

/// Checks that `endpoint` is an absolute URL with both a scheme and a host.
///
/// The URL parser silently repairs some malformed input (dropping tabs,
/// turning `\` into `/`, inserting a missing `//`). Endpoints are stored
/// exactly as given, so anything the parser would have to repair is rejected.
///
/// # Arguments
/// * `endpoint` - Candidate service endpoint
///
/// # Errors
/// `ValidationError::InvalidServiceEndpoint` carrying the offending value and
/// the reason it was rejected.
pub fn validate_endpoint(endpoint: &str) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidServiceEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    if let Some(c) = endpoint
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || *c == '\\')
    {
        return Err(invalid(format!("contains disallowed character {:?}", c)));
    }

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(invalid(format!("'{}' URL has no host", url.scheme()))),
    }

    let authority = format!("{}://", url.scheme());
    let has_authority = endpoint
        .get(..authority.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(&authority));
    if !has_authority || endpoint[authority.len()..].starts_with('/') {
        return Err(invalid(format!("expected '{}' before the host", authority)));
    }

    Ok(())
}

/// Validates the structure of a DID Document.
///
/// # Checks
/// 1. `id` starts with `did:`
/// 2. `verificationMethod` is non-empty
/// 3. Every `authentication` and `assertionMethod` reference names an
///    existing verification method
/// 4. Every `service` has a non-empty `type` and a valid endpoint
///
/// Checks run in that order and the first failure is returned.
pub fn validate(doc: &DidDocument) -> Result<(), ValidationError> {
    if !doc.id.starts_with("did:") {
        return Err(ValidationError::InvalidDid { id: doc.id.clone() });
    }

    if doc.verification_method.is_empty() {
        return Err(ValidationError::MissingVerificationMethod);
    }

    let relationships = [
        ("authentication", &doc.authentication),
        ("assertionMethod", &doc.assertion_method),
    ];
    for (relationship, references) in relationships {
        if let Some(reference) = references
            .iter()
            .find(|r| doc.verification_method(r).is_none())
        {
            return Err(ValidationError::UnknownVerificationMethod {
                relationship,
                reference: reference.clone(),
            });
        }
    }

    for service in &doc.service {
        if service.type_.trim().is_empty() {
            return Err(ValidationError::EmptyServiceType {
                service_id: service.id.clone(),
            });
        }
        validate_endpoint(&service.service_endpoint)?;
    }

    Ok(())
}
