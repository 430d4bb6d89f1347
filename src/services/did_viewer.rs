// src/services/did_viewer.rs
//! Render boundary for DID Documents.
//!
//! The viewer accepts raw JSON text (a document produced by this crate,
//! downloaded earlier, or pasted by a user) and turns it into a
//! [`DocumentView`] ready for display. It never assumes the text came from the
//! builder: the input is parsed, shaped and validated before anything reads
//! from it.

use serde::Serialize;

use crate::error::{ValidationError, ViewError};
use crate::models::did::DidDocument;
use crate::services::validator::validate;
use crate::utils::serialization::{parse_json, to_pretty_json};
use crate::wallet::connector::shorten;

/// Everything a front-end needs to show a document and offer copy, download
/// and share actions.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub document: DidDocument,

    /// Two-space indented JSON, used for display, copy and download
    pub pretty_json: String,

    /// `did-<last 8 characters of the method-specific id>.json`
    pub download_file_name: String,

    pub share_text: String,

    pub short_controller: String,
}

/// Opens untrusted JSON for display.
pub struct DidViewer;

impl DidViewer {
    /// Parses, validates and prepares a document for rendering.
    ///
    /// # Arguments
    /// * `json` - Raw document bytes
    ///
    /// # Errors
    /// - `ViewError::Parse` if the input is not UTF-8 JSON
    /// - `ViewError::Invalid(MalformedDocument)` if the JSON is not shaped like a document
    /// - `ViewError::Invalid(..)` with any validator kind otherwise
    pub fn open(json: impl AsRef<[u8]>) -> Result<DocumentView, ViewError> {
        let value = parse_json(json)?;
        let document: DidDocument = serde_json::from_value(value)
            .map_err(|e| ValidationError::MalformedDocument(e.to_string()))?;

        Self::render(document)
    }

    /// Prepares an already-typed document, running the validator first.
    pub fn render(document: DidDocument) -> Result<DocumentView, ViewError> {
        validate(&document)?;

        let pretty_json = to_pretty_json(&document)
            .map_err(|e| ValidationError::MalformedDocument(e.to_string()))?;

        Ok(DocumentView {
            download_file_name: download_file_name(&document),
            share_text: format!("Check out my DID: {}", document.id),
            short_controller: shorten(&document.controller),
            pretty_json,
            document,
        })
    }
}

fn download_file_name(document: &DidDocument) -> String {
    let id = document.method_specific_id();
    let start = id.chars().count().saturating_sub(8);
    let suffix: String = id.chars().skip(start).collect();
    format!("did-{}.json", suffix)
}
