// src/services/mod.rs
//! Document assembly, validation, viewing and the HTTP surface.

pub mod api_server;
pub mod did_viewer;
pub mod did_wizard;
pub mod document_builder;
pub mod validator;
