// src/models/mod.rs
//! Data structures exchanged between the document core and its callers.

pub mod did;
