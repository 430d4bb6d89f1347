// src/wallet/mod.rs
//! Wallet connection layer supplying controller identifiers.

pub mod connector;
