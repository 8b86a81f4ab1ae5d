//! Library for `netsite`
//!
//! Serializes attributed graphs into the `network.json` document read by the
//! browser viewer and writes self-contained site directories around it.

pub mod config;
pub mod core;

pub use crate::core::get_version;
