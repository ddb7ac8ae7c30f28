//! Core types, the Program Model contract, and configuration for pact.
//!
//! This crate provides the foundational data structures used across all pact crates:
//! - [`types`]: Declaration/type references, contract facts, shapes, error types
//! - [`model`]: The [`ProgramModel`](model::ProgramModel) trait the host parser implements
//! - [`memory`]: In-memory, serializable implementation of `ProgramModel`
//! - [`config`]: Configuration loading from `.pact/pact.json`
//! - [`hash`]: Deterministic fact fingerprints (base62 of xxhash64)

pub mod config;
pub mod hash;
pub mod memory;
pub mod model;
pub mod types;
