//! Enforcement engine for pact source contracts.
//!
//! Evaluates declared contracts against a [`ProgramModel`](pact_core::model::ProgramModel)
//! and produces violations:
//! - IMM01..IMM05: mutation of an immutable type (field write, element write,
//!   inc/dec, compound assignment, receiver rebind)
//! - CTOR01, CTOR02: construction outside the declared constructors
//! - TEST01: test-only item used outside test code
//! - PKG01: package-only item used from a foreign module
//! - IMPL01..IMPL04: interface conformance failures (never suppressible)

pub mod codes;
pub mod types;
pub mod directive;
pub mod fact_store;
pub mod facts;
pub mod suppress;
pub mod visit;
pub mod checks;
pub mod engine;
