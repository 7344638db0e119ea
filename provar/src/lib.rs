//! Provar property-based testing harness.
//!
//! This is the main entry point for the Provar library, providing a
//! convenient API for exercising generic code against random, edge-case,
//! and hand-picked inputs.

pub use provar_core::*;
