//! Core functionality for Provar property-based testing.
//!
//! This crate provides the building blocks for exercising generic code
//! against generated inputs: value generators, the single-type test
//! executor, and the sequential multi-type runner with overload dispatch.

pub mod data;
pub mod dispatch;
pub mod error;
pub mod gen;
pub mod param;
pub mod property;
pub mod sequential;

// Re-export the main types
pub use data::*;
pub use dispatch::*;
pub use error::*;
pub use gen::*;
pub use param::*;
pub use property::*;
pub use sequential::*;
