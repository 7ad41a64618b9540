//! # dbgen Core
//!
//! Core types, traits, and error handling for dbgen.
//!
//! This crate provides the foundational building blocks used throughout
//! the generator, including:
//!
//! - **Types**: The portable column-type vocabulary and native type mapping
//! - **Traits**: Common behaviors like `Validatable` and `Persistable`
//! - **Errors**: Unified error handling with `GenError` and `GenResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{GenError, GenResult, ResultExt};
pub use traits::{CodeGenContext, Persistable, Validatable};
pub use types::{PortableType, base_type_name};
