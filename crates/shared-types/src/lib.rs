//! # Shared Types Crate
//!
//! Chain entities used across the consensus core and the collaborators that
//! surround it.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: headers and blocks are defined once here.
//! - **Opaque Encoding**: identity hashes are computed from a fixed field
//!   order; wire encoding belongs to the serialization layer.

pub mod entities;

pub use entities::*;
