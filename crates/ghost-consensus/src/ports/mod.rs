//! Ports layer (Hexagonal Architecture)
//!
//! Inbound: the `process()` API. Outbound: the database, the hard
//! proof-of-work hash, the state-transition engine and the missing-uncle sink.

mod inbound;
mod outbound;

pub use inbound::*;
pub use outbound::*;
