//! # SV Types Crate
//!
//! This crate contains the domain entities, the collection value types
//! stored as serialized columns, and the `StoreError` taxonomy shared
//! across the store, platform adapters, and gateway.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Serialization Boundary**: Collection values (`Ballot`,
//!   `ParticipantSet`, `PostingStatus`) are reconstructed anew from column
//!   text on every read; nothing holds a live reference into a row.

pub mod collections;
pub mod entities;
pub mod errors;

pub use collections::*;
pub use entities::*;
pub use errors::*;
