//! Domain logic for the Transparency Exchange API.
//!
//! Pure types and validation shared by the DB and API layers: identifier
//! validation, the collection lifecycle state machine, artifact value types,
//! and pagination clamping. This crate performs no I/O.

pub mod artifact;
pub mod error;
pub mod ident;
pub mod lifecycle;
pub mod paging;
pub mod required;
pub mod types;
