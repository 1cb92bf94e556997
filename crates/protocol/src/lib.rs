//! Wire types for the wordpane batch protocol.
//!
//! This crate contains the serde-serializable types exchanged in the single
//! round trip between a session flush and the host word processor. These
//! types represent the "protocol layer" - the shapes of data as they appear
//! on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * Ordered: object declarations and operation records carry their queue
//!   order; the host executes them exactly in that order
//! * Stable: Changes only when the wire protocol changes
//!
//! The ergonomic proxy API is built on top of these types in `wordpane-rs`.

pub mod batch;
pub mod capability;
pub mod error;
pub mod operation;

pub use batch::*;
pub use capability::*;
pub use error::*;
pub use operation::*;
