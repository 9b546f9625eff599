//! Outbound adapters implementing domain ports for infrastructure concerns.
//!
//! Adapters are thin translators between domain types and whatever backs
//! them; they contain no business logic. The service currently ships
//! in-memory persistence only, matching the embedded database the record
//! surface was designed around, but nothing above this layer knows that.

pub mod persistence;
