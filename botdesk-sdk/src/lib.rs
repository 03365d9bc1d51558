//! Shared wire types and HTTP client for the Botdesk admin backend.
//!
//! `objects` is always available; the HTTP client lives behind the
//! `client` cargo feature so type-only consumers do not pull in `reqwest`.

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
