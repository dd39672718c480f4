//! Player sessions.
//!
//! Server-side state for one browser, referenced by an opaque id that only
//! ever travels in a signed, httpOnly cookie. Blobs live in the key-value
//! store and expire with it.

pub mod application;
pub mod domain;
