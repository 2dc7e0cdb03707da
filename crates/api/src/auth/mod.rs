//! Authentication primitives (JWT validation).
//!
//! Token issuance is the identity provider's job; this service only
//! validates incoming Bearer tokens and extracts the caller's identity.

pub mod jwt;
