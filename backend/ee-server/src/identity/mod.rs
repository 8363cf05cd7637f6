//! Mapping of verified credentials onto local user records.

pub mod credential_store;
pub mod error;
pub mod identity_resolver;
