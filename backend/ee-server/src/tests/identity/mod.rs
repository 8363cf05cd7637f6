mod credential_store;
mod identity_resolver;
