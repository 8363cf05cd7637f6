pub mod current_user;
pub mod provider_identity;
