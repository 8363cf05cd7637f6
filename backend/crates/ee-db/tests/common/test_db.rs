use ee_core::{NewUser, User};
use ee_db::UserRepository;

use sqlx::SqlitePool;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    ee_db::connect_in_memory()
        .await
        .expect("Failed to create test pool")
}

/// Inserts a password-less user and returns it
pub async fn create_test_user(pool: &SqlitePool, email: &str) -> User {
    UserRepository::new(pool.clone())
        .create(&NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: None,
            external_identity_id: None,
        })
        .await
        .expect("Failed to create test user")
}
