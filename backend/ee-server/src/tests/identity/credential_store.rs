use crate::tests::{SESSION_SECRET, create_test_pool, session_issuer, verified_claims};
use crate::{CredentialStore, IdentityError, IdentityResolver};

use ee_auth::SessionValidator;

use googletest::prelude::*;

#[tokio::test]
async fn given_registered_user_when_authenticating_with_same_password_then_issues_session() {
    // Given
    let pool = create_test_pool().await;
    let store = CredentialStore::new(pool, session_issuer());
    let user = store
        .register("Ada", "ada@example.com", "correct horse")
        .await
        .unwrap();

    // When
    let token = store
        .authenticate("ada@example.com", "correct horse")
        .await
        .unwrap();

    // Then
    assert_that!(token.token_type.as_str(), eq("bearer"));
    let claims = SessionValidator::new(SESSION_SECRET, "eventease")
        .validate(&token.access_token)
        .unwrap();
    assert_that!(claims.user_id().unwrap(), eq(user.id));
}

#[tokio::test]
async fn given_registered_user_when_storing_then_password_is_hashed() {
    // Given
    let pool = create_test_pool().await;
    let store = CredentialStore::new(pool, session_issuer());

    // When
    let user = store
        .register("Ada", "ada@example.com", "correct horse")
        .await
        .unwrap();

    // Then
    let hash = user.password_hash.unwrap();
    assert_that!(hash.as_str(), not(eq("correct horse")));
    assert_that!(hash.as_str(), starts_with("$argon2"));
}

#[tokio::test]
async fn given_registered_user_when_authenticating_with_wrong_password_then_invalid_credentials()
{
    // Given
    let pool = create_test_pool().await;
    let store = CredentialStore::new(pool, session_issuer());
    store
        .register("Ada", "ada@example.com", "correct horse")
        .await
        .unwrap();

    // When
    let result = store.authenticate("ada@example.com", "battery staple").await;

    // Then
    assert!(matches!(
        result,
        Err(IdentityError::InvalidCredentials { .. })
    ));
}

#[tokio::test]
async fn given_existing_email_when_registering_again_then_duplicate_email() {
    // Given
    let pool = create_test_pool().await;
    let store = CredentialStore::new(pool, session_issuer());
    store
        .register("Ada", "ada@example.com", "correct horse")
        .await
        .unwrap();

    // When
    let result = store
        .register("Imposter", "ADA@example.com ", "something else")
        .await;

    // Then
    assert!(matches!(result, Err(IdentityError::DuplicateEmail { .. })));
}

#[tokio::test]
async fn given_unknown_email_when_authenticating_then_not_found() {
    // Given
    let pool = create_test_pool().await;
    let store = CredentialStore::new(pool, session_issuer());

    // When
    let result = store.authenticate("nobody@example.com", "whatever1").await;

    // Then
    assert!(matches!(result, Err(IdentityError::NotFound { .. })));
}

#[tokio::test]
async fn given_provider_created_user_when_password_login_then_invalid_credentials() {
    // Given
    let pool = create_test_pool().await;
    IdentityResolver::new(pool.clone(), false)
        .resolve(&verified_claims("abc", Some("a@x.com"), None))
        .await
        .unwrap();
    let store = CredentialStore::new(pool, session_issuer());

    // When
    let result = store.authenticate("a@x.com", "any password").await;

    // Then
    assert!(matches!(
        result,
        Err(IdentityError::InvalidCredentials { .. })
    ));
}

#[tokio::test]
async fn given_mixed_case_login_email_when_authenticating_then_matches_registration() {
    // Given
    let pool = create_test_pool().await;
    let store = CredentialStore::new(pool, session_issuer());
    store
        .register("Ada", "ada@example.com", "correct horse")
        .await
        .unwrap();

    // When
    let result = store.authenticate(" Ada@Example.com", "correct horse").await;

    // Then
    assert_that!(result.is_ok(), eq(true));
}
