use crate::IdentityResolver;
use crate::tests::{create_test_pool, verified_claims};

use ee_core::{NewUser, PLACEHOLDER_EMAIL_DOMAIN, PLACEHOLDER_NAME};
use ee_db::UserRepository;

use googletest::prelude::*;

#[tokio::test]
async fn given_empty_store_when_resolving_new_identity_then_creates_user_once() {
    // Given
    let pool = create_test_pool().await;
    let resolver = IdentityResolver::new(pool.clone(), false);
    let claims = verified_claims("abc", Some("a@x.com"), Some("Ada"));

    // When
    let first = resolver.resolve(&claims).await.unwrap();
    let second = resolver.resolve(&claims).await.unwrap();

    // Then
    assert_that!(first.id, eq(1));
    assert_that!(second.id, eq(first.id));
    assert_that!(first.external_identity_id.as_deref(), some(eq("abc")));
    assert_that!(first.email.as_str(), eq("a@x.com"));
    assert_that!(first.name.as_str(), eq("Ada"));
    assert_that!(UserRepository::new(pool).count().await.unwrap(), eq(1));
}

#[tokio::test]
async fn given_claims_without_email_or_name_when_resolving_then_uses_placeholders() {
    // Given
    let pool = create_test_pool().await;
    let resolver = IdentityResolver::new(pool, false);
    let claims = verified_claims("no-profile", None, None);

    // When
    let identity = resolver.resolve(&claims).await.unwrap();

    // Then
    assert_that!(identity.name.as_str(), eq(PLACEHOLDER_NAME));
    let expected_email = format!("no-profile@{}", PLACEHOLDER_EMAIL_DOMAIN);
    assert_that!(identity.email.as_str(), eq(expected_email.as_str()));
}

#[tokio::test]
async fn given_mixed_case_email_when_resolving_then_stores_normalized() {
    // Given
    let pool = create_test_pool().await;
    let resolver = IdentityResolver::new(pool, false);
    let claims = verified_claims("ext-1", Some("  Ada@Example.COM "), Some("Ada"));

    // When
    let identity = resolver.resolve(&claims).await.unwrap();

    // Then
    assert_that!(identity.email.as_str(), eq("ada@example.com"));
}

#[tokio::test]
async fn given_password_user_with_same_email_and_linking_off_when_resolving_then_returns_user_unlinked()
 {
    // Given
    let pool = create_test_pool().await;
    let users = UserRepository::new(pool.clone());
    let existing = users
        .create(&NewUser::with_password(
            "Ada".into(),
            "a@x.com".into(),
            "hash".into(),
        ))
        .await
        .unwrap();
    let resolver = IdentityResolver::new(pool, false);

    // When
    let identity = resolver
        .resolve(&verified_claims("abc", Some("a@x.com"), None))
        .await
        .unwrap();

    // Then
    assert_that!(identity.id, eq(existing.id));
    assert_that!(identity.external_identity_id, none());
    let stored = users.find_by_id(existing.id).await.unwrap().unwrap();
    assert_that!(stored.external_identity_id, none());
    assert_that!(users.count().await.unwrap(), eq(1));
}

#[tokio::test]
async fn given_password_user_with_same_email_and_linking_on_when_resolving_then_links_identity() {
    // Given
    let pool = create_test_pool().await;
    let users = UserRepository::new(pool.clone());
    let existing = users
        .create(&NewUser::with_password(
            "Ada".into(),
            "a@x.com".into(),
            "hash".into(),
        ))
        .await
        .unwrap();
    let resolver = IdentityResolver::new(pool, true);

    // When
    let identity = resolver
        .resolve(&verified_claims("abc", Some("A@X.com"), None))
        .await
        .unwrap();

    // Then
    assert_that!(identity.id, eq(existing.id));
    assert_that!(identity.external_identity_id.as_deref(), some(eq("abc")));
    let found = users.find_by_external_id("abc").await.unwrap().unwrap();
    assert_that!(found.id, eq(existing.id));
    assert_that!(found.has_password(), eq(true));
}

#[tokio::test]
async fn given_user_linked_to_other_identity_when_linking_on_then_keeps_existing_link() {
    // Given
    let pool = create_test_pool().await;
    let resolver = IdentityResolver::new(pool.clone(), true);
    let original = resolver
        .resolve(&verified_claims("first", Some("a@x.com"), None))
        .await
        .unwrap();

    // When
    let identity = resolver
        .resolve(&verified_claims("second", Some("a@x.com"), None))
        .await
        .unwrap();

    // Then
    assert_that!(identity.id, eq(original.id));
    assert_that!(identity.external_identity_id.as_deref(), some(eq("first")));
    let second = UserRepository::new(pool)
        .find_by_external_id("second")
        .await
        .unwrap();
    assert_that!(second, none());
}
