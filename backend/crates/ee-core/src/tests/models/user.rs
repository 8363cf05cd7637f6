use crate::{NewUser, PLACEHOLDER_EMAIL_DOMAIN, PLACEHOLDER_NAME, ResolvedIdentity, User};

fn test_user() -> User {
    User {
        id: 7,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password_hash: None,
        external_identity_id: Some("ext-7".to_string()),
    }
}

#[test]
fn test_new_user_from_provider_keeps_given_fields() {
    let user = NewUser::from_provider(
        "abc".to_string(),
        Some("a@x.com".to_string()),
        Some("Alice".to_string()),
    );

    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.name, "Alice");
    assert_eq!(user.external_identity_id.as_deref(), Some("abc"));
    assert!(user.password_hash.is_none());
}

#[test]
fn test_new_user_from_provider_synthesizes_missing_fields() {
    let user = NewUser::from_provider("abc".to_string(), None, Some("  ".to_string()));

    assert_eq!(user.email, format!("abc@{}", PLACEHOLDER_EMAIL_DOMAIN));
    assert_eq!(user.name, PLACEHOLDER_NAME);
}

#[test]
fn test_new_user_from_provider_lowercases_placeholder_email() {
    let user = NewUser::from_provider("AbC".to_string(), None, None);

    assert_eq!(user.email, format!("abc@{}", PLACEHOLDER_EMAIL_DOMAIN));
    assert_eq!(user.external_identity_id.as_deref(), Some("AbC"));
}

#[test]
fn test_new_user_from_provider_normalizes_given_email() {
    let user = NewUser::from_provider(
        "abc".to_string(),
        Some(" Alice@X.com ".to_string()),
        None,
    );

    assert_eq!(user.email, "alice@x.com");
}

#[test]
fn test_new_user_with_password_has_no_external_id() {
    let user = NewUser::with_password(
        "Bob".to_string(),
        "bob@example.com".to_string(),
        "$argon2id$hash".to_string(),
    );

    assert!(user.external_identity_id.is_none());
    assert_eq!(user.password_hash.as_deref(), Some("$argon2id$hash"));
}

#[test]
fn test_user_to_identity() {
    let user = test_user();
    let identity = user.to_identity();

    assert_eq!(identity.id, 7);
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.external_identity_id.as_deref(), Some("ext-7"));
    assert_eq!(ResolvedIdentity::from(user), identity);
}

#[test]
fn test_user_serialization_never_exposes_password_hash() {
    let mut user = test_user();
    user.password_hash = Some("secret-hash".to_string());

    let json = serde_json::to_string(&user).unwrap();

    assert!(!json.contains("secret-hash"));
    assert!(!json.contains("password_hash"));
    assert!(user.has_password());
    assert!(user.is_provider_linked());
}
