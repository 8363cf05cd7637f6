
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};

pub(crate) const PROVIDER_SECRET: &[u8] = b"provider-test-secret-at-least-32-bytes";
pub(crate) const SESSION_SECRET: &[u8] = b"session-test-secret-at-least-32-bytes";
pub(crate) const PROJECT_ID: &str = "eventease-test";

pub(crate) fn provider_claims(sub: &str, exp_offset_secs: i64) -> Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "sub": sub,
        "iat": now,
        "exp": now + exp_offset_secs,
        "iss": format!("https://securetoken.google.com/{}", PROJECT_ID),
        "aud": PROJECT_ID,
        "email": "a@x.com",
        "name": "Ada Lovelace",
    })
}

pub(crate) fn sign_provider_token(claims: &Value, secret: &[u8]) -> String {
    encode(
        &Header::new(Algorithm::HS384),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}
