//! Admin bearer-token issuance/verification. The coordinator has no
//! multi-user concept on its admin surface — one shared secret signs and
//! verifies a single "admin" subject's JWT.

use anyhow::{Context, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const JWT_EXPIRY_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn create_jwt(subject: &str, secret: &str) -> Result<String> {
    let exp = (chrono::Utc::now() + chrono::Duration::days(JWT_EXPIRY_DAYS)).timestamp() as usize;
    let claims = Claims { sub: subject.to_string(), exp };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).context("creating jwt")
}

pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims> {
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .context("invalid token")?;
    Ok(data.claims)
}
