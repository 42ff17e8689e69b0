use std::str::FromStr;

use anyhow::{anyhow, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use hive_types::enums::Role;
use hive_types::Principal;

use super::claims::JwtClaims;

/// Verifies the edge's HS256 JWT (base64-encoded shared secret, zero clock
/// skew tolerance) and produces the verified principal the
/// core consumes. Does not call out to the Identity service per request —
/// the edge contract is self-contained verification against a local secret,
/// rather than a live JWKS fetch.
#[derive(Clone)]
pub struct IdentityClient {
    decoding_key: DecodingKey,
}

impl IdentityClient {
    pub fn new(jwt_secret_base64: &str) -> Result<Self> {
        let secret = base64_decode(jwt_secret_base64)?;
        Ok(Self { decoding_key: DecodingKey::from_secret(&secret) })
    }

    pub fn verify(&self, token: &str) -> Result<Principal> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        let data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow!("token verification failed: {e}"))?;

        let id = Uuid::from_str(&data.claims.sub)
            .map_err(|_| anyhow!("token subject is not a valid identifier"))?;

        let roles = data
            .claims
            .roles
            .iter()
            .filter_map(|r| Role::from_str(r).ok())
            .collect::<Vec<_>>();

        Ok(Principal { id, email: data.claims.email, roles })
    }
}

fn base64_decode(s: &str) -> Result<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(s)
        .map_err(|e| anyhow!("invalid base64 jwt secret: {e}"))
}
