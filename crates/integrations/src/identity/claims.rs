use serde::{Deserialize, Serialize};

/// The fixed HS256 claim shape the edge token carries. The token format is
/// fixed rather than coming from a pluggable JWKS provider, so there is no
/// key discovery to cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: usize,
    pub iat: usize,
}
