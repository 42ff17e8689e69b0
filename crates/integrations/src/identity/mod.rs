mod claims;
mod client;

pub use claims::JwtClaims;
pub use client::IdentityClient;
