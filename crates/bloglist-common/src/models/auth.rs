use serde::{Deserialize, Serialize};

/// JWT claims carried by an identity token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    /// Expiration timestamp (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
}
