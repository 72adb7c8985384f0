use serde::{Deserialize, Serialize};

/// JWT claims. `sub` is the owner id used to scope clip writes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Authenticated caller, inserted into request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct NicknameQuery {
    pub nickname: Option<String>,
}
