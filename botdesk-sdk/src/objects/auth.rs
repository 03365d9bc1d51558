//! Login request/response types.
//!
//! Authentication is a single operator password exchanged for an opaque
//! token; the token rides on every subsequent request. Acquisition and
//! storage of the token across restarts is the caller's concern.

use serde::{Deserialize, Serialize};

/// Header carrying the opaque credential on every authenticated call.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Response body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
