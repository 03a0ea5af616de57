use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub driver_id: i64,
    pub username: String,
    pub expires_in: u64,
}

impl LoginResponse {
    pub fn new(token: String, driver_id: i64, username: String, expires_in: u64) -> Self {
        Self {
            success: true,
            token,
            driver_id,
            username,
            expires_in,
        }
    }
}
