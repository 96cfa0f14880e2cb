use serde::{Deserialize, Serialize};

use crate::config::SecureString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
    Mechanic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: SecureString,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecureString,
    pub role: Role,
}

/// Login/register response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: SecureString,
    pub user: User,
}
