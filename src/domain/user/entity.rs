// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Email, PasswordHash, UserId};
use chrono::{DateTime, Utc};

/// Administrator account allowed into the editor and dashboard.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: PasswordHash,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: Email, password_hash: PasswordHash, created_at: DateTime<Utc>) -> Self {
        Self {
            email,
            password_hash,
            is_active: true,
            created_at,
        }
    }
}
