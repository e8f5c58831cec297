pub mod articles;
pub mod auth;
pub mod dashboard;
pub mod media;
