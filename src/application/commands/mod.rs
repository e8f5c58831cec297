pub mod articles;
pub mod media;
pub mod users;
