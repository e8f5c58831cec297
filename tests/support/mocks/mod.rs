// tests/support/mocks/mod.rs
//! Test doubles for every port and repository.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod article_repos;
pub mod security;
pub mod storage;
pub mod time;
pub mod user_repo;
pub mod util;

pub use article_repos::InMemoryArticleStore;
pub use security::{
    DummyPasswordHasher, DummyTokenManager, EXPIRED_TOKEN, StrictPasswordHasher, TEST_TOKEN,
    admin_user,
};
pub use storage::InMemoryObjectStore;
pub use time::{FixedClock, SteppingClock, fixed_now};
pub use user_repo::InMemoryUserRepo;
pub use util::DummySlug;
