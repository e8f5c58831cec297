// src/application/commands/articles/mod.rs
mod create;
mod delete;
mod import;
mod service;
mod update;

pub use create::{CreateArticleCommand, CreateArticleCommandBuilder};
pub use delete::DeleteArticleCommand;
pub use import::ImportOutcome;
pub use service::ArticleCommandService;
pub use update::UpdateArticleCommand;
