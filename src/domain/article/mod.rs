pub mod entity;
pub mod repository;
pub mod services;
pub mod specifications;
pub mod timestamp;
pub mod value_objects;

pub use entity::{Article, ArticleUpdate, NewArticle};
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use timestamp::StoredTimestamp;
pub use value_objects::{
    ArticleContent, ArticleId, ArticleSlug, ArticleTitle, Category, CoverImage, ReadTime,
};
