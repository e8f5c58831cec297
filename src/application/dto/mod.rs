pub mod articles;
pub mod auth;
pub mod legacy;
pub mod media;
pub mod serde_time;
pub mod users;

pub use articles::{ArticleDto, ArticleListDto, DashboardDto};
pub use auth::{AuthTokenDto, AuthenticatedUser, SessionEvent, TokenSubject};
pub use legacy::LegacyArticleDocument;
pub use media::MediaDto;
pub use users::UserDto;
