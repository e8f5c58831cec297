use crate::domain::errors::DomainError;

// SQLite reports unique violations as "UNIQUE constraint failed: <table>.<column>".
const UNIQUE_ARTICLE_SLUG: &str = "articles.slug";
const UNIQUE_USER_EMAIL: &str = "users.email";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();

            if db_err.is_unique_violation() {
                return if message.contains(UNIQUE_ARTICLE_SLUG) {
                    DomainError::Conflict("slug already exists".into())
                } else if message.contains(UNIQUE_USER_EMAIL) {
                    DomainError::Conflict("email already exists".into())
                } else {
                    DomainError::Conflict("unique constraint violated".into())
                };
            }
            if db_err.is_check_violation() {
                return DomainError::Validation(format!("check constraint violated: {message}"));
            }
            if db_err.is_foreign_key_violation() {
                return DomainError::NotFound("referenced record not found".into());
            }

            DomainError::Persistence(message.to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
