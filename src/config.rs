// src/config.rs
use std::{env, path::PathBuf, time::Duration};
use thiserror::Error;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    database_max_connections: u32,
    listen_addr: String,
    biscuit_private_key: Option<String>,
    token_ttl: Duration,
    allowed_origins: Vec<String>,
    media_dir: PathBuf,
    public_base_url: String,
    max_upload_bytes: usize,
    admin_email: Option<String>,
    admin_password: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://folio.db?mode=rwc".into()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(format!("{key} has an unparsable value '{raw}'"))),
        None => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

impl AppConfig {
    /// Reads configuration from the environment. The signing key is optional:
    /// without it the service runs with admin sign-in disabled.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = non_empty("DATABASE_URL").unwrap_or_else(default_database_url);
        let database_max_connections = parsed("DATABASE_MAX_CONNECTIONS", 8u32)?;
        let listen_addr = non_empty("LISTEN_ADDR").unwrap_or_else(default_listen_addr);
        let biscuit_private_key = non_empty("BISCUIT_ROOT_PRIVATE_KEY");
        let token_ttl_secs = parsed("TOKEN_TTL_SECONDS", 3600u64)?;
        if token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("TOKEN_TTL_SECONDS must be positive".into()));
        }

        let allowed_origins = non_empty("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(default_allowed_origins);

        let media_dir = non_empty("MEDIA_DIR").map_or_else(|| PathBuf::from("./media"), PathBuf::from);
        let public_base_url = non_empty("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://{}", default_listen_addr()));
        if !public_base_url.starts_with("http://") && !public_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(
                "PUBLIC_BASE_URL must be an http(s) URL".into(),
            ));
        }
        let max_upload_bytes = parsed("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        let admin_email = non_empty("ADMIN_EMAIL");
        let admin_password = non_empty("ADMIN_PASSWORD");
        if admin_email.is_some() && admin_password.is_none() {
            return Err(ConfigError::Missing("ADMIN_PASSWORD"));
        }

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
            biscuit_private_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
            allowed_origins,
            media_dir,
            public_base_url,
            max_upload_bytes,
            admin_email,
            admin_password,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    /// Hex-encoded Ed25519 key, if one was configured. Validity is checked
    /// when the token manager is built.
    pub fn biscuit_private_key(&self) -> Option<&str> {
        self.biscuit_private_key.as_deref()
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn media_dir(&self) -> &PathBuf {
        &self.media_dir
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Email and password for the first admin, when both are set.
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        self.admin_email
            .as_deref()
            .zip(self.admin_password.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::parse_origins;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test ,, https://b.test "),
            vec!["http://a.test".to_string(), "https://b.test".to_string()]
        );
    }
}
