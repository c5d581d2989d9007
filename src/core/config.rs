use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Also bounds how long startup waits for the first connection
    pub acquire_timeout_secs: u64,
}

/// Key material used to sign one-shot notice cookies
#[derive(Clone)]
pub struct SessionConfig {
    pub secret_key: String,
    /// True when SECRET_KEY was not set and the development key is in use
    pub using_default_key: bool,
}

// Hand-written so the key never ends up in logs
impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret_key", &"***")
            .field("using_default_key", &self.using_default_key)
            .finish()
    }
}

/// Local disk storage for uploaded files
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
}

impl Config {
    /// Build the full configuration from the process environment.
    ///
    /// `.env` is loaded by `main` before this runs.
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            session: SessionConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}

/// Read `key`, falling back to `default` when unset, and parse it
fn env_or<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("Invalid {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 16 * 1024 * 1024;

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 5000)?,
            max_request_body_size: env_or(
                "MAX_REQUEST_BODY_SIZE",
                Self::DEFAULT_MAX_REQUEST_BODY_SIZE,
            )?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?,
            max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
        })
    }
}

impl SessionConfig {
    const DEFAULT_SECRET_KEY: &'static str = "devkey";

    pub fn from_env() -> Result<Self, String> {
        match env::var("SECRET_KEY").ok().filter(|s| !s.is_empty()) {
            Some(secret_key) => Ok(Self {
                secret_key,
                using_default_key: false,
            }),
            None => Ok(Self {
                secret_key: Self::DEFAULT_SECRET_KEY.to_string(),
                using_default_key: true,
            }),
        }
    }
}

impl StorageConfig {
    const DEFAULT_UPLOAD_DIR: &'static str = "uploads";

    pub fn from_env() -> Result<Self, String> {
        let upload_dir = env::var("UPLOAD_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_UPLOAD_DIR.to_string());

        Ok(Self {
            upload_dir: PathBuf::from(upload_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let app = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_request_body_size: AppConfig::DEFAULT_MAX_REQUEST_BODY_SIZE,
        };
        assert_eq!(app.server_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_default_body_limit_is_16_mib() {
        assert_eq!(AppConfig::DEFAULT_MAX_REQUEST_BODY_SIZE, 16_777_216);
    }

    #[test]
    fn test_env_or_parses_and_defaults() {
        env::set_var("FEEDBACK_PORTAL_TEST_LIMIT", " 2048 ");
        assert_eq!(env_or("FEEDBACK_PORTAL_TEST_LIMIT", 1usize), Ok(2048));

        env::set_var("FEEDBACK_PORTAL_TEST_PORT", "not-a-port");
        let err = env_or::<u16>("FEEDBACK_PORTAL_TEST_PORT", 5000).unwrap_err();
        assert!(err.contains("FEEDBACK_PORTAL_TEST_PORT"));

        assert_eq!(env_or("FEEDBACK_PORTAL_TEST_UNSET", 7u32), Ok(7));
    }

    #[test]
    fn test_session_config_debug_hides_key() {
        let session = SessionConfig {
            secret_key: "super-secret".to_string(),
            using_default_key: false,
        };
        let printed = format!("{:?}", session);
        assert!(!printed.contains("super-secret"));
    }
}
