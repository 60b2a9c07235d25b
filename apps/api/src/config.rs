use anyhow::{Context, Result};
use uuid::Uuid;

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub gemini_api_key: String,
    /// User ids granted access to the admin report.
    pub admin_user_ids: Vec<Uuid>,
    pub session_ttl_hours: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            admin_user_ids: parse_admin_ids(&std::env::var("ADMIN_USER_IDS").unwrap_or_default())?,
            session_ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .unwrap_or_else(|_| "720".to_string())
                .parse::<i64>()
                .context("SESSION_TTL_HOURS must be a valid integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn is_admin(&self, user_id: &Uuid) -> bool {
        self.admin_user_ids.contains(user_id)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses a comma-separated list of user UUIDs. Empty input means no admins.
fn parse_admin_ids(raw: &str) -> Result<Vec<Uuid>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Uuid::parse_str(s).with_context(|| format!("Invalid admin user id '{s}'")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_ids_empty() {
        assert!(parse_admin_ids("").unwrap().is_empty());
        assert!(parse_admin_ids(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_admin_ids_list() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let parsed = parse_admin_ids(&format!("{a}, {b}")).unwrap();
        assert_eq!(parsed, vec![a, b]);
    }

    #[test]
    fn test_parse_admin_ids_rejects_garbage() {
        assert!(parse_admin_ids("not-a-uuid").is_err());
    }
}
