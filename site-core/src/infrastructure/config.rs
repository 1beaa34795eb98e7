use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Reads the process environment (and `.env`, if present).
    pub fn from_env(default_port: u16) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(default_port, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(default_port: u16, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?,
            None => default_port,
        };
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let jwt_secret =
            lookup("JWT_SECRET").ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set"))?;
        let session_ttl_hours = match lookup("SESSION_TTL_HOURS") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid SESSION_TTL_HOURS: {}", e))?,
            None => 24,
        };
        if session_ttl_hours <= 0 {
            anyhow::bail!("SESSION_TTL_HOURS must be positive");
        }
        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret,
            session_ttl_hours,
            cors_origins,
        })
    }
}

/// Parses an optional boolean flag such as `true`, `1`, `yes`.
pub fn parse_flag(name: &str, raw: Option<String>) -> anyhow::Result<bool> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if ["1", "true", "yes", "on"].iter().any(|t| v.eq_ignore_ascii_case(t)) => Ok(true),
        Some(v) if ["0", "false", "no", "off"].iter().any(|f| v.eq_ignore_ascii_case(f)) => {
            Ok(false)
        }
        Some(v) => Err(anyhow::anyhow!("invalid {}: {}", name, v)),
    }
}
