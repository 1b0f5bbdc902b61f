use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public base URL of the frontend, used in password-reset links.
    pub frontend_url: String,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Directory where uploaded files are stored durably.
    pub upload_dir: String,
    /// Public base URL under which stored files are served.
    pub upload_base_url: String,
    /// SMTP settings; `None` disables outbound mail (reset links are
    /// still generated and the request endpoint still answers 200).
    pub smtp: Option<SmtpConfig>,
}

/// Outbound SMTP configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// From address, e.g. `portal@agency.example`.
    pub from_address: String,
    /// From display name shown to recipients.
    pub from_name: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `FRONTEND_URL`         | `http://localhost:5173`    |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `UPLOAD_BASE_URL`      | `/uploads`                 |
    /// | `SMTP_HOST` etc.       | unset (mail disabled)      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .trim_end_matches('/')
            .to_string();

        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());
        let upload_base_url = std::env::var("UPLOAD_BASE_URL")
            .unwrap_or_else(|_| "/uploads".into())
            .trim_end_matches('/')
            .to_string();

        let jwt = JwtConfig::from_env();
        let smtp = Self::smtp_from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            frontend_url,
            jwt,
            upload_dir,
            upload_base_url,
            smtp,
        }
    }

    /// SMTP settings are all-or-nothing: if `SMTP_HOST` is unset, mail is
    /// disabled and the remaining variables are ignored.
    fn smtp_from_env() -> Option<SmtpConfig> {
        let host = std::env::var("SMTP_HOST").ok()?;
        Some(SmtpConfig {
            host,
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: std::env::var("SMTP_FROM_ADDRESS")
                .expect("SMTP_FROM_ADDRESS must be set when SMTP_HOST is set"),
            from_name: std::env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Atelier Portal".into()),
        })
    }
}
