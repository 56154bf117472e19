/// Service configuration loaded from the environment
use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub jwt: JwtSettings,
    pub email: EmailSettings,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
}

#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: String,
    pub password_reset_base_url: Option<String>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        EmailSettings {
            smtp_host: String::new(),
            smtp_port: 1025,
            smtp_username: None,
            smtp_password: None,
            smtp_from: "noreply@ads.local".to_string(),
            password_reset_base_url: None,
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    ///
    /// In debug builds, variables from a local `.env` file are loaded first.
    pub fn load() -> Result<Self> {
        #[cfg(debug_assertions)]
        dotenvy::dotenv().ok();

        Ok(Settings {
            database: DatabaseSettings::from_env()?,
            server: ServerSettings::from_env()?,
            jwt: JwtSettings::from_env()?,
            email: EmailSettings::from_env()?,
        })
    }
}

impl DatabaseSettings {
    fn from_env() -> Result<Self> {
        Ok(DatabaseSettings {
            url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
        })
    }
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(ServerSettings {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }
}

impl JwtSettings {
    fn from_env() -> Result<Self> {
        Ok(JwtSettings {
            secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
        })
    }
}

impl EmailSettings {
    fn from_env() -> Result<Self> {
        Ok(EmailSettings {
            smtp_host: env::var("SMTP_HOST").unwrap_or_default(),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "1025".to_string())
                .parse()
                .context("SMTP_PORT must be a number")?,
            smtp_username: env::var("SMTP_USERNAME").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@ads.local".to_string()),
            password_reset_base_url: env::var("PASSWORD_RESET_BASE_URL").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_settings_defaults() {
        let settings = ServerSettings::from_env().unwrap();
        assert!(!settings.host.is_empty());
        assert!(settings.port > 0);
    }

    #[test]
    fn test_email_settings_default_is_noop() {
        let settings = EmailSettings::default();
        assert!(settings.smtp_host.is_empty());
        assert_eq!(settings.smtp_port, 1025);
        assert_eq!(settings.smtp_from, "noreply@ads.local");
    }
}
