use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub admin_password: String,
    pub host: IpAddr,
    pub port: u16,
    pub data_file: PathBuf,
    pub catalog_file: PathBuf,
    pub max_body_size: usize,
    /// Failed logins allowed per IP per window. 0 turns throttling off.
    pub login_max_failures: u32,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let admin_password = env_required("SURVEY_ADMIN_PASSWORD")?;
        if admin_password.is_empty() {
            return Err("SURVEY_ADMIN_PASSWORD must not be empty".to_string());
        }

        let host: IpAddr = env_or("SURVEY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SURVEY_HOST: {e}"))?;

        let port: u16 = env_or("SURVEY_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid SURVEY_PORT: {e}"))?;

        let data_file = PathBuf::from(env_or("SURVEY_DATA_FILE", "data/formData.json"));
        let catalog_file = PathBuf::from(env_or("SURVEY_CATALOG_FILE", "data/courses.json"));

        let max_body_size: usize = env_or("SURVEY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid SURVEY_MAX_BODY_SIZE: {e}"))?;

        let login_max_failures: u32 = env_or("SURVEY_LOGIN_MAX_FAILURES", "5")
            .parse()
            .map_err(|e| format!("Invalid SURVEY_LOGIN_MAX_FAILURES: {e}"))?;

        let log_level = env_or("SURVEY_LOG_LEVEL", "info");

        Ok(Config {
            admin_password,
            host,
            port,
            data_file,
            catalog_file,
            max_body_size,
            login_max_failures,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
