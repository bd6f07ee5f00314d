use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub http: HttpConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the travel-note API (e.g. "http://localhost:8080/api")
    pub api_base_url: Option<String>,
    /// Where the user is sent when the session is missing or expired
    pub login_path: String,
    /// Region code to preselect at startup (province or district)
    pub initial_region_code: Option<String>,
    /// Bearer token to start the session with
    pub api_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySource {
    /// Built-in region table
    Static,
    /// Region endpoints of the API
    Http,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub source: DirectorySource,
    /// Artificial delay applied by the static directory on every call
    pub latency: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        let app = AppConfig::from_env()?;
        let directory = DirectoryConfig::from_env(app.api_base_url.is_some())?;

        if directory.source == DirectorySource::Http && app.api_base_url.is_none() {
            return Err("DIRECTORY_SOURCE=http requires API_BASE_URL".to_string());
        }

        Ok(Config {
            app,
            http: HttpConfig::from_env()?,
            directory,
        })
    }
}

impl AppConfig {
    const DEFAULT_LOGIN_PATH: &'static str = "/login";

    pub fn from_env() -> Result<Self, String> {
        let api_base_url = env::var("API_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let login_path =
            env::var("LOGIN_PATH").unwrap_or_else(|_| Self::DEFAULT_LOGIN_PATH.to_string());
        if !login_path.starts_with('/') {
            return Err(format!("LOGIN_PATH must start with '/': {}", login_path));
        }

        let initial_region_code = env::var("INITIAL_REGION_CODE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let api_token = env::var("API_TOKEN").ok().filter(|s| !s.is_empty());

        Ok(Self {
            api_base_url,
            login_path,
            initial_region_code,
            api_token,
        })
    }
}

impl HttpConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_USER_AGENT: &'static str = "TravelnoteClient/0.1";

    pub fn from_env() -> Result<Self, String> {
        let timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "HTTP_TIMEOUT_SECS must be a valid number".to_string())?;

        let user_agent =
            env::var("HTTP_USER_AGENT").unwrap_or_else(|_| Self::DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            timeout: Duration::from_secs(timeout_secs),
            user_agent,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl DirectoryConfig {
    const DEFAULT_LATENCY_MS: u64 = 0;

    /// Source defaults to the API when one is configured
    pub fn from_env(has_api: bool) -> Result<Self, String> {
        let source = match env::var("DIRECTORY_SOURCE") {
            Ok(value) => DirectorySource::parse(&value)?,
            Err(_) if has_api => DirectorySource::Http,
            Err(_) => DirectorySource::Static,
        };

        let latency_ms = env::var("DIRECTORY_LATENCY_MS")
            .unwrap_or_else(|_| Self::DEFAULT_LATENCY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "DIRECTORY_LATENCY_MS must be a valid number".to_string())?;

        Ok(Self {
            source,
            latency: Duration::from_millis(latency_ms),
        })
    }
}

impl DirectorySource {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "http" => Ok(Self::Http),
            other => Err(format!(
                "DIRECTORY_SOURCE must be 'static' or 'http', got '{}'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_source_parse() {
        assert_eq!(DirectorySource::parse("static"), Ok(DirectorySource::Static));
        assert_eq!(DirectorySource::parse(" HTTP "), Ok(DirectorySource::Http));
        assert!(DirectorySource::parse("sqlite").is_err());
    }
}
