use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

pub const BACKEND_URL_ENV: &str = "HEARTHY_BACKEND_URL";
pub const BACKEND_ANON_KEY_ENV: &str = "HEARTHY_BACKEND_ANON_KEY";

#[derive(Parser, Debug)]
#[command(name = "hearthy", about = "Volunteer coordination web app")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Backend row service URL
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Backend public API key
    #[arg(long)]
    pub backend_anon_key: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub auth: AuthConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Endpoint of the external row service. Both values are required at
/// startup; the app refuses to boot with a half-configured client.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub cookie_name: String,
    pub session_hours: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "hearthy_session".to_string(),
            session_hours: 24,
        }
    }
}

impl Config {
    /// Precedence: config file < environment < CLI flags.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            config.backend.url = Some(url);
        }
        if let Ok(key) = std::env::var(BACKEND_ANON_KEY_ENV) {
            config.backend.anon_key = Some(key);
        }

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref url) = cli.backend_url {
            config.backend.url = Some(url.clone());
        }
        if let Some(ref key) = cli.backend_anon_key {
            config.backend.anon_key = Some(key.clone());
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .expect("Could not determine home directory")
                .join(".hearthy")
        })
    }

    /// Fails fast when either half of the backend endpoint is missing.
    pub fn backend_endpoint(&self) -> anyhow::Result<(String, String)> {
        let url = self.backend.url.clone().ok_or_else(|| {
            anyhow::anyhow!(
                "backend.url is not configured (set {} or [backend] url in config.toml)",
                BACKEND_URL_ENV
            )
        })?;
        let anon_key = self.backend.anon_key.clone().ok_or_else(|| {
            anyhow::anyhow!(
                "backend.anon_key is not configured (set {} or [backend] anon_key in config.toml)",
                BACKEND_ANON_KEY_ENV
            )
        })?;
        Ok((url, anon_key))
    }
}
