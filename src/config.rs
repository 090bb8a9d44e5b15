//! Configuration management for docviewer using the prefer crate.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::viewer::ViewerLabels;

/// Default backend the search page is served from.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the search backend.
    pub base_url: String,
    /// User agent override for HTTP requests.
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Directory print documents are written to.
    pub print_dir: PathBuf,
    /// User-visible strings.
    pub labels: ViewerLabels,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to ~/Documents/docviewer/ like other user data
        let data_dir = dirs::document_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("docviewer");

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
            request_timeout: 30,
            print_dir: data_dir.join("print"),
            labels: ViewerLabels::default(),
        }
    }
}

impl Settings {
    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("invalid base_url {:?}: {}", self.base_url, e))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(format!("unsupported base_url scheme: {}", other)),
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// User agent string.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub request_timeout: Option<u64>,
    /// Print output directory (`~` is expanded).
    #[serde(default)]
    pub print_dir: Option<String>,
    /// Label overrides for localized front ends.
    #[serde(default)]
    pub labels: Option<ViewerLabels>,
}

impl Config {
    /// Load configuration using prefer crate.
    /// Automatically discovers docviewer config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("docviewer").await {
            Ok(pref_config) => {
                let base_url: Option<String> = pref_config.get("base_url").ok();
                let user_agent: Option<String> = pref_config.get("user_agent").ok();
                let request_timeout: Option<u64> = pref_config.get("request_timeout").ok();
                let print_dir: Option<String> = pref_config.get("print_dir").ok();
                let labels: Option<ViewerLabels> = pref_config.get("labels").ok();

                Config {
                    base_url,
                    user_agent,
                    request_timeout,
                    print_dir,
                    labels,
                }
            }
            Err(_) => {
                // No config file found, use defaults
                Self::default()
            }
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref base_url) = self.base_url {
            settings.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(ref dir) = self.print_dir {
            let path = shellexpand::tilde(dir);
            settings.print_dir = PathBuf::from(path.as_ref());
        }
        if let Some(ref labels) = self.labels {
            settings.labels = labels.clone();
        }
    }
}

/// Load settings from configuration (async version).
pub async fn load_settings() -> Settings {
    let config = Config::load().await;
    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    settings
}
