use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ChatbotError, Result};

/// Top-level configuration for the chatbot.
///
/// Loaded from `~/.chatbot/config.toml` by default. Every section has serde
/// defaults, so a partial file only overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatbotConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pgr: PgrConfig,
    #[serde(default)]
    pub localization: LocalizationConfig,
}

impl ChatbotConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ChatbotConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Check the values the PGR integration cannot run without.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("pgr.service_host", &self.pgr.service_host),
            ("pgr.search_path", &self.pgr.search_path),
            ("pgr.external_host", &self.pgr.external_host),
            (
                "localization.track_header_code",
                &self.localization.track_header_code,
            ),
            (
                "localization.summary_template_code",
                &self.localization.summary_template_code,
            ),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ChatbotError::Config(format!("{} must not be empty", name)));
            }
        }
        if self.pgr.recent_complaints_count == 0 {
            return Err(ChatbotError::Config(
                "pgr.recent_complaints_count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// PGR service endpoints and search limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PgrConfig {
    /// Base URL of the PGR service (scheme + host + optional port).
    pub service_host: String,
    /// Path of the complaint search endpoint, appended to `service_host`.
    pub search_path: String,
    /// Citizen-facing host used to build complaint detail links.
    pub external_host: String,
    /// Maximum number of recent complaints requested per search.
    pub recent_complaints_count: u32,
}

impl PgrConfig {
    /// Full URL of the search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}{}", self.service_host, self.search_path)
    }
}

impl Default for PgrConfig {
    fn default() -> Self {
        Self {
            service_host: "http://pgr-services.egov:8080".to_string(),
            search_path: "/pgr-services/v2/request/_search".to_string(),
            external_host: "https://egov.example.org".to_string(),
            recent_complaints_count: 5,
        }
    }
}

/// Localization codes used when composing tracking messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Catalog code of the header shown above the complaint list.
    pub track_header_code: String,
    /// Template id of the per-complaint summary.
    pub summary_template_code: String,
    /// Prefix joined with a service code to form the category catalog code.
    pub category_prefix: String,
    /// Prefix joined with a single digit to form its numeral catalog code.
    pub numeral_prefix: String,
    /// Plain text sent when the user has no complaints.
    pub no_complaints_message: String,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            track_header_code: "chatbot.message.pgrTrackComplaintEndHeader".to_string(),
            summary_template_code: "chatbot.template.pgrTrackComplaintSummary".to_string(),
            category_prefix: "pgr.complaint.category.".to_string(),
            numeral_prefix: "chatbot.numeral.".to_string(),
            no_complaints_message: "No complaints to display".to_string(),
        }
    }
}
