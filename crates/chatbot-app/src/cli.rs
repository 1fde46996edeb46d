//! CLI argument definitions for the chatbot binary.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::{Path, PathBuf};

use chatbot_core::config::ChatbotConfig;
use clap::{Parser, Subcommand};

/// Chatbot PGR integration: track a citizen's complaints from the command line.
#[derive(Parser, Debug)]
#[command(name = "chatbot", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search PGR for a user's recent complaints and print the chat message.
    Track {
        /// Tenant to search in, e.g. `pb.amritsar`.
        #[arg(long = "tenant-id")]
        tenant_id: String,

        /// Auth token forwarded in `RequestInfo`.
        #[arg(long = "auth-token", env = "CHATBOT_AUTH_TOKEN")]
        auth_token: String,

        /// User info JSON forwarded in `RequestInfo`.
        #[arg(long = "user-info")]
        user_info: String,
    },
    /// Print the effective configuration as TOML.
    Config {
        /// Also write it to the resolved config path.
        #[arg(long)]
        save: bool,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > CHATBOT_CONFIG env var > platform default (~/.chatbot/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("CHATBOT_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// True when the config path came from `--config` or `CHATBOT_CONFIG`.
    pub fn config_is_explicit(&self) -> bool {
        self.config.is_some() || std::env::var_os("CHATBOT_CONFIG").is_some()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Read the configuration at `path`.
///
/// Only a missing file at the default location yields defaults. A named file
/// must exist, and any file that exists must parse.
pub fn load_config(path: &Path, explicit: bool) -> chatbot_core::Result<ChatbotConfig> {
    if !explicit && !path.exists() {
        return Ok(ChatbotConfig::default());
    }
    ChatbotConfig::load(path)
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".chatbot").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".chatbot").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbot_core::ChatbotError;

    #[test]
    fn test_parse_track_command() {
        let args = CliArgs::parse_from([
            "chatbot",
            "track",
            "--tenant-id",
            "pb.amritsar",
            "--auth-token",
            "tok",
            "--user-info",
            r#"{"id":1}"#,
        ]);
        match args.command {
            Command::Track {
                tenant_id,
                auth_token,
                user_info,
            } => {
                assert_eq!(tenant_id, "pb.amritsar");
                assert_eq!(auth_token, "tok");
                assert_eq!(user_info, r#"{"id":1}"#);
            }
            other => panic!("expected track, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from([
            "chatbot",
            "config",
            "-c",
            "/tmp/chatbot.toml",
            "-l",
            "debug",
        ]);
        assert!(matches!(args.command, Command::Config { save: false }));
        assert!(args.config_is_explicit());
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/chatbot.toml"));
        assert_eq!(args.resolve_log_level("info"), "debug");
    }

    #[test]
    fn test_log_level_falls_back_to_config() {
        let args = CliArgs::parse_from(["chatbot", "config"]);
        assert_eq!(args.resolve_log_level("warn"), "warn");
    }

    #[test]
    fn test_config_save_flag() {
        let args = CliArgs::parse_from(["chatbot", "config", "--save"]);
        assert!(matches!(args.command, Command::Config { save: true }));
    }

    #[test]
    fn test_load_config_missing_default_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml"), false).unwrap();
        assert_eq!(config.pgr.recent_complaints_count, 5);
    }

    #[test]
    fn test_load_config_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(&dir.path().join("config.toml"), true);
        assert!(matches!(result, Err(ChatbotError::Io(_))));
    }

    #[test]
    fn test_load_config_unparsable_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is {{ not toml").unwrap();

        for explicit in [true, false] {
            let result = load_config(&path, explicit);
            assert!(
                matches!(result, Err(ChatbotError::Config(_))),
                "explicit = {}",
                explicit
            );
        }
    }

    #[test]
    fn test_load_config_reads_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chatbot.toml");
        std::fs::write(&path, "[pgr]\nrecent_complaints_count = 9\n").unwrap();

        let config = load_config(&path, true).unwrap();
        assert_eq!(config.pgr.recent_complaints_count, 9);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_track_requires_tenant() {
        let result = CliArgs::try_parse_from([
            "chatbot",
            "track",
            "--auth-token",
            "t",
            "--user-info",
            "{}",
        ]);
        assert!(result.is_err());
    }
}
