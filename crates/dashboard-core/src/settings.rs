use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Pop-up event analytics with brand sonification
#[derive(Parser, Debug, Clone)]
#[command(
    name = "popup-dashboard",
    about = "Pop-up event analytics with brand sonification",
    version
)]
pub struct Settings {
    /// CSV file of pop-up event records
    pub csv: PathBuf,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "table", "json"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Directory rendered brand tones are written to
    #[arg(long, env = "POPUP_DASHBOARD_AUDIO_DIR")]
    pub audio_dir: Option<PathBuf>,

    /// Tone length in milliseconds (50-5000)
    #[arg(long, default_value = "250", value_parser = clap::value_parser!(u64).range(50..=5000))]
    pub note_ms: u64,

    /// Tone sample rate in Hz (8000-96000)
    #[arg(long, default_value = "44100", value_parser = clap::value_parser!(u32).range(8000..=96000))]
    pub sample_rate: u32,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.popup-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
}

impl LastUsedParams {
    /// Default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&home_dir())
    }

    /// Config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(APP_DIR).join("last_used.json")
    }

    /// Load persisted params from the default path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to the default path.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::config_path())
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Name of the per-user state directory under `$HOME`.
pub const APP_DIR: &str = ".popup-dashboard";

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// `~/.popup-dashboard/audio`, the default tone output directory.
pub fn default_audio_dir() -> PathBuf {
    home_dir().join(APP_DIR).join("audio")
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, resolve defaults, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation; accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(args: Vec<std::ffi::OsString>, config_path: &Path) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "could not clear saved configuration");
            }
            return Self::resolve_defaults(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins; the csv path is never remembered.
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "note_ms") {
            if let Some(v) = last.note_ms {
                settings.note_ms = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "sample_rate") {
            if let Some(v) = last.sample_rate {
                settings.sample_rate = v;
            }
        }
        if settings.audio_dir.is_none() {
            settings.audio_dir = last.audio_dir;
        }

        settings = Self::resolve_defaults(settings);

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(error = %e, "could not persist last-used settings");
        }

        settings
    }

    /// Tone length as a [`Duration`].
    pub fn note_duration(&self) -> Duration {
        Duration::from_millis(self.note_ms)
    }

    /// Fill in the audio directory and apply the `--debug` flag.
    fn resolve_defaults(mut settings: Settings) -> Settings {
        if settings.audio_dir.is_none() {
            settings.audio_dir = Some(default_audio_dir());
        }
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            view: Some(s.view.clone()),
            audio_dir: s.audio_dir.clone(),
            note_ms: Some(s.note_ms),
            sample_rate: Some(s.sample_rate),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
