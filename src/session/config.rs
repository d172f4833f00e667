//! Configuration management

use crate::{Result, SpellError};
use ini::Ini;
use log::{debug, info};
use std::path::PathBuf;
use std::str::FromStr;

/// Which synthesis backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// espeak-ng subprocess, no network
    Local,
    /// Cloud TTS API, needs an API key
    Cloud,
}

impl FromStr for BackendKind {
    type Err = SpellError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" | "espeak" => Ok(BackendKind::Local),
            "cloud" | "api" => Ok(BackendKind::Cloud),
            other => Err(SpellError::Config(format!(
                "unknown speech backend {:?} (expected \"local\" or \"cloud\")",
                other
            ))),
        }
    }
}

/// Application configuration
///
/// Loaded once at startup from ~/.spelldrill.cfg; the file is created
/// with defaults on first run. The API key may instead come from the
/// SPELLDRILL_API_KEY environment variable, which takes precedence.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.spelldrill.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from disk or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(path)
    }

    /// Load configuration from an explicit path (used by tests)
    pub fn load_from(path: PathBuf) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| SpellError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_ini();
            default
                .write_to_file(&path)
                .map_err(|e| SpellError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Built-in defaults without touching the filesystem (used by tests)
    pub fn default_in_memory() -> Self {
        Self {
            ini: Self::default_ini(),
            path: PathBuf::new(),
        }
    }

    /// Get config file path (~/.spelldrill.cfg)
    fn config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".spelldrill.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_ini() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("backend", "local")
            .set("voice", "en-us")
            .set("rate", "140")
            .set("timeout_secs", "10");

        ini.with_section(Some("cloud"))
            .set("endpoint", "https://api.elevenlabs.io/v1/text-to-speech")
            .set("voice_id", "21m00Tcm4TlvDq8ikWAM")
            .set("model_id", "eleven_monolingual_v1")
            .set("api_key", "");

        ini.with_section(Some("quiz")).set("wordlist", "");

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    // Quiz-specific configuration getters

    /// Selected synthesis backend
    pub fn backend(&self) -> Result<BackendKind> {
        self.get_string("speech", "backend", "local").parse()
    }

    /// Voice/locale for synthesis (US English by default)
    pub fn voice(&self) -> String {
        self.get_string("speech", "voice", "en-us")
    }

    /// Local speaking rate in words per minute
    pub fn rate_wpm(&self) -> u16 {
        self.get_int("speech", "rate", 140)
            .try_into()
            .unwrap_or(140)
    }

    /// Bound on how long one synthesis request may take
    pub fn timeout_secs(&self) -> u64 {
        self.get_int("speech", "timeout_secs", 10)
            .try_into()
            .unwrap_or(10)
    }

    /// Base URL of the cloud synthesis endpoint
    pub fn cloud_endpoint(&self) -> String {
        self.get_string(
            "cloud",
            "endpoint",
            "https://api.elevenlabs.io/v1/text-to-speech",
        )
    }

    /// Voice identifier appended to the endpoint
    pub fn cloud_voice_id(&self) -> String {
        self.get_string("cloud", "voice_id", "21m00Tcm4TlvDq8ikWAM")
    }

    /// TTS model identifier sent with each request
    pub fn cloud_model_id(&self) -> String {
        self.get_string("cloud", "model_id", "eleven_monolingual_v1")
    }

    /// API key for the cloud backend
    ///
    /// Read from SPELLDRILL_API_KEY first, then the config file. Absence
    /// is not an error here; the cloud backend degrades to a per-call
    /// warning.
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var("SPELLDRILL_API_KEY") {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }

        let key = self.get_string("cloud", "api_key", "");
        let key = key.trim();
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }

    /// Optional word-list file overriding the built-in words
    pub fn wordlist_path(&self) -> Option<PathBuf> {
        let path = self.get_string("quiz", "wordlist", "");
        let path = path.trim();
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}
