//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. `pocket-guru.toml` in the working directory
//! 3. Defaults
//!
//! Inside the TOML file, `${VAR_NAME}` is replaced with the value of the
//! environment variable of the same name.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Default config file name looked up by [`Config::load`]
pub const CONFIG_FILE: &str = "pocket-guru.toml";

/// OpenAI configuration (chat, script generation, realtime sessions, images)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Base URL
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model for the text chat endpoint
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model for meditation script generation
    #[serde(default = "default_script_model")]
    pub script_model: String,

    /// Model embedded in realtime session credentials
    #[serde(default = "default_realtime_model")]
    pub realtime_model: String,

    /// Model for meditation artwork
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openai_base_url(),
            chat_model: default_chat_model(),
            script_model: default_script_model(),
            realtime_model: default_realtime_model(),
            image_model: default_image_model(),
        }
    }
}

/// ElevenLabs configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    /// API key
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Base URL
    #[serde(default = "default_elevenlabs_base_url")]
    pub base_url: String,

    /// Speech model
    #[serde(default = "default_elevenlabs_model")]
    pub model_id: String,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_elevenlabs_base_url(),
            model_id: default_elevenlabs_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Port for HTTP API server
    #[serde(default = "default_api_port")]
    pub port: u16,

    /// Allowed CORS origins (e.g., ["http://localhost:3000", "https://example.com"])
    /// If unset, any origin is accepted
    #[serde(default)]
    pub allowed_origins: Option<Vec<String>>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
            allowed_origins: None,
        }
    }
}

/// Main configuration for pocket-guru
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    /// HTTP API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o".to_string()
}

fn default_script_model() -> String {
    "gpt-5".to_string()
}

fn default_realtime_model() -> String {
    "gpt-realtime".to_string()
}

fn default_image_model() -> String {
    "gpt-image-1".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_v3".to_string()
}

fn default_api_port() -> u16 {
    3000
}

/// Read a variable, treating an empty value as unset
fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Replace `${VAR_NAME}` occurrences with environment values.
    ///
    /// Unknown variables expand to an empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file, then apply environment overrides.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let mut cfg = Self::from_toml_str(&toml_content)?;
        cfg.apply_env_overrides();
        cfg.validate()?;

        Ok(cfg)
    }

    /// Parse TOML content (with `${VAR}` expansion) without touching the environment overrides
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let expanded_content = Self::expand_env_vars(content);

        let config: TomlConfig = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        Ok(Self::from_toml_config(config))
    }

    /// Load configuration from the default location.
    ///
    /// Uses `./pocket-guru.toml` when it exists, otherwise the environment only.
    pub fn load() -> crate::Result<Self> {
        if Path::new(CONFIG_FILE).exists() {
            return Self::from_toml_file(CONFIG_FILE);
        }

        Self::from_env()
    }

    fn from_toml_config(toml: TomlConfig) -> Self {
        let openai = toml.openai.unwrap_or_default();
        let openai_config = OpenAiConfig {
            api_key: openai.api_key.unwrap_or_default(),
            base_url: openai.base_url.unwrap_or_else(default_openai_base_url),
            chat_model: openai.chat_model.unwrap_or_else(default_chat_model),
            script_model: openai.script_model.unwrap_or_else(default_script_model),
            realtime_model: openai.realtime_model.unwrap_or_else(default_realtime_model),
            image_model: openai.image_model.unwrap_or_else(default_image_model),
        };

        let elevenlabs = toml.elevenlabs.unwrap_or_default();
        let elevenlabs_config = ElevenLabsConfig {
            api_key: elevenlabs.api_key.unwrap_or_default(),
            base_url: elevenlabs.base_url.unwrap_or_else(default_elevenlabs_base_url),
            model_id: elevenlabs.model_id.unwrap_or_else(default_elevenlabs_model),
        };

        let api = toml.api.unwrap_or_default();
        let api_config = ApiConfig {
            port: api.port.unwrap_or_else(default_api_port),
            allowed_origins: api.allowed_origins,
        };

        Config {
            openai: openai_config,
            elevenlabs: elevenlabs_config,
            api: api_config,
        }
    }

    /// Override settings with environment variables that are set and non-empty
    fn apply_env_overrides(&mut self) {
        if let Some(key) = env_non_empty("OPENAI_API_KEY") {
            self.openai.api_key = key;
        }
        if let Some(url) = env_non_empty("OPENAI_BASE_URL") {
            self.openai.base_url = url;
        }
        if let Some(model) = env_non_empty("OPENAI_CHAT_MODEL") {
            self.openai.chat_model = model;
        }
        if let Some(model) = env_non_empty("OPENAI_SCRIPT_MODEL") {
            self.openai.script_model = model;
        }
        if let Some(model) = env_non_empty("OPENAI_REALTIME_MODEL") {
            self.openai.realtime_model = model;
        }
        if let Some(model) = env_non_empty("OPENAI_IMAGE_MODEL") {
            self.openai.image_model = model;
        }

        if let Some(key) = env_non_empty("ELEVENLABS_API_KEY") {
            self.elevenlabs.api_key = key;
        }
        if let Some(url) = env_non_empty("ELEVENLABS_BASE_URL") {
            self.elevenlabs.base_url = url;
        }
        if let Some(model) = env_non_empty("ELEVENLABS_MODEL_ID") {
            self.elevenlabs.model_id = model;
        }

        if let Some(port) = env_non_empty("API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }
        if let Some(origins) = env_non_empty("API_ALLOWED_ORIGINS") {
            self.api.allowed_origins = Some(split_origins(&origins));
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Both provider secrets are required at startup
    pub fn validate(&self) -> crate::Result<()> {
        if self.openai.api_key.is_empty() {
            return Err(Error::Config("OPENAI_API_KEY not set".to_string()));
        }
        if self.elevenlabs.api_key.is_empty() {
            return Err(Error::Config("ELEVENLABS_API_KEY not set".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// TOML file structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct TomlConfig {
    openai: Option<TomlOpenAiConfig>,
    elevenlabs: Option<TomlElevenLabsConfig>,
    api: Option<TomlApiConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlOpenAiConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    chat_model: Option<String>,
    #[serde(default)]
    script_model: Option<String>,
    #[serde(default)]
    realtime_model: Option<String>,
    #[serde(default)]
    image_model: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlElevenLabsConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    model_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlApiConfig {
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    allowed_origins: Option<Vec<String>>,
}
