//! guru-core: Pocket Guru core library
//!
//! Configuration, the OpenAI client, the meditation practice catalog and
//! the fixed persona texts shared by every endpoint.

pub mod catalog;
pub mod config;
pub mod error;
pub mod llm;
pub mod persona;

pub use catalog::{PracticeCatalog, PracticeTemplate, PracticeType, script_token_budget};
pub use config::{ApiConfig, Config, ElevenLabsConfig, OpenAiConfig};
pub use error::{Error, Result};
pub use llm::{OpenAiApi, OpenAiClient};
