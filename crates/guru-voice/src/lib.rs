//! guru-voice: speech synthesis for pocket-guru
//!
//! Streams narrated meditations from ElevenLabs and relays the audio to
//! HTTP clients chunk by chunk.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guru_voice::{relay, ElevenLabsClient, SpeechRequest, SpeechStreamer, DEFAULT_RELAY_CAPACITY};
//!
//! let client = ElevenLabsClient::new(&config.elevenlabs)?;
//! let audio = client
//!     .stream_speech("EXAVITQu4vr4xnSDxMaL", &SpeechRequest::new(script, "eleven_v3"))
//!     .await?;
//!
//! let (body, outcome) = relay(audio, DEFAULT_RELAY_CAPACITY);
//! let response = axum::body::Body::from_stream(body);
//! ```

pub mod error;
pub mod relay;
pub mod tts;

pub use error::{Result, VoiceError};
pub use relay::{DEFAULT_RELAY_CAPACITY, RelayOutcome, RelayStream, relay};
pub use tts::{
    AudioStream, ElevenLabsClient, OutputFormat, SpeechRequest, SpeechStreamer, VoiceSettings,
};
