//! Meditation practice catalog
//!
//! Maps each practice type to its script prompt, narration voice and
//! artwork prompt. Built once at startup and shared read-only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Output tokens budgeted per minute of meditation
pub const TOKENS_PER_MINUTE: u64 = 200;

/// Output-token ceiling for a script of the given length
pub fn script_token_budget(minutes: u32) -> u64 {
    u64::from(minutes) * TOKENS_PER_MINUTE
}

/// Placeholder replaced by the duration in prompt templates
const MINUTES_PLACEHOLDER: &str = "{minutes}";

/// Guided meditation themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PracticeType {
    MorningPeace,
    AnxietyRelief,
    HeartHealing,
    InnerStrength,
    GratitudeJoy,
    EveningReflection,
}

impl PracticeType {
    /// Every practice type, in catalog order
    pub const ALL: [PracticeType; 6] = [
        Self::MorningPeace,
        Self::AnxietyRelief,
        Self::HeartHealing,
        Self::InnerStrength,
        Self::GratitudeJoy,
        Self::EveningReflection,
    ];

    /// Wire key, e.g. `anxiety-relief`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MorningPeace => "morning-peace",
            Self::AnxietyRelief => "anxiety-relief",
            Self::HeartHealing => "heart-healing",
            Self::InnerStrength => "inner-strength",
            Self::GratitudeJoy => "gratitude-joy",
            Self::EveningReflection => "evening-reflection",
        }
    }
}

impl fmt::Display for PracticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a key names no known practice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPractice(pub String);

impl fmt::Display for UnknownPractice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown practice type: {}", self.0)
    }
}

impl std::error::Error for UnknownPractice {}

impl FromStr for PracticeType {
    type Err = UnknownPractice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPractice(s.to_string()))
    }
}

/// Static per-practice configuration
#[derive(Debug, Clone)]
pub struct PracticeTemplate {
    /// Script prompt with a `{minutes}` placeholder
    pub prompt_template: &'static str,
    /// ElevenLabs voice used for narration
    pub voice_id: &'static str,
    /// Prompt for the practice artwork
    pub image_prompt: &'static str,
}

impl PracticeTemplate {
    /// Build the script prompt for a meditation of `minutes` length
    pub fn render_prompt(&self, minutes: u32) -> String {
        self.prompt_template
            .replace(MINUTES_PLACEHOLDER, &minutes.to_string())
    }
}

/// Immutable lookup table of practice templates
#[derive(Debug, Clone)]
pub struct PracticeCatalog {
    templates: BTreeMap<PracticeType, PracticeTemplate>,
}

impl PracticeCatalog {
    /// Catalog shipped with the application
    pub fn standard() -> Self {
        let templates = PracticeType::ALL
            .into_iter()
            .map(|practice| (practice, standard_template(practice)))
            .collect();

        Self { templates }
    }

    /// Template for a practice, if the catalog carries one
    pub fn get(&self, practice: PracticeType) -> Option<&PracticeTemplate> {
        self.templates.get(&practice)
    }

    /// Resolve a wire key straight to its template
    pub fn lookup(&self, key: &str) -> Option<(PracticeType, &PracticeTemplate)> {
        let practice = key.parse().ok()?;
        self.get(practice).map(|t| (practice, t))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PracticeType, &PracticeTemplate)> {
        self.templates.iter().map(|(p, t)| (*p, t))
    }
}

impl Default for PracticeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_template(practice: PracticeType) -> PracticeTemplate {
    match practice {
        PracticeType::MorningPeace => PracticeTemplate {
            prompt_template: r#"Create a focused {minutes}-minute morning meditation script. Structure:
1. Welcome & centering (30 seconds)
2. Gratitude practice (2-3 minutes)
3. Setting intentions (remaining time)
4. Closing blessing (30 seconds)

Keep it concise and direct. Use warm, peaceful language with natural pauses marked as [pause]. Example: "Good morning, dear soul... [pause] Let us begin this sacred day together...""#,
            // Adam: clear, energetic
            voice_id: "pNInz6obpgDQGcFmaJgB",
            image_prompt: "Peaceful sunrise meditation scene with soft golden light, gentle mountain silhouettes, calm lake reflection, ethereal mist, spiritual and serene atmosphere, warm amber and orange tones, perfect for morning meditation",
        },
        PracticeType::AnxietyRelief => PracticeTemplate {
            prompt_template: r#"Create a {minutes}-minute meditation for calming anxiety and worry. Include:
- Acknowledging the worry with compassion (2-3 minutes)
- Gentle breathing to slow the nervous system
- Surrendering fears to the divine presence
- Guided visualization of peaceful sanctuary
- Affirmations of safety and divine protection
Use soothing language: "It is natural to feel worried, my child..." "But you are safe in God's loving presence..." "Let us breathe together and find your peace...""#,
            // Bella: calm, soothing
            voice_id: "EXAVITQu4vr4xnSDxMaL",
            image_prompt: "Calming ocean waves scene with soft blue tones, peaceful water surface, gentle foam, tranquil sky, soothing and therapeutic atmosphere, blue and teal color palette, perfect for anxiety relief meditation",
        },
        PracticeType::HeartHealing => PracticeTemplate {
            prompt_template: r#"Create a {minutes}-minute meditation for healing grief, loss, and relationship wounds. Include:
- Gentle acknowledgment of the heart's pain (3-4 minutes)
- Breathing into the heart space with compassion
- Inviting divine love to heal and transform
- Releasing what no longer serves with love
- Opening to new possibilities and hope
Use healing language: "Your heart has been through much, dear one..." "God's love is healing you even now..." "It is safe to feel and to heal...""#,
            // Charlotte: warm, compassionate
            voice_id: "XB0fDUnXU5powFXDhCwa",
            image_prompt: "Gentle healing light surrounding an opening lotus flower, soft pink and rose tones, warm compassionate energy, sacred healing space, divine love radiating, perfect for heart healing meditation",
        },
        PracticeType::InnerStrength => PracticeTemplate {
            prompt_template: r#"Create a {minutes}-minute meditation for building courage, resilience, and confidence. Include:
- Connecting with the warrior spirit within (2-3 minutes)
- Breathing practices to build inner fire and power
- Visualizing yourself as strong and capable
- Drawing strength from divine source
- Affirmations of courage and resilience
Use empowering language: "You have such strength within you..." "God has given you everything you need..." "You are more powerful than you know, my child...""#,
            // Daniel: deep, confident
            voice_id: "onwK4e9ZLuTAKqWW03F9",
            image_prompt: "Majestic mountain peak with powerful lightning in purple and indigo sky, strong spiritual energy, divine power radiating, courage and resilience symbolized, perfect for inner strength meditation",
        },
        PracticeType::GratitudeJoy => PracticeTemplate {
            prompt_template: r#"Create a {minutes}-minute meditation for cultivating gratitude and divine joy. Include:
- Opening the heart with appreciation (2-3 minutes)
- Reflecting on blessings both great and small
- Feeling gratitude in the body and breath
- Connecting with the joy that is your true nature
- Radiating appreciation and bliss to all beings
Use joyful language: "So much to be grateful for, isn't it?" "Joy is your birthright, dear soul..." "Let your heart overflow with appreciation...""#,
            // Lily: uplifting, joyful
            voice_id: "pFZP5JQG7iQjIQuC4Bku",
            image_prompt: "Abundant garden scene with blooming flowers, vibrant green foliage, golden sunlight filtering through leaves, joyful and grateful energy, emerald and lime tones, perfect for gratitude meditation",
        },
        PracticeType::EveningReflection => PracticeTemplate {
            prompt_template: r#"Create a {minutes}-minute evening meditation for releasing the day and preparing for rest. Include:
- Gentle review of the day with compassion (3-4 minutes)
- Releasing any tensions or worries from the day
- Breathing practices to calm and settle
- Gratitude for lessons learned and growth
- Peaceful preparation for restorative sleep
Use calming evening language: "The day is complete, dear one..." "Release what you cannot control..." "Rest now in divine peace and protection...""#,
            // Drew: gentle, reflective
            voice_id: "29vD33N1CtxCmqQRPOHJ",
            image_prompt: "Peaceful moonlit scene with gentle silver light, calm night sky, tranquil reflection, quiet contemplative atmosphere, soft gray and blue tones, perfect for evening meditation",
        },
    }
}
