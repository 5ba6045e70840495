use anyhow::{Context, Result};

const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";
/// "Rachel", the stock ElevenLabs narration voice.
const DEFAULT_ELEVENLABS_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
const DEFAULT_ELEVENLABS_MODEL_ID: &str = "eleven_turbo_v2_5";
const DEFAULT_DEEPGRAM_BASE_URL: &str = "https://api.deepgram.com";
const DEFAULT_DEEPGRAM_MODEL: &str = "nova-2";

/// Application configuration, read once at startup and carried in `AppState`.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub llm: LlmConfig,
    pub tts: TtsConfig,
    pub stt: SttConfig,
    /// Shared secret for `/api/admin/*`. Admin routes are closed when unset.
    pub admin_api_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct TtsConfig {
    pub api_key: String,
    pub base_url: String,
    pub voice_id: String,
    pub model_id: String,
}

#[derive(Debug, Clone)]
pub struct SttConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            port: optional("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
            llm: LlmConfig {
                api_key: require("OPENAI_API_KEY")?,
                base_url: optional("LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
                model: optional("LLM_MODEL", DEFAULT_LLM_MODEL),
                timeout_secs: optional("LLM_TIMEOUT_SECS", "120")
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            },
            tts: TtsConfig {
                api_key: require("ELEVENLABS_API_KEY")?,
                base_url: optional("ELEVENLABS_BASE_URL", DEFAULT_ELEVENLABS_BASE_URL),
                voice_id: optional("ELEVENLABS_VOICE_ID", DEFAULT_ELEVENLABS_VOICE_ID),
                model_id: optional("ELEVENLABS_MODEL_ID", DEFAULT_ELEVENLABS_MODEL_ID),
            },
            stt: SttConfig {
                api_key: require("DEEPGRAM_API_KEY")?,
                base_url: optional("DEEPGRAM_BASE_URL", DEFAULT_DEEPGRAM_BASE_URL),
                model: optional("DEEPGRAM_MODEL", DEFAULT_DEEPGRAM_MODEL),
            },
            admin_api_token: lookup("ADMIN_API_TOKEN").filter(|v| !v.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "postgres://localhost/coach"),
            ("OPENAI_API_KEY", "sk-test"),
            ("ELEVENLABS_API_KEY", "el-test"),
            ("DEEPGRAM_API_KEY", "dg-test"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<Config> {
        Config::from_lookup(|k| env.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_applied_for_optional_values() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.llm.model, DEFAULT_LLM_MODEL);
        assert_eq!(config.llm.timeout_secs, 120);
        assert_eq!(config.tts.voice_id, DEFAULT_ELEVENLABS_VOICE_ID);
        assert_eq!(config.stt.model, DEFAULT_DEEPGRAM_MODEL);
        assert!(config.admin_api_token.is_none());
    }

    #[test]
    fn test_missing_required_key_names_the_variable() {
        let mut env = base_env();
        env.remove("OPENAI_API_KEY");
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_blank_required_key_is_rejected() {
        let mut env = base_env();
        env.insert("DEEPGRAM_API_KEY", "   ");
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut env = base_env();
        env.insert("PORT", "not-a-port");
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_overrides_are_respected() {
        let mut env = base_env();
        env.insert("PORT", "9000");
        env.insert("LLM_MODEL", "gpt-4o");
        env.insert("ADMIN_API_TOKEN", "secret");
        let config = load(&env).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.admin_api_token.as_deref(), Some("secret"));
    }
}
