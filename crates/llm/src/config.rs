/// Generation service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base API URL, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Bearer token for the generation API.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

/// Default chat model.
const DEFAULT_MODEL: &str = "gpt-4o";
/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl LlmConfig {
    /// Load generation configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default                      |
    /// |----------------------------|----------|------------------------------|
    /// | `OPENAI_API_KEY`           | **yes**  | --                           |
    /// | `OPENAI_BASE_URL`          | no       | `https://api.openai.com/v1`  |
    /// | `OPENAI_MODEL`             | no       | `gpt-4o`                     |
    /// | `LLM_REQUEST_TIMEOUT_SECS` | no       | `30`                         |
    ///
    /// # Panics
    ///
    /// Panics if `OPENAI_API_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "OPENAI_API_KEY must not be empty");

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let request_timeout_secs: u64 = std::env::var("LLM_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("LLM_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            model,
            request_timeout_secs,
        }
    }
}
