use crate::RosterlyError;
use secrecy::SecretString;

/// Value left behind when the deploy-time substitution of the runtime key
/// never happened. It must be ignored, not used as a credential.
pub const API_KEY_PLACEHOLDER: &str = "__ROSTERLY_API_KEY__";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: SecretString,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, RosterlyError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    ///
    /// Key precedence: `ROSTERLY_API_KEY` (runtime-injected) wins over
    /// `ROSTERLY_DEFAULT_API_KEY`, except when it still holds the deploy
    /// placeholder.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, RosterlyError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let runtime = get("ROSTERLY_API_KEY").filter(|k| k != API_KEY_PLACEHOLDER);
        let api = runtime
            .or_else(|| get("ROSTERLY_DEFAULT_API_KEY"))
            .ok_or_else(|| RosterlyError::Config("ROSTERLY_API_KEY missing".into()))?;
        let base_url = get("ROSTERLY_BASE_URL").unwrap_or_else(|| "http://localhost:8000".into());
        Ok(Self {
            api_key: SecretString::new(api.into()),
            base_url,
        })
    }
}
