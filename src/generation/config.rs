//! Generation configuration parsed from environment variables.

pub const WEBHOOK_URL_VAR: &str = "GENERATION_WEBHOOK_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Webhook receiving generation requests. `None` makes every submit fail
    /// with a configuration error.
    pub webhook_url: Option<String>,
}

impl GenerationConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `GENERATION_WEBHOOK_URL`: blank counts as unset; trailing `/` trimmed
    #[must_use]
    pub fn from_env() -> Self {
        Self { webhook_url: normalize_url(std::env::var(WEBHOOK_URL_VAR).ok().as_deref()) }
    }

    /// Build config from `GENERATION_WEBHOOK_URL` as it was set at compile
    /// time. WASM bundles have no process environment to read at runtime.
    #[must_use]
    pub fn from_build_env() -> Self {
        // `option_env!` only takes a literal; keep it equal to `WEBHOOK_URL_VAR`.
        Self { webhook_url: normalize_url(option_env!("GENERATION_WEBHOOK_URL")) }
    }

    #[must_use]
    pub fn with_webhook_url(url: impl AsRef<str>) -> Self {
        Self { webhook_url: normalize_url(Some(url.as_ref())) }
    }
}

fn normalize_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
