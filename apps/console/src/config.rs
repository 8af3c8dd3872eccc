use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const STREAM_PATH: &str = "/ws/neural_stream";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppProfile {
    Dev,
    Prod,
}

impl AppProfile {
    pub fn from_env(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("prod") | Some("production") => Self::Prod,
            _ => Self::Dev,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub stream_base_url: Option<String>,
    pub profile: AppProfile,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            stream_base_url: None,
            profile: AppProfile::Dev,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        crate::config::load_dotenv();

        let mut config = Self::default();

        if let Some(url) = read_env("CORTEX_API_BASE_URL") {
            config.api_base_url = url;
        }

        if let Some(stream_url) = read_env("CORTEX_STREAM_BASE_URL") {
            config.stream_base_url = Some(stream_url);
        }

        let profile_raw = read_env("CORTEX_PROFILE");
        config.profile = AppProfile::from_env(profile_raw);

        if let Some(secs) =
            read_env("CORTEX_REQUEST_TIMEOUT_SECS").and_then(|value| value.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs.max(1));
        }

        config
    }

    /// 神经流 WebSocket 地址；未配置时从 HTTP 基地址推导。
    pub fn stream_endpoint(&self) -> String {
        let base = self
            .stream_base_url
            .clone()
            .unwrap_or_else(|| derive_ws_base(&self.api_base_url));
        format!("{}{}", base.trim_end_matches('/'), STREAM_PATH)
    }
}

fn derive_ws_base(api_base_url: &str) -> String {
    let trimmed = api_base_url.trim_end_matches('/');
    if let Some(rest) = trimmed.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        format!("ws://{trimmed}")
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| option_env_from_build(key).map(|s| s.to_string()))
}

fn option_env_from_build(key: &str) -> Option<&'static str> {
    match key {
        "CORTEX_API_BASE_URL" => option_env!("CORTEX_API_BASE_URL"),
        "CORTEX_STREAM_BASE_URL" => option_env!("CORTEX_STREAM_BASE_URL"),
        "CORTEX_PROFILE" => option_env!("CORTEX_PROFILE"),
        "CORTEX_REQUEST_TIMEOUT_SECS" => option_env!("CORTEX_REQUEST_TIMEOUT_SECS"),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("failed to load .env: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn load_dotenv() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_defaults_to_dev() {
        assert_eq!(AppProfile::from_env(None), AppProfile::Dev);
        assert_eq!(AppProfile::from_env(Some("staging".into())), AppProfile::Dev);
        assert_eq!(AppProfile::from_env(Some("prod".into())), AppProfile::Prod);
        assert_eq!(
            AppProfile::from_env(Some("production".into())),
            AppProfile::Prod
        );
    }

    #[test]
    fn stream_endpoint_derives_ws_scheme() {
        let config = AppConfig::default();
        assert_eq!(
            config.stream_endpoint(),
            "ws://localhost:8000/ws/neural_stream"
        );

        let mut secure = AppConfig::default();
        secure.api_base_url = "https://cortex.example.com/".into();
        assert_eq!(
            secure.stream_endpoint(),
            "wss://cortex.example.com/ws/neural_stream"
        );
    }

    #[test]
    fn stream_endpoint_prefers_explicit_override() {
        let mut config = AppConfig::default();
        config.stream_base_url = Some("ws://stream.internal:9001/".into());
        assert_eq!(
            config.stream_endpoint(),
            "ws://stream.internal:9001/ws/neural_stream"
        );
    }
}
