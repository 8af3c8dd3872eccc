use anyhow::Context;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{
    AlertsPayload, DeployAck, DeployRequest, LogsPayload, ModelsPayload, NeuralHealthPayload,
    NeuralStatus, PerformanceOverview, PoliciesPayload,
};

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Clone)]
pub struct CortexClient {
    inner: reqwest::Client,
    base_url: String,
}

impl CortexClient {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let base_url = normalize_base_url(&config.api_base_url);

        let builder = reqwest::Client::builder();
        // reqwest 的 wasm 后端不支持请求级超时，由浏览器托管。
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);

        let client = builder.build().context("failed to build reqwest client")?;

        Ok(Self {
            inner: client,
            base_url,
        })
    }

    pub async fn get_alerts(&self) -> ClientResult<AlertsPayload> {
        self.send(self.request(Method::GET, "api/alerts")).await
    }

    pub async fn get_neural_status(&self) -> ClientResult<NeuralStatus> {
        self.send(self.request(Method::GET, "api/neural/status"))
            .await
    }

    pub async fn get_performance_overview(&self) -> ClientResult<PerformanceOverview> {
        self.send(self.request(Method::GET, "api/performance/overview"))
            .await
    }

    pub async fn get_logs(&self, limit: u32) -> ClientResult<LogsPayload> {
        let builder = self
            .request(Method::GET, "api/logs")
            .query(&LogsQuery { limit });
        self.send(builder).await
    }

    pub async fn get_models(&self) -> ClientResult<ModelsPayload> {
        self.send(self.request(Method::GET, "api/models")).await
    }

    pub async fn get_policies(&self) -> ClientResult<PoliciesPayload> {
        self.send(self.request(Method::GET, "api/policies")).await
    }

    pub async fn deploy_policy(&self, policy_id: &str) -> ClientResult<DeployAck> {
        let builder = self
            .request(Method::POST, "api/policies/deploy")
            .json(&DeployRequest { policy_id });
        self.send(builder).await
    }

    pub async fn get_neural_health(&self) -> ClientResult<NeuralHealthPayload> {
        self.send(self.request(Method::GET, "api/neural/health"))
            .await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.inner.request(method, self.join_path(path))
    }

    fn join_path(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T>(&self, builder: reqwest::RequestBuilder) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await.map_err(ClientError::from)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::from)?;

        if status.is_success() {
            if bytes.is_empty() {
                return Err(ClientError::EmptyResponse(status));
            }
            return serde_json::from_slice(&bytes).map_err(ClientError::from);
        }

        if let Ok(body) = serde_json::from_slice::<ApiErrorBody>(&bytes) {
            if !body.error.is_empty() {
                return Err(ClientError::Api(body.with_status(status)));
            }
        }

        Err(ClientError::UnexpectedStatus {
            status,
            body: bytes.to_vec(),
        })
    }
}

fn normalize_base_url(input: &str) -> String {
    input.trim_end_matches('/').to_string()
}

#[derive(Serialize)]
struct LogsQuery {
    limit: u32,
}

/// 后端应用级错误体，形如 `{"error": "..."}`。
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(skip)]
    pub status: Option<StatusCode>,
}

impl ApiErrorBody {
    fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }
}

impl std::fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({status})", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("api error: {0}")]
    Api(ApiErrorBody),
    #[error("empty response body: {0}")]
    EmptyResponse(StatusCode),
    #[error("unexpected status {status}: {body:?}")]
    UnexpectedStatus { status: StatusCode, body: Vec<u8> },
}

impl ClientError {
    /// 面向横幅展示的文案：应用错误给后端原文，其余给统一措辞。
    pub fn banner_message(&self) -> String {
        match self {
            Self::Api(body) => body.error.clone(),
            other => format!("请求失败: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base_url("http://localhost:8000"), "http://localhost:8000");
    }

    #[test]
    fn join_path_tolerates_leading_slash() {
        let client = CortexClient::new(AppConfig::default()).unwrap();
        assert_eq!(
            client.join_path("/api/alerts"),
            "http://localhost:8000/api/alerts"
        );
        assert_eq!(
            client.join_path("api/models"),
            "http://localhost:8000/api/models"
        );
    }

    #[test]
    fn api_error_body_decodes_backend_shape() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error":"策略不存在"}"#).unwrap();
        assert_eq!(body.error, "策略不存在");
        assert!(body.status.is_none());
    }
}
