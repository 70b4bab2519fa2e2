use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::OracleConfig;
use crate::error::{ConfigError, OracleError};
use crate::structs::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::traits::oracle::AnswerOracle;

// 密钥放在请求头里，避免出现在url和错误日志中
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini generateContent接口的客户端
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: Url,
}

impl GeminiClient {
    pub fn new(config: &OracleConfig) -> Result<GeminiClient, ConfigError> {
        let endpoint = endpoint(&config.base_url, &config.model)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "oracle.request_timeout_secs",
                value: e.to_string(),
            })?;
        Ok(GeminiClient { http, endpoint })
    }
}

// {base_url}/v1beta/models/{model}:generateContent
fn endpoint(base_url: &str, model: &str) -> Result<Url, ConfigError> {
    let raw = format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    );
    Url::parse(&raw).map_err(|_| ConfigError::InvalidValue { key: "oracle.base_url", value: raw })
}

impl AnswerOracle for GeminiClient {
    async fn ask(&self, api_key: &str, prompt: &str) -> Result<String, OracleError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.without_url()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(OracleError::RateLimited);
        }
        if !status.is_success() {
            return Err(OracleError::Status(status));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Decode(e.without_url()))?;
        match body.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                let finish_reason = body.candidates.first().and_then(|c| c.finish_reason.as_deref());
                log::debug!("Gemini没有返回文本, finishReason: {:?}", finish_reason);
                Err(OracleError::EmptyResponse {
                    block_reason: body.block_reason().map(str::to_string),
                })
            }
        }
    }
}
