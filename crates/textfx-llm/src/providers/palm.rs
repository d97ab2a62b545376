//! Generative Language `generateText` provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use textfx_core::{
    ApiError, CompletionRequest, CompletionResponse, Config, HarmThreshold, SafetySetting,
};

use crate::provider::{CompletionClient, LLMError, Result};

const RETRY_MIN_INTERVAL: Duration = Duration::from_millis(100);
const RETRY_MAX_INTERVAL: Duration = Duration::from_secs(2);

pub struct PalmClient {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    model: String,
    candidate_count: u32,
    max_output_tokens: u32,
    threshold: HarmThreshold,
}

impl PalmClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(LLMError::MissingApiKey)?;
        if config.candidate_count == 0 {
            return Err(LLMError::ZeroCount("candidate_count"));
        }
        if config.max_output_tokens == 0 {
            return Err(LLMError::ZeroCount("max_output_tokens"));
        }
        let client = Self::build_http_client(config)?;

        Ok(Self {
            client: Self::build_retry_client(client, config.max_retries),
            api_key,
            base_url: config.api_base.clone(),
            model: config.model.clone(),
            candidate_count: config.candidate_count,
            max_output_tokens: config.max_output_tokens,
            threshold: HarmThreshold::default(),
        })
    }

    /// Set a custom base URL (e.g., for proxies or a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Block threshold sent for every harm category.
    pub fn with_threshold(mut self, threshold: HarmThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    fn build_http_client(config: &Config) -> Result<Client> {
        let mut builder = Client::builder();
        if !config.http_proxy.is_empty() {
            builder = builder.proxy(Proxy::http(&config.http_proxy)?);
        }
        if !config.https_proxy.is_empty() {
            builder = builder.proxy(Proxy::https(&config.https_proxy)?);
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }

    fn build_retry_client(client: Client, max_retries: u32) -> ClientWithMiddleware {
        if max_retries == 0 {
            return ClientBuilder::new(client).build();
        }
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(RETRY_MIN_INTERVAL, RETRY_MAX_INTERVAL)
            .build_with_max_retries(max_retries);

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateText",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn request(&self, prompt: &str, temperature: f32) -> CompletionRequest {
        CompletionRequest {
            prompt: prompt.to_string(),
            temperature,
            candidate_count: self.candidate_count,
            max_output_tokens: self.max_output_tokens,
            safety_settings: SafetySetting::uniform(self.threshold),
        }
    }
}

#[async_trait]
impl CompletionClient for PalmClient {
    async fn predict(&self, prompt: &str, temperature: f32) -> CompletionResponse {
        let request = self.request(prompt, temperature);
        log::debug!(
            "generateText model={} temperature={} candidates={}",
            self.model,
            temperature,
            request.candidate_count
        );

        let response = match self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("generateText request failed: {}", e);
                return CompletionResponse::Error(ApiError::transport(format!(
                    "Request failed: {}",
                    e
                )));
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return CompletionResponse::Error(ApiError {
                    code: i32::from(status.as_u16()),
                    message: format!("Failed to read response body: {}", e),
                    http_status_code: Some(status.as_u16()),
                })
            }
        };

        interpret(status, &text)
    }
}

fn interpret(status: reqwest::StatusCode, text: &str) -> CompletionResponse {
    let http_status = status.as_u16();
    let parsed = serde_json::from_str::<serde_json::Value>(text);

    match parsed {
        Ok(body) => {
            let response = CompletionResponse::from_body(&body, Some(http_status));
            if status.is_success() || response.is_error() {
                response
            } else {
                http_error(status, text)
            }
        }
        Err(_) if !status.is_success() => http_error(status, text),
        Err(e) => CompletionResponse::Error(ApiError {
            code: textfx_core::completion::TRANSPORT_ERROR_CODE,
            message: format!("Undecodable response body: {}", e),
            http_status_code: Some(http_status),
        }),
    }
}

fn http_error(status: reqwest::StatusCode, text: &str) -> CompletionResponse {
    let message = if text.trim().is_empty() {
        status.to_string()
    } else {
        text.trim().to_string()
    };
    CompletionResponse::Error(ApiError {
        code: i32::from(status.as_u16()),
        message,
        http_status_code: Some(status.as_u16()),
    })
}
