//! HTTP client shared by both providers
//!
//! Applies a governor quota per provider, a bounded per-request timeout, the
//! provider's auth headers, and maps every non-2xx outcome onto
//! `UpstreamError` so callers can route on it.

use super::retry_policy::{RateLimitInfo, RetryPolicy};
use crate::shared::{
    domain::value_objects::Provider,
    errors::{UpstreamError, UpstreamResult},
    utils::logger::{LogContext, TimedOperation},
};
use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{direct::NotKeyed, InMemoryState},
    Quota, RateLimiter as GovernorRateLimiter,
};
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

const USER_AGENT: &str = "content-hub/0.1 (+https://github.com/content-hub/content-hub)";

/// Rate limited HTTP client bound to one provider
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectRateLimiter,
    retry_policy: RetryPolicy,
    user_agent: String,
    provider: Provider,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl RateLimitClient {
    /// Client for the TMDB REST catalog (v4 read access token as bearer)
    pub fn for_tmdb(bearer_token: Option<String>, timeout: Duration) -> Self {
        let mut client = Self::new(
            Provider::Tmdb,
            RetryPolicy::tmdb(),
            // TMDB: ~40 req/sec ceiling, stay well below it
            Self::create_rate_limiter(20.0, 10),
            USER_AGENT.to_string(),
        )
        .with_timeout(timeout);
        client.bearer_token = bearer_token;
        client
    }

    /// Client for the AniList GraphQL API
    pub fn for_anilist(timeout: Duration) -> Self {
        Self::new(
            Provider::AniList,
            RetryPolicy::anilist(),
            // AniList: 30 req/min (degraded state) = 0.5 req/sec
            Self::create_rate_limiter(0.5, 2),
            USER_AGENT.to_string(),
        )
        .with_timeout(timeout)
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    pub fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> DirectRateLimiter {
        let period = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::from_secs(3600)
        };

        let burst = NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst);

        GovernorRateLimiter::direct(quota)
    }

    pub fn new(
        provider: Provider,
        retry_policy: RetryPolicy,
        rate_limiter: DirectRateLimiter,
        user_agent: String,
    ) -> Self {
        Self {
            client: Client::new(),
            rate_limiter,
            retry_policy,
            user_agent,
            provider,
            bearer_token: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Make a GET request
    pub async fn get<T>(&self, url: &str) -> UpstreamResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request_with_rate_limit(Method::GET, url, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<T>(&self, url: &str, body: &Value) -> UpstreamResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request_with_rate_limit(Method::POST, url, Some(body))
            .await
    }

    /// Send a request, pacing and retrying only on HTTP 429
    async fn request_with_rate_limit<T>(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> UpstreamResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let attempts = self.retry_policy.max_retries + 1;

        for attempt in 0..attempts {
            // Wait for rate limiter before attempting request
            self.rate_limiter.until_ready().await;

            let timer = TimedOperation::new(url);
            let response = self
                .build_and_send_request(&method, url, body)
                .await
                .map_err(|e| UpstreamError::from_transport(self.provider, &e))?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                if attempt + 1 < attempts {
                    let rate_limit_info = RateLimitInfo::from_headers(response.headers());
                    let delay = self
                        .retry_policy
                        .calculate_delay(attempt, rate_limit_info.recommended_delay());
                    log::warn!(
                        "{} API rate limited (attempt {}/{}). Waiting {:?} before retry.",
                        self.provider.display_name(),
                        attempt + 1,
                        attempts,
                        delay
                    );
                    sleep(delay).await;
                    continue;
                }
                break;
            }

            return self.parse_response(url, response, timer).await;
        }

        Err(UpstreamError::RateLimited {
            provider: self.provider,
            attempts,
        })
    }

    /// Build and send the actual HTTP request
    async fn build_and_send_request(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, reqwest::Error> {
        let mut request_builder = self
            .client
            .request(method.clone(), url)
            .timeout(self.timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");

        // Add provider-specific headers
        match self.provider {
            Provider::Tmdb => {
                if let Some(token) = &self.bearer_token {
                    request_builder = request_builder.bearer_auth(token);
                }
            }
            Provider::AniList => {
                request_builder = request_builder.header("Content-Type", "application/json");
            }
        }

        if let Some(json_body) = body {
            request_builder = request_builder.json(json_body);
        }

        request_builder.send().await
    }

    /// Map the status, then decode the body
    async fn parse_response<T>(
        &self,
        url: &str,
        response: Response,
        timer: TimedOperation,
    ) -> UpstreamResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_transport(self.provider, &e))?;
        LogContext::upstream_call(
            self.provider,
            &resource_path(url),
            status.as_u16(),
            timer.elapsed_ms(),
        );

        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::not_found(self.provider, resource_path(url)));
        }

        if !status.is_success() {
            return Err(UpstreamError::status(
                self.provider,
                status.as_u16(),
                &response_text,
            ));
        }

        decode_body(self.provider, &response_text)
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Decode a JSON body, keeping a short excerpt of it on failure
pub fn decode_body<T>(provider: Provider, text: &str) -> UpstreamResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(text).map_err(|e| {
        let excerpt: String = text.chars().take(200).collect();
        UpstreamError::decode(provider, format!("{}. Response: {}", e, excerpt))
    })
}

/// Path portion of a URL, without the query string (keeps tokens out of logs)
fn resource_path(url: &str) -> String {
    reqwest::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.split('?').next().unwrap_or(url).to_string())
}
