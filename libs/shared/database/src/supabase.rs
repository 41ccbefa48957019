use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_RANGE, CONTENT_TYPE, AUTHORIZATION},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::error::DatabaseError;

pub type Result<T> = std::result::Result<T, DatabaseError>;

const UNIQUE_VIOLATION_CODE: &str = "23505";

pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.anon_key)
                .map_err(|_| DatabaseError::InvalidRequest("anon key is not a valid header value".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let bearer = auth_token.unwrap_or(&self.anon_key);
        if !bearer.is_empty() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", bearer))
                    .map_err(|_| DatabaseError::InvalidRequest("token is not a valid header value".to_string()))?,
            );
        }

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str,
                            auth_token: Option<&str>, body: Option<Value>)
                            -> Result<T>
    where T: DeserializeOwned {
        self.request_with_headers(method, path, auth_token, body, None).await
    }

    pub async fn request_with_headers<T>(&self, method: Method, path: &str,
                                         auth_token: Option<&str>, body: Option<Value>,
                                         extra_headers: Option<HeaderMap>)
                                         -> Result<T>
    where T: DeserializeOwned {
        let (data, _) = self.send(method, path, auth_token, body, extra_headers).await?;
        Ok(data)
    }

    /// Runs a GET with `Prefer: count=exact` and returns the rows together with
    /// the total row count reported in `Content-Range`.
    pub async fn select_with_count<T>(&self, path: &str, auth_token: Option<&str>)
                                      -> Result<(Vec<T>, Option<u64>)>
    where T: DeserializeOwned {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("count=exact"));

        self.send(Method::GET, path, auth_token, None, Some(headers)).await
    }

    async fn send<T>(&self, method: Method, path: &str,
                     auth_token: Option<&str>, body: Option<Value>,
                     extra_headers: Option<HeaderMap>)
                     -> Result<(T, Option<u64>)>
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers(auth_token)?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url)
            .headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);
            return Err(classify_error(status.as_u16(), error_text));
        }

        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);

        let data = response.json::<T>().await?;
        Ok((data, total))
    }
}

fn classify_error(status: u16, error_text: String) -> DatabaseError {
    let body: Option<Value> = serde_json::from_str(&error_text).ok();
    let code = body
        .as_ref()
        .and_then(|b| b.get("code"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    if status == 409 || code == UNIQUE_VIOLATION_CODE {
        let detail = body
            .as_ref()
            .map(|b| {
                let message = b.get("message").and_then(Value::as_str).unwrap_or_default();
                let details = b.get("details").and_then(Value::as_str).unwrap_or_default();
                format!("{} {}", message, details).trim().to_string()
            })
            .unwrap_or_else(|| error_text.clone());
        return DatabaseError::UniqueViolation { detail };
    }

    match status {
        401 | 403 => DatabaseError::Unauthorized(error_text),
        404 => DatabaseError::NotFound(error_text),
        _ => DatabaseError::Api { status, message: error_text },
    }
}

/// `Content-Range: 0-9/42` -> `Some(42)`; `*/0` -> `Some(0)`; `0-9/*` -> `None`.
fn parse_content_range_total(raw: &str) -> Option<u64> {
    raw.rsplit_once('/').and_then(|(_, total)| total.parse().ok())
}
