use std::time::{Instant, SystemTime, UNIX_EPOCH};

use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::endpoint::Endpoint;
use crate::error::LoadgenError;
use crate::recorder::Recorder;

#[derive(Debug, Deserialize)]
struct CreatedItem {
    id: i64,
}

/// HTTP client bound to one item service.
#[derive(Debug, Clone)]
pub struct ItemClient {
    http: Client,
    base_url: String,
}

impl ItemClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }

    fn url(&self, path: &str, ts: u128) -> String {
        // cache-busting query param, ignored by the server
        format!("{}{}?ts={}", self.base_url, path, ts)
    }

    /// Send one request, record it, and hand back the response on the expected status.
    async fn call(
        &self,
        recorder: &Recorder,
        endpoint: Endpoint,
        method: Method,
        url: String,
        body: Option<serde_json::Value>,
        expected: StatusCode,
    ) -> Result<reqwest::Response, LoadgenError> {
        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let started = Instant::now();
        let res = match req.send().await {
            Ok(res) => res,
            Err(source) => {
                recorder.record_failure(endpoint);
                return Err(LoadgenError::Transport { endpoint, source });
            }
        };
        let ok = res.status() == expected;
        recorder.record(endpoint, started.elapsed(), ok);
        if !ok {
            return Err(LoadgenError::UnexpectedStatus {
                endpoint,
                status: res.status().as_u16(),
                expected: expected.as_u16(),
            });
        }
        Ok(res)
    }

    async fn create(&self, recorder: &Recorder, ts: u128) -> Result<i64, LoadgenError> {
        let res = self
            .call(
                recorder,
                Endpoint::Create,
                Method::POST,
                self.url("/items", ts),
                Some(json!({"name": "item", "value": 100})),
                StatusCode::CREATED,
            )
            .await?;
        let item: CreatedItem = res.json().await.map_err(|_| LoadgenError::MissingId)?;
        Ok(item.id)
    }

    /// Detail, update and delete on a freshly created item.
    async fn exercise_item(&self, recorder: &Recorder, id: i64, ts: u128) {
        let path = format!("/items/{id}");
        let steps = [
            (Endpoint::Detail, Method::GET, None, StatusCode::OK),
            (
                Endpoint::Update,
                Method::PUT,
                Some(json!({"name": "item-upd", "value": 200})),
                StatusCode::OK,
            ),
            (Endpoint::Delete, Method::DELETE, None, StatusCode::NO_CONTENT),
        ];
        for (endpoint, method, body, expected) in steps {
            if let Err(e) = self.call(recorder, endpoint, method, self.url(&path, ts), body, expected).await {
                warn!(error = %e, id, "request failed");
            }
        }
    }

    /// One scenario iteration. Failures are recorded and logged, never propagated.
    pub async fn iteration(&self, recorder: &Recorder) {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        match self.create(recorder, ts).await {
            Ok(id) => self.exercise_item(recorder, id, ts).await,
            Err(e) => warn!(error = %e, "create failed, skipping item steps"),
        }

        let listed = self
            .call(recorder, Endpoint::List, Method::GET, self.url("/items", ts), None, StatusCode::OK)
            .await;
        if let Err(e) = listed {
            warn!(error = %e, "request failed");
        }
    }
}
