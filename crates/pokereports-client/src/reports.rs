use pokereports_core::payload;
use pokereports_core::{Report, ReportId};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::directory::{BoxFuture, ReportDirectory};
use crate::error::ClientError;

#[derive(Serialize)]
struct CreateReportBody<'a> {
    pokemon_type: &'a str,
}

/// Client for the report API rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct ReportApi {
    http: Client,
    base_url: String,
}

impl ReportApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// The underlying HTTP client, shared with link probing and downloads.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// `GET /api/request`.
    pub async fn list_reports(&self) -> Result<Vec<Report>, ClientError> {
        let url = format!("{}/api/request", self.base_url);
        let resp = self.http.get(&url).send().await.map_err(|e| {
            error!(%url, error = %e, "listing reports failed");
            network_error(e)
        })?;
        let resp = ensure_success(resp)?;

        let body = resp.bytes().await.map_err(network_error)?;
        let reports = payload::parse_report_list(&body)?;
        debug!(count = reports.len(), "listed reports");
        Ok(reports)
    }

    /// `POST /api/request` with `{"pokemon_type": ...}`.
    pub async fn create_report(&self, pokemon_type: &str) -> Result<Value, ClientError> {
        let url = format!("{}/api/request", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&CreateReportBody { pokemon_type })
            .send()
            .await
            .map_err(|e| {
                error!(%url, error = %e, "creating report failed");
                network_error(e)
            })?;
        let resp = ensure_success(resp)?;

        let created = decode_json(resp).await?;
        info!(%pokemon_type, "report requested");
        Ok(created)
    }

    /// `POST /api/delete-request?id=<id>`.
    ///
    /// A failed response may carry `{"detail": ...}`; that message is
    /// preferred over the status line.
    pub async fn delete_report(&self, id: &ReportId) -> Result<Value, ClientError> {
        let url = format!("{}/api/delete-request", self.base_url);
        let resp = self
            .http
            .post(&url)
            .query(&[("id", id.to_string())])
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(%url, %id, error = %e, "deleting report failed");
                network_error(e)
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("detail").and_then(detail_text));
            let err = ClientError::Remote {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                detail,
            };
            error!(%id, error = %err, "delete rejected");
            return Err(err);
        }

        let ack = decode_json(resp).await?;
        info!(%id, "report scheduled for deletion");
        Ok(ack)
    }
}

impl ReportDirectory for ReportApi {
    fn list_reports(&self) -> BoxFuture<'_, Result<Vec<Report>, ClientError>> {
        Box::pin(ReportApi::list_reports(self))
    }

    fn create_report<'a>(
        &'a self,
        pokemon_type: &'a str,
    ) -> BoxFuture<'a, Result<Value, ClientError>> {
        Box::pin(ReportApi::create_report(self, pokemon_type))
    }

    fn delete_report<'a>(&'a self, id: &'a ReportId) -> BoxFuture<'a, Result<Value, ClientError>> {
        Box::pin(ReportApi::delete_report(self, id))
    }
}

fn network_error(e: reqwest::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

fn ensure_success(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let err = ClientError::Remote {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        detail: None,
    };
    error!(url = %resp.url(), error = %err, "report API returned an error");
    Err(err)
}

async fn decode_json(resp: Response) -> Result<Value, ClientError> {
    let body = resp.bytes().await.map_err(network_error)?;
    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// `detail` as a message. Empty or falsy values fall back to the status line.
fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
