use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::SheetError;
use crate::traits::{Sheet, SheetBody, SheetStore};

/// HttpSheet talks to a remote sheet service:
///
/// ```text
/// GET {base_url}/stores/{store_id}/sheets/{worksheet}  → {"values": [[header], [row], ...]}
/// PUT {base_url}/stores/{store_id}/sheets/{worksheet}  ← same body, replaces everything
/// ```
///
/// A 404 on GET means the worksheet has never been written and reads as empty.
pub struct HttpSheet {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpSheet {
    pub fn new(
        base_url: &str,
        store_id: &str,
        worksheet: &str,
        token: Option<&str>,
    ) -> Result<Self, SheetError> {
        if base_url.is_empty() {
            return Err(SheetError::Connection("no sheet service URL configured".into()));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let val = format!("Bearer {}", token);
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&val)
                    .map_err(|e| SheetError::Unauthorized(e.to_string()))?,
            );
        }

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SheetError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            url: sheet_url(base_url, store_id, worksheet),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn sheet_url(base_url: &str, store_id: &str, worksheet: &str) -> String {
    format!(
        "{}/stores/{}/sheets/{}",
        base_url.trim_end_matches('/'),
        store_id,
        worksheet
    )
}

fn status_error(status: StatusCode, body: String) -> SheetError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SheetError::Unauthorized(format!("{}: {}", status, body))
        }
        _ => SheetError::Rejected {
            status: status.as_u16(),
            message: body,
        },
    }
}

impl SheetStore for HttpSheet {
    fn read_all(&self) -> Result<Sheet, SheetError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| SheetError::Connection(format!("{}: {}", self.url, e)))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            debug!("HttpSheet: {} not found, reading as empty", self.url);
            return Ok(Sheet::default());
        }
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            warn!("HttpSheet: GET {} failed with {}", self.url, status);
            return Err(status_error(status, text));
        }

        let body: SheetBody = resp
            .json()
            .map_err(|e| SheetError::Format(e.to_string()))?;
        Ok(Sheet::from_body(body))
    }

    fn replace_all(&self, sheet: &Sheet) -> Result<(), SheetError> {
        let resp = self
            .client
            .put(&self.url)
            .json(&sheet.to_body())
            .send()
            .map_err(|e| SheetError::Connection(format!("{}: {}", self.url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            warn!("HttpSheet: PUT {} failed with {}", self.url, status);
            return Err(status_error(status, text));
        }
        debug!("HttpSheet: replaced {} rows at {}", sheet.rows.len(), self.url);
        Ok(())
    }
}
