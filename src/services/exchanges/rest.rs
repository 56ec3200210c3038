use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::models::market::{Exchange, Symbol};

const MAX_ERROR_BODY: usize = 200;

/// Thin GET-only wrapper shared by the venue clients
#[derive(Clone)]
pub(crate) struct RestClient {
    exchange: Exchange,
    base_url: String,
    client: reqwest::Client,
}

impl RestClient {
    pub(crate) fn new(
        exchange: Exchange,
        base_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            exchange,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// GET `path` and decode the JSON body.
    ///
    /// 404, and 400 responses that mention the symbol, map to
    /// [`FetchError::UnsupportedSymbol`].
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        symbol: &Symbol,
    ) -> FetchResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(exchange = %self.exchange, url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::network(self.exchange, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(self.exchange, e))?;

        if !status.is_success() {
            return Err(self.status_error(status, &body, symbol));
        }

        serde_json::from_str(&body).map_err(|e| FetchError::parse(self.exchange, e))
    }

    fn status_error(&self, status: StatusCode, body: &str, symbol: &Symbol) -> FetchError {
        let mentions_symbol = {
            let lower = body.to_ascii_lowercase();
            lower.contains("symbol") || lower.contains("pair") || lower.contains("notfound")
        };
        if status == StatusCode::NOT_FOUND
            || (status == StatusCode::BAD_REQUEST && mentions_symbol)
        {
            return FetchError::UnsupportedSymbol {
                exchange: self.exchange,
                symbol: symbol.to_string(),
            };
        }

        let mut message: String = body.chars().take(MAX_ERROR_BODY).collect();
        if message.is_empty() {
            message = status.canonical_reason().unwrap_or("request failed").to_string();
        }
        FetchError::Api {
            exchange: self.exchange,
            status: status.as_u16(),
            message,
        }
    }
}

/// Read a price field that venues send either as a JSON string or a number
pub(crate) fn value_f64(exchange: Exchange, field: &str, value: &Value) -> FetchResult<f64> {
    match value {
        Value::String(s) => parse_f64(exchange, field, s),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| FetchError::malformed(exchange, format!("{} is not a float", field))),
        other => Err(FetchError::malformed(
            exchange,
            format!("{} has unexpected type: {}", field, other),
        )),
    }
}

pub(crate) fn parse_f64(exchange: Exchange, field: &str, raw: &str) -> FetchResult<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        FetchError::malformed(exchange, format!("{} is not a number: {:?}", field, raw))
    })
}

/// Read a unix timestamp (string or number) in the given unit
pub(crate) fn value_timestamp(
    exchange: Exchange,
    value: &Value,
    millis: bool,
) -> FetchResult<DateTime<Utc>> {
    let raw = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| FetchError::malformed(exchange, format!("invalid timestamp: {}", value)))?;

    let timestamp = if millis {
        DateTime::from_timestamp_millis(raw)
    } else {
        DateTime::from_timestamp(raw, 0)
    };
    timestamp.ok_or_else(|| {
        FetchError::malformed(exchange, format!("timestamp out of range: {}", raw))
    })
}

/// Field `index` of a positional array row
pub(crate) fn row_field<'a>(
    exchange: Exchange,
    row: &'a [Value],
    index: usize,
) -> FetchResult<&'a Value> {
    row.get(index).ok_or_else(|| {
        FetchError::malformed(
            exchange,
            format!("row has {} fields, expected at least {}", row.len(), index + 1),
        )
    })
}

pub(crate) fn unsupported_symbol(exchange: Exchange, symbol: &Symbol) -> FetchError {
    FetchError::UnsupportedSymbol {
        exchange,
        symbol: symbol.to_string(),
    }
}
