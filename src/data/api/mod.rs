//! Client for the NBA stats REST API
//!
//! Three read-only endpoints, each a plain GET with a fixed query-parameter
//! dictionary. Responses share a common envelope: one or more result sets,
//! each a list of column headers plus a list of value rows.

pub mod box_score;
pub mod leaders;
pub mod shot_chart;

use crate::{ApiConfig, HoopsError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const BASE_URL: &str = "https://stats.nba.com/stats";

/// Blocking HTTP client for the stats API
pub struct StatsClient {
    client: reqwest::blocking::Client,
    throttle: Duration,
}

impl StatsClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        StatsClient {
            client,
            throttle: Duration::from_millis(config.throttle_ms),
        }
    }

    /// Issue a GET against `{BASE_URL}/{endpoint}` and decode the envelope.
    ///
    /// The API answers invalid parameter combinations with a plain-text
    /// message instead of JSON; that body is surfaced as an `Api` error.
    pub fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<StatsResponse> {
        let url = format!("{}/{}", BASE_URL, endpoint);
        log::debug!("GET {} ({} params)", url, params.len());

        let body = self.client.get(&url).query(params).send()?.text()?;

        match serde_json::from_str::<RawResponse>(&body) {
            Ok(raw) => Ok(StatsResponse::from(raw)),
            Err(_) => Err(HoopsError::Api(truncate(body.trim(), 200))),
        }
    }

    /// Sleep out the configured politeness delay between bulk requests
    pub fn throttle(&self) {
        if !self.throttle.is_zero() {
            std::thread::sleep(self.throttle);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

// Some endpoints answer with `resultSets` (a list), others with a single
// `resultSet` object. Both shapes collapse into one set list.
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(rename = "resultSets", default)]
    result_sets: Vec<ResultSet>,
    #[serde(rename = "resultSet")]
    result_set: Option<ResultSet>,
}

/// Decoded response envelope
#[derive(Debug)]
pub struct StatsResponse {
    sets: Vec<ResultSet>,
}

impl From<RawResponse> for StatsResponse {
    fn from(raw: RawResponse) -> Self {
        let mut sets = raw.result_sets;
        if let Some(set) = raw.result_set {
            sets.push(set);
        }
        StatsResponse { sets }
    }
}

impl StatsResponse {
    pub fn sets(&self) -> &[ResultSet] {
        &self.sets
    }

    /// Find a result set by its `name` field
    pub fn find_set(&self, name: &str) -> Result<&ResultSet> {
        self.sets
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
            .ok_or_else(|| HoopsError::Decode(format!("missing result set {}", name)))
    }
}

/// One result set: column headers plus value rows
#[derive(Debug, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub name: Option<String>,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.row_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_set.is_empty()
    }

    /// Iterate rows as header-keyed views
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.row_set.iter().map(move |values| Row {
            headers: &self.headers,
            values,
        })
    }

    /// The first row, or a decode error naming the set
    pub fn first_row(&self) -> Result<Row<'_>> {
        self.rows().next().ok_or_else(|| {
            HoopsError::Decode(format!(
                "result set {} is empty",
                self.name.as_deref().unwrap_or("<unnamed>")
            ))
        })
    }
}

/// A single row, addressed by column header
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.values.get(idx)
    }

    /// Integer field; numeric strings (zero-padded game ids) also parse
    pub fn get_i64(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn get_f64(&self, column: &str) -> Option<f64> {
        match self.get(column)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn get_str(&self, column: &str) -> Option<&'a str> {
        self.get(column)?.as_str()
    }

    pub fn require_i64(&self, column: &str) -> Result<i64> {
        self.get_i64(column)
            .ok_or_else(|| HoopsError::Decode(format!("missing integer column {}", column)))
    }

    pub fn require_str(&self, column: &str) -> Result<&'a str> {
        self.get_str(column)
            .ok_or_else(|| HoopsError::Decode(format!("missing string column {}", column)))
    }

    /// String field that may legitimately be null
    pub fn str_or_empty(&self, column: &str) -> String {
        self.get_str(column).unwrap_or_default().to_string()
    }
}
