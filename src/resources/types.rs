//! Request payloads for the resource clients.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Source or target system of a reconciliation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Adapter name, e.g. `"shopify"` or `"stripe"`.
    pub adapter: String,
    #[serde(default)]
    pub config: HashMap<String, serde_json::Value>,
}

impl AdapterConfig {
    pub fn new(adapter: impl Into<String>) -> Self {
        Self {
            adapter: adapter.into(),
            config: HashMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingRule {
    pub field: String,
    /// Match strategy understood by the server (`"exact"`, `"fuzzy"`, `"range"`, ...).
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl MatchingRule {
    pub fn new(field: impl Into<String>, rule_type: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule_type: rule_type.into(),
            tolerance: None,
            days: None,
            threshold: None,
        }
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchingRules {
    pub matching: Vec<MatchingRule>,
    #[serde(
        rename = "conflictResolution",
        skip_serializing_if = "Option::is_none"
    )]
    pub conflict_resolution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub name: String,
    pub source: AdapterConfig,
    pub target: AdapterConfig,
    pub rules: MatchingRules,
    /// Cron expression; omitted for on-demand jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWebhookRequest {
    pub url: String,
    pub events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}
