//! Client-side idempotency guard for mutating requests.
//!
//! Holds fingerprints and first-submission instants only; no response payloads.

use crate::{Error, ErrorContext, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const DEFAULT_DEDUP_TTL: Duration = Duration::from_secs(60);

/// Deterministic fingerprint of `(method, url, body)`.
///
/// The body is encoded canonically (object keys sorted at every depth), so key
/// order never affects the result. A missing body hashes like `{}`.
pub fn fingerprint(method: &str, url: &str, body: Option<&serde_json::Value>) -> String {
    let canonical = match body {
        Some(v) => canonical_json(v),
        None => "{}".to_string(),
    };
    let mut hasher = Sha256::new();
    hasher.update(method.to_uppercase().as_bytes());
    hasher.update(b":");
    hasher.update(url.as_bytes());
    hasher.update(b":");
    hasher.update(canonical.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Compact JSON encoding with object keys sorted recursively.
pub fn canonical_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, k) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // Serializing a string cannot fail.
                out.push_str(&serde_json::to_string(k).unwrap_or_default());
                out.push(':');
                write_canonical(&map[k], out);
            }
            out.push('}');
        }
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// TTL-swept fingerprint store shared by every call on one client.
///
/// An entry is live while its age is strictly below the TTL.
#[derive(Debug)]
pub struct DedupCache {
    entries: Mutex<HashMap<String, Instant>>,
    ttl: Duration,
}

impl DedupCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Instant>>> {
        self.entries.lock().map_err(|_| {
            Error::runtime_with_context(
                "dedup cache poisoned",
                ErrorContext::new().with_source("dedup_cache"),
            )
        })
    }

    fn is_live(&self, at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(at) < self.ttl
    }

    /// True only if an entry exists and is younger than the TTL.
    pub fn has(&self, fingerprint: &str) -> Result<bool> {
        self.has_at(fingerprint, Instant::now())
    }

    pub fn has_at(&self, fingerprint: &str, now: Instant) -> Result<bool> {
        let entries = self.lock()?;
        Ok(entries
            .get(fingerprint)
            .map(|at| self.is_live(*at, now))
            .unwrap_or(false))
    }

    pub fn put(&self, fingerprint: impl Into<String>, at: Instant) -> Result<()> {
        self.lock()?.insert(fingerprint.into(), at);
        Ok(())
    }

    /// Remove every entry whose age reached the TTL. Returns how many were dropped.
    pub fn sweep_expired(&self, now: Instant) -> Result<usize> {
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, at| self.is_live(*at, now));
        Ok(before - entries.len())
    }

    /// Atomic check-then-insert used by the request pipeline.
    ///
    /// Returns `Ok(false)` when a live entry already exists (the caller must
    /// reject the request). Otherwise records `now`, sweeps expired entries and
    /// returns `Ok(true)`.
    pub fn check_and_insert(&self, fingerprint: &str, now: Instant) -> Result<bool> {
        let mut entries = self.lock()?;
        if let Some(at) = entries.get(fingerprint) {
            if self.is_live(*at, now) {
                return Ok(false);
            }
        }
        entries.insert(fingerprint.to_string(), now);
        entries.retain(|_, at| self.is_live(*at, now));
        Ok(true)
    }

    /// Entry count, including expired entries not yet swept.
    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DedupCache {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_TTL)
    }
}
