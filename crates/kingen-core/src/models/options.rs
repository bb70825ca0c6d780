//! Resolved generation option records.
//!
//! Resolution is a pure merge of request body fields and query fields with
//! per-field defaults: body wins over query, unparseable numeric input falls
//! back to the default (never an error), and the enhancement flag is disabled
//! only by the literal string "false" in either source. A single malformed
//! parameter must never abort the request before domain validation runs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_MAX_WIDTH: i64 = 2048;
pub const DEFAULT_MAX_HEIGHT: i64 = 2048;
pub const DEFAULT_QUALITY: i64 = 95;
pub const DEFAULT_FORMAT: &str = "jpeg";
pub const DEFAULT_NUMBER_OF_CHILDREN: i64 = 2;
pub const DEFAULT_AGE_GAP: i64 = 2;
pub const DEFAULT_YOUNGEST_AGE: i64 = 4;

/// Caller-supplied fields from one source (form body or query string).
pub type FieldMap = HashMap<String, String>;

/// Options for single-image generation.
///
/// Numeric quality/dimension fields are forwarded to the backend without range
/// validation; the backend is authoritative for acceptable ranges.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub max_width: i64,
    pub max_height: i64,
    pub quality: i64,
    pub format: String,
    pub enhance_quality: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            quality: DEFAULT_QUALITY,
            format: DEFAULT_FORMAT.to_string(),
            enhance_quality: true,
        }
    }
}

impl GenerationOptions {
    /// Merge body and query fields into a fully-populated record.
    pub fn resolve(body: &FieldMap, query: &FieldMap) -> Self {
        Self {
            max_width: resolve_int(body, query, "maxWidth", DEFAULT_MAX_WIDTH),
            max_height: resolve_int(body, query, "maxHeight", DEFAULT_MAX_HEIGHT),
            quality: resolve_int(body, query, "quality", DEFAULT_QUALITY),
            format: resolve_string(body, query, "format", DEFAULT_FORMAT),
            enhance_quality: resolve_flag(body, query, "enhanceQuality"),
        }
    }
}

/// Options for dual-image (family) generation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FamilyOptions {
    pub number_of_children: i64,
    pub age_gap: i64,
    pub youngest_age: i64,
    pub quality: i64,
    pub format: String,
    pub enhance_quality: bool,
}

impl Default for FamilyOptions {
    fn default() -> Self {
        Self {
            number_of_children: DEFAULT_NUMBER_OF_CHILDREN,
            age_gap: DEFAULT_AGE_GAP,
            youngest_age: DEFAULT_YOUNGEST_AGE,
            quality: DEFAULT_QUALITY,
            format: DEFAULT_FORMAT.to_string(),
            enhance_quality: true,
        }
    }
}

impl FamilyOptions {
    /// Merge body and query fields into a fully-populated record.
    pub fn resolve(body: &FieldMap, query: &FieldMap) -> Self {
        Self {
            number_of_children: resolve_int(
                body,
                query,
                "numberOfChildren",
                DEFAULT_NUMBER_OF_CHILDREN,
            ),
            age_gap: resolve_int(body, query, "ageGap", DEFAULT_AGE_GAP),
            youngest_age: resolve_int(body, query, "youngestAge", DEFAULT_YOUNGEST_AGE),
            quality: resolve_int(body, query, "quality", DEFAULT_QUALITY),
            format: resolve_string(body, query, "format", DEFAULT_FORMAT),
            enhance_quality: resolve_flag(body, query, "enhanceQuality"),
        }
    }

    /// Age the oldest child would reach with the configured count and gap.
    pub fn oldest_age(&self) -> i64 {
        self.youngest_age + (self.number_of_children - 1) * self.age_gap
    }

    /// Per-child ages, youngest first.
    pub fn child_ages(&self) -> Vec<i64> {
        (0..self.number_of_children.max(0))
            .map(|i| self.youngest_age + i * self.age_gap)
            .collect()
    }
}

/// Parse an integer field, treating parse failures and an explicit `0` as
/// absent so the next source (or the default) applies.
fn parse_int(fields: &FieldMap, key: &str) -> Option<i64> {
    fields
        .get(key)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n != 0)
}

fn resolve_int(body: &FieldMap, query: &FieldMap, key: &str, default: i64) -> i64 {
    parse_int(body, key)
        .or_else(|| parse_int(query, key))
        .unwrap_or(default)
}

fn resolve_string(body: &FieldMap, query: &FieldMap, key: &str, default: &str) -> String {
    body.get(key)
        .or_else(|| query.get(key))
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

/// A boolean flag is disabled only by the literal "false" in either source.
fn resolve_flag(body: &FieldMap, query: &FieldMap, key: &str) -> bool {
    body.get(key).map(String::as_str) != Some("false")
        && query.get(key).map(String::as_str) != Some("false")
}
