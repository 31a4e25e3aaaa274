// ── Product review model ──

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::ReviewStatus;
use super::product::parse_wc_datetime;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewModel {
    pub site_id: i64,
    pub remote_id: i64,
    pub remote_product_id: i64,
    pub date_created: String,
    pub status: String,
    pub reviewer: String,
    pub reviewer_email: String,
    pub review: String,
    pub rating: i64,
    pub verified: bool,
    /// JSON object text: avatar size (`"24"`, `"48"`, `"96"`) → URL.
    pub reviewer_avatar_urls: String,
}

impl ReviewModel {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_wc_datetime(&self.date_created)
    }

    pub fn status_kind(&self) -> Option<ReviewStatus> {
        self.status.parse().ok()
    }

    /// Largest available avatar URL.
    pub fn largest_avatar_url(&self) -> Option<String> {
        let avatars: BTreeMap<String, String> =
            serde_json::from_str(&self.reviewer_avatar_urls).unwrap_or_default();
        avatars
            .into_iter()
            .max_by_key(|(size, _)| size.parse::<u32>().unwrap_or(0))
            .map(|(_, url)| url)
    }
}
