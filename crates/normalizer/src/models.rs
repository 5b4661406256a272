use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A commit flattened to one row. Field order is column order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha: String,
    pub author: Option<String>,
    pub email: Option<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub date: Option<DateTime<Utc>>,
    pub message: String,
}

impl CommitRecord {
    pub const COLUMNS: &'static [&'static str] = &["sha", "author", "email", "date", "message"];
}

/// An issue flattened to one row. Field order is column order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IssueRecord {
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub user: Option<String>,
    pub state: IssueState,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub closed_at: Option<DateTime<Utc>>,
    pub comments: i64,
    pub open_duration_days: Option<i64>,
}

impl IssueRecord {
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "number",
        "title",
        "user",
        "state",
        "created_at",
        "closed_at",
        "comments",
        "open_duration_days",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// ISO-8601 with an explicit `+00:00` offset, e.g. `2024-01-01T00:00:00+00:00`.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

fn serialize_timestamp<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(ts) => serializer.serialize_some(&format_timestamp(ts)),
        None => serializer.serialize_none(),
    }
}
