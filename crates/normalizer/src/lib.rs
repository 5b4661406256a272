pub mod models;
pub mod payloads;
pub mod transform;

pub use models::{format_timestamp, CommitRecord, IssueRecord, IssueState};
pub use payloads::{CommitDetail, CommitPayload, GitIdentity, IssuePayload, UserRef};
pub use transform::{is_pull_request, normalize_commit, normalize_issue, open_duration_days};
