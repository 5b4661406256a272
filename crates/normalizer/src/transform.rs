use chrono::{DateTime, Utc};
use common::text::first_line;

use crate::models::{CommitRecord, IssueRecord};
use crate::payloads::{CommitPayload, IssuePayload};

const SECONDS_PER_DAY: i64 = 86_400;

pub fn normalize_commit(payload: CommitPayload) -> CommitRecord {
    let CommitPayload { sha, commit } = payload;
    let (author, email, date) = match commit.author {
        Some(identity) => (identity.name, identity.email, identity.date),
        None => (None, None, None),
    };
    CommitRecord {
        sha,
        author,
        email,
        date,
        message: first_line(&commit.message).to_string(),
    }
}

pub fn is_pull_request(payload: &IssuePayload) -> bool {
    payload.pull_request.is_some()
}

pub fn normalize_issue(payload: IssuePayload) -> IssueRecord {
    IssueRecord {
        id: payload.id,
        number: payload.number,
        title: payload.title,
        user: payload.user.map(|u| u.login),
        state: payload.state,
        created_at: payload.created_at,
        closed_at: payload.closed_at,
        comments: payload.comments,
        open_duration_days: open_duration_days(payload.created_at, payload.closed_at),
    }
}

/// Whole days between the two instants, floored. `None` unless both are known.
pub fn open_duration_days(
    created_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
) -> Option<i64> {
    let (created, closed) = (created_at?, closed_at?);
    Some((closed - created).num_seconds().div_euclid(SECONDS_PER_DAY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueState;
    use crate::payloads::{CommitDetail, GitIdentity, UserRef};
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn issue(created_at: Option<DateTime<Utc>>, closed_at: Option<DateTime<Utc>>) -> IssuePayload {
        IssuePayload {
            id: 1001,
            number: 12,
            pull_request: None,
            state: IssueState::Closed,
            title: "Panics on empty input".into(),
            user: Some(UserRef {
                login: "octocat".into(),
            }),
            comments: 3,
            created_at,
            closed_at,
        }
    }

    #[test]
    fn commit_takes_identity_and_first_line() {
        let payload = CommitPayload {
            sha: "a1b2c3".into(),
            commit: CommitDetail {
                author: Some(GitIdentity {
                    name: Some("Ada".into()),
                    email: Some("ada@example.com".into()),
                    date: Some(at(2024, 3, 1, 12)),
                }),
                message: "fix bug\n\ndetails".into(),
            },
        };
        let record = normalize_commit(payload);
        assert_eq!(record.author.as_deref(), Some("Ada"));
        assert_eq!(record.email.as_deref(), Some("ada@example.com"));
        assert_eq!(record.date, Some(at(2024, 3, 1, 12)));
        assert_eq!(record.message, "fix bug");
    }

    #[test]
    fn commit_without_identity_has_absent_fields() {
        let payload = CommitPayload {
            sha: "d4e5f6".into(),
            commit: CommitDetail {
                author: None,
                message: "add feature".into(),
            },
        };
        let record = normalize_commit(payload);
        assert_eq!(record.sha, "d4e5f6");
        assert!(record.author.is_none());
        assert!(record.email.is_none());
        assert!(record.date.is_none());
        assert_eq!(record.message, "add feature");
    }

    #[test]
    fn duration_counts_whole_days() {
        assert_eq!(
            open_duration_days(Some(at(2024, 1, 1, 0)), Some(at(2024, 1, 5, 0))),
            Some(4)
        );
        assert_eq!(
            open_duration_days(Some(at(2024, 1, 1, 0)), Some(at(2024, 1, 5, 23))),
            Some(4)
        );
        assert_eq!(
            open_duration_days(Some(at(2024, 1, 1, 10)), Some(at(2024, 1, 1, 18))),
            Some(0)
        );
    }

    #[test]
    fn duration_floors_negative_spans() {
        assert_eq!(
            open_duration_days(Some(at(2024, 1, 2, 0)), Some(at(2024, 1, 1, 12))),
            Some(-1)
        );
    }

    #[test]
    fn duration_requires_both_timestamps() {
        assert_eq!(open_duration_days(Some(at(2024, 1, 1, 0)), None), None);
        assert_eq!(open_duration_days(None, Some(at(2024, 1, 1, 0))), None);
    }

    #[test]
    fn issue_normalization_maps_fields() {
        let record = normalize_issue(issue(Some(at(2024, 1, 1, 0)), Some(at(2024, 1, 5, 0))));
        assert_eq!(record.id, 1001);
        assert_eq!(record.number, 12);
        assert_eq!(record.user.as_deref(), Some("octocat"));
        assert_eq!(record.state, IssueState::Closed);
        assert_eq!(record.comments, 3);
        assert_eq!(record.open_duration_days, Some(4));
    }

    #[test]
    fn open_issue_has_no_duration() {
        let mut payload = issue(Some(at(2024, 1, 1, 0)), None);
        payload.state = IssueState::Open;
        payload.user = None;
        let record = normalize_issue(payload);
        assert!(record.user.is_none());
        assert!(record.open_duration_days.is_none());
    }

    #[test]
    fn pull_request_marker_is_detected() {
        let mut payload = issue(None, None);
        assert!(!is_pull_request(&payload));
        payload.pull_request = Some(serde_json::json!({ "url": "https://example.invalid" }));
        assert!(is_pull_request(&payload));
    }
}
