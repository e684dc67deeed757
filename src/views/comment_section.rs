use askama::Template;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Comment, User};
use crate::utils::get_meta_data;

use super::ViewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentTargetType {
    Question,
    Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub target_type: CommentTargetType,
    pub comment: Comment,
}

pub struct CommentView {
    pub text: String,
    pub comment_by: String,
    pub meta: String,
}

#[derive(Template)]
#[template(path = "comment_section.html")]
pub struct CommentSection {
    pub comments: Vec<CommentView>,
}

impl CommentSection {
    pub fn new(comments: &[Comment], now: DateTime<Utc>) -> Self {
        Self {
            comments: comments
                .iter()
                .map(|c| CommentView {
                    text: c.text.clone(),
                    comment_by: c.comment_by.clone(),
                    meta: get_meta_data(c.comment_date_time, now),
                })
                .collect(),
        }
    }
}

/// Validates the comment box contents and stamps the comment with its author.
pub fn draft_comment(text: &str, viewer: &User, now: DateTime<Utc>) -> Result<Comment, ViewError> {
    if text.trim().is_empty() || viewer.username.trim().is_empty() {
        return Err(ViewError::EmptyComment);
    }
    Ok(Comment {
        text: text.to_owned(),
        comment_by: viewer.username.clone(),
        comment_date_time: now,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()
    }

    #[rstest]
    fn lists_comments_with_author_and_age() {
        let comments = vec![Comment {
            text: "Nice <question>".to_owned(),
            comment_by: "bob".to_owned(),
            comment_date_time: now() - Duration::minutes(5),
        }];

        let html = CommentSection::new(&comments, now()).render().unwrap();

        assert!(html.contains("bob, 5 minutes ago"));
        assert!(!html.contains("<question>"));
        assert!(!html.contains("No comments yet."));
    }

    #[rstest]
    fn empty_section_says_so() {
        let html = CommentSection::new(&[], now()).render().unwrap();
        assert!(html.contains("No comments yet."));
    }

    #[rstest]
    #[case("   ", "alice")]
    #[case("hello", " ")]
    fn blank_text_or_author_is_refused(#[case] text: &str, #[case] username: &str) {
        let err = draft_comment(text, &User::named(username), now()).unwrap_err();
        assert_eq!(err.to_string(), "Comment text cannot be empty");
    }

    #[rstest]
    fn draft_keeps_text_as_typed() {
        let comment = draft_comment("  spaced  ", &User::named("alice"), now()).unwrap();
        assert_eq!(comment.text, "  spaced  ");
        assert_eq!(comment.comment_by, "alice");
        assert_eq!(comment.comment_date_time, now());
    }

    #[rstest]
    fn request_body_names_the_target() {
        let request = CommentRequest {
            id: "a1".to_owned(),
            target_type: CommentTargetType::Answer,
            comment: draft_comment("ok", &User::named("alice"), now()).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "id": "a1",
                "type": "answer",
                "comment": {
                    "text": "ok",
                    "commentBy": "alice",
                    "commentDateTime": "2024-03-05T12:00:00Z"
                }
            })
        );
    }
}
