use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub text: String,
    pub comment_by: String,
    pub comment_date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagData {
    pub name: String,
    pub qcnt: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteData {
    pub qid: String,
    pub up_votes: Vec<String>,
    pub down_votes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    pub ans_by: String,
    pub ans_date_time: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_generated_answer: Option<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    pub title: String,
    #[serde(default)]
    pub views: Vec<String>,
    pub text: String,
    pub asked_by: String,
    pub ask_date_time: DateTime<Utc>,
    #[serde(default)]
    pub up_votes: Vec<String>,
    #[serde(default)]
    pub down_votes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Question {
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    pub fn vote_score(&self) -> i64 {
        self.up_votes.len() as i64 - self.down_votes.len() as i64
    }
}

wire_enum! {
    pub enum OrderType {
        Newest => "newest",
        Unanswered => "unanswered",
        Active => "active",
        MostViewed => "mostViewed",
    }
}

impl OrderType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::Unanswered => "Unanswered",
            Self::Active => "Active",
            Self::MostViewed => "Most Viewed",
        }
    }
}
