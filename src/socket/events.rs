use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Answer, Question, VoteData};

use super::SocketError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerUpdatePayload {
    pub qid: String,
    pub answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "result", rename_all = "lowercase")]
pub enum CommentUpdatePayload {
    Question(Question),
    Answer(Answer),
}

/// Everything the server pushes to connected clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    QuestionUpdate(Question),
    AnswerUpdate(AnswerUpdatePayload),
    ViewsUpdate(Question),
    VoteUpdate(VoteData),
    CommentUpdate(CommentUpdatePayload),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::QuestionUpdate(_) => "questionUpdate",
            Self::AnswerUpdate(_) => "answerUpdate",
            Self::ViewsUpdate(_) => "viewsUpdate",
            Self::VoteUpdate(_) => "voteUpdate",
            Self::CommentUpdate(_) => "commentUpdate",
        }
    }

    pub fn from_parts(name: &str, payload: Value) -> Result<Self, SocketError> {
        let event = match name {
            "questionUpdate" => Self::QuestionUpdate(serde_json::from_value(payload)?),
            "answerUpdate" => Self::AnswerUpdate(serde_json::from_value(payload)?),
            "viewsUpdate" => Self::ViewsUpdate(serde_json::from_value(payload)?),
            "voteUpdate" => Self::VoteUpdate(serde_json::from_value(payload)?),
            "commentUpdate" => Self::CommentUpdate(serde_json::from_value(payload)?),
            other => return Err(SocketError::UnknownEvent(other.to_owned())),
        };
        Ok(event)
    }

    pub fn payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::QuestionUpdate(question) | Self::ViewsUpdate(question) => {
                serde_json::to_value(question)
            }
            Self::AnswerUpdate(update) => serde_json::to_value(update),
            Self::VoteUpdate(update) => serde_json::to_value(update),
            Self::CommentUpdate(update) => serde_json::to_value(update),
        }
    }
}
