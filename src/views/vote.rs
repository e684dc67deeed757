use askama::Template;

use crate::models::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    Up,
    Down,
    None,
}

/// Vote buttons and the net score of a question.
#[derive(Debug, Template)]
#[template(path = "vote.html")]
pub struct VoteComponent {
    pub count: i64,
    pub voted: VoteState,
}

impl VoteComponent {
    pub fn new(question: &Question, viewer: &str) -> Self {
        let voted = if question.up_votes.iter().any(|u| u == viewer) {
            VoteState::Up
        } else if question.down_votes.iter().any(|u| u == viewer) {
            VoteState::Down
        } else {
            VoteState::None
        };
        Self {
            count: question.vote_score(),
            voted,
        }
    }

    fn is_upvoted(&self) -> bool {
        self.voted == VoteState::Up
    }

    fn is_downvoted(&self) -> bool {
        self.voted == VoteState::Down
    }
}
