pub mod answer_page;
pub mod comment_section;
mod layout;
mod side_bar_nav;
mod tts;
mod vote;

use thiserror::Error;

pub use answer_page::{question_overview, AnswerPageState};
pub use comment_section::{CommentRequest, CommentSection, CommentTargetType};
pub use layout::{settings_attributes, Page};
pub use side_bar_nav::{NavEntry, SideBarNav};
pub use tts::TtsWrapper;
pub use vote::{VoteComponent, VoteState};

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Comment text cannot be empty")]
    EmptyComment,
    #[error("failed to render template: {0}")]
    Render(#[from] askama::Error),
}
