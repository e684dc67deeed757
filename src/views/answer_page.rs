use askama::Template;
use chrono::{DateTime, Utc};
use pulldown_cmark::{html, Event, Options, Parser};

use crate::models::{Answer, Question, User};
use crate::socket::{CommentUpdatePayload, ServerEvent};
use crate::utils::{format_date_to_human_readable, get_meta_data, handle_hyperlink};

use super::comment_section::{draft_comment, CommentRequest, CommentSection, CommentTargetType};
use super::tts::Button;
use super::{TtsWrapper, ViewError, VoteComponent};

const AI_ANSWER_UNAVAILABLE: &str = "AI generated answer is not available";

#[derive(Template)]
#[template(path = "answer_header.html")]
struct AnswerHeader<'a> {
    ans_count: usize,
    title: &'a str,
}

#[derive(Template)]
#[template(path = "question_body.html")]
struct QuestionBody<'a> {
    views: usize,
    text: String,
    ask_by: &'a str,
    meta: String,
}

#[derive(Template)]
#[template(path = "answer.html")]
struct AnswerView<'a> {
    text: String,
    ans_by: &'a str,
    meta: String,
    comments: String,
}

#[derive(Template)]
#[template(path = "answer_page.html")]
struct AnswerPageTemplate {
    vote: String,
    header: String,
    question_body: String,
    question_comments: String,
    answers: Vec<String>,
    answer_button: String,
    ai_toggle: String,
    show_ai_answer: bool,
    ai_answer: String,
}

/// One-sentence summary read aloud when hovering the vote widget.
pub fn question_overview(question: &Question) -> String {
    format!(
        "{} asked a question about {} on {}. Question has {} views, {} answers, {} upvotes, and {} downvotes.",
        question.asked_by,
        question.title,
        format_date_to_human_readable(question.ask_date_time),
        question.views.len(),
        question.answers.len(),
        question.up_votes.len(),
        question.down_votes.len(),
    )
}

pub fn ai_answer_text(question: &Question) -> &str {
    question
        .ai_generated_answer
        .as_deref()
        .unwrap_or(AI_ANSWER_UNAVAILABLE)
}

// Raw HTML in the source is shown as text.
fn markdown_to_html(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[derive(Debug, Clone)]
pub struct AnswerPageState {
    question_id: String,
    question: Option<Question>,
    show_ai_answer: bool,
}

impl AnswerPageState {
    pub fn new(question_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            question: None,
            show_ai_answer: false,
        }
    }

    pub fn with_question(question: Question) -> Self {
        let mut state = Self::new(question.id.clone().unwrap_or_default());
        state.question = Some(question);
        state
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn load(&mut self, question: Question) {
        self.question = Some(question);
    }

    pub fn show_ai_answer(&self) -> bool {
        self.show_ai_answer
    }

    pub fn toggle_ai_answer(&mut self) {
        self.show_ai_answer = !self.show_ai_answer;
    }

    /// Folds a push event into the page. Events about other questions are
    /// ignored. Returns whether anything changed.
    pub fn apply(&mut self, event: &ServerEvent) -> bool {
        let Some(question) = self.question.as_mut() else {
            return false;
        };
        match event {
            ServerEvent::QuestionUpdate(update) | ServerEvent::ViewsUpdate(update) => {
                if !update.has_id(&self.question_id) {
                    return false;
                }
                *question = update.clone();
            }
            ServerEvent::AnswerUpdate(update) => {
                if update.qid != self.question_id {
                    return false;
                }
                question.answers.push(update.answer.clone());
            }
            ServerEvent::VoteUpdate(update) => {
                if update.qid != self.question_id {
                    return false;
                }
                question.up_votes = update.up_votes.clone();
                question.down_votes = update.down_votes.clone();
            }
            ServerEvent::CommentUpdate(CommentUpdatePayload::Question(update)) => {
                if !update.has_id(&self.question_id) {
                    return false;
                }
                *question = update.clone();
            }
            ServerEvent::CommentUpdate(CommentUpdatePayload::Answer(update)) => {
                return replace_answer(&mut question.answers, update);
            }
        }
        tracing::debug!(
            question = %self.question_id,
            event = event.name(),
            "applied server event"
        );
        true
    }

    pub fn comment_request(
        &self,
        answer_id: Option<&str>,
        text: &str,
        viewer: &User,
        now: DateTime<Utc>,
    ) -> Result<CommentRequest, ViewError> {
        let comment = draft_comment(text, viewer, now)?;
        let (id, target_type) = match answer_id {
            Some(id) => (id.to_owned(), CommentTargetType::Answer),
            None => (self.question_id.clone(), CommentTargetType::Question),
        };
        Ok(CommentRequest {
            id,
            target_type,
            comment,
        })
    }

    /// Renders the page body, or `None` while no question is loaded.
    pub fn render(&self, viewer: &User, now: DateTime<Utc>) -> Result<Option<String>, ViewError> {
        let Some(question) = &self.question else {
            return Ok(None);
        };

        let vote = TtsWrapper::new(
            question_overview(question),
            VoteComponent::new(question, &viewer.username).render()?,
        )
        .render()?;
        let header = AnswerHeader {
            ans_count: question.answers.len(),
            title: &question.title,
        }
        .render()?;
        let question_body = QuestionBody {
            views: question.views.len(),
            text: handle_hyperlink(&question.text),
            ask_by: &question.asked_by,
            meta: get_meta_data(question.ask_date_time, now),
        }
        .render()?;
        let question_comments = CommentSection::new(&question.comments, now).render()?;
        let answers = question
            .answers
            .iter()
            .map(|a| render_answer(a, now))
            .collect::<Result<Vec<_>, _>>()?;
        let answer_button = TtsWrapper::new(
            "Button for Answer Question",
            Button {
                class: "bluebtn ansButton",
                label: "Answer Question",
            }
            .render()?,
        )
        .render()?;
        let ai_toggle = TtsWrapper::new(
            "Button for showing AI-generated answer",
            Button {
                class: "toggle-button",
                label: if self.show_ai_answer {
                    "Hide AI Answer"
                } else {
                    "Show AI Answer"
                },
            }
            .render()?,
        )
        .render()?;
        let ai_answer = if self.show_ai_answer {
            let text = ai_answer_text(question);
            TtsWrapper::new(text, markdown_to_html(text)).render()?
        } else {
            String::new()
        };

        let page = AnswerPageTemplate {
            vote,
            header,
            question_body,
            question_comments,
            answers,
            answer_button,
            ai_toggle,
            show_ai_answer: self.show_ai_answer,
            ai_answer,
        };
        Ok(Some(page.render()?))
    }
}

fn replace_answer(answers: &mut [Answer], update: &Answer) -> bool {
    let Some(id) = update.id.as_deref() else {
        return false;
    };
    match answers.iter_mut().find(|a| a.id.as_deref() == Some(id)) {
        Some(answer) => {
            *answer = update.clone();
            true
        }
        None => false,
    }
}

fn render_answer(answer: &Answer, now: DateTime<Utc>) -> Result<String, ViewError> {
    Ok(AnswerView {
        text: handle_hyperlink(&answer.text),
        ans_by: &answer.ans_by,
        meta: get_meta_data(answer.ans_date_time, now),
        comments: CommentSection::new(&answer.comments, now).render()?,
    }
    .render()?)
}

pub fn page_title(state: &AnswerPageState) -> String {
    match state.question() {
        Some(question) => question.title.clone(),
        None => "Fake Stack Overflow".to_owned(),
    }
}
