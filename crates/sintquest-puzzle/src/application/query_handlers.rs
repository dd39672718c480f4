//! Query handlers for the puzzle context.
//!
//! Read-only views over the answer book and a player's session.

use serde::Serialize;
use sintquest_core::error::DomainError;
use sintquest_session::domain::session::Session;

use crate::domain::answer_book::AnswerBook;
use crate::domain::roles::Role;

/// One entry of the briefing's location list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationLink {
    /// Question id for this location.
    pub question_id: u32,
    /// Location name.
    pub location: String,
    /// Whether this browser has solved it.
    pub solved: bool,
}

/// Landing page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BriefingView {
    /// The claimed display name, if any.
    pub name: Option<String>,
    /// Role the name resolves to.
    pub role: Role,
    /// All locations in question order.
    pub locations: Vec<LocationLink>,
}

/// Question page view. The message and code letter are only revealed once
/// the question is solved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// Question id.
    pub question_id: u32,
    /// Location asked about.
    pub location: String,
    /// Role whose answer sheet applies.
    pub role: Role,
    /// Whether this browser has solved it.
    pub solved: bool,
    /// Success message, once solved.
    pub message: Option<String>,
    /// Revealed codeword letter, once solved.
    pub code_letter: Option<char>,
}

/// Builds the landing page view for `session`.
#[must_use]
pub fn get_briefing(book: &AnswerBook, session: &Session) -> BriefingView {
    let answered = session.answered();
    let locations = book
        .locations()
        .iter()
        .zip(0u32..)
        .map(|(location, question_id)| LocationLink {
            question_id,
            location: location.clone(),
            solved: answered.contains(&question_id),
        })
        .collect();

    BriefingView {
        name: session.name().map(str::to_owned),
        role: Role::from_display_name(session.name()),
        locations,
    }
}

/// Builds the view of question `question_id` for `role`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the question does not exist.
pub fn get_question(
    question_id: u32,
    role: Role,
    book: &AnswerBook,
    session: &Session,
) -> Result<QuestionView, DomainError> {
    let location = book
        .location(question_id)
        .ok_or_else(|| DomainError::NotFound(format!("question {question_id}")))?;
    let solved = session.has_answered(question_id);

    Ok(QuestionView {
        question_id,
        location: location.to_owned(),
        role,
        solved,
        message: solved
            .then(|| book.success_message(role, question_id).map(str::to_owned))
            .flatten(),
        code_letter: solved
            .then(|| book.code_letter(role, question_id))
            .flatten(),
    })
}
