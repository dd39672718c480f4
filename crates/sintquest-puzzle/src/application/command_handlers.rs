//! Command handlers for the puzzle context.

use std::time::Duration;

use sintquest_core::error::DomainError;
use sintquest_core::store::KeyValueStore;
use sintquest_session::domain::session::Session;
use tracing::info;

use crate::domain::answer_book::AnswerBook;
use crate::domain::commands::{Authenticate, SubmitAnswer};
use crate::domain::roles::Role;

/// Lifetime of a completion marker. Once it lapses that player no longer
/// counts toward completion.
pub const MARKER_TTL: Duration = Duration::from_secs(5 * 60);

/// Value stored under a completion marker key.
pub const MARKER_VALUE: &str = "true";

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The answer was empty or wrong; `message` says which.
    Rejected {
        /// `NO ANSWER` or `WRONG ANSWER`.
        message: &'static str,
    },
    /// The answer was right and has been recorded in the session.
    Correct {
        /// Success message for this role and location.
        message: String,
        /// Codeword letter revealed by this question.
        code_letter: Option<char>,
        /// `false` if the question had already been solved before.
        newly_solved: bool,
    },
}

/// Handles the `Authenticate` command: if the code is one of the two
/// codewords, sets that role's completion marker for `MARKER_TTL`.
///
/// # Errors
///
/// Returns `DomainError::Validation` for blank input,
/// `DomainError::AccessDenied` for an unknown code, and
/// `DomainError::Infrastructure` if the marker cannot be stored.
pub async fn handle_authenticate(
    command: &Authenticate,
    book: &AnswerBook,
    store: &dyn KeyValueStore,
) -> Result<Role, DomainError> {
    if command.code.trim().is_empty() {
        return Err(DomainError::Validation("INVALID INPUT".into()));
    }

    let Some(role) = book.role_for_codeword(&command.code) else {
        info!("codeword rejected");
        return Err(DomainError::AccessDenied("ACCESS DENIED".into()));
    };

    store
        .set_with_ttl(book.codeword(role), MARKER_VALUE, MARKER_TTL)
        .await?;

    info!(%role, "completion marker set");
    Ok(role)
}

/// Handles the `SubmitAnswer` command against `role`'s answer sheet. A
/// correct answer is recorded in `session`; committing it is up to the
/// caller.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the question does not exist.
pub fn handle_submit_answer(
    command: &SubmitAnswer,
    role: Role,
    book: &AnswerBook,
    session: &mut Session,
) -> Result<AnswerOutcome, DomainError> {
    let Some(location) = book.location(command.question_id) else {
        return Err(DomainError::NotFound(format!(
            "question {}",
            command.question_id
        )));
    };

    if command.answer.is_empty() {
        return Ok(AnswerOutcome::Rejected {
            message: "NO ANSWER",
        });
    }

    if !book.is_correct(role, command.question_id, &command.answer) {
        info!(%role, location, "wrong answer");
        return Ok(AnswerOutcome::Rejected {
            message: "WRONG ANSWER",
        });
    }

    let newly_solved = session.record_answer(command.question_id);
    info!(%role, location, newly_solved, "question solved");

    Ok(AnswerOutcome::Correct {
        message: book
            .success_message(role, command.question_id)
            .unwrap_or_default()
            .to_owned(),
        code_letter: book.code_letter(role, command.question_id),
        newly_solved,
    })
}
