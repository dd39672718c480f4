//! Command definitions for the puzzle context.

/// Enter a codeword on the landing page.
#[derive(Debug, Clone)]
pub struct Authenticate {
    /// The code as typed; surrounding whitespace and case are ignored.
    pub code: String,
}

/// Submit a free-text answer to one question.
#[derive(Debug, Clone)]
pub struct SubmitAnswer {
    /// Question index (position in the location list).
    pub question_id: u32,
    /// The answer as typed.
    pub answer: String,
}
