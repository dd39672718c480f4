//! The read-only answer table.
//!
//! Loaded once at startup from YAML and never mutated afterwards. It fixes
//! the ordered location list, and per role the codeword plus, per location,
//! the expected answer and the message shown once it is solved.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::roles::Role;

const BUNDLED: &str = include_str!("../../puzzle.yaml");

/// Failure to load an answer table.
#[derive(Debug, Error)]
pub enum AnswerBookError {
    /// The file could not be read.
    #[error("cannot read answer table {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The YAML did not match the expected shape.
    #[error("cannot parse answer table: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The table parsed but is incomplete or inconsistent.
    #[error("invalid answer table: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
struct RawBook {
    locations: Vec<String>,
    roles: BTreeMap<Role, RawRole>,
}

#[derive(Debug, Deserialize)]
struct RawRole {
    codeword: String,
    answers: HashMap<String, RawAnswer>,
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    answer: String,
    message: String,
}

#[derive(Debug, Clone)]
struct Entry {
    answer: String,
    message: String,
}

#[derive(Debug, Clone)]
struct RoleSheet {
    codeword: String,
    entries: Vec<Entry>,
}

/// Role → location → expected answer, plus the codewords.
#[derive(Debug, Clone)]
pub struct AnswerBook {
    locations: Vec<String>,
    sheets: BTreeMap<Role, RoleSheet>,
}

impl AnswerBook {
    /// The table compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `AnswerBookError` if the bundled YAML is broken.
    pub fn bundled() -> Result<Self, AnswerBookError> {
        Self::from_yaml(BUNDLED)
    }

    /// Reads a table from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `AnswerBookError::Io` if the file cannot be read, otherwise
    /// as `from_yaml`.
    pub fn load(path: &Path) -> Result<Self, AnswerBookError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| AnswerBookError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Parses and validates a table.
    ///
    /// # Errors
    ///
    /// Returns `AnswerBookError::Parse` for malformed YAML and
    /// `AnswerBookError::Invalid` when a role, location or codeword letter
    /// is missing, or both roles share a codeword.
    pub fn from_yaml(yaml: &str) -> Result<Self, AnswerBookError> {
        let raw: RawBook = serde_yaml::from_str(yaml)?;
        if raw.locations.is_empty() {
            return Err(AnswerBookError::Invalid("no locations".into()));
        }

        let mut roles = raw.roles;
        let mut sheets = BTreeMap::new();
        for role in Role::ALL {
            let mut raw_role = roles
                .remove(&role)
                .ok_or_else(|| AnswerBookError::Invalid(format!("role {role} is missing")))?;

            let codeword = raw_role.codeword.trim().to_uppercase();
            if codeword.chars().count() < raw.locations.len() {
                return Err(AnswerBookError::Invalid(format!(
                    "codeword of {role} has fewer letters than there are locations"
                )));
            }

            let entries = raw
                .locations
                .iter()
                .map(|location| {
                    raw_role
                        .answers
                        .remove(location)
                        .map(|a| Entry {
                            answer: a.answer.to_lowercase(),
                            message: a.message,
                        })
                        .ok_or_else(|| {
                            AnswerBookError::Invalid(format!(
                                "role {role} has no answer for {location}"
                            ))
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            sheets.insert(role, RoleSheet { codeword, entries });
        }

        if sheets[&Role::Roan].codeword == sheets[&Role::Marlies].codeword {
            return Err(AnswerBookError::Invalid(
                "both roles share a codeword".into(),
            ));
        }

        Ok(Self {
            locations: raw.locations,
            sheets,
        })
    }

    /// Location names in question order.
    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Number of questions.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.locations.len()
    }

    /// Location asked by question `question_id`.
    #[must_use]
    pub fn location(&self, question_id: u32) -> Option<&str> {
        self.locations
            .get(usize::try_from(question_id).ok()?)
            .map(String::as_str)
    }

    /// Parses a question id taken from a URL. Non-numeric and out-of-range
    /// ids give `None`.
    #[must_use]
    pub fn parse_question_id(&self, raw: &str) -> Option<u32> {
        let id: u32 = raw.trim().parse().ok()?;
        self.location(id).map(|_| id)
    }

    /// The codeword of `role`; also the key of its completion marker.
    #[must_use]
    pub fn codeword(&self, role: Role) -> &str {
        &self.sheet(role).codeword
    }

    /// The role whose codeword is `code`, compared after trimming and
    /// upper-casing.
    #[must_use]
    pub fn role_for_codeword(&self, code: &str) -> Option<Role> {
        let normalized = code.trim().to_uppercase();
        Role::ALL
            .into_iter()
            .find(|role| self.codeword(*role) == normalized)
    }

    /// Whether `answer` solves question `question_id` for `role`. Case is
    /// ignored; everything else must match exactly.
    #[must_use]
    pub fn is_correct(&self, role: Role, question_id: u32, answer: &str) -> bool {
        self.entry(role, question_id)
            .is_some_and(|entry| entry.answer == answer.to_lowercase())
    }

    /// Message shown once `role` has solved `question_id`.
    #[must_use]
    pub fn success_message(&self, role: Role, question_id: u32) -> Option<&str> {
        self.entry(role, question_id).map(|e| e.message.as_str())
    }

    /// Codeword letter revealed by solving `question_id`.
    #[must_use]
    pub fn code_letter(&self, role: Role, question_id: u32) -> Option<char> {
        self.location(question_id)?;
        self.codeword(role)
            .chars()
            .nth(usize::try_from(question_id).ok()?)
    }

    fn sheet(&self, role: Role) -> &RoleSheet {
        // Every role is present once `from_yaml` has succeeded.
        &self.sheets[&role]
    }

    fn entry(&self, role: Role, question_id: u32) -> Option<&Entry> {
        self.sheet(role)
            .entries
            .get(usize::try_from(question_id).ok()?)
    }
}
