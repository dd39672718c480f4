//! Player roles.

use serde::{Deserialize, Serialize};

/// One of the two fixed participant identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// The first player. Also the fallback for unknown names.
    Roan,
    /// The second player.
    Marlies,
}

impl Role {
    /// Both roles, in marker order.
    pub const ALL: [Role; 2] = [Role::Roan, Role::Marlies];

    /// Upper-case table key of the role.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Roan => "ROAN",
            Self::Marlies => "MARLIES",
        }
    }

    /// Maps a claimed display name onto a role, ignoring case. Whitespace is
    /// significant. A missing or unrecognized name becomes `Roan`.
    #[must_use]
    pub fn from_display_name(name: Option<&str>) -> Self {
        match name.map(str::to_uppercase).as_deref() {
            Some("MARLIES") => Self::Marlies,
            _ => Self::Roan,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_map_case_insensitively() {
        assert_eq!(Role::from_display_name(Some("marlies")), Role::Marlies);
        assert_eq!(Role::from_display_name(Some("Roan")), Role::Roan);
        assert_eq!(Role::from_display_name(Some("MARLIES")), Role::Marlies);
    }

    #[test]
    fn test_unknown_or_missing_name_defaults_to_roan() {
        assert_eq!(Role::from_display_name(Some("Agent Piet")), Role::Roan);
        assert_eq!(Role::from_display_name(Some("")), Role::Roan);
        assert_eq!(Role::from_display_name(None), Role::Roan);
    }

    #[test]
    fn test_padded_name_is_not_recognized() {
        assert_eq!(Role::from_display_name(Some("Marlies ")), Role::Roan);
        assert_eq!(Role::from_display_name(Some(" marlies")), Role::Roan);
    }
}
