use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Match,
    Mismatch,
}

/// Matches recognized label text against the expected medicine name.
///
/// Both sides are lowercased and trimmed. The verdict is `Match` when the
/// text contains the full name as a substring, or when any whitespace
/// separated token of the name appears in the text. The heuristic is
/// deliberately permissive: a false mismatch would block a dose, which is
/// worse than letting a sloppy label scan through.
pub fn match_medicine_name(recognized_text: &str, medicine_name: &str) -> MatchStatus {
    let text = recognized_text.trim().to_lowercase();
    let name = medicine_name.trim().to_lowercase();
    if name.is_empty() {
        return MatchStatus::Mismatch;
    }

    if text.contains(&name) || name.split_whitespace().any(|token| text.contains(token)) {
        MatchStatus::Match
    } else {
        MatchStatus::Mismatch
    }
}

/// One verification attempt for a reminder occurrence. Append-only: records
/// are never mutated after creation, regardless of the verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRecord {
    pub id: ID,
    pub reminder_id: ID,
    pub user_id: ID,
    pub medicine_name: String,
    /// Opaque reference into photo storage
    pub photo_reference: String,
    pub recognized_text: String,
    pub match_status: MatchStatus,
    pub timestamp: i64,
}

impl Entity for VerificationRecord {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_matches_full_name_within_text() {
        assert_eq!(
            match_medicine_name("paracetamol 500mg tablet", "Paracetamol"),
            MatchStatus::Match
        );
    }

    #[test]
    fn it_rejects_unrelated_text() {
        assert_eq!(
            match_medicine_name("ibuprofen", "Paracetamol 500"),
            MatchStatus::Mismatch
        );
    }

    #[test]
    fn it_matches_on_single_token_overlap() {
        assert_eq!(
            match_medicine_name("500 paracetamol", "Paracetamol 500mg"),
            MatchStatus::Match
        );
    }

    #[test]
    fn it_normalizes_case_and_whitespace() {
        assert_eq!(
            match_medicine_name("  PARACETAMOL  ", "paracetamol"),
            MatchStatus::Match
        );
    }

    #[test]
    fn it_rejects_when_nothing_was_recognized() {
        assert_eq!(
            match_medicine_name("", "Paracetamol"),
            MatchStatus::Mismatch
        );
    }

    #[test]
    fn it_rejects_empty_medicine_name() {
        assert_eq!(match_medicine_name("paracetamol", ""), MatchStatus::Mismatch);
        assert_eq!(match_medicine_name("paracetamol", "   "), MatchStatus::Mismatch);
    }
}
