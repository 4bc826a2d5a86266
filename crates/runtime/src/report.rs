//! Hand-off format for finished sessions.

use game_core::SessionOutcome;
use serde::{Deserialize, Serialize};

/// A finished session, ready for display or a reporting collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Seed that reproduces the session's content.
    pub seed: u64,
    #[serde(flatten)]
    pub outcome: SessionOutcome,
}

impl SessionReport {
    pub fn new(seed: u64, outcome: SessionOutcome) -> Self {
        Self { seed, outcome }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameKind, Outcome};

    #[test]
    fn renders_kind_and_result() {
        let report = SessionReport::new(
            42,
            SessionOutcome {
                kind: GameKind::Matching,
                result: Outcome::Matching { moves: 12, pairs: 8 },
            },
        );
        let json = report.to_json().unwrap();
        assert!(json.contains(r#""kind":"matching""#));
        assert!(json.contains(r#""type":"matching""#));
        assert!(json.contains(r#""moves":12"#));
        assert_eq!(SessionReport::from_json(&json).unwrap(), report);
    }
}
