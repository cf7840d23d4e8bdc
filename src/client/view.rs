//! Local form state and text rendering of the board.

use crate::dto::ws::{PlayerScore, ScoreSubmission};

/// Field name of the player name input.
pub const FIELD_NAME: &str = "name";
/// Field name of the score input.
pub const FIELD_SCORE: &str = "score";

/// Values typed so far, keyed by input name. Nothing is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreForm {
    name: Option<String>,
    score: Option<String>,
}

impl ScoreForm {
    /// Update the input called `field`. Returns `false` for an unknown field.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            FIELD_NAME => &mut self.name,
            FIELD_SCORE => &mut self.score,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// Payload emitted on publish; untouched inputs are sent empty.
    pub fn submission(&self) -> ScoreSubmission {
        ScoreSubmission {
            name: self.name.clone().unwrap_or_default(),
            score: self.score.clone().unwrap_or_default(),
        }
    }
}

/// One `name: score` line per record, in board order.
pub fn render_lines(scores: &[PlayerScore]) -> Vec<String> {
    scores
        .iter()
        .map(|player| format!("{}: {}", player.name, player.score))
        .collect()
}
