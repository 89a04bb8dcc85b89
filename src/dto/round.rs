//! DTO definitions for the round lifecycle endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::validation::{MAX_PLAYERS, MAX_TOPIC_LENGTH, validate_player_names},
    state::round::{Assignment, CurrentTurn, Reveal, TurnAdvance},
};

fn default_use_generation() -> bool {
    true
}

/// Payload starting a new round for the calling client.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct StartRoundRequest {
    /// Player display names in turn order.
    #[validate(
        length(min = 1, max = MAX_PLAYERS, message = "between 1 and 30 players are required"),
        custom(function = "validate_player_names")
    )]
    pub players: Vec<String>,
    /// Optional topic constraining the generated word.
    #[serde(default)]
    #[validate(length(max = MAX_TOPIC_LENGTH))]
    pub topic: Option<String>,
    /// Ask the generator for the word instead of drawing from the fixed pool.
    #[serde(default = "default_use_generation")]
    pub use_generation: bool,
}

/// Response emitted when a round starts. The secret word is never part of it.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundStartedResponse {
    /// First player to take a turn.
    pub current_player: String,
    /// Always 0 on a fresh round.
    pub index: usize,
    /// Roster size.
    pub player_count: usize,
    /// True when generation failed and the word came from the fixed pool instead.
    pub fallback: bool,
}

/// What one player sees when revealing their assignment.
#[derive(Debug, Serialize, ToSchema)]
pub struct RevealResponse {
    /// Roster position of the player.
    pub index: usize,
    /// Name of the player.
    pub player_name: String,
    /// `null` for the excluded player.
    pub word: Option<String>,
    /// Whether this player is the odd one out.
    pub excluded: bool,
}

impl From<Reveal> for RevealResponse {
    fn from(reveal: Reveal) -> Self {
        let (word, excluded) = match reveal.assignment {
            Assignment::Word(word) => (Some(word), false),
            Assignment::Excluded => (None, true),
        };
        Self {
            index: reveal.index,
            player_name: reveal.player_name,
            word,
            excluded,
        }
    }
}

/// Player whose turn it currently is.
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentPlayerResponse {
    /// Name of the player holding the turn.
    pub player_name: String,
    /// Roster position of that player.
    pub index: usize,
    /// True once every player had their turn.
    pub complete: bool,
}

impl From<CurrentTurn> for CurrentPlayerResponse {
    fn from(turn: CurrentTurn) -> Self {
        Self {
            player_name: turn.player_name,
            index: turn.index,
            complete: turn.complete,
        }
    }
}

/// Response describing the round after moving the turn pointer.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdvanceTurnResponse {
    /// Set once the last player had their turn.
    pub complete: bool,
    /// Player now holding the turn, absent on completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_player: Option<String>,
    /// Roster position of `next_player`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_index: Option<usize>,
}

impl From<TurnAdvance> for AdvanceTurnResponse {
    fn from(advance: TurnAdvance) -> Self {
        match advance {
            TurnAdvance::Next { index, player_name } => Self {
                complete: false,
                next_player: Some(player_name),
                next_index: Some(index),
            },
            TurnAdvance::Complete => Self {
                complete: true,
                next_player: None,
                next_index: None,
            },
        }
    }
}

/// Acknowledges an explicit round reset.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetRoundResponse {
    /// Always true; a missing round is reported as an error.
    pub cleared: bool,
}
