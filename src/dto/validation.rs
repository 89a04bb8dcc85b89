//! Validation helpers for DTOs.

use validator::ValidationError;

/// Largest roster accepted for a single round.
pub const MAX_PLAYERS: u64 = 30;
/// Longest accepted player display name, in characters.
pub const MAX_PLAYER_NAME_CHARS: usize = 40;
/// Longest accepted generation topic, in bytes.
pub const MAX_TOPIC_LENGTH: u64 = 100;
/// Longest accepted client identifier, in bytes.
pub const MAX_CLIENT_ID_LENGTH: usize = 128;

/// Validates that every player name is non-blank and reasonably short.
///
/// # Examples
///
/// ```ignore
/// validate_player_names(&vec!["Sara".into(), "Omar".into()]) // Ok
/// validate_player_names(&vec!["Sara".into(), "  ".into()])   // Err - blank name
/// ```
#[allow(clippy::ptr_arg)]
pub fn validate_player_names(players: &Vec<String>) -> Result<(), ValidationError> {
    for (index, name) in players.iter().enumerate() {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            let mut err = ValidationError::new("player_name_blank");
            err.message = Some(format!("player {index} has a blank name").into());
            return Err(err);
        }
        if trimmed.chars().count() > MAX_PLAYER_NAME_CHARS {
            let mut err = ValidationError::new("player_name_length");
            err.message = Some(
                format!("player {index} name exceeds {MAX_PLAYER_NAME_CHARS} characters").into(),
            );
            return Err(err);
        }
    }
    Ok(())
}

/// Validates the value of the `X-Client-Id` header.
pub fn validate_client_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        let mut err = ValidationError::new("client_id_blank");
        err.message = Some("client id must not be blank".into());
        return Err(err);
    }

    if id.len() > MAX_CLIENT_ID_LENGTH {
        let mut err = ValidationError::new("client_id_length");
        err.message = Some(
            format!(
                "client id must be at most {MAX_CLIENT_ID_LENGTH} bytes (got {})",
                id.len()
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}
