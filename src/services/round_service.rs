//! Round lifecycle for one client: start, reveal, current player, advance and reset.

use tracing::{debug, info};

use crate::{
    dto::round::{
        AdvanceTurnResponse, CurrentPlayerResponse, ResetRoundResponse, RevealResponse,
        RoundStartedResponse, StartRoundRequest,
    },
    error::ServiceError,
    state::{SharedState, round::RoundSession},
};

/// Start a new round for `client_id`, replacing any previous one.
///
/// The word is resolved before anything is stored, so a failed or slow generation never leaves a
/// half-initialised session behind.
pub async fn start_round(
    state: &SharedState,
    client_id: &str,
    request: StartRoundRequest,
) -> Result<RoundStartedResponse, ServiceError> {
    let StartRoundRequest {
        players,
        topic,
        use_generation,
    } = request;

    let players = normalize_players(players)?;

    let resolved = state
        .words()
        .resolve(topic.as_deref(), use_generation, state.rng())
        .await?;

    let session = {
        let mut rng = state.rng().lock().await;
        RoundSession::start(resolved.word, players, resolved.fallback, &mut *rng)?
    };

    let response = RoundStartedResponse {
        current_player: session.players()[0].clone(),
        index: 0,
        player_count: session.players().len(),
        fallback: session.used_fallback(),
    };

    let replaced = state.sessions().save(client_id, session).is_some();
    info!(
        players = response.player_count,
        use_generation,
        fallback = response.fallback,
        replaced,
        "round started"
    );

    Ok(response)
}

/// Reveal the assignment of the player at `index` without touching the turn pointer.
pub async fn reveal_player(
    state: &SharedState,
    client_id: &str,
    index: i64,
) -> Result<RevealResponse, ServiceError> {
    let session = state
        .sessions()
        .load(client_id)
        .ok_or(ServiceError::NoActiveSession)?;

    let reveal = session.reveal(index)?;
    debug!(index = reveal.index, "assignment revealed");
    Ok(reveal.into())
}

/// Return the player whose turn it is, without exposing the word or the odd one out.
pub async fn current_player(
    state: &SharedState,
    client_id: &str,
) -> Result<CurrentPlayerResponse, ServiceError> {
    let session = state
        .sessions()
        .load(client_id)
        .ok_or(ServiceError::NoActiveSession)?;

    Ok(session.current().into())
}

/// Hand the turn to the next player, or report the round complete after the last one.
pub async fn advance_turn(
    state: &SharedState,
    client_id: &str,
) -> Result<AdvanceTurnResponse, ServiceError> {
    let mut outcome = None;
    let found = state.sessions().update(client_id, &mut |session| {
        outcome = Some(session.advance());
    });

    let advance = match outcome {
        Some(advance) if found => advance,
        _ => return Err(ServiceError::NoActiveSession),
    };

    let response: AdvanceTurnResponse = advance.into();
    debug!(
        complete = response.complete,
        next_index = response.next_index,
        "turn advanced"
    );
    Ok(response)
}

/// Drop the caller's round.
pub async fn reset_round(
    state: &SharedState,
    client_id: &str,
) -> Result<ResetRoundResponse, ServiceError> {
    state
        .sessions()
        .clear(client_id)
        .ok_or(ServiceError::NoActiveSession)?;

    info!("round reset");
    Ok(ResetRoundResponse { cleared: true })
}

fn normalize_players(players: Vec<String>) -> Result<Vec<String>, ServiceError> {
    if players.is_empty() {
        return Err(ServiceError::InvalidInput(
            "a round requires at least one player".into(),
        ));
    }

    players
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let name = name.trim();
            if name.is_empty() {
                return Err(ServiceError::InvalidInput(format!(
                    "player {index} has a blank name"
                )));
            }
            Ok(name.to_owned())
        })
        .collect()
}
