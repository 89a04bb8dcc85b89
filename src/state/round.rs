use rand::Rng;
use thiserror::Error;

/// Lifecycle of a stored round. A client without a stored round has no session at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Players are still taking turns to see their assignment.
    Active,
    /// Every player had a turn; terminal until the next round replaces it.
    Complete,
}

/// Errors raised by operations on a single round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// A round needs at least one player.
    #[error("a round requires at least one player")]
    NoPlayers,
    /// Requested player index is outside the roster.
    #[error("player index {index} is out of range (0..{len})")]
    InvalidIndex {
        /// Index as requested.
        index: i64,
        /// Roster size.
        len: usize,
    },
}

/// What a single player is told when their assignment is revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// The player shares the secret word.
    Word(String),
    /// The player is the odd one out and must bluff.
    Excluded,
}

/// Result of revealing one player's assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    /// Roster position of the player.
    pub index: usize,
    /// Name as entered when the round started.
    pub player_name: String,
    /// What the player is shown.
    pub assignment: Assignment,
}

/// The player whose turn it currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentTurn {
    /// Roster position of the player.
    pub index: usize,
    /// Name of the player.
    pub player_name: String,
    /// Every player already had a turn.
    pub complete: bool,
}

/// Outcome of moving the turn pointer forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAdvance {
    /// The pointer moved to the next player.
    Next {
        /// New roster position.
        index: usize,
        /// Player now holding the turn.
        player_name: String,
    },
    /// The last player already had their turn; the pointer did not move.
    Complete,
}

/// State of one round for one client: the secret word, the odd one out and the turn pointer.
///
/// Word, roster and excluded index are fixed at construction; only the turn pointer and phase
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSession {
    word: String,
    players: Vec<String>,
    excluded_index: usize,
    current_turn: usize,
    phase: RoundPhase,
    fallback: bool,
}

impl RoundSession {
    /// Start a round, rolling the excluded player uniformly over the roster.
    ///
    /// `fallback` records whether `word` was substituted from the fixed pool after a failed
    /// generation.
    pub fn start<R: Rng>(
        word: String,
        players: Vec<String>,
        fallback: bool,
        rng: &mut R,
    ) -> Result<Self, RoundError> {
        if players.is_empty() {
            return Err(RoundError::NoPlayers);
        }

        let excluded_index = rng.random_range(0..players.len());

        Ok(Self {
            word,
            players,
            excluded_index,
            current_turn: 0,
            phase: RoundPhase::Active,
            fallback,
        })
    }

    /// Secret word shared by everyone but the excluded player.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Roster in turn order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Position of the odd one out.
    pub fn excluded_index(&self) -> usize {
        self.excluded_index
    }

    /// Position of the player holding the turn.
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Whether the word was substituted from the fixed pool.
    pub fn used_fallback(&self) -> bool {
        self.fallback
    }

    /// Reveal what the player at `index` should see. Never mutates the round.
    pub fn reveal(&self, index: i64) -> Result<Reveal, RoundError> {
        let position = usize::try_from(index)
            .ok()
            .filter(|position| *position < self.players.len())
            .ok_or(RoundError::InvalidIndex {
                index,
                len: self.players.len(),
            })?;

        let assignment = if position == self.excluded_index {
            Assignment::Excluded
        } else {
            Assignment::Word(self.word.clone())
        };

        Ok(Reveal {
            index: position,
            player_name: self.players[position].clone(),
            assignment,
        })
    }

    /// Player currently entitled to request their reveal.
    pub fn current(&self) -> CurrentTurn {
        CurrentTurn {
            index: self.current_turn,
            player_name: self.players[self.current_turn].clone(),
            complete: self.phase == RoundPhase::Complete,
        }
    }

    /// Hand the turn to the next player, or mark the round complete after the last one.
    pub fn advance(&mut self) -> TurnAdvance {
        if self.phase == RoundPhase::Complete || self.current_turn + 1 >= self.players.len() {
            self.phase = RoundPhase::Complete;
            return TurnAdvance::Complete;
        }

        self.current_turn += 1;
        TurnAdvance::Next {
            index: self.current_turn,
            player_name: self.players[self.current_turn].clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn roster(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("player-{i}")).collect()
    }

    fn start(n: usize, seed: u64) -> RoundSession {
        let mut rng = StdRng::seed_from_u64(seed);
        RoundSession::start("قهوة".into(), roster(n), false, &mut rng).unwrap()
    }

    #[test]
    fn empty_roster_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = RoundSession::start("قهوة".into(), Vec::new(), false, &mut rng).unwrap_err();
        assert_eq!(err, RoundError::NoPlayers);
    }

    #[test]
    fn exactly_one_player_is_excluded() {
        for n in 1..=12 {
            for seed in 0..20 {
                let round = start(n, seed);
                assert!(round.excluded_index() < n);

                let reveals = (0..n as i64)
                    .map(|i| round.reveal(i).unwrap())
                    .collect::<Vec<_>>();
                let excluded = reveals
                    .iter()
                    .filter(|r| r.assignment == Assignment::Excluded)
                    .count();
                assert_eq!(excluded, 1, "n={n} seed={seed}");
                assert!(
                    reveals
                        .iter()
                        .filter(|r| r.assignment != Assignment::Excluded)
                        .all(|r| r.assignment == Assignment::Word("قهوة".into()))
                );
            }
        }
    }

    #[test]
    fn excluded_index_covers_the_whole_roster() {
        let mut seen = [false; 4];
        for seed in 0..200 {
            seen[start(4, seed).excluded_index()] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn reveal_is_idempotent_and_side_effect_free() {
        let round = start(5, 3);
        let snapshot = round.clone();
        let excluded = round.excluded_index() as i64;

        for index in [4, 0, excluded, 2, excluded, 4] {
            let first = round.reveal(index).unwrap();
            let second = round.reveal(index).unwrap();
            assert_eq!(first, second);
            if index == excluded {
                assert_eq!(first.assignment, Assignment::Excluded);
            }
        }
        assert_eq!(round, snapshot);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let round = start(3, 9);
        assert_eq!(
            round.reveal(3).unwrap_err(),
            RoundError::InvalidIndex { index: 3, len: 3 }
        );
        assert_eq!(
            round.reveal(-1).unwrap_err(),
            RoundError::InvalidIndex { index: -1, len: 3 }
        );
    }

    #[test]
    fn advancing_walks_the_roster_then_completes() {
        let mut round = start(4, 11);
        assert_eq!(round.current().index, 0);
        assert_eq!(round.current().player_name, "player-0");

        for expected in 1..4 {
            match round.advance() {
                TurnAdvance::Next { index, player_name } => {
                    assert_eq!(index, expected);
                    assert_eq!(player_name, format!("player-{expected}"));
                }
                TurnAdvance::Complete => panic!("completed early at {expected}"),
            }
            assert_eq!(round.phase(), RoundPhase::Active);
        }

        assert_eq!(round.advance(), TurnAdvance::Complete);
        assert_eq!(round.phase(), RoundPhase::Complete);
        assert_eq!(round.current_turn(), 3);
        assert!(round.current().complete);
    }

    #[test]
    fn complete_round_is_terminal() {
        let mut round = start(1, 5);
        assert_eq!(round.advance(), TurnAdvance::Complete);
        assert_eq!(round.advance(), TurnAdvance::Complete);
        assert_eq!(round.current_turn(), 0);
        assert_eq!(round.current().player_name, "player-0");
    }
}
