mod memory;

use std::time::Duration;

use crate::state::round::RoundSession;

pub use self::memory::MemorySessionStore;

/// Abstraction over the per-client session storage.
///
/// Every client owns at most one session; saving a new one replaces the previous round.
pub trait SessionStore: Send + Sync {
    /// Return a copy of the client's session, if any.
    fn load(&self, client_id: &str) -> Option<RoundSession>;
    /// Store a session for the client, returning the one it replaced.
    fn save(&self, client_id: &str, session: RoundSession) -> Option<RoundSession>;
    /// Remove the client's session, returning it if one existed.
    fn clear(&self, client_id: &str) -> Option<RoundSession>;
    /// Mutate the client's session in place while holding its entry exclusively.
    ///
    /// Returns `false` when the client has no session; `apply` is not called in that case.
    fn update(&self, client_id: &str, apply: &mut dyn FnMut(&mut RoundSession)) -> bool;
    /// Drop every session that has not been written for longer than `max_idle`.
    fn purge_idle(&self, max_idle: Duration) -> usize;
    /// Number of sessions currently held.
    fn len(&self) -> usize;
}
