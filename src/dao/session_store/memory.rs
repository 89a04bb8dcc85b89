use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::SessionStore;
use crate::state::round::RoundSession;

#[derive(Debug)]
struct StoredSession {
    session: RoundSession,
    touched_at: Instant,
}

impl StoredSession {
    fn new(session: RoundSession) -> Self {
        Self {
            session,
            touched_at: Instant::now(),
        }
    }
}

/// In-process [`SessionStore`] keyed by client identifier.
///
/// Entries are sharded by [`DashMap`], so a write on one client's session never blocks another
/// client and concurrent writes on the same session are serialized.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, StoredSession>,
}

impl MemorySessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, client_id: &str) -> Option<RoundSession> {
        self.sessions
            .get(client_id)
            .map(|entry| entry.session.clone())
    }

    fn save(&self, client_id: &str, session: RoundSession) -> Option<RoundSession> {
        self.sessions
            .insert(client_id.to_owned(), StoredSession::new(session))
            .map(|previous| previous.session)
    }

    fn clear(&self, client_id: &str) -> Option<RoundSession> {
        self.sessions
            .remove(client_id)
            .map(|(_, stored)| stored.session)
    }

    fn update(&self, client_id: &str, apply: &mut dyn FnMut(&mut RoundSession)) -> bool {
        let Some(mut entry) = self.sessions.get_mut(client_id) else {
            return false;
        };
        apply(&mut entry.session);
        entry.touched_at = Instant::now();
        true
    }

    fn purge_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, stored| stored.touched_at.elapsed() <= max_idle);
        before.saturating_sub(self.sessions.len())
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use std::thread::sleep;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn session(word: &str) -> RoundSession {
        let mut rng = StdRng::seed_from_u64(42);
        RoundSession::start(
            word.into(),
            vec!["A".into(), "B".into(), "C".into()],
            false,
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn save_replaces_previous_round() {
        let store = MemorySessionStore::new();
        assert!(store.save("client", session("بحر")).is_none());

        let previous = store.save("client", session("جبل")).unwrap();
        assert_eq!(previous.word(), "بحر");
        assert_eq!(store.load("client").unwrap().word(), "جبل");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sessions_are_isolated_per_client() {
        let store = MemorySessionStore::new();
        store.save("alice", session("بحر"));

        assert!(store.load("bob").is_none());
        assert!(!store.update("bob", &mut |s| {
            s.advance();
        }));
        assert!(store.clear("bob").is_none());
        assert_eq!(store.load("alice").unwrap().current_turn(), 0);
    }

    #[test]
    fn update_mutates_in_place() {
        let store = MemorySessionStore::new();
        store.save("client", session("بحر"));

        assert!(store.update("client", &mut |s| {
            s.advance();
        }));
        assert_eq!(store.load("client").unwrap().current_turn(), 1);
    }

    #[test]
    fn purge_idle_drops_stale_sessions_only() {
        let store = MemorySessionStore::new();
        store.save("stale", session("بحر"));
        sleep(Duration::from_millis(30));
        store.save("fresh", session("جبل"));

        let purged = store.purge_idle(Duration::from_millis(15));

        assert_eq!(purged, 1);
        assert!(store.load("stale").is_none());
        assert!(store.load("fresh").is_some());
    }

    #[test]
    fn writes_refresh_idle_clock_but_reads_do_not() {
        let store = MemorySessionStore::new();
        store.save("read", session("بحر"));
        store.save("written", session("جبل"));
        sleep(Duration::from_millis(30));

        assert!(store.load("read").is_some());
        assert!(store.update("written", &mut |s| {
            s.advance();
        }));

        assert_eq!(store.purge_idle(Duration::from_millis(15)), 1);
        assert!(store.load("read").is_none());
        assert!(store.load("written").is_some());
    }
}
