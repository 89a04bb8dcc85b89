use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::state::SharedState;

const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Purge idle sessions forever, checking at a fraction of the configured idle limit.
pub async fn run(state: SharedState) {
    let max_idle = state.config().session_idle;
    let interval = sweep_interval(max_idle);
    info!(
        max_idle_secs = max_idle.as_secs(),
        interval_secs = interval.as_secs(),
        "session sweeper started"
    );

    loop {
        sleep(interval).await;
        let purged = state.sessions().purge_idle(max_idle);
        if purged > 0 {
            info!(purged, remaining = state.sessions().len(), "purged idle sessions");
        } else {
            debug!(remaining = state.sessions().len(), "no idle sessions to purge");
        }
    }
}

fn sweep_interval(max_idle: Duration) -> Duration {
    (max_idle / 4).clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_interval_is_bounded() {
        assert_eq!(sweep_interval(Duration::ZERO), MIN_SWEEP_INTERVAL);
        assert_eq!(sweep_interval(Duration::from_secs(20)), Duration::from_secs(5));
        assert_eq!(
            sweep_interval(Duration::from_secs(6 * 60 * 60)),
            MAX_SWEEP_INTERVAL
        );
    }
}
