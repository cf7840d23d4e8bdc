use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::{services::scoreboard_service, state::SharedState};

/// Broadcast the board on a fixed cadence, whatever the activity.
///
/// The first broadcast happens one full interval after start. Runs until the task is dropped.
pub async fn run(state: SharedState) {
    let period = state.config().broadcast_interval;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(period_ms = period.as_millis() as u64, "periodic broadcast started");

    loop {
        ticker.tick().await;
        debug!("periodic broadcast");
        scoreboard_service::broadcast_scores(&state).await;
    }
}
