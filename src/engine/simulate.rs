/// Headless driver: plays rounds back to back, ending each turn the moment
/// the gating rule allows it.
use anyhow::Result;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::config::TableConfig;
use crate::core::error::TurnError;
use crate::core::thinking::ThinkDriver;
use crate::core::turn::{TurnCoordinator, TurnEvent};

/// Play `rounds` rounds and return every event in the order it happened
pub async fn simulate(config: &TableConfig, rounds: u32) -> Result<Vec<TurnEvent>> {
    // this loop always awaits while someone thinks, so the runtime can host the delays
    let mut table = TurnCoordinator::with_think_time(config.think_time)
        .with_driver(ThinkDriver::current_runtime());
    let mut poll = tokio::time::interval(config.tick);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut history = Vec::new();

    for n in 0..rounds {
        if n == 0 {
            table.start_round(config.actors());
        } else {
            table.reset_round();
        }

        loop {
            for ev in table.drain_events() {
                info!(event = ?ev, "simulate");
                history.push(ev);
            }
            if table.is_round_over() {
                break;
            }
            match table.try_end_current_turn() {
                Ok(()) => {}
                Err(TurnError::StillThinking { .. }) => {
                    poll.tick().await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(history)
}
