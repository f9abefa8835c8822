//! Timer driver for the reactive controller
//!
//! Feeds events from an mpsc channel into the controller and turns each
//! `DebounceRequest` into a tokio deadline. A newer request replaces the
//! deadline; the token check in the controller covers anything that
//! slips through. When the input side closes, a pending debounce is
//! still allowed to fire before the controller is handed back.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::core::{ControllerEvent, DebounceToken, ReactiveController};

/// Drive `controller` until `events` closes and nothing is pending.
pub async fn run_session(
    mut controller: ReactiveController,
    mut events: mpsc::Receiver<ControllerEvent>,
) -> ReactiveController {
    let mut deadline: Option<(DebounceToken, Instant)> = None;
    let mut closed = false;

    loop {
        let fire_at = deadline.map(|(_, at)| at).unwrap_or_else(Instant::now);

        tokio::select! {
            event = events.recv(), if !closed => {
                match event {
                    Some(event) => match controller.apply(event) {
                        Ok(transition) => {
                            if let Some(request) = transition.debounce {
                                deadline = Some((request.token, Instant::now() + request.delay));
                            } else if controller.pending_token().is_none() {
                                deadline = None;
                            }
                        }
                        Err(err) => tracing::warn!(error = %err, "event rejected"),
                    },
                    None => closed = true,
                }
            }
            _ = sleep_until(fire_at), if deadline.is_some() => {
                if let Some((token, _)) = deadline.take() {
                    controller.debounce_elapsed(token);
                }
            }
        }

        if closed && deadline.is_none() {
            break;
        }
    }

    controller
}

// =============================================================================
// TESTS
// =============================================================================
