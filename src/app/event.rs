//! Terminal and frame event sources.
//!
//! Two background tasks feed one channel so the main loop stays
//! non-blocking: an input reader wrapping crossterm events, and a frame
//! ticker that emits one [`AppEvent::Frame`] per display refresh.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// How long the input reader blocks in `poll` before checking whether the
/// receiver is gone.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// A display refresh at the given instant.
    Frame(Instant),
}

/// Spawn both event sources and return the shared receiver.
pub fn spawn_event_sources(fps: u32) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx.clone());
    spawn_frame_ticker(tx, frame_interval(fps));
    rx
}

/// Interval between frames for `fps` (at least 1 fps).
pub fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}

fn spawn_input_reader(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        loop {
            let has_event = event::poll(INPUT_POLL).unwrap_or(false);
            if has_event {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => AppEvent::Key(k),
                        CtEvent::Mouse(m) => AppEvent::Mouse(m),
                        CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                        _ => continue,
                    };
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped
                    }
                }
            } else if tx.is_closed() {
                break;
            }
        }
    });
}

fn spawn_frame_ticker(tx: mpsc::UnboundedSender<AppEvent>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // A late frame is dropped, never replayed in a burst.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            let at = interval.tick().await;
            if tx.send(AppEvent::Frame(at.into_std())).is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_interval_matches_rate() {
        let twenty = frame_interval(50).as_secs_f64();
        assert!((twenty - 0.020).abs() < 1e-9);
        assert_eq!(frame_interval(0), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn ticker_emits_frames() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_frame_ticker(tx, Duration::from_millis(16));
        let mut last = None;
        for _ in 0..3 {
            match rx.recv().await {
                Some(AppEvent::Frame(at)) => {
                    if let Some(prev) = last {
                        assert!(at > prev);
                    }
                    last = Some(at);
                }
                other => panic!("expected a frame, got {other:?}"),
            }
        }
    }
}
