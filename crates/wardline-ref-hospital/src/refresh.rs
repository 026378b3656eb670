//! Periodic refresh of live ward metrics.
//!
//! `RefreshTimer` is a scoped guard around a background thread that emits a
//! `Tick` every interval. The owning view drains ticks and applies them
//! itself; the thread never touches view state. At most one undrained tick
//! is held; ticks that fire while it is pending are dropped. Dropping the guard stops the
//! thread and joins it, so a tick can never outlive the view.

use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TrySendError},
    thread::{self, JoinHandle},
    time::Duration,
};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Intervals elapsed since the timer started, counting dropped ticks.
    pub sequence: u64,
    pub at: DateTime<Utc>,
}

pub struct RefreshTimer {
    ticks: Receiver<Tick>,
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    pub fn start(interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (tick_tx, tick_rx) = mpsc::sync_channel(1);

        let worker = thread::spawn(move || {
            let mut sequence = 0u64;
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        sequence += 1;
                        let tick = Tick {
                            sequence,
                            at: Utc::now(),
                        };
                        match tick_tx.try_send(tick) {
                            Ok(()) | Err(TrySendError::Full(_)) => {}
                            Err(TrySendError::Disconnected(_)) => break,
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        debug!(interval_ms = interval.as_millis() as u64, "refresh timer started");
        Self {
            ticks: tick_rx,
            stop: Some(stop_tx),
            worker: Some(worker),
        }
    }

    /// Block until the next tick, or `None` after `timeout`.
    pub fn recv_tick(&self, timeout: Duration) -> Option<Tick> {
        self.ticks.recv_timeout(timeout).ok()
    }

    /// A tick that has already fired, if any.
    pub fn try_tick(&self) -> Option<Tick> {
        self.ticks.try_recv().ok()
    }

    /// Stop and join the worker. Equivalent to dropping the guard.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        // Disconnecting the stop channel wakes the worker immediately.
        self.stop.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                debug!("refresh worker panicked");
            }
        }
        debug!("refresh timer stopped");
    }
}

/// Live numbers on the ward overview card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardMetrics {
    /// 0–100.
    pub bed_occupancy_percent: f64,
    pub average_stay_days: f64,
    pub nurse_patient_ratio: f64,
    pub pending_discharges: u32,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl WardMetrics {
    /// Nudge every metric by up to `jitter_percent` of its value in either
    /// direction, keeping each within its valid range.
    pub fn jitter<G: Rng>(&mut self, rng: &mut G, jitter_percent: u32) {
        if jitter_percent == 0 {
            return;
        }
        let spread = f64::from(jitter_percent.min(100)) / 100.0;

        self.bed_occupancy_percent = jittered(rng, self.bed_occupancy_percent, spread).clamp(0.0, 100.0);
        self.average_stay_days = jittered(rng, self.average_stay_days, spread).max(0.0);
        self.nurse_patient_ratio = jittered(rng, self.nurse_patient_ratio, spread).max(0.0);
        self.pending_discharges =
            jittered(rng, f64::from(self.pending_discharges), spread).round().max(0.0) as u32;
    }
}

fn jittered<G: Rng>(rng: &mut G, value: f64, spread: f64) -> f64 {
    value * (1.0 + rng.gen_range(-spread..=spread))
}
