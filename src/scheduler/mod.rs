//! Pacing primitive for bursts of UI-facing calls
//!
//! A [`Scheduler`] queues every call to [`Scheduler::trigger`] and delivers it to the
//! callback later, in FIFO order, with its original argument. Nothing is dropped or
//! merged: the scheduler controls cadence, not volume.
//!
//! Two policies are available:
//!
//! - [`SchedulePolicy::FrameAligned`] delivers one queued call per display frame
//! - [`SchedulePolicy::FixedDelay`] delivers one queued call per `delay`, the first
//!   one `delay` after it was queued
//!
//! The callback runs on a tokio task, so a scheduler must be created inside a runtime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::warn;

/// Cadence of one display frame at 60 Hz
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulePolicy {
    #[default]
    FrameAligned,
    FixedDelay(Duration),
}

/// FIFO queue of pending calls drained by a background task
pub struct Scheduler<T> {
    sender: mpsc::UnboundedSender<T>,
    worker: JoinHandle<()>,
}

impl<T: Send + 'static> Scheduler<T> {
    pub fn new<F>(policy: SchedulePolicy, callback: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = match policy {
            SchedulePolicy::FrameAligned => tokio::spawn(drain_per_frame(receiver, callback)),
            SchedulePolicy::FixedDelay(delay) => {
                tokio::spawn(drain_with_delay(receiver, delay, callback))
            }
        };

        Self { sender, worker }
    }

    /// Queue one call. Never blocks and never drops the call.
    pub fn trigger(&self, args: T) {
        if self.sender.send(args).is_err() {
            warn!("Scheduler worker has stopped, call discarded");
        }
    }

    /// Stop accepting calls and wait until everything already queued was delivered
    pub async fn flush(self) {
        let Self { sender, worker } = self;
        drop(sender);
        if let Err(e) = worker.await {
            warn!("Scheduler worker ended abnormally: {}", e);
        }
    }
}

async fn drain_per_frame<T, F>(mut receiver: mpsc::UnboundedReceiver<T>, mut callback: F)
where
    F: FnMut(T),
{
    let mut frames = time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while let Some(args) = receiver.recv().await {
        frames.tick().await;
        callback(args);
    }
}

async fn drain_with_delay<T, F>(
    mut receiver: mpsc::UnboundedReceiver<T>,
    delay: Duration,
    mut callback: F,
) where
    F: FnMut(T),
{
    // The timer is armed when the head is taken, later calls never reset it
    while let Some(args) = receiver.recv().await {
        time::sleep(delay).await;
        callback(args);
    }
}
