use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

use crate::geometry::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// A step was accepted onto the path.
    Forward,
    /// The path tail was removed while backtracking.
    Backward,
}

/// One notification from the walk engine.
///
/// `direction` is the direction of travel: for [`StepMode::Backward`] it points from the removed
/// tail back to the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    pub direction: Direction,
    pub mode: StepMode,
}

impl StepEvent {
    pub fn forward(direction: Direction) -> Self {
        Self {
            direction,
            mode: StepMode::Forward,
        }
    }

    pub fn backward(direction: Direction) -> Self {
        Self {
            direction,
            mode: StepMode::Backward,
        }
    }
}

pub trait StepSink {
    fn emit(&mut self, event: StepEvent);
}

impl<S: StepSink + ?Sized> StepSink for &mut S {
    fn emit(&mut self, event: StepEvent) {
        (**self).emit(event);
    }
}

impl<S: StepSink + ?Sized> StepSink for Box<S> {
    fn emit(&mut self, event: StepEvent) {
        (**self).emit(event);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StepSink for NullSink {
    fn emit(&mut self, _event: StepEvent) {}
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VecSink {
    pub events: Vec<StepEvent>,
}

impl StepSink for VecSink {
    fn emit(&mut self, event: StepEvent) {
        self.events.push(event);
    }
}

/// Producer half of an unbounded FIFO event queue.
///
/// Sends after the receiver is gone are dropped, so a consumer can stop listening at any time.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<StepEvent>,
}

impl StepSink for ChannelSink {
    fn emit(&mut self, event: StepEvent) {
        let _ = self.tx.send(event);
    }
}

/// Consumer half of the queue created by [`event_channel`].
#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<StepEvent>,
}

impl EventReceiver {
    /// Takes every event queued so far without blocking.
    pub fn try_drain(&self) -> Vec<StepEvent> {
        self.rx.try_iter().collect()
    }

    /// Drains the queue every `interval` until the producer hangs up.
    ///
    /// Returns how many events were delivered to `on_event`.
    pub fn poll_every(&self, interval: Duration, mut on_event: impl FnMut(StepEvent)) -> usize {
        let mut delivered = 0;
        loop {
            loop {
                match self.rx.try_recv() {
                    Ok(event) => {
                        on_event(event);
                        delivered += 1;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return delivered,
                }
            }
            std::thread::sleep(interval);
        }
    }
}

pub fn event_channel() -> (ChannelSink, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    (ChannelSink { tx }, EventReceiver { rx })
}
