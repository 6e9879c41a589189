//! Events produced outside the frame loop, possibly on other threads.
//!
//! Producers hold an [InputSender]; the loop owns the [InputQueue] and drains
//! it at the start of every frame, so every write reaches the loop in the
//! order it was sent and only between frames.

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::config::ParamValue;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved, in screen pixels (origin top left)
    PointerMove { x: f32, y: f32 },
    /// Drawing surface resized, in pixels
    Resize { width: u32, height: u32 },
    /// Configuration UI wrote a parameter
    SetParam { name: String, value: ParamSource },
    /// Orbit drag, in pixels
    Orbit { dx: f32, dy: f32 },
    Zoom { delta: f32 },
}

/// A parameter write, typed or still in text form
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSource {
    Value(ParamValue),
    Text(String),
}

impl InputEvent {
    pub fn set_param(name: impl Into<String>, value: ParamValue) -> Self {
        Self::SetParam {
            name: name.into(),
            value: ParamSource::Value(value),
        }
    }

    pub fn set_param_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::SetParam {
            name: name.into(),
            value: ParamSource::Text(text.into()),
        }
    }
}

/// Producer side of an [InputQueue]
#[derive(Debug, Clone)]
pub struct InputSender(Sender<InputEvent>);

impl InputSender {
    /// Returns false once the queue has been dropped
    pub fn send(&self, event: InputEvent) -> bool {
        self.0.send(event).is_ok()
    }
}

#[derive(Debug)]
pub struct InputQueue {
    receiver: Receiver<InputEvent>,
    /// Kept so that the queue never reports disconnection while it is alive
    sender: Sender<InputEvent>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { receiver, sender }
    }

    pub fn sender(&self) -> InputSender {
        InputSender(self.sender.clone())
    }

    /// Everything sent so far, oldest first. Never blocks.
    pub fn drain(&self) -> Vec<InputEvent> {
        let mut events = Vec::with_capacity(self.receiver.len());
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
