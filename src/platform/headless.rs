//! Headless platform pieces
//!
//! Used by the native binary and by tests: a surface that records draw
//! commands, a session that records messages, and a timer fired by hand.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;

use glam::Vec2;

use super::{Session, Timer};
use crate::renderer::Surface;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        color: String,
    },
}

/// Records the calls made since the last clear
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of clears so far (one per drawn frame)
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, &str)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => Some((*center, *radius, color.as_str())),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {
        self.commands.clear();
        self.clears += 1;
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            color: color.to_string(),
        });
    }
}

/// Records end-of-run messages and restart requests
#[derive(Debug, Default)]
pub struct RecordingSession {
    messages: Vec<String>,
    restarts: usize,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn restarts(&self) -> usize {
        self.restarts
    }
}

impl Session for RecordingSession {
    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
        self.messages.push(message.to_string());
    }

    fn restart(&mut self) {
        self.restarts += 1;
    }
}

/// Handle for a [`ManualTimer`] callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(u32);

struct Slot {
    id: TimerId,
    period_ms: u32,
    elapsed_ms: u32,
    /// Taken out while the callback runs
    callback: Option<Box<dyn FnMut()>>,
    cancelled: bool,
}

/// A timer that only fires when told to
#[derive(Default)]
pub struct ManualTimer {
    slots: RefCell<Vec<Slot>>,
    next_id: Cell<u32>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (scheduled, not cancelled) callbacks
    pub fn active(&self) -> usize {
        self.slots.borrow().iter().filter(|s| !s.cancelled).count()
    }

    fn ids(&self) -> Vec<TimerId> {
        self.slots
            .borrow()
            .iter()
            .filter(|s| !s.cancelled)
            .map(|s| s.id)
            .collect()
    }

    /// Run one callback; returns false if it was cancelled beforehand
    fn fire_one(&self, id: TimerId) -> bool {
        let callback = {
            let mut slots = self.slots.borrow_mut();
            match slots.iter_mut().find(|s| s.id == id && !s.cancelled) {
                Some(slot) => slot.callback.take(),
                None => None,
            }
        };

        let Some(mut callback) = callback else {
            return false;
        };
        callback();

        let mut slots = self.slots.borrow_mut();
        if let Some(slot) = slots.iter_mut().find(|s| s.id == id && !s.cancelled) {
            slot.callback = Some(callback);
        }
        slots.retain(|s| !s.cancelled);
        true
    }

    /// Fire every live callback once; returns how many ran
    pub fn fire(&self) -> usize {
        self.ids().into_iter().filter(|&id| self.fire_one(id)).count()
    }

    /// Let `ms` milliseconds pass, firing each callback once per elapsed period
    pub fn advance(&self, ms: u32) -> usize {
        for slot in self.slots.borrow_mut().iter_mut() {
            slot.elapsed_ms += ms;
        }

        let mut fired = 0;
        for id in self.ids() {
            loop {
                let due = {
                    let mut slots = self.slots.borrow_mut();
                    match slots.iter_mut().find(|s| s.id == id && !s.cancelled) {
                        Some(slot) if slot.elapsed_ms >= slot.period_ms => {
                            slot.elapsed_ms -= slot.period_ms;
                            true
                        }
                        _ => false,
                    }
                };
                if !due || !self.fire_one(id) {
                    break;
                }
                fired += 1;
            }
        }
        fired
    }
}

impl Timer for ManualTimer {
    type Handle = TimerId;
    type Error = Infallible;

    fn schedule(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Result<TimerId, Infallible> {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.slots.borrow_mut().push(Slot {
            id,
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
            callback: Some(callback),
            cancelled: false,
        });
        Ok(id)
    }

    fn cancel(&self, handle: TimerId) {
        let mut slots = self.slots.borrow_mut();
        if let Some(slot) = slots.iter_mut().find(|s| s.id == handle) {
            slot.cancelled = true;
            slot.callback = None;
        }
    }
}
