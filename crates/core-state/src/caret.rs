//! Authoritative caret location and blink state.
//!
//! Blinking is driven by the host: a [`BlinkTimer`] is injected and the host
//! calls [`Caret::on_blink_tick`] whenever that timer fires. Without a timer
//! (or with a zero blink rate) the caret is permanently visible.

use core_layout::CaretPosition;
use std::fmt;
use std::time::Duration;
use tracing::trace;

pub const DEFAULT_BLINK_RATE: Duration = Duration::from_millis(450);

/// Host scheduling primitive for the caret blink.
pub trait BlinkTimer: Send {
    /// Start (or restart) periodic ticks with the given period.
    fn start(&mut self, period: Duration);
    fn stop(&mut self);
}

pub struct Caret {
    position: CaretPosition,
    visible: bool,
    blink_rate: Duration,
    timer: Option<Box<dyn BlinkTimer>>,
}

impl fmt::Debug for Caret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caret")
            .field("position", &self.position)
            .field("visible", &self.visible)
            .field("blink_rate", &self.blink_rate)
            .field("timer", &self.timer.is_some())
            .finish()
    }
}

impl Default for Caret {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_RATE)
    }
}

impl Caret {
    pub fn new(blink_rate: Duration) -> Self {
        Self {
            position: CaretPosition::default(),
            visible: true,
            blink_rate,
            timer: None,
        }
    }

    pub fn position(&self) -> CaretPosition {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn blink_rate(&self) -> Duration {
        self.blink_rate
    }

    /// Install the host timer and start blinking.
    pub fn set_blink_timer(&mut self, timer: Box<dyn BlinkTimer>) {
        if let Some(mut old) = self.timer.replace(timer) {
            old.stop();
        }
        self.restart_blink();
    }

    pub fn set_blink_rate(&mut self, blink_rate: Duration) {
        self.blink_rate = blink_rate;
        self.restart_blink();
    }

    /// Move the caret; the blink phase restarts so it is shown immediately.
    pub fn set_position(&mut self, position: CaretPosition) {
        if position != self.position {
            trace!(
                target: "state.caret",
                data_position = position.data_position,
                code_offset = position.code_offset,
                section = ?position.section,
                "caret_moved"
            );
        }
        self.position = position;
        self.restart_blink();
    }

    /// Back to the document origin, keeping the active section.
    pub fn reset(&mut self) {
        self.set_position(CaretPosition::origin(self.position.section));
    }

    pub fn on_blink_tick(&mut self) {
        if self.blink_enabled() {
            self.visible = !self.visible;
        }
    }

    fn blink_enabled(&self) -> bool {
        self.timer.is_some() && !self.blink_rate.is_zero()
    }

    fn restart_blink(&mut self) {
        self.visible = true;
        let rate = self.blink_rate;
        if let Some(timer) = self.timer.as_mut() {
            if rate.is_zero() {
                timer.stop();
            } else {
                timer.start(rate);
            }
        }
    }
}

impl Drop for Caret {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.stop();
        }
    }
}
