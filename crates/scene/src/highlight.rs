//! Per-frame highlight state machine.
//!
//! Each consideration is in one of three visual states every frame:
//! idle (scale 1), hovered (sinusoid of wall-clock time) or active-pulsing
//! (a bounded triangle oscillator advanced once per frame). Hover is
//! recomputed from the pointer ray every frame and takes precedence over
//! the active pulse.

use foundation::time::Millis;

use crate::registry::ConsiderationRegistry;

pub const HOVER_AMPLITUDE: f64 = 0.2;
/// Angular rate of the hover sinusoid, radians per millisecond.
pub const HOVER_RATE_PER_MS: f64 = 0.005;

pub const PULSE_STEP: f64 = 0.01;
pub const PULSE_MIN: f64 = 0.8;
pub const PULSE_MAX: f64 = 1.2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HighlightCause {
    #[default]
    None,
    Hovered,
    Active,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EntryHighlight {
    /// Registry index.
    pub index: usize,
    pub scale: f64,
    pub cause: HighlightCause,
}

/// Hover scale at wall-clock time `t`: `1 + 0.2 * sin(0.005 * t_ms)`.
pub fn hover_scale(t: Millis) -> f64 {
    1.0 + HOVER_AMPLITUDE * (t.0 * HOVER_RATE_PER_MS).sin()
}

/// Triangle oscillator between [`PULSE_MIN`] and [`PULSE_MAX`].
///
/// The step is applied before the bound check, so the scale overshoots a
/// bound by at most one [`PULSE_STEP`] before turning around.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PulseOscillator {
    scale: f64,
    direction: f64,
}

impl Default for PulseOscillator {
    fn default() -> Self {
        Self {
            scale: 1.0,
            direction: 1.0,
        }
    }
}

impl PulseOscillator {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_rising(&self) -> bool {
        self.direction > 0.0
    }

    pub fn step(&mut self) -> f64 {
        self.scale += self.direction * PULSE_STEP;
        if self.scale > PULSE_MAX {
            self.direction = -1.0;
        }
        if self.scale < PULSE_MIN {
            self.direction = 1.0;
        }
        self.scale
    }
}

/// Shared highlight state across frames.
///
/// Only the pulse accumulator survives between frames; at most one entry is
/// active at a time, so a single oscillator animates it coherently.
#[derive(Debug, Clone, Default)]
pub struct HighlightState {
    pulse: PulseOscillator,
    highlights: Vec<EntryHighlight>,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulse(&self) -> &PulseOscillator {
        &self.pulse
    }

    /// Results of the most recent [`HighlightState::update`].
    pub fn highlights(&self) -> &[EntryHighlight] {
        &self.highlights
    }

    /// Recomputes every entry's scale for one frame.
    ///
    /// `hovered` is the registry index under the pointer ray; `active` is the
    /// label of the last accepted prediction.
    pub fn update(
        &mut self,
        registry: &ConsiderationRegistry,
        hovered: Option<usize>,
        active: Option<&str>,
        now: Millis,
    ) -> &[EntryHighlight] {
        let active = active.and_then(|label| registry.index_of(label));

        self.highlights.clear();
        for index in 0..registry.len() {
            let (scale, cause) = if Some(index) == hovered {
                (hover_scale(now), HighlightCause::Hovered)
            } else if Some(index) == active {
                (self.pulse.step(), HighlightCause::Active)
            } else {
                (1.0, HighlightCause::None)
            };
            self.highlights.push(EntryHighlight {
                index,
                scale,
                cause,
            });
        }
        &self.highlights
    }
}
