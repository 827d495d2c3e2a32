//! Mode controller
//!
//! The face is in one of four combined states, driven only by the
//! visibility and ambient signals. Each setter reports what the caller
//! must do next as a [`Transition`].

use super::events::FaceEvent;

/// Power state of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Power {
    /// Full-frequency updates
    Interactive,
    /// Low-power updates, once per minute
    Ambient,
}

/// Whether the face is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Combined display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMode {
    pub power: Power,
    pub visibility: Visibility,
}

impl DisplayMode {
    /// Engine created but not yet shown
    pub const INITIAL: Self = Self {
        power: Power::Interactive,
        visibility: Visibility::Hidden,
    };

    /// Check if the periodic tick should run in this mode
    pub fn tick_active(&self) -> bool {
        self.power == Power::Interactive && self.visibility == Visibility::Visible
    }

    pub fn is_ambient(&self) -> bool {
        self.power == Power::Ambient
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: FaceEvent) -> Self {
        use FaceEvent::*;

        match event {
            VisibilityChanged(true) => Self {
                visibility: Visibility::Visible,
                ..self
            },
            VisibilityChanged(false) => Self {
                visibility: Visibility::Hidden,
                ..self
            },
            AmbientChanged(true) => Self {
                power: Power::Ambient,
                ..self
            },
            AmbientChanged(false) => Self {
                power: Power::Interactive,
                ..self
            },

            // Default: stay in current mode
            _ => self,
        }
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// What a mode change requires from the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// The mode actually changed
    pub changed: bool,
    /// A redraw must be requested
    pub redraw: bool,
    /// The clock's time zone must be re-read
    pub resync_clock: bool,
    /// Whether the periodic tick should run after this transition
    pub tick_active: bool,
    /// Whether the low-fidelity draw hint is active after this transition
    pub low_fidelity: bool,
}

/// Mode controller
///
/// Owns the current [`DisplayMode`] and the static low-bit ambient
/// capability of the device.
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: DisplayMode,
    low_bit_ambient: bool,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController {
    /// Create a controller in the initial (interactive, hidden) mode
    pub const fn new() -> Self {
        Self {
            mode: DisplayMode::INITIAL,
            low_bit_ambient: false,
        }
    }

    /// Current mode
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Record whether the display loses color depth in ambient mode
    pub fn set_low_bit_ambient(&mut self, low_bit: bool) {
        self.low_bit_ambient = low_bit;
    }

    /// Check if the low-fidelity draw hint applies
    ///
    /// Only a low-bit display in ambient mode draws without anti-aliasing.
    pub fn low_fidelity(&self) -> bool {
        self.low_bit_ambient && self.mode.is_ambient()
    }

    /// Face shown or hidden
    ///
    /// Entering VISIBLE re-syncs the clock and requests one redraw.
    pub fn set_visible(&mut self, visible: bool) -> Transition {
        let entered = visible && !self.mode.is_visible();
        let changed = self.apply(FaceEvent::VisibilityChanged(visible));

        Transition {
            changed,
            redraw: entered,
            resync_clock: entered,
            tick_active: self.mode.tick_active(),
            low_fidelity: self.low_fidelity(),
        }
    }

    /// Entered or left ambient mode
    ///
    /// Every true transition requests exactly one redraw.
    pub fn set_ambient(&mut self, ambient: bool) -> Transition {
        let changed = self.apply(FaceEvent::AmbientChanged(ambient));

        Transition {
            changed,
            redraw: changed,
            resync_clock: false,
            tick_active: self.mode.tick_active(),
            low_fidelity: self.low_fidelity(),
        }
    }

    fn apply(&mut self, event: FaceEvent) -> bool {
        let next = self.mode.transition(event);
        let changed = next != self.mode;
        self.mode = next;
        changed
    }
}
