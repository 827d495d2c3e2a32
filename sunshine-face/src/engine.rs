//! Face engine
//!
//! Owns the mode controller, the cached clock and the resolved style.
//! Everything it shares with the other tasks goes through [`FaceShared`];
//! it never holds a reference to a task and no task holds one to it.

use embassy_sync::blocking_mutex::raw::RawMutex;

use sunshine_core::config::{FaceConfig, FaceStyle, StyleInputs};
use sunshine_core::state::{DisplayMode, FaceEvent, ModeController, TapKind, Transition};
use sunshine_core::time::FaceClock;
use sunshine_core::traits::Clock;
use sunshine_display::{DrawSurface, FaceFrame, SurfaceError};

use crate::fmt::{debug, info, trace};
use crate::shared::{FaceShared, TickCommand};

/// Face engine state
pub struct FaceEngine<'a, M: RawMutex, C: Clock> {
    shared: &'a FaceShared<M>,
    clock: FaceClock<C>,
    config: FaceConfig,
    modes: ModeController,
    round: bool,
    tap_count: u32,
    style: FaceStyle,
}

impl<'a, M: RawMutex, C: Clock> FaceEngine<'a, M, C> {
    /// Create an engine in the initial (interactive, hidden) mode
    pub fn new(shared: &'a FaceShared<M>, clock: C, config: FaceConfig) -> Self {
        let style = FaceStyle::resolve(&config, StyleInputs::default());
        Self {
            shared,
            clock: FaceClock::new(clock),
            config,
            modes: ModeController::new(),
            round: false,
            tap_count: 0,
            style,
        }
    }

    pub fn shared(&self) -> &'a FaceShared<M> {
        self.shared
    }

    pub fn mode(&self) -> DisplayMode {
        self.modes.mode()
    }

    /// Style the next frame is drawn with
    pub fn style(&self) -> &FaceStyle {
        &self.style
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    pub fn clock(&self) -> &FaceClock<C> {
        &self.clock
    }

    /// Process one platform event
    ///
    /// Events after teardown are ignored.
    pub fn handle_event(&mut self, event: FaceEvent) {
        if !self.shared.is_alive() {
            trace!("Event after teardown ignored: {:?}", event);
            return;
        }

        match event {
            FaceEvent::VisibilityChanged(visible) => {
                let t = self.modes.set_visible(visible);
                if t.resync_clock && self.clock.resync() {
                    debug!("UTC offset now {}s", self.clock.offset_s());
                }
                self.after_transition(t);
            }
            FaceEvent::AmbientChanged(ambient) => {
                let t = self.modes.set_ambient(ambient);
                self.after_transition(t);
            }
            FaceEvent::PropertiesChanged { low_bit_ambient } => {
                self.modes.set_low_bit_ambient(low_bit_ambient);
                self.restyle();
            }
            FaceEvent::InsetsChanged { round } => {
                if round != self.round {
                    self.round = round;
                    self.restyle();
                    self.shared.request_redraw();
                }
            }
            FaceEvent::TimeTick => {
                self.shared.request_redraw();
            }
            FaceEvent::TimeZoneChanged => {
                self.clock.resync();
                debug!("Time zone changed, UTC offset {}s", self.clock.offset_s());
                self.shared.request_redraw();
            }
            FaceEvent::Tap(kind) => {
                if kind == TapKind::Tap {
                    self.tap_count = self.tap_count.wrapping_add(1);
                    self.restyle();
                }
                self.shared.request_redraw();
            }
            FaceEvent::Destroy => self.destroy(),
        }
    }

    /// Draw one frame from resident data only
    pub fn render<S: DrawSurface>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        let weather = self.shared.snapshot();
        let now = self.clock.now_local();
        FaceFrame::compose(self.style, &now, &weather).draw(surface)
    }

    /// Tear down the engine and stop every task
    pub fn destroy(&mut self) {
        if self.shared.is_alive() {
            info!("Face engine destroyed");
            self.shared.shutdown();
        }
    }

    fn after_transition(&mut self, t: Transition) {
        if t.changed {
            debug!("Mode now {:?}", self.modes.mode());
        }
        self.restyle();
        self.shared.tick.signal(TickCommand::Reschedule {
            active: t.tick_active,
        });
        if t.redraw {
            self.shared.request_redraw();
        }
    }

    fn restyle(&mut self) {
        self.style = FaceStyle::resolve(
            &self.config,
            StyleInputs {
                ambient: self.modes.mode().is_ambient(),
                low_fidelity: self.modes.low_fidelity(),
                round: self.round,
                tap_count: self.tap_count,
            },
        );
    }
}
