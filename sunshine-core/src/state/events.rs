//! Events that drive the watch face
//!
//! Events come from the platform: lifecycle callbacks, mode changes,
//! system broadcasts, and touch input.

/// Kind of tap reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapKind {
    /// Finger went down
    Touch,
    /// Touch was cancelled before completing
    TouchCancel,
    /// Completed tap
    Tap,
}

/// Events processed by the face engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceEvent {
    /// Face shown (`true`) or hidden (`false`)
    VisibilityChanged(bool),
    /// Entered (`true`) or left (`false`) ambient mode
    AmbientChanged(bool),
    /// Device display properties reported
    PropertiesChanged { low_bit_ambient: bool },
    /// Window insets reported; selects round or square layout
    InsetsChanged { round: bool },
    /// Once-per-minute tick delivered while ambient
    TimeTick,
    /// System time zone changed
    TimeZoneChanged,
    /// Touch input
    Tap(TapKind),
    /// Engine is being torn down
    Destroy,
}
