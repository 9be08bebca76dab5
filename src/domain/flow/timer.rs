//! Screen-scoped timers.
//!
//! A timer belongs to one *entry* into a screen. Leaving the screen, or
//! re-entering it, invalidates any ticket issued for the earlier entry.

use std::time::Duration;

use crate::domain::foundation::EntryId;

use super::{Action, Screen};

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Splash screen finished.
    Splash,
    /// Simulated device pairing finished.
    DeviceConnect,
    /// A reading is due; the runtime fetches one before dispatching.
    Measurement,
    /// Paired device screen moves on by itself.
    AutoAdvance,
}

impl TimerKind {
    /// Timer armed on entry to `screen`, if any.
    pub fn for_screen(screen: Screen) -> Option<TimerKind> {
        match screen {
            Screen::Loading => Some(TimerKind::Splash),
            Screen::ConnectingDevice => Some(TimerKind::DeviceConnect),
            Screen::ConnectedDevice => Some(TimerKind::AutoAdvance),
            Screen::MeasuringVitals => Some(TimerKind::Measurement),
            _ => None,
        }
    }

    /// Action dispatched when the timer fires.
    ///
    /// `Measurement` returns `None`: its action carries a reading the
    /// runtime has to obtain first.
    pub fn action(&self) -> Option<Action> {
        match self {
            TimerKind::Splash | TimerKind::DeviceConnect => Some(Action::TimerExpired),
            TimerKind::AutoAdvance => Some(Action::Continue),
            TimerKind::Measurement => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimerKind::Splash => "splash",
            TimerKind::DeviceConnect => "device_connect",
            TimerKind::Measurement => "measurement",
            TimerKind::AutoAdvance => "auto_advance",
        }
    }
}

/// Delays for each timer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    pub splash: Duration,
    pub device_connect: Duration,
    pub measurement: Duration,
    /// `None` disables the auto-advance.
    pub auto_advance: Option<Duration>,
}

impl TimerSettings {
    /// Delay for `kind`, or `None` if that timer is disabled.
    pub fn delay(&self, kind: TimerKind) -> Option<Duration> {
        match kind {
            TimerKind::Splash => Some(self.splash),
            TimerKind::DeviceConnect => Some(self.device_connect),
            TimerKind::Measurement => Some(self.measurement),
            TimerKind::AutoAdvance => self.auto_advance,
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            splash: Duration::from_millis(3000),
            device_connect: Duration::from_millis(5000),
            measurement: Duration::from_millis(8000),
            auto_advance: Some(Duration::from_millis(2000)),
        }
    }
}

/// Proof that a timer was armed for a particular screen entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket {
    pub entry: EntryId,
    pub screen: Screen,
    pub kind: TimerKind,
    pub delay: Duration,
}
