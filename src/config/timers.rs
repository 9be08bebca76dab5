//! Screen timer configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::flow::TimerSettings;

use super::error::ValidationError;

/// Longest delay any screen timer may be configured with.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Delays for the timed screens, in milliseconds.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TimerConfig {
    /// Splash screen duration
    #[serde(default = "default_splash_ms")]
    pub splash_ms: u64,

    /// Simulated device pairing duration
    #[serde(default = "default_device_connect_ms")]
    pub device_connect_ms: u64,

    /// Measurement window before a reading is taken
    #[serde(default = "default_measurement_ms")]
    pub measurement_ms: u64,

    /// Paired-device screen auto-advance; `0` disables it
    #[serde(default = "default_auto_advance_ms")]
    pub auto_advance_ms: u64,
}

impl TimerConfig {
    /// Converts to the controller's timer settings.
    pub fn settings(&self) -> TimerSettings {
        TimerSettings {
            splash: Duration::from_millis(self.splash_ms),
            device_connect: Duration::from_millis(self.device_connect_ms),
            measurement: Duration::from_millis(self.measurement_ms),
            auto_advance: (self.auto_advance_ms > 0)
                .then(|| Duration::from_millis(self.auto_advance_ms)),
        }
    }

    /// Validate timer configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("splash_ms", self.splash_ms),
            ("device_connect_ms", self.device_connect_ms),
            ("measurement_ms", self.measurement_ms),
        ];
        for (name, millis) in required {
            if millis == 0 {
                return Err(ValidationError::ZeroDelay(name));
            }
        }

        for (name, millis) in required.into_iter().chain([("auto_advance_ms", self.auto_advance_ms)]) {
            if millis > MAX_DELAY_MS {
                return Err(ValidationError::DelayTooLong {
                    name,
                    millis,
                    max: MAX_DELAY_MS,
                });
            }
        }
        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            splash_ms: default_splash_ms(),
            device_connect_ms: default_device_connect_ms(),
            measurement_ms: default_measurement_ms(),
            auto_advance_ms: default_auto_advance_ms(),
        }
    }
}

fn default_splash_ms() -> u64 {
    3000
}

fn default_device_connect_ms() -> u64 {
    5000
}

fn default_measurement_ms() -> u64 {
    8000
}

fn default_auto_advance_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_defaults_match_settings_defaults() {
        assert_eq!(TimerConfig::default().settings(), TimerSettings::default());
    }

    #[test]
    fn test_zero_auto_advance_disables_it() {
        let config = TimerConfig {
            auto_advance_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.settings().auto_advance, None);
    }

    #[test]
    fn test_validation_zero_delay() {
        let config = TimerConfig {
            measurement_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::ZeroDelay("measurement_ms")));
    }

    #[test]
    fn test_validation_delay_too_long() {
        let config = TimerConfig {
            auto_advance_ms: 90_000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::DelayTooLong { name: "auto_advance_ms", .. })
        ));
    }
}
