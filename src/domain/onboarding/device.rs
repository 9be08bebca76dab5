//! Pairable monitoring devices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an advertised device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A device the user can pair with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub status: String,
}

impl Device {
    /// Devices advertised on the connection screen.
    pub fn catalog() -> Vec<Device> {
        vec![
            Device {
                id: DeviceId::new("health-monitor-pro"),
                name: "Health Monitor Pro".to_string(),
                status: "Battery: 85% • Ready to connect".to_string(),
            },
            Device {
                id: DeviceId::new("fitness-tracker-x2"),
                name: "Fitness Tracker X2".to_string(),
                status: "Battery: 62% • Ready to connect".to_string(),
            },
        ]
    }

    /// Looks up a catalog device by id.
    pub fn find(id: &str) -> Option<Device> {
        Self::catalog().into_iter().find(|d| d.id.as_str() == id)
    }

    /// True if this device is one the catalog advertises.
    pub fn is_advertised(&self) -> bool {
        Self::catalog().iter().any(|d| d.id == self.id)
    }
}
