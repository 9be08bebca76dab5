//! Guidance messages shown on the results screen.

use serde::Serialize;

use super::SeverityTier;

/// Suffix carried by every guidance message.
pub const MEDICAL_DISCLAIMER: &str = "This assessment is not a medical diagnosis. \
Always consult a qualified healthcare professional about your health.";

/// Message selected for a severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub title: &'static str,
    pub body: &'static str,
    pub display_class: &'static str,
    pub disclaimer: &'static str,
}

const NORMAL: Guidance = Guidance {
    title: "Health Guidance",
    body: "Your results do not suggest a need for medical attention right now. \
Keep up regular monitoring and the healthy habits that support your heart.",
    display_class: "guidance-normal",
    disclaimer: MEDICAL_DISCLAIMER,
};

const URGENT: Guidance = Guidance {
    title: "Medical Consultation Recommended",
    body: "You reported symptoms that deserve a closer look. \
Please arrange a consultation with a healthcare provider soon.",
    display_class: "guidance-urgent",
    disclaimer: MEDICAL_DISCLAIMER,
};

const EMERGENCY: Guidance = Guidance {
    title: "Immediate Attention Required",
    body: "Your blood pressure together with the symptoms you reported may indicate \
a serious condition. Seek emergency care now or call your local emergency number.",
    display_class: "guidance-emergency",
    disclaimer: MEDICAL_DISCLAIMER,
};

impl Guidance {
    /// Returns the fixed message for a tier.
    pub fn for_tier(tier: SeverityTier) -> Guidance {
        match tier {
            SeverityTier::Normal => NORMAL,
            SeverityTier::Urgent => URGENT,
            SeverityTier::Emergency => EMERGENCY,
        }
    }

    /// Body followed by the disclaimer.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.body, self.disclaimer)
    }
}
