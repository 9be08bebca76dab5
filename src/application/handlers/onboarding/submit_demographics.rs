//! SubmitDemographicsHandler - validate demographics and move on.

use tracing::debug;

use crate::application::FlowHandle;
use crate::domain::flow::{Action, Outcome, Screen};
use crate::domain::onboarding::{Demographics, WeightUnit};

use super::{require_screen, OnboardingError};

/// Raw fields as typed into the form.
#[derive(Debug, Clone)]
pub struct SubmitDemographicsCommand {
    pub age: String,
    pub weight: String,
    pub weight_unit: String,
    pub gender: String,
}

#[derive(Debug, Clone)]
pub struct SubmitDemographicsResult {
    pub demographics: Demographics,
    pub outcome: Outcome,
}

pub struct SubmitDemographicsHandler {
    flow: FlowHandle,
}

impl SubmitDemographicsHandler {
    pub fn new(flow: FlowHandle) -> Self {
        Self { flow }
    }

    pub async fn handle(
        &self,
        cmd: SubmitDemographicsCommand,
    ) -> Result<SubmitDemographicsResult, OnboardingError> {
        require_screen(&self.flow, |s| s == Screen::Demographics).await?;

        let weight_unit: WeightUnit = if cmd.weight_unit.trim().is_empty() {
            WeightUnit::default()
        } else {
            cmd.weight_unit.parse()?
        };
        let demographics = Demographics::parse(&cmd.age, &cmd.weight, weight_unit, &cmd.gender)?;
        debug!(age = demographics.age(), weight_kg = demographics.weight_kg(), "Demographics accepted");

        let outcome = self
            .flow
            .dispatch_from(Screen::Demographics, Action::Continue)
            .await?;
        Ok(SubmitDemographicsResult {
            demographics,
            outcome,
        })
    }
}
