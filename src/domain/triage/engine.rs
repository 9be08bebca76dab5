//! Triage engine - vitals plus symptoms to a classification.

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::vitals::{QuestionnaireAnswers, VitalsReading};

use super::{BpStatus, Guidance, SeverityTier};

/// Symptom-dependent part of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityAssessment {
    pub symptom_count: usize,
    pub tier: SeverityTier,
    pub guidance: Guidance,
}

/// Result of classifying a session's artifacts.
///
/// `severity` is `None` when no questionnaire has been submitted yet; only
/// the blood-pressure band can be shown at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub bp_status: BpStatus,
    pub severity: Option<SeverityAssessment>,
}

impl Classification {
    /// Shortcut to the tier, if one was computed.
    pub fn tier(&self) -> Option<SeverityTier> {
        self.severity.map(|s| s.tier)
    }

    /// Shortcut to the guidance, if a tier was computed.
    pub fn guidance(&self) -> Option<&Guidance> {
        self.severity.as_ref().map(|s| &s.guidance)
    }
}

/// Stateless classifier.
pub struct TriageEngine;

impl TriageEngine {
    /// Classifies a reading, optionally combined with questionnaire answers.
    ///
    /// # Errors
    ///
    /// - `QuestionnaireIncomplete` if `answers` is present but not every
    ///   symptom is answered
    pub fn classify(
        reading: &VitalsReading,
        answers: Option<&QuestionnaireAnswers>,
    ) -> Result<Classification, DomainError> {
        let bp_status = BpStatus::from_reading(reading);

        let severity = match answers {
            None => None,
            Some(answers) if !answers.is_complete() => {
                let missing: Vec<_> = answers.unanswered().iter().map(|s| s.key()).collect();
                return Err(DomainError::new(
                    ErrorCode::QuestionnaireIncomplete,
                    "Cannot assess severity from an incomplete questionnaire",
                )
                .with_detail("unanswered", missing.join(",")));
            }
            Some(answers) => {
                let symptom_count = answers.symptom_count();
                let tier = SeverityTier::assess(bp_status, symptom_count);
                Some(SeverityAssessment {
                    symptom_count,
                    tier,
                    guidance: Guidance::for_tier(tier),
                })
            }
        };

        Ok(Classification {
            bp_status,
            severity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vitals::{Answer, Symptom, SYSTOLIC_MAX, SYSTOLIC_MIN};
    use proptest::prelude::*;

    fn reading(systolic: u16, diastolic: u16) -> VitalsReading {
        VitalsReading::new(systolic, diastolic).unwrap()
    }

    fn all_no() -> QuestionnaireAnswers {
        QuestionnaireAnswers::uniform(Answer::No)
    }

    #[test]
    fn normal_reading_without_symptoms_is_normal() {
        let result = TriageEngine::classify(&reading(118, 76), Some(&all_no())).unwrap();

        assert_eq!(result.bp_status, BpStatus::Normal);
        assert_eq!(result.tier(), Some(SeverityTier::Normal));
        assert_eq!(result.guidance().unwrap().title, "Health Guidance");
    }

    #[test]
    fn high_reading_with_two_symptoms_is_emergency() {
        let answers = all_no()
            .with(Symptom::Dizzy, true)
            .with(Symptom::Headaches, true);

        let result = TriageEngine::classify(&reading(150, 95), Some(&answers)).unwrap();

        assert_eq!(result.bp_status, BpStatus::High);
        let severity = result.severity.unwrap();
        assert_eq!(severity.symptom_count, 2);
        assert_eq!(severity.tier, SeverityTier::Emergency);
    }

    #[test]
    fn single_symptom_is_urgent_with_normal_reading() {
        let answers = all_no().with(Symptom::Dizzy, true);

        let result = TriageEngine::classify(&reading(118, 76), Some(&answers)).unwrap();

        assert_eq!(result.bp_status, BpStatus::Normal);
        assert_eq!(result.severity.unwrap().symptom_count, 1);
        assert_eq!(result.tier(), Some(SeverityTier::Urgent));
    }

    #[test]
    fn low_reading_without_symptoms_is_not_emergency() {
        let result = TriageEngine::classify(&reading(85, 55), Some(&all_no())).unwrap();

        assert_eq!(result.bp_status, BpStatus::Low);
        assert_eq!(result.tier(), Some(SeverityTier::Normal));
    }

    #[test]
    fn missing_answers_degrade_to_vitals_only() {
        let result = TriageEngine::classify(&reading(150, 95), None).unwrap();

        assert_eq!(result.bp_status, BpStatus::High);
        assert!(result.severity.is_none());
        assert!(result.guidance().is_none());
    }

    #[test]
    fn incomplete_answers_are_rejected() {
        let answers = QuestionnaireAnswers::new().with(Symptom::Dizzy, true);

        let err = TriageEngine::classify(&reading(118, 76), Some(&answers)).unwrap_err();

        assert_eq!(err.code, ErrorCode::QuestionnaireIncomplete);
        assert_eq!(
            err.details.get("unanswered"),
            Some(&"headaches,nausea,visionChanges".to_string())
        );
    }

    fn any_reading() -> impl Strategy<Value = VitalsReading> {
        (SYSTOLIC_MIN..=SYSTOLIC_MAX, 20u16..=200)
            .prop_filter_map("diastolic must be below systolic", |(s, d)| {
                VitalsReading::new(s, d).ok()
            })
    }

    fn any_complete_answers() -> impl Strategy<Value = QuestionnaireAnswers> {
        proptest::array::uniform4(any::<bool>()).prop_map(|flags| {
            Symptom::all()
                .iter()
                .zip(flags)
                .fold(QuestionnaireAnswers::new(), |acc, (symptom, yes)| {
                    acc.with(*symptom, yes)
                })
        })
    }

    proptest! {
        #[test]
        fn classify_is_pure(reading in any_reading(), answers in any_complete_answers()) {
            let first = TriageEngine::classify(&reading, Some(&answers)).unwrap();
            let second = TriageEngine::classify(&reading, Some(&answers)).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn emergency_requires_out_of_range_band(
            reading in any_reading(),
            answers in any_complete_answers(),
        ) {
            let result = TriageEngine::classify(&reading, Some(&answers)).unwrap();
            if result.tier() == Some(SeverityTier::Emergency) {
                prop_assert!(result.bp_status.is_out_of_range());
                prop_assert!(answers.symptom_count() >= 2);
            }
        }

        #[test]
        fn adding_a_symptom_never_lowers_the_tier(
            reading in any_reading(),
            answers in any_complete_answers(),
        ) {
            let before = TriageEngine::classify(&reading, Some(&answers)).unwrap();
            if let Some(symptom) = Symptom::all()
                .iter()
                .copied()
                .find(|s| answers.get(*s) == Answer::No)
            {
                let worse = answers.with(symptom, true);
                let after = TriageEngine::classify(&reading, Some(&worse)).unwrap();
                prop_assert!(after.tier() >= before.tier());
            }
        }

        #[test]
        fn band_does_not_depend_on_answers(
            reading in any_reading(),
            answers in any_complete_answers(),
        ) {
            let with = TriageEngine::classify(&reading, Some(&answers)).unwrap();
            let without = TriageEngine::classify(&reading, None).unwrap();
            prop_assert_eq!(with.bp_status, without.bp_status);
        }
    }
}
