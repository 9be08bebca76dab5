//! Vitals module - the two artifacts a session accumulates.
//!
//! - `VitalsReading` - one blood-pressure measurement, produced upstream
//! - `QuestionnaireAnswers` - tri-state responses to the four symptom prompts

mod questionnaire;
mod reading;

pub use questionnaire::{Answer, QuestionnaireAnswers, Symptom};
pub use reading::{
    VitalsReading, DIASTOLIC_MAX, DIASTOLIC_MIN, SYSTOLIC_MAX, SYSTOLIC_MIN,
};
