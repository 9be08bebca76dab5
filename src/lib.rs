//! Checked - self-health assessment flow
//!
//! This crate drives a guided journey from splash screen through account
//! onboarding, device pairing and a blood-pressure measurement to a symptom
//! questionnaire, and classifies the results into a severity tier with
//! matching guidance.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
