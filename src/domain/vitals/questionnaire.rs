//! Symptom questionnaire answers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four symptoms the questionnaire asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Symptom {
    Dizzy,
    Headaches,
    Nausea,
    VisionChanges,
}

impl Symptom {
    /// Returns all symptoms in the order they are asked.
    pub fn all() -> &'static [Symptom] {
        &[
            Symptom::Dizzy,
            Symptom::Headaches,
            Symptom::Nausea,
            Symptom::VisionChanges,
        ]
    }

    /// Stable key used in payloads and console input.
    pub fn key(&self) -> &'static str {
        match self {
            Symptom::Dizzy => "dizzy",
            Symptom::Headaches => "headaches",
            Symptom::Nausea => "nausea",
            Symptom::VisionChanges => "visionChanges",
        }
    }

    /// Looks a symptom up by its key.
    pub fn from_key(key: &str) -> Option<Symptom> {
        Self::all().iter().copied().find(|s| s.key() == key)
    }

    /// The question shown to the user.
    pub fn prompt(&self) -> &'static str {
        match self {
            Symptom::Dizzy => "Did you feel dizzy today?",
            Symptom::Headaches => "Have you experienced headaches?",
            Symptom::Nausea => "Are you experiencing any nausea?",
            Symptom::VisionChanges => "Have you noticed any vision changes?",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Tri-state response to one symptom prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    #[default]
    Unanswered,
    Yes,
    No,
}

impl Answer {
    /// Returns true once the user picked yes or no.
    pub fn is_answered(&self) -> bool {
        !matches!(self, Answer::Unanswered)
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

/// Responses to the four symptom prompts.
///
/// Starts fully unanswered. Submission is only accepted once
/// `is_complete()` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireAnswers {
    #[serde(default)]
    dizzy: Answer,
    #[serde(default)]
    headaches: Answer,
    #[serde(default)]
    nausea: Answer,
    #[serde(default)]
    vision_changes: Answer,
}

impl QuestionnaireAnswers {
    /// Creates an empty, fully unanswered questionnaire.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a questionnaire with every symptom answered the same way.
    pub fn uniform(answer: Answer) -> Self {
        Self {
            dizzy: answer,
            headaches: answer,
            nausea: answer,
            vision_changes: answer,
        }
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, symptom: Symptom, answer: impl Into<Answer>) -> Self {
        self.set(symptom, answer);
        self
    }

    /// Records the answer for one symptom, replacing any previous one.
    pub fn set(&mut self, symptom: Symptom, answer: impl Into<Answer>) {
        *self.slot_mut(symptom) = answer.into();
    }

    /// Returns the answer recorded for a symptom.
    pub fn get(&self, symptom: Symptom) -> Answer {
        match symptom {
            Symptom::Dizzy => self.dizzy,
            Symptom::Headaches => self.headaches,
            Symptom::Nausea => self.nausea,
            Symptom::VisionChanges => self.vision_changes,
        }
    }

    /// True when every symptom is answered yes or no.
    pub fn is_complete(&self) -> bool {
        Symptom::all().iter().all(|s| self.get(*s).is_answered())
    }

    /// Symptoms still awaiting an answer, in prompt order.
    pub fn unanswered(&self) -> Vec<Symptom> {
        Symptom::all()
            .iter()
            .copied()
            .filter(|s| !self.get(*s).is_answered())
            .collect()
    }

    /// Number of symptoms answered `yes`.
    pub fn symptom_count(&self) -> usize {
        Symptom::all()
            .iter()
            .filter(|s| self.get(**s) == Answer::Yes)
            .count()
    }

    fn slot_mut(&mut self, symptom: Symptom) -> &mut Answer {
        match symptom {
            Symptom::Dizzy => &mut self.dizzy,
            Symptom::Headaches => &mut self.headaches,
            Symptom::Nausea => &mut self.nausea,
            Symptom::VisionChanges => &mut self.vision_changes,
        }
    }
}
