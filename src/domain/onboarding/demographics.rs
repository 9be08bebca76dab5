//! Demographics collected after account creation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

const KG_PER_LB: f64 = 0.453_592_37;

/// Unit the weight was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl FromStr for WeightUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "lb" | "lbs" => Ok(WeightUnit::Lbs),
            other => Err(ValidationError::invalid_format(
                "weight_unit",
                format!("unknown unit '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "" => Err(ValidationError::empty_field("gender")),
            other => Err(ValidationError::invalid_format(
                "gender",
                format!("unknown option '{}'", other),
            )),
        }
    }
}

/// Validated demographics form.
///
/// # Invariants
///
/// - `age` is positive
/// - `weight` is positive and finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Demographics {
    age: u16,
    weight: f64,
    weight_unit: WeightUnit,
    gender: Gender,
}

impl Demographics {
    pub fn new(
        age: u16,
        weight: f64,
        weight_unit: WeightUnit,
        gender: Gender,
    ) -> Result<Self, ValidationError> {
        if age == 0 {
            return Err(ValidationError::invalid_format("age", "Please enter a valid age"));
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ValidationError::invalid_format(
                "weight",
                "Please enter a valid weight",
            ));
        }
        Ok(Self {
            age,
            weight,
            weight_unit,
            gender,
        })
    }

    /// Parses the raw text fields as typed into the form.
    pub fn parse(
        age: &str,
        weight: &str,
        weight_unit: WeightUnit,
        gender: &str,
    ) -> Result<Self, ValidationError> {
        let age = age.trim();
        if age.is_empty() {
            return Err(ValidationError::empty_field("age"));
        }
        let age: u16 = age
            .parse()
            .map_err(|_| ValidationError::invalid_format("age", "Please enter a valid age"))?;

        let weight = weight.trim();
        if weight.is_empty() {
            return Err(ValidationError::empty_field("weight"));
        }
        let weight: f64 = weight
            .parse()
            .map_err(|_| ValidationError::invalid_format("weight", "Please enter a valid weight"))?;

        let gender: Gender = gender.parse()?;
        Self::new(age, weight, weight_unit, gender)
    }

    pub fn age(&self) -> u16 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn weight_unit(&self) -> WeightUnit {
        self.weight_unit
    }

    /// Weight normalised to kilograms.
    pub fn weight_kg(&self) -> f64 {
        match self.weight_unit {
            WeightUnit::Kg => self.weight,
            WeightUnit::Lbs => self.weight * KG_PER_LB,
        }
    }
}
