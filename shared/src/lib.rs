use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};

/// Response of `POST /predict`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClassificationResult {
    pub class: String,
}

/// Response of `POST /detect_defects`.
///
/// Keys of `defect_percentages` are whatever the detector reports; nothing here assumes a
/// fixed set of defect types.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DefectReport {
    #[serde(default)]
    pub defect_percentages: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_image_path: Option<String>,
}

/// Body of `POST /calculate_points`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScoringInput {
    pub material: String,
    #[serde(default)]
    pub damage_data: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum DamageGrade {
    A,
    B,
    C,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ScoreDetail {
    Graded {
        percent: f64,
        #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
        grade: Option<DamageGrade>,
        points: i64,
    },
    // e.g. "Invalid damage type"
    Note(String),
}

/// Response of `POST /calculate_points`. A rejection is still a successful HTTP exchange.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ScoreResult {
    Rejected {
        error: String,
    },
    Scored {
        #[serde(serialize_with = "whole_number")]
        total_score: f64,
        #[serde(default)]
        details: BTreeMap<String, ScoreDetail>,
    },
}

// Point totals are integral in practice and go out as `60`, not `60.0`.
fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl ScoreResult {
    pub fn error(&self) -> Option<&str> {
        match self {
            ScoreResult::Rejected { error } => Some(error),
            ScoreResult::Scored { .. } => None,
        }
    }
}
