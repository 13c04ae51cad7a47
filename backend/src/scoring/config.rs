use serde::{Deserialize, Serialize};
use shared::DamageGrade;
use std::collections::HashMap;

use super::ScoringError;

const BUILTIN_TABLE: &str = include_str!("../../../config/points.yaml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsTable {
    pub version: f32,
    pub materials: HashMap<String, HashMap<String, GradePoints>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GradePoints {
    #[serde(rename = "A")]
    pub a: i64,
    #[serde(rename = "B")]
    pub b: i64,
    #[serde(rename = "C")]
    pub c: i64,
}

impl GradePoints {
    pub fn for_grade(&self, grade: DamageGrade) -> i64 {
        match grade {
            DamageGrade::A => self.a,
            DamageGrade::B => self.b,
            DamageGrade::C => self.c,
        }
    }
}

impl PointsTable {
    pub fn builtin() -> Result<Self, ScoringError> {
        Self::parse(BUILTIN_TABLE)
    }

    pub fn load(path: &str) -> Result<Self, ScoringError> {
        let table_str = std::fs::read_to_string(path)?;
        Self::parse(&table_str)
    }

    pub fn parse(table_str: &str) -> Result<Self, ScoringError> {
        let mut table: PointsTable = serde_yaml::from_str(table_str)?;

        // lookups are done on lower-cased names
        table.materials = table
            .materials
            .into_iter()
            .map(|(material, damages)| {
                let damages = damages.into_iter().map(|(damage, points)| (damage.to_lowercase(), points)).collect();
                (material.to_lowercase(), damages)
            })
            .collect();

        Ok(table)
    }

    pub fn damages_for(&self, material: &str) -> Option<&HashMap<String, GradePoints>> {
        self.materials.get(material)
    }
}
