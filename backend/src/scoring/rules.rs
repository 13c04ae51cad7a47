use shared::{DamageGrade, ScoreDetail, ScoreResult, ScoringInput};
use std::collections::BTreeMap;

use super::config::PointsTable;

pub const INVALID_MATERIAL: &str = "Invalid material";
pub const INVALID_DAMAGE_TYPE: &str = "Invalid damage type";

pub fn damage_grade(damage_percent: f64) -> DamageGrade {
    if damage_percent <= 30.0 {
        DamageGrade::A
    } else if damage_percent < 50.0 {
        DamageGrade::B
    } else {
        DamageGrade::C
    }
}

/// Unknown materials are rejected as a whole; unknown damage types only get a note.
pub fn calculate_total_points(table: &PointsTable, input: &ScoringInput) -> ScoreResult {
    let material = input.material.to_lowercase();
    let Some(damages) = table.damages_for(&material) else {
        return ScoreResult::Rejected {
            error: INVALID_MATERIAL.to_string(),
        };
    };

    let mut total_score = 0;
    let mut details = BTreeMap::new();

    for (damage_type, &percent) in &input.damage_data {
        let damage_type = damage_type.to_lowercase();
        let Some(points) = damages.get(&damage_type) else {
            details.insert(damage_type, ScoreDetail::Note(INVALID_DAMAGE_TYPE.to_string()));
            continue;
        };

        let grade = damage_grade(percent);
        let score = points.for_grade(grade);
        total_score += score;
        details.insert(
            damage_type,
            ScoreDetail::Graded {
                percent,
                grade: Some(grade),
                points: score,
            },
        );
    }

    ScoreResult::Scored {
        total_score: total_score as f64,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(material: &str, damage: &[(&str, f64)]) -> ScoringInput {
        ScoringInput {
            material: material.to_string(),
            damage_data: damage.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(damage_grade(0.0), DamageGrade::A);
        assert_eq!(damage_grade(30.0), DamageGrade::A);
        assert_eq!(damage_grade(30.01), DamageGrade::B);
        assert_eq!(damage_grade(49.99), DamageGrade::B);
        assert_eq!(damage_grade(50.0), DamageGrade::C);
        assert_eq!(damage_grade(100.0), DamageGrade::C);
    }

    #[test]
    fn sums_points_over_damage_types() {
        let table = PointsTable::builtin().unwrap();
        let result = calculate_total_points(&table, &input("wrapper", &[("torn", 12.5), ("wet", 45.0), ("shrink", 80.0)]));

        match result {
            ScoreResult::Scored { total_score, details } => {
                assert_eq!(total_score, 60.0);
                assert_eq!(
                    details["wet"],
                    ScoreDetail::Graded { percent: 45.0, grade: Some(DamageGrade::B), points: 10 }
                );
                assert_eq!(
                    details["shrink"],
                    ScoreDetail::Graded { percent: 80.0, grade: Some(DamageGrade::C), points: 0 }
                );
            }
            other => panic!("expected a score, got {:?}", other),
        }
    }

    #[test]
    fn material_and_damage_names_are_case_insensitive() {
        let table = PointsTable::builtin().unwrap();
        let result = calculate_total_points(&table, &input("Plastic", &[("Wet", 10.0)]));
        assert_eq!(
            result,
            ScoreResult::Scored {
                total_score: 30.0,
                details: BTreeMap::from([(
                    "wet".to_string(),
                    ScoreDetail::Graded { percent: 10.0, grade: Some(DamageGrade::A), points: 30 }
                )]),
            }
        );
    }

    #[test]
    fn unknown_material_is_rejected() {
        let table = PointsTable::builtin().unwrap();
        let result = calculate_total_points(&table, &input("Box", &[("torn", 1.0)]));
        assert_eq!(result.error(), Some(INVALID_MATERIAL));
    }

    #[test]
    fn unknown_damage_type_gets_a_note() {
        let table = PointsTable::builtin().unwrap();
        let result = calculate_total_points(&table, &input("paper", &[("scratch", 5.0), ("torn", 5.0)]));

        match result {
            ScoreResult::Scored { total_score, details } => {
                assert_eq!(total_score, 30.0);
                assert_eq!(details["scratch"], ScoreDetail::Note(INVALID_DAMAGE_TYPE.into()));
            }
            other => panic!("expected a score, got {:?}", other),
        }
    }

    #[test]
    fn no_damage_scores_zero() {
        let table = PointsTable::builtin().unwrap();
        let result = calculate_total_points(&table, &input("paper", &[]));
        assert_eq!(result, ScoreResult::Scored { total_score: 0.0, details: BTreeMap::new() });
    }
}
