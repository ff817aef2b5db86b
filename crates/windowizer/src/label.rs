//! Window label reduction

use label_assigner::{Material, PointLabel, WearLabel};
use serde::{Deserialize, Serialize};

/// Single (material, wear) label for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowLabel {
    pub material: Material,
    pub wear: WearLabel,
}

impl WindowLabel {
    /// Reduce point labels field by field.
    ///
    /// A field keeps its value only when every point in the window agrees on
    /// it. Any disagreement, including a concrete value next to NonClassified,
    /// makes that field NonClassified. An empty slice is NonClassified.
    pub fn reduce(points: &[PointLabel]) -> Self {
        let Some(first) = points.first() else {
            return Self::non_classified();
        };

        let material = if points.iter().all(|p| p.material == first.material) {
            first.material
        } else {
            Material::NonClassified
        };
        let wear = if points.iter().all(|p| p.wear == first.wear) {
            first.wear
        } else {
            WearLabel::NonClassified
        };

        Self { material, wear }
    }

    pub fn non_classified() -> Self {
        Self {
            material: Material::NonClassified,
            wear: WearLabel::NonClassified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig_data::{Penetration, SensorType, TrialMetadata, WearLevel};

    fn trial(wear: WearLevel) -> TrialMetadata {
        TrialMetadata {
            sensor: SensorType::StrainGauge,
            wear,
            penetration: Penetration::Deep,
            line: 6,
        }
    }

    #[test]
    fn test_unanimous_window_keeps_label() {
        let points = vec![PointLabel::with_material(trial(WearLevel::New), Material::Concrete); 4];
        let label = WindowLabel::reduce(&points);
        assert_eq!(label.material, Material::Concrete);
        assert_eq!(label.wear, WearLabel::New);
    }

    #[test]
    fn test_fields_reduce_independently() {
        // Concrete into the transition zone: material disagrees, wear agrees
        let t = trial(WearLevel::New);
        let points = vec![
            PointLabel::with_material(t, Material::Concrete),
            PointLabel::with_material(t, Material::Concrete),
            PointLabel::wear_only(t),
        ];
        let label = WindowLabel::reduce(&points);
        assert_eq!(label.material, Material::NonClassified);
        assert_eq!(label.wear, WearLabel::New);
    }

    #[test]
    fn test_mixed_with_non_classified() {
        let t = trial(WearLevel::Worn);
        let points = vec![PointLabel::non_classified(t), PointLabel::wear_only(t)];
        assert_eq!(WindowLabel::reduce(&points), WindowLabel::non_classified());
    }

    #[test]
    fn test_empty_is_non_classified() {
        assert_eq!(WindowLabel::reduce(&[]), WindowLabel::non_classified());
    }
}
