use gravida_calculators::calculators::fetal_growth::{self, FetalGrowthInput};
use gravida_calculators::calculators::fetal_weight::{self, hadlock_weight_grams, FetalWeightInput};
use gravida_calculators::calculators::femur_length::{self, FemurLengthInput};
use gravida_calculators::calculators::nasal_bone::{self, NasalBoneInput};
use gravida_core::error::{CoreError, ErrorKind};
use gravida_core::gestation::GestationalAge;
use gravida_core::models::biometry::GrowthClass;

fn ga(weeks: u8, days: u8) -> GestationalAge {
    GestationalAge::new(weeks, days).unwrap()
}

#[test]
fn median_weight_at_term_reads_percentile_fifty() {
    let result = fetal_growth::assess(&FetalGrowthInput {
        gestational_age: ga(38, 0),
        weight_g: 2700.0,
    })
    .unwrap();
    assert_eq!(result.percentile, 50.0);
    assert_eq!(result.band, "p3-p50");
    assert_eq!(result.classification, GrowthClass::Normal);
    assert_eq!(result.label, "Crecimiento adecuado para la edad gestacional");
    assert_eq!(result.z_score, 0.0);
    assert!(!result.out_of_range);
    assert!(!result.classification.is_below_normal());
    assert_eq!(
        result.rationale[0],
        "Percentil 50.0 (banda p3-p50) a las 38+0 semanas"
    );
}

#[test]
fn growth_restriction_is_flagged_below_the_lowest_curve() {
    let result = fetal_growth::assess(&FetalGrowthInput {
        gestational_age: ga(38, 0),
        weight_g: 1600.0,
    })
    .unwrap();
    assert_eq!(result.percentile, 3.0);
    assert_eq!(result.band, "<p3");
    assert_eq!(result.classification, GrowthClass::WellBelowNormal);
    assert!(result.classification.is_below_normal());
    assert!(result.out_of_range);
    assert!(result.z_score < -2.5);
    assert_eq!(
        result.rationale[1],
        "Medición por debajo de la curva p3 de referencia"
    );
}

#[test]
fn macrosomia_is_flagged_above_the_top_curve() {
    let result = fetal_growth::assess(&FetalGrowthInput {
        gestational_age: ga(40, 0),
        weight_g: 4200.0,
    })
    .unwrap();
    assert_eq!(result.percentile, 97.0);
    assert_eq!(result.band, ">p97");
    assert_eq!(result.classification, GrowthClass::WellAboveNormal);
    assert!(result.out_of_range);
}

#[test]
fn growth_curves_start_at_fourteen_weeks() {
    let err = fetal_growth::assess(&FetalGrowthInput {
        gestational_age: ga(12, 0),
        weight_g: 60.0,
    })
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::OutOfRange {
            field: "gestational_age",
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn hadlock_regression_matches_the_published_magnitude() {
    let weight = hadlock_weight_grams(265.0, 240.0, 53.0);
    assert!((weight - 1201.0).abs() < 1.0);
}

#[test]
fn estimated_weight_is_placed_on_the_weight_curves() {
    let result = fetal_weight::assess(&FetalWeightInput {
        gestational_age: ga(28, 0),
        head_circumference_mm: 265.0,
        abdominal_circumference_mm: 240.0,
        femur_length_mm: 53.0,
    })
    .unwrap();
    assert_eq!(result.estimated_weight_g, 1201);
    assert_eq!(result.placement.band, "p10-p50");
    assert_eq!(result.placement.classification, GrowthClass::Normal);
    assert!((result.placement.percentile - 29.5).abs() < 0.1);
    assert_eq!(
        result.placement.rationale[0],
        "Peso fetal estimado (Hadlock): 1201 g"
    );
    assert!(result.placement.rationale[1].starts_with("Percentil "));
}

#[test]
fn biometry_bounds_are_checked_before_the_regression() {
    let err = fetal_weight::assess(&FetalWeightInput {
        gestational_age: ga(28, 0),
        head_circumference_mm: 90.0,
        abdominal_circumference_mm: 240.0,
        femur_length_mm: 53.0,
    })
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::OutOfRange {
            field: "head_circumference_mm",
            ..
        }
    ));
}

#[test]
fn femur_in_the_low_normal_range() {
    let result = femur_length::assess(&FemurLengthInput {
        gestational_age: ga(26, 0),
        femur_length_mm: 25.0,
    })
    .unwrap();
    assert!((result.percentile - 8.75).abs() < 1e-9);
    assert_eq!(result.band, "p5-p10");
    assert_eq!(result.classification, GrowthClass::LowNormal);
    assert_eq!(result.label, "Longitud femoral en rango bajo de normalidad.");
    assert!(!result.out_of_range);
}

#[test]
fn short_femur_recommends_detailed_assessment() {
    let result = femur_length::assess(&FemurLengthInput {
        gestational_age: ga(26, 0),
        femur_length_mm: 23.0,
    })
    .unwrap();
    assert_eq!(result.band, "<p3");
    assert_eq!(result.classification, GrowthClass::WellBelowNormal);
    assert_eq!(
        result.label,
        "Fémur corto. Se recomienda evaluación detallada y seguimiento."
    );
    assert!(result.out_of_range);
    assert!(result.z_score < -3.0);
}

#[test]
fn long_femur_stays_on_routine_follow_up() {
    let result = femur_length::assess(&FemurLengthInput {
        gestational_age: ga(26, 0),
        femur_length_mm: 28.4,
    })
    .unwrap();
    assert_eq!(result.band, "p95-p97");
    assert_eq!(result.classification, GrowthClass::AboveNormal);
    assert_eq!(result.label, "Fémur largo. Control habitual.");
    assert!(result.percentile > 95.0 && result.percentile < 97.0);
}

#[test]
fn femur_length_bounds_are_enforced() {
    let err = femur_length::assess(&FemurLengthInput {
        gestational_age: ga(26, 0),
        femur_length_mm: 70.0,
    })
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::OutOfRange {
            field: "femur_length_mm",
            ..
        }
    ));
}

#[test]
fn nasal_bone_hypoplasia_sits_below_p5() {
    let result = nasal_bone::assess(&NasalBoneInput {
        gestational_age: ga(16, 0),
        nasal_bone_mm: 2.4,
    })
    .unwrap();
    assert_eq!(result.percentile, 5.0);
    assert_eq!(result.band, "<p5");
    assert_eq!(result.classification, GrowthClass::BelowNormal);
    assert_eq!(
        result.label,
        "Hipoplasia del hueso nasal (por debajo del percentil 5)"
    );
    assert!(result.out_of_range);
    assert!(result.classification.is_below_normal());
}

#[test]
fn nasal_bone_above_the_median_is_normal() {
    let result = nasal_bone::assess(&NasalBoneInput {
        gestational_age: ga(16, 0),
        nasal_bone_mm: 4.6,
    })
    .unwrap();
    assert!((result.percentile - 72.5).abs() < 1e-6);
    assert_eq!(result.band, "p50-p95");
    assert_eq!(result.classification, GrowthClass::Normal);
    assert!(!result.out_of_range);
}

#[test]
fn nasal_bone_window_ends_at_thirty_four_weeks() {
    let err = nasal_bone::assess(&NasalBoneInput {
        gestational_age: ga(36, 0),
        nasal_bone_mm: 9.0,
    })
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::OutOfRange {
            field: "gestational_age",
            ..
        }
    ));
}
