use gravida_calculators::percentile::{PercentileCurveSet, PercentileEngine};
use gravida_core::bands::{Band, ThresholdBands};
use gravida_core::error::{CoreError, ErrorKind};
use gravida_core::gestation::GestationalAge;
use gravida_core::models::biometry::GrowthClass;
use gravida_core::table::ReferenceTable;

fn ga(weeks: u8, days: u8) -> GestationalAge {
    GestationalAge::new(weeks, days).unwrap()
}

// Synthetic curves over weeks 16..24: p3 from 160 to 240, p50 from 240 to
// 360, p97 from 320 to 480. At 20+0 they read 200 / 300 / 400.
fn curves() -> PercentileCurveSet {
    PercentileCurveSet::new(vec![
        (3.0, ReferenceTable::new(&[(16.0, 160.0), (24.0, 240.0)]).unwrap()),
        (50.0, ReferenceTable::new(&[(16.0, 240.0), (24.0, 360.0)]).unwrap()),
        (97.0, ReferenceTable::new(&[(16.0, 320.0), (24.0, 480.0)]).unwrap()),
    ])
    .unwrap()
}

fn classes() -> ThresholdBands<(GrowthClass, &'static str)> {
    ThresholdBands::new(
        vec![
            Band::upto(3.0, (GrowthClass::WellBelowNormal, "muy bajo")),
            Band::below(97.0, (GrowthClass::Normal, "adecuado")),
        ],
        (GrowthClass::WellAboveNormal, "muy alto"),
    )
    .unwrap()
}

fn engine() -> PercentileEngine {
    PercentileEngine::new(curves(), (16.0, 24.0), classes()).unwrap()
}

#[test]
fn median_measurement_reads_percentile_fifty() {
    let result = engine().classify(300.0, ga(20, 0)).unwrap();
    assert_eq!(result.percentile, 50.0);
    assert_eq!(result.band, "p3-p50");
    assert_eq!(result.classification, GrowthClass::Normal);
    assert_eq!(result.label, "adecuado");
    assert_eq!(result.z_score, 0.0);
    assert!(!result.out_of_range);
    assert_eq!(
        result.rationale[0],
        "Percentil 50.0 (banda p3-p50) a las 20+0 semanas"
    );
    assert_eq!(result.rationale.last().unwrap(), "Puntuación z estimada: 0.00");
}

#[test]
fn measurement_between_curves_interpolates_the_rank() {
    let result = engine().classify(350.0, ga(20, 0)).unwrap();
    assert_eq!(result.percentile, 73.5);
    assert_eq!(result.band, "p50-p97");
    assert_eq!(result.classification, GrowthClass::Normal);
    // sd estimated from the p3..p97 spread: 200 / 3.76.
    assert!((result.z_score - 0.94).abs() < 1e-9);
}

#[test]
fn measurement_on_the_lowest_curve_is_in_range() {
    let result = engine().classify(200.0, ga(20, 0)).unwrap();
    assert_eq!(result.percentile, 3.0);
    assert_eq!(result.band, "p3-p50");
    assert_eq!(result.classification, GrowthClass::WellBelowNormal);
    assert!(!result.out_of_range);
}

#[test]
fn below_the_lowest_curve_clamps_and_flags() {
    let result = engine().classify(150.0, ga(20, 0)).unwrap();
    assert_eq!(result.percentile, 3.0);
    assert_eq!(result.band, "<p3");
    assert_eq!(result.classification, GrowthClass::WellBelowNormal);
    assert!(result.out_of_range);
    assert_eq!(
        result.rationale[1],
        "Medición por debajo de la curva p3 de referencia"
    );
    assert!(result.z_score < -2.0);
}

#[test]
fn above_the_highest_curve_clamps_and_flags() {
    let result = engine().classify(450.0, ga(20, 0)).unwrap();
    assert_eq!(result.percentile, 97.0);
    assert_eq!(result.band, ">p97");
    assert_eq!(result.classification, GrowthClass::WellAboveNormal);
    assert!(result.out_of_range);
    assert_eq!(
        result.rationale[1],
        "Medición por encima de la curva p97 de referencia"
    );
}

#[test]
fn age_outside_the_window_is_rejected_never_clamped() {
    let err = engine().classify(300.0, ga(25, 0)).unwrap_err();
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
fn malformed_age_is_rejected_before_lookup() {
    let bad = GestationalAge { weeks: 20, days: 7 };
    let err = engine().classify(300.0, bad).unwrap_err();
    assert!(matches!(err, CoreError::OutOfRange { field: "days", .. }));
}

#[test]
fn non_finite_measurement_is_rejected() {
    let err = engine().classify(f64::NAN, ga(20, 0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn curve_set_requires_a_median() {
    let err = PercentileCurveSet::new(vec![
        (3.0, ReferenceTable::new(&[(16.0, 160.0), (24.0, 240.0)]).unwrap()),
        (97.0, ReferenceTable::new(&[(16.0, 320.0), (24.0, 480.0)]).unwrap()),
    ])
    .unwrap_err();
    assert!(matches!(err, CoreError::CurveSet(_)));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn curve_set_requires_increasing_ranks_inside_the_open_interval() {
    let table = || ReferenceTable::new(&[(16.0, 160.0), (24.0, 240.0)]).unwrap();
    assert!(PercentileCurveSet::new(vec![(50.0, table())]).is_err());
    assert!(PercentileCurveSet::new(vec![(50.0, table()), (50.0, table())]).is_err());
    assert!(PercentileCurveSet::new(vec![(50.0, table()), (3.0, table())]).is_err());
    assert!(PercentileCurveSet::new(vec![(50.0, table()), (100.0, table())]).is_err());
}

#[test]
fn curve_set_rejects_outermost_ranks_without_a_known_quantile() {
    let err = PercentileCurveSet::new(vec![
        (7.0, ReferenceTable::new(&[(16.0, 160.0), (24.0, 240.0)]).unwrap()),
        (50.0, ReferenceTable::new(&[(16.0, 240.0), (24.0, 360.0)]).unwrap()),
        (97.0, ReferenceTable::new(&[(16.0, 320.0), (24.0, 480.0)]).unwrap()),
    ])
    .unwrap_err();
    assert!(matches!(err, CoreError::CurveSet(_)));
}

#[test]
fn crossing_curves_are_rejected_at_construction() {
    let err = PercentileCurveSet::new(vec![
        (3.0, ReferenceTable::new(&[(16.0, 160.0), (24.0, 400.0)]).unwrap()),
        (50.0, ReferenceTable::new(&[(16.0, 240.0), (24.0, 360.0)]).unwrap()),
        (97.0, ReferenceTable::new(&[(16.0, 320.0), (24.0, 480.0)]).unwrap()),
    ])
    .unwrap_err();
    assert!(matches!(err, CoreError::CurveSet(_)));
}

#[test]
fn coincident_curves_cannot_estimate_a_spread() {
    let flat = || ReferenceTable::new(&[(16.0, 100.0), (24.0, 100.0)]).unwrap();
    let set = PercentileCurveSet::new(vec![(3.0, flat()), (50.0, flat()), (97.0, flat())]).unwrap();
    let engine = PercentileEngine::new(set, (16.0, 24.0), classes()).unwrap();
    let err = engine.classify(100.0, ga(20, 0)).unwrap_err();
    assert!(matches!(err, CoreError::CurveSet(_)));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn engine_rejects_an_inverted_window() {
    let err = PercentileEngine::new(curves(), (24.0, 16.0), classes()).unwrap_err();
    assert!(matches!(err, CoreError::CurveSet(_)));
}
