use gravida_core::bands::{Band, ThresholdBands};
use gravida_core::error::{CoreError, ErrorKind};
use gravida_core::models::risk::RiskBand;

fn risk_bands() -> ThresholdBands<RiskBand> {
    ThresholdBands::new(
        vec![
            Band::upto(1.0 / 1000.0, RiskBand::Low),
            Band::upto(1.0 / 100.0, RiskBand::Intermediate),
        ],
        RiskBand::High,
    )
    .unwrap()
}

#[test]
fn risk_cut_points_are_upper_inclusive() {
    let bands = risk_bands();
    assert_eq!(bands.classify(1.0 / 1000.0).unwrap(), RiskBand::Low);
    assert_eq!(bands.classify(1.0 / 999.0).unwrap(), RiskBand::Intermediate);
    assert_eq!(bands.classify(1.0 / 100.0).unwrap(), RiskBand::Intermediate);
    assert_eq!(bands.classify(1.0 / 99.0).unwrap(), RiskBand::High);
    assert_eq!(bands.classify(1.0).unwrap(), RiskBand::High);
}

#[test]
fn exclusive_bands_push_the_boundary_value_up() {
    // Amniotic fluid style ladder: < 5 severe, < 8 mild, <= 18 normal.
    let bands = ThresholdBands::new(
        vec![
            Band::below(5.0, "oligohidramnios severo"),
            Band::below(8.0, "oligohidramnios"),
            Band::upto(18.0, "normal"),
        ],
        "polihidramnios",
    )
    .unwrap();
    assert_eq!(bands.classify(4.9).unwrap(), "oligohidramnios severo");
    assert_eq!(bands.classify(5.0).unwrap(), "oligohidramnios");
    assert_eq!(bands.classify(8.0).unwrap(), "normal");
    assert_eq!(bands.classify(18.0).unwrap(), "normal");
    assert_eq!(bands.classify(18.1).unwrap(), "polihidramnios");
}

#[test]
fn rejects_unordered_thresholds() {
    let err = ThresholdBands::new(
        vec![Band::upto(10.0, "a"), Band::upto(10.0, "b")],
        "top",
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::BandOrder(1)));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn rejects_non_finite_threshold_and_value() {
    assert!(ThresholdBands::new(vec![Band::upto(f64::NAN, "a")], "top").is_err());
    let bands = risk_bands();
    let err = bands.classify(f64::NAN).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn empty_ladder_always_returns_top() {
    let bands: ThresholdBands<&str> = ThresholdBands::new(vec![], "only").unwrap();
    assert_eq!(bands.classify(-1e9).unwrap(), "only");
    assert_eq!(bands.classify(1e9).unwrap(), "only");
}
