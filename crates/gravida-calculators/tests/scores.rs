use gravida_calculators::calculators::amniotic_fluid::{self, AmnioticFluidInput};
use gravida_calculators::calculators::bishop::{self, BishopInput};
use gravida_core::error::CoreError;

fn pockets(q1: f64, q2: f64, q3: f64, q4: f64) -> AmnioticFluidInput {
    AmnioticFluidInput {
        q1_cm: q1,
        q2_cm: q2,
        q3_cm: q3,
        q4_cm: q4,
    }
}

#[test]
fn four_quadrant_sum_in_the_normal_range() {
    let result = amniotic_fluid::assess(&pockets(4.0, 4.5, 5.0, 4.5)).unwrap();
    assert_eq!(result.index_cm, 18.0);
    assert_eq!(result.category, "Normal");
    assert!(!result.abnormal);
}

#[test]
fn scant_pockets_read_as_severe_oligohydramnios() {
    let result = amniotic_fluid::assess(&pockets(1.2, 1.3, 1.0, 1.4)).unwrap();
    assert_eq!(result.index_cm, 4.9);
    assert_eq!(result.category, "Oligohidramnios severo");
    assert!(result.abnormal);
}

#[test]
fn index_of_exactly_five_is_plain_oligohydramnios() {
    let result = amniotic_fluid::assess(&pockets(1.25, 1.25, 1.25, 1.25)).unwrap();
    assert_eq!(result.index_cm, 5.0);
    assert_eq!(result.category, "Oligohidramnios");
}

#[test]
fn index_just_past_the_normal_ceiling_is_mild_polyhydramnios() {
    let result = amniotic_fluid::assess(&pockets(4.75, 4.75, 4.75, 4.75)).unwrap();
    assert_eq!(result.index_cm, 19.0);
    assert_eq!(result.category, "Polihidramnios leve");
}

#[test]
fn index_past_twenty_four_is_severe_polyhydramnios() {
    let result = amniotic_fluid::assess(&pockets(6.5, 6.5, 6.5, 6.5)).unwrap();
    assert_eq!(result.index_cm, 26.0);
    assert_eq!(result.category, "Polihidramnios severo");
    assert!(result.abnormal);
}

#[test]
fn fractional_pockets_round_to_one_decimal() {
    let result = amniotic_fluid::assess(&pockets(3.33, 2.21, 4.04, 2.22)).unwrap();
    assert_eq!(result.index_cm, 11.8);
    assert_eq!(result.category, "Normal");
}

#[test]
fn pocket_depth_beyond_the_probe_range_is_rejected() {
    let err = amniotic_fluid::assess(&pockets(26.0, 4.0, 4.0, 4.0)).unwrap_err();
    assert!(matches!(err, CoreError::OutOfRange { field: "q1_cm", .. }));
}

#[test]
fn fully_favorable_cervix_scores_thirteen() {
    let result = bishop::assess(&BishopInput {
        dilation: 3,
        effacement: 3,
        consistency: 2,
        position: 2,
        station: 3,
    })
    .unwrap();
    assert_eq!(result.score, 13);
    assert_eq!(result.favorability, "Favorable");
    assert_eq!(result.recommendation, "Condiciones favorables para inducción");
}

#[test]
fn unfavorable_cervix_suggests_ripening_first() {
    let result = bishop::assess(&BishopInput {
        dilation: 1,
        effacement: 1,
        consistency: 0,
        position: 0,
        station: 1,
    })
    .unwrap();
    assert_eq!(result.score, 3);
    assert_eq!(result.favorability, "Desfavorable");
    assert_eq!(
        result.recommendation,
        "Considerar maduración cervical antes de la inducción"
    );
}

#[test]
fn favorability_cut_points_sit_at_five_and_nine() {
    let four = bishop::assess(&BishopInput {
        dilation: 1,
        effacement: 1,
        consistency: 1,
        position: 1,
        station: 0,
    })
    .unwrap();
    assert_eq!(four.score, 4);
    assert_eq!(four.favorability, "Desfavorable");

    let five = bishop::assess(&BishopInput {
        dilation: 1,
        effacement: 1,
        consistency: 1,
        position: 1,
        station: 1,
    })
    .unwrap();
    assert_eq!(five.score, 5);
    assert_eq!(five.favorability, "Intermedio");

    let eight = bishop::assess(&BishopInput {
        dilation: 2,
        effacement: 2,
        consistency: 2,
        position: 1,
        station: 1,
    })
    .unwrap();
    assert_eq!(eight.score, 8);
    assert_eq!(eight.favorability, "Intermedio");
    assert_eq!(
        eight.recommendation,
        "Inducción posible, monitorizar progreso cuidadosamente"
    );

    let nine = bishop::assess(&BishopInput {
        dilation: 2,
        effacement: 2,
        consistency: 2,
        position: 0,
        station: 3,
    })
    .unwrap();
    assert_eq!(nine.score, 9);
    assert_eq!(nine.favorability, "Favorable");
}

#[test]
fn component_scores_have_per_item_maxima() {
    let err = bishop::assess(&BishopInput {
        dilation: 4,
        effacement: 0,
        consistency: 0,
        position: 0,
        station: 0,
    })
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::OutOfRange {
            field: "dilation",
            ..
        }
    ));
}
