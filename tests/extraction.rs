use approx::assert_relative_eq;
use em_weeks::prelude::*;

fn microstrip(tan_delta: Scalar) -> ExtractionConfig {
    let substrate = Substrate::new(4.4, 200.0e-6, tan_delta);
    ExtractionConfig::new(
        "microstrip",
        30.0e6,
        vec![
            Conductor::new(2800.0e-6, 2.0e-6, 0.0, 0.0)
                .with_mesh(20, 2)
                .with_substrate(substrate),
            Conductor::new(300.0e-6, 2.0e-6, 1250.0e-6, 200.0e-6)
                .with_mesh(8, 2)
                .with_substrate(substrate),
        ],
    )
}

fn coupled_pair(second: Substrate) -> ExtractionConfig {
    let fr4 = Substrate::fr4(200.0e-6);
    ExtractionConfig::new(
        "coupled",
        30.0e6,
        vec![
            Conductor::new(2800.0e-6, 2.0e-6, 0.0, 0.0)
                .with_mesh(20, 2)
                .with_substrate(fr4),
            Conductor::new(300.0e-6, 2.0e-6, 900.0e-6, 200.0e-6)
                .with_mesh(6, 2)
                .with_substrate(fr4),
            Conductor::new(300.0e-6, 2.0e-6, 1600.0e-6, 200.0e-6)
                .with_mesh(6, 2)
                .with_substrate(second),
        ],
    )
}

#[test]
fn microstrip_yields_positive_scalar_r_and_l() {
    let result = extract(&microstrip(0.02)).unwrap();
    assert_eq!(result.resistance().shape(), (1, 1));
    assert_eq!(result.inductance().shape(), (1, 1));
    assert!(result.resistance()[(0, 0)] > 0.0);
    assert!(result.inductance()[(0, 0)] > 0.0);

    let z = result.impedance[(0, 0)];
    assert_relative_eq!(result.impedance_magnitude()[(0, 0)], z.norm());
    assert_eq!(result.stats.filaments, 39 + 16);
    assert_eq!(result.stats.conductor_inversion.dimension, 1);
}

#[test]
fn lossless_substrate_lowers_resistance_only() {
    let lossy = extract(&microstrip(0.02)).unwrap();
    let lossless = extract(&microstrip(0.0)).unwrap();
    assert!(lossless.resistance()[(0, 0)] < lossy.resistance()[(0, 0)]);
    assert_relative_eq!(
        lossless.inductance()[(0, 0)],
        lossy.inductance()[(0, 0)],
        max_relative = 1.0e-3
    );
}

#[test]
fn coupled_lines_are_reciprocal() {
    let result = extract(&coupled_pair(Substrate::fr4(200.0e-6))).unwrap();
    assert_eq!(result.conductor_count(), 2);
    let (r, l) = (result.resistance(), result.inductance());
    assert_relative_eq!(r[(0, 1)], r[(1, 0)], max_relative = 1.0e-9);
    assert_relative_eq!(l[(0, 1)], l[(1, 0)], max_relative = 1.0e-9);
    assert!(l[(0, 1)] > 0.0);
    assert!(l[(0, 1)] < l[(0, 0)]);
    assert!(l[(0, 1)] < l[(1, 1)]);
}

#[test]
fn loss_attribution_matters_only_with_distinct_substrates() {
    let single = microstrip(0.02);
    let owner = extract(&single).unwrap();
    let legacy = extract(&single.clone().with_attribution(LossAttribution::FirstSignal)).unwrap();
    assert_eq!(owner.impedance, legacy.impedance);

    let pair = coupled_pair(Substrate::air());
    let owner = extract(&pair).unwrap();
    let legacy = extract(&pair.with_attribution(LossAttribution::FirstSignal)).unwrap();
    // Legacy charges the air-backed line with the FR4 loss of line 1.
    assert!(legacy.resistance()[(1, 1)] > owner.resistance()[(1, 1)]);
}

#[test]
fn skin_effect_raises_resistance_and_lowers_inductance() {
    let mut low = microstrip(0.0);
    low.frequency = 1.0e5;
    let mut high = microstrip(0.0);
    high.frequency = 1.0e9;
    let low = extract(&low).unwrap();
    let high = extract(&high).unwrap();
    assert!(high.resistance()[(0, 0)] > low.resistance()[(0, 0)]);
    assert!(high.inductance()[(0, 0)] < low.inductance()[(0, 0)]);
}

#[test]
fn zero_width_conductor_is_singular() {
    let mut config = microstrip(0.02);
    config.conductors[1].width = 0.0;
    assert!(matches!(
        extract(&config),
        Err(ExtractionError::SingularMatrix { .. })
    ));
}

#[test]
fn invalid_geometry_is_rejected_before_meshing() {
    let mut negative = microstrip(0.02);
    negative.conductors[1].height = -2.0e-6;
    assert!(matches!(
        extract(&negative),
        Err(ExtractionError::InvalidGeometry { conductor: 1, .. })
    ));

    let mut odd = microstrip(0.02);
    odd.conductors[1].nh = 3;
    assert!(matches!(
        extract(&odd),
        Err(ExtractionError::InvalidGeometry { conductor: 1, .. })
    ));

    let mut alone = microstrip(0.02);
    alone.conductors.truncate(1);
    assert!(matches!(
        extract(&alone),
        Err(ExtractionError::InvalidGeometry { .. })
    ));
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_document_runs_end_to_end() {
    let doc = "
name: microstrip
frequency: 3.0e7
conductors:
  - {w: 2800.0e-6, h: 2.0e-6, nw: 20, nh: 2, er: 4.4, substrate_h: 200.0e-6, tan_delta: 0.02}
  - {w: 300.0e-6, h: 2.0e-6, x: 1250.0e-6, y: 200.0e-6, nw: 8, nh: 2, er: 4.4, substrate_h: 200.0e-6, tan_delta: 0.02}
";
    let from_yaml = extract(&load_yaml(doc).unwrap()).unwrap();
    let direct = extract(&microstrip(0.02)).unwrap();
    assert_eq!(from_yaml.impedance, direct.impedance);
}
