use super::*;

#[test]
fn table_is_three_ascending_tiers() {
    let scales: Vec<f64> = SCALE_SPECS.iter().map(|s| s.relative_scale).collect();
    let suffixes: Vec<&str> = SCALE_SPECS.iter().map(|s| s.suffix).collect();
    assert_eq!(scales, vec![1.0, 2.0, 3.0]);
    assert_eq!(suffixes, vec!["", "@2x", "@3x"]);
}

#[test]
fn output_paths_follow_suffixes() {
    let paths: Vec<PathBuf> = SCALE_SPECS
        .iter()
        .map(|s| s.output_path("/assets", "icon"))
        .collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("/assets/icon.png"),
            PathBuf::from("/assets/icon@2x.png"),
            PathBuf::from("/assets/icon@3x.png"),
        ]
    );
}

#[test]
fn effective_scale_divides_by_input_scale() {
    assert_eq!(SCALE_SPECS[2].effective_scale(1.0), 3.0);
    assert_eq!(SCALE_SPECS[1].effective_scale(2.0), 1.0);
    assert_eq!(SCALE_SPECS[0].effective_scale(4.0), 0.25);
}
