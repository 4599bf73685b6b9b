use super::*;
use crate::{asset::descriptor::VECTOR_ASSET_TYPE, test_support::FakeRasterizer};

fn icon() -> AssetDescriptor {
    AssetDescriptor::svg("icon", "/assets", "/assets/icon.svg")
}

fn with(files: &[&str], scales: &[f64]) -> AssetDescriptor {
    let mut a = icon();
    a.files = files.iter().map(|s| s.to_string()).collect();
    a.scales = scales.to_vec();
    a
}

fn run(asset: &AssetDescriptor) -> AssetResult<AssetDescriptor> {
    transform(asset, &FakeRasterizer::default(), &TransformOpts::default())
        .map(Transformed::into_descriptor)
}

#[test]
fn non_svg_passes_through_without_io() {
    let mut asset = icon();
    asset.asset_type = "png".to_string();
    asset.files = vec!["/assets/a.png".into(), "/assets/a@2x.png".into()];
    asset.scales = vec![1.0, 2.0];

    let r = FakeRasterizer::default();
    let out = transform(&asset, &r, &TransformOpts::default()).unwrap();
    match out {
        Transformed::Unchanged(same) => assert!(std::ptr::eq(same, &asset)),
        Transformed::Converted(_) => panic!("non-svg asset must not be converted"),
    }
    assert_eq!(r.decode_count(), 0);
    assert!(r.render_calls().is_empty());
}

#[test]
fn pass_through_skips_validation() {
    let mut asset = with(&[], &[1.0, 2.0]);
    asset.asset_type = "jpg".to_string();
    let out = run(&asset).unwrap();
    assert_eq!(out, asset);
}

#[test]
fn converts_icon_scenario() {
    let mut asset = icon();
    asset
        .extra
        .insert("hash".to_string(), serde_json::json!("abc"));

    let r = FakeRasterizer::default();
    let out = transform(&asset, &r, &TransformOpts::default()).unwrap();
    assert!(out.is_converted());
    let out = out.into_descriptor();

    assert_eq!(out.asset_type, "png");
    assert_eq!(out.name, "icon");
    assert_eq!(out.file_system_location, "/assets");
    assert_eq!(
        out.files,
        vec![
            "/assets/icon.png".to_string(),
            "/assets/icon@2x.png".to_string(),
            "/assets/icon@3x.png".to_string(),
        ]
    );
    assert_eq!(out.scales, vec![1.0, 2.0, 3.0]);
    assert_eq!(out.dimensions(), Some((24, 24)));
    assert_eq!(out.extra.get("hash"), Some(&serde_json::json!("abc")));

    let densities: Vec<f32> = r.render_calls().iter().map(|c| c.1).collect();
    assert_eq!(densities, vec![72.0, 144.0, 216.0]);
    assert_eq!(r.decode_count(), 1);

    // Input untouched.
    assert_eq!(asset.asset_type, VECTOR_ASSET_TYPE);
    assert_eq!(asset.files, vec!["/assets/icon.svg".to_string()]);
    assert_eq!(asset.width, None);
}

#[test]
fn dedicated_pool_gives_same_result() {
    let asset = icon();
    let a = run(&asset).unwrap();
    let b = transform(
        &asset,
        &FakeRasterizer::default(),
        &TransformOpts { threads: Some(2) },
    )
    .unwrap()
    .into_descriptor();
    assert_eq!(a, b);
}

#[test]
fn mismatch_is_checked_first() {
    assert!(matches!(
        run(&with(&[], &[1.0])),
        Err(AssetError::Mismatch {
            scales: 1,
            files: 0
        })
    ));
    assert!(matches!(
        run(&with(&["/a.svg", "/b.svg"], &[2.0])),
        Err(AssetError::Mismatch { .. })
    ));
    assert!(matches!(
        run(&with(&["/a.svg"], &[3.0, 1.0])),
        Err(AssetError::Mismatch { .. })
    ));
}

#[test]
fn empty_input() {
    assert!(matches!(run(&with(&[], &[])), Err(AssetError::EmptyInput)));
}

#[test]
fn multi_scale_beats_prescaled() {
    assert!(matches!(
        run(&with(&["/a.svg", "/a@2x.svg"], &[1.0, 2.0])),
        Err(AssetError::UnsupportedMultiScale { files: 2 })
    ));
    assert!(matches!(
        run(&with(&["/a.svg", "/a@2x.svg"], &[2.0, 3.0])),
        Err(AssetError::UnsupportedMultiScale { .. })
    ));
}

#[test]
fn prescaled_single_file() {
    assert!(matches!(
        run(&with(&["/a@2x.svg"], &[2.0])),
        Err(AssetError::UnsupportedPrescaled { scale }) if scale == 2.0
    ));
}

#[test]
fn contract_violations_do_no_io() {
    let r = FakeRasterizer::default();
    let asset = with(&["/a.svg", "/b.svg"], &[1.0, 2.0]);
    let err = transform(&asset, &r, &TransformOpts::default()).unwrap_err();
    assert!(err.is_input_contract());
    assert_eq!(r.decode_count(), 0);
}

#[test]
fn missing_density_fails_without_renders() {
    let r = FakeRasterizer {
        density: None,
        ..Default::default()
    };
    let err = transform(&icon(), &r, &TransformOpts::default()).unwrap_err();
    assert!(matches!(err, AssetError::DensityMissing));
    assert!(r.render_calls().is_empty());
}

#[test]
fn render_failure_propagates_unchanged() {
    let r = FakeRasterizer {
        fail_suffixes: vec![("@3x.png", "disk full")],
        ..Default::default()
    };
    let err = transform(&icon(), &r, &TransformOpts::default()).unwrap_err();
    assert!(matches!(err, AssetError::Render(ref m) if m == "disk full"));
}

#[test]
fn zero_threads_is_a_validation_error() {
    let r = FakeRasterizer::default();
    let err = transform(&icon(), &r, &TransformOpts { threads: Some(0) }).unwrap_err();
    assert!(matches!(err, AssetError::Validation(_)));
    assert_eq!(r.decode_count(), 0);
}
