//! Parameter file persistence.

use std::fs;

use simulacra::params::{Parameters, Shape};

#[test]
fn test_save_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.json");
    let second = dir.path().join("nested/b.json");

    let mut params = Parameters::default();
    params.shape = Shape::from_kind("tongue").unwrap();
    params.animation.mod2 = 7.5;
    params.save(&first).unwrap();

    let reloaded = Parameters::load(&first).unwrap();
    assert_eq!(reloaded, params);
    reloaded.save(&second).unwrap();
    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn test_missing_keys_keep_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(
        &path,
        r#"{"shape":{"kind":"sphere","radius":10.0},"reaction":{"coefficients":{"k":0.06}}}"#,
    )
    .unwrap();

    let params = Parameters::load(&path).unwrap();
    match &params.shape {
        Shape::Sphere(sphere) => {
            assert_eq!(sphere.radius, 10.0);
            assert_eq!(sphere.resolution_w, 64);
        }
        other => panic!("expected sphere, got {:?}", other),
    }
    assert_eq!(params.reaction.coefficients.k, 0.06);
    assert_eq!(params.reaction.coefficients.f, 0.028);
    assert_eq!(params.animation, Parameters::default().animation);
}

#[test]
fn test_unreadable_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Parameters::load(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(simulacra::Error::Configuration { .. })));
}
