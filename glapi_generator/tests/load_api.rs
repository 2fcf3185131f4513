////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::path::{Path, PathBuf};

use glapi_generator::{LoadError, Param, Registry, GLAPI_PATH_VAR};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn load() -> Registry {
    Registry::load(fixtures().join("gl_API.xml")).unwrap()
}

#[test]
fn functions_follow_offset_order_across_includes() {
    let registry = load();

    let order: Vec<_> = registry.functions_by_offset().map(|f| (f.name.as_str(), f.offset)).collect();
    assert_eq!(
        order,
        [
            ("Bitmap", 8),
            ("Clear", 203),
            ("Finish", 216),
            ("IsEnabled", 286),
            ("BlendEquation", 337),
            ("FenceSync", 338),
            ("ClearDepthf", 339),
        ]
    );
}

#[test]
fn aliases_from_included_files_are_entry_points() {
    let registry = load();
    let blend = registry.functions_by_offset().find(|f| f.name == "BlendEquation").unwrap();

    assert_eq!(blend.entry_points, ["BlendEquationEXT", "BlendEquation"]);
    assert_eq!(blend.entry_point_params["BlendEquationEXT"], [Param::new("mode", "GLenum")]);
}

#[test]
fn return_types_padding_and_profiles() {
    let registry = load();
    let by_name = |name: &str| registry.functions_by_offset().find(|f| f.name == name).unwrap();

    assert_eq!(by_name("FenceSync").return_type, "GLsync");
    assert_eq!(by_name("Finish").return_type, "void");
    assert!(by_name("Finish").entry_point_params["Finish"].is_empty());
    assert!(!by_name("ClearDepthf").desktop);

    let bitmap = &by_name("Bitmap").entry_point_params["Bitmap"];
    assert_eq!(bitmap.len(), 4);
    assert_eq!(bitmap.iter().filter(|p| p.is_padding).count(), 1);
    assert_eq!(bitmap[2], Param::padding("pad", "GLint"));
}

#[test]
fn desktop_traversal() {
    let registry = load();
    let eps: Vec<_> = registry.desktop_entry_points().map(|(_, ep)| ep).collect();

    assert_eq!(
        eps,
        ["Bitmap", "Clear", "Finish", "IsEnabled", "BlendEquationEXT", "BlendEquation", "FenceSync"]
    );
}

#[test]
fn repeated_loads_are_identical() {
    let a: Vec<_> = load().functions_by_offset().cloned().collect();
    let b: Vec<_> = load().functions_by_offset().cloned().collect();
    assert_eq!(a, b);
}

#[test]
fn include_cycles_are_rejected() {
    let err = Registry::load(fixtures().join("cycle").join("a.xml")).unwrap_err();
    assert!(matches!(err, LoadError::IncludeCycle { .. }), "{}", err);
}

#[test]
fn duplicate_entry_points_are_rejected() {
    let err = Registry::load(fixtures().join("duplicate_entry_point.xml")).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateEntryPoint { ref name, .. } if name == "Clear"), "{}", err);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Registry::load(fixtures().join("missing.xml")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "{}", err);
}

// the only test touching the environment, so it cannot race with another one
#[test]
fn from_env_resolves_description_in_glapi_path() {
    std::env::remove_var(GLAPI_PATH_VAR);
    assert!(matches!(Registry::from_env(), Err(LoadError::MissingEnv(GLAPI_PATH_VAR))));

    std::env::set_var(GLAPI_PATH_VAR, fixtures());
    assert_eq!(Registry::from_env().unwrap().len(), 7);
}
