//! Reader-chain dispatch through the format registry.

use std::path::Path;

use oct_importer::{ContainerFormat, FormatRegistry, ReadOptions};

use super::test_utils::{write_temp, VolFileSpec};

#[test]
fn registry_lists_supported_extensions() {
    let registry = FormatRegistry::default();
    let extensions = registry.supported_extensions();
    assert!(extensions.iter().any(|e| e.extension == "vol"));
}

#[test]
fn foreign_extension_is_declined() {
    let registry = FormatRegistry::default();
    let err = registry
        .open_file(Path::new("scan.dcm"), &ReadOptions::default())
        .unwrap_err();
    assert!(err.is_decline());
}

#[test]
fn matching_extension_with_wrong_magic_is_declined() {
    let spec = VolFileSpec {
        magic: *b"ZZZZZZZZ",
        ..Default::default()
    };
    let path = write_temp("registry-bad-magic", &spec.build());

    let err = FormatRegistry::default()
        .open_file(&path, &ReadOptions::default())
        .unwrap_err();
    assert!(err.is_decline());
}

#[test]
fn matching_file_is_decoded() {
    let spec = VolFileSpec::default();
    let path = write_temp("registry-good", &spec.build());

    let oct = FormatRegistry::default()
        .open_file(&path, &ReadOptions::default())
        .unwrap();
    assert_eq!(oct.patient_count(), 1);
}

#[test]
fn empty_registry_declines_everything() {
    let spec = VolFileSpec::default();
    let path = write_temp("registry-empty", &spec.build());

    let registry = FormatRegistry::with_formats(Vec::new());
    let err = registry
        .open_file(&path, &ReadOptions::default())
        .unwrap_err();
    assert!(err.is_decline());
}

#[test]
fn format_reports_extension_metadata() {
    let ext = ContainerFormat::RawVol.extension();
    assert_eq!(ext.extension, "vol");
    assert!(!ext.name.is_empty());
}
