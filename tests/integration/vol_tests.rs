//! End-to-end decoding of synthetic raw scan containers.

use oct_importer::format::vol;
use oct_importer::{
    CursorError, FileCursor, FormatError, FormatRegistry, Laterality, Oct, ReadOptions,
    ScanPattern, SegmentlineKind,
};

use super::test_utils::{write_temp, VolFileSpec};

#[test]
fn decodes_complete_file_into_model() {
    let spec = VolFileSpec::default();
    let path = write_temp("complete", &spec.build());

    let registry = FormatRegistry::default();
    let oct = registry.open_file(&path, &ReadOptions::default()).unwrap();

    // patient
    assert_eq!(oct.patient_count(), 1);
    let patient = oct.patient(spec.pid).unwrap();
    assert_eq!(patient.external_id(), "PAT-0077");
    assert_eq!(patient.birthdate().date_str('-'), "1980-06-15");

    // study
    let study = patient.study(spec.vid).unwrap();
    assert_eq!(
        study.study_date().date_time_str('-', ':', true),
        "2001-01-01 00:00:00.000"
    );

    // series
    let series = study.series(1).unwrap();
    assert_eq!(series.laterality(), Laterality::RightEye);
    assert_eq!(series.scan_pattern(), ScanPattern::Volume);
    assert_eq!(series.scan_date().date_str('-'), "2002-01-01");
    assert_eq!(series.scan_focus(), -1.25);
    assert_eq!(series.series_uid(), "SERIES-A");
    assert_eq!(series.ref_series_uid(), "SERIES-REF");
}

#[test]
fn decodes_slo_image_pixels() {
    let spec = VolFileSpec::default();
    let path = write_temp("slo", &spec.build());

    let oct = FormatRegistry::default()
        .open_file(&path, &ReadOptions::default())
        .unwrap();
    let series = oct.patient(spec.pid).unwrap().study(spec.vid).unwrap().series(1).unwrap();

    let slo = series.slo_image().unwrap();
    assert_eq!((slo.width(), slo.height()), (spec.size_x_slo, spec.size_y_slo));
    for (x, y) in [(0, 0), (7, 0), (3, 5), (7, 7)] {
        assert_eq!(slo.image().get_pixel(x, y).0[0], spec.slo_value(x, y));
    }
    assert_eq!(slo.scale_factor().x, spec.scale_x_slo);
    assert_eq!(slo.scale_factor().y, spec.scale_y_slo);
}

#[test]
fn decodes_every_declared_record() {
    let spec = VolFileSpec::default();
    let path = write_temp("records", &spec.build());

    let oct = FormatRegistry::default()
        .open_file(&path, &ReadOptions::default())
        .unwrap();
    let series = oct.patient(spec.pid).unwrap().study(spec.vid).unwrap().series(1).unwrap();

    assert_eq!(series.bscan_count(), spec.num_bscans as usize);

    for (index, bscan) in series.bscans().iter().enumerate() {
        let record = index as u32;
        assert_eq!(bscan.width(), spec.size_x);
        assert_eq!(bscan.height(), spec.size_z);
        assert_eq!((bscan.start().x, bscan.start().y), spec.start(record));
        assert_eq!((bscan.end().x, bscan.end().y), spec.end(record));
        assert_eq!(bscan.image_quality(), spec.quality(record));
        assert_eq!(bscan.scale_factor().x, spec.scale_x);
        assert_eq!(bscan.scale_factor().y, spec.scale_z);

        // raw pixel buffer is byte-exact
        let raw = bscan.raw_image().unwrap();
        for z in 0..spec.size_z {
            for x in 0..spec.size_x {
                assert_eq!(raw.get_pixel(x, z).0[0], spec.pixel_value(record, x, z));
            }
        }
    }
}

#[test]
fn decodes_segmentation_curves_at_declared_width() {
    let spec = VolFileSpec::default();
    let path = write_temp("curves", &spec.build());

    let oct = FormatRegistry::default()
        .open_file(&path, &ReadOptions::default())
        .unwrap();
    let series = oct.patient(spec.pid).unwrap().study(spec.vid).unwrap().series(1).unwrap();

    for bscan in series.bscans() {
        let ilm = bscan.segment_line(SegmentlineKind::Ilm);
        let bm = bscan.segment_line(SegmentlineKind::Bm);
        assert_eq!(ilm.len(), spec.size_x as usize);
        assert_eq!(bm.len(), spec.size_x as usize);

        for x in 0..spec.size_x {
            assert_eq!(ilm[x as usize], f64::from(spec.curve_value(0, x)));
            assert_eq!(bm[x as usize], f64::from(spec.curve_value(1, x)));
        }
    }
}

#[test]
fn absent_curves_yield_empty_lines() {
    let spec = VolFileSpec {
        num_seg: 0,
        ..Default::default()
    };
    let path = write_temp("no-curves", &spec.build());

    let oct = FormatRegistry::default()
        .open_file(&path, &ReadOptions::default())
        .unwrap();
    let series = oct.patient(spec.pid).unwrap().study(spec.vid).unwrap().series(1).unwrap();

    for bscan in series.bscans() {
        assert!(bscan.segment_line(SegmentlineKind::Ilm).is_empty());
        assert!(bscan.segment_line(SegmentlineKind::Bm).is_empty());
    }
}

#[test]
fn saturated_pixels_clamp_when_fill_white_enabled() {
    let spec = VolFileSpec {
        saturate_first_pixel: true,
        ..Default::default()
    };
    let path = write_temp("clamp-on", &spec.build());

    let oct = FormatRegistry::default()
        .open_file(&path, &ReadOptions::default())
        .unwrap();
    let series = oct.patient(spec.pid).unwrap().study(spec.vid).unwrap().series(1).unwrap();

    let bscan = series.bscan(0).unwrap();
    assert_eq!(bscan.raw_image().unwrap().get_pixel(0, 0).0[0], 1.0);
    assert_eq!(bscan.image().get_pixel(0, 0).0[0], 255);
}

#[test]
fn saturated_pixels_survive_when_fill_white_disabled() {
    let spec = VolFileSpec {
        saturate_first_pixel: true,
        ..Default::default()
    };
    let path = write_temp("clamp-off", &spec.build());

    let options = ReadOptions {
        fill_empty_pixels_white: false,
        ..Default::default()
    };
    let oct = FormatRegistry::default().open_file(&path, &options).unwrap();
    let series = oct.patient(spec.pid).unwrap().study(spec.vid).unwrap().series(1).unwrap();

    let bscan = series.bscan(0).unwrap();
    assert_eq!(bscan.raw_image().unwrap().get_pixel(0, 0).0[0], 2.0);
    // the 8-bit rescale still saturates
    assert_eq!(bscan.image().get_pixel(0, 0).0[0], 255);
}

#[test]
fn wrong_magic_declines_without_reading_past_it() {
    let spec = VolFileSpec {
        magic: *b"NOT-OCT!",
        ..Default::default()
    };

    let mut cursor = FileCursor::new(std::io::Cursor::new(spec.build())).unwrap();
    let mut oct = Oct::new();
    let err = vol::read_stream(&mut cursor, &mut oct, &ReadOptions::default()).unwrap_err();

    assert!(err.is_decline());
    assert_eq!(cursor.position(), 8);
    assert!(oct.is_empty());
}

#[test]
fn truncated_pixel_region_keeps_prior_records() {
    let spec = VolFileSpec::default();
    let mut bytes = spec.build();

    // cut the file 2 bytes into record 2's pixel region
    let full_len = spec.record_offset(2) + spec.bscan_hdr_size() as usize + spec.pixel_len();
    assert_eq!(bytes.len(), full_len);
    bytes.truncate(full_len - 2);

    let path = write_temp("truncated", &bytes);
    let registry = FormatRegistry::default();

    let mut oct = Oct::new();
    let err = registry
        .read_into(&path, &mut oct, &ReadOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        FormatError::Cursor(CursorError::Truncated { .. })
    ));

    // header metadata and records 0 and 1 stay committed
    let series = oct.patient(spec.pid).unwrap().study(spec.vid).unwrap().series(1).unwrap();
    assert_eq!(series.laterality(), Laterality::RightEye);
    assert!(series.slo_image().is_some());
    assert_eq!(series.bscan_count(), 2);

    let raw = series.bscan(1).unwrap().raw_image().unwrap();
    assert_eq!(raw.get_pixel(5, 3).0[0], spec.pixel_value(1, 5, 3));
}

#[test]
fn unknown_scan_pattern_degrades_without_error() {
    let spec = VolFileSpec {
        scan_pattern: 99,
        scan_position: "XX",
        ..Default::default()
    };
    let path = write_temp("degraded-enums", &spec.build());

    let oct = FormatRegistry::default()
        .open_file(&path, &ReadOptions::default())
        .unwrap();
    let series = oct.patient(spec.pid).unwrap().study(spec.vid).unwrap().series(1).unwrap();

    assert_eq!(series.scan_pattern(), ScanPattern::Unknown);
    assert_eq!(series.laterality(), Laterality::Undefined);
}

#[test]
fn fast_volume_pattern_code_maps() {
    let spec = VolFileSpec {
        scan_pattern: 4,
        ..Default::default()
    };
    let path = write_temp("fast-volume", &spec.build());

    let oct = FormatRegistry::default()
        .open_file(&path, &ReadOptions::default())
        .unwrap();
    let series = oct.patient(spec.pid).unwrap().study(spec.vid).unwrap().series(1).unwrap();
    assert_eq!(series.scan_pattern(), ScanPattern::FastVolume);
}

#[test]
fn repeated_decode_reuses_entities() {
    let spec = VolFileSpec::default();
    let path = write_temp("repeat", &spec.build());
    let registry = FormatRegistry::default();

    let mut oct = Oct::new();
    registry
        .read_into(&path, &mut oct, &ReadOptions::default())
        .unwrap();
    registry
        .read_into(&path, &mut oct, &ReadOptions::default())
        .unwrap();

    // same patient/study/series rows; B-scans append, the SLO is replaced
    assert_eq!(oct.patient_count(), 1);
    let patient = oct.patient(spec.pid).unwrap();
    assert_eq!(patient.study_count(), 1);
    let series = patient.study(spec.vid).unwrap().series(1).unwrap();
    assert_eq!(series.bscan_count(), 2 * spec.num_bscans as usize);
    assert!(series.slo_image().is_some());
}

#[test]
fn header_dump_renders_raw_fields() {
    let spec = VolFileSpec::default();
    let path = write_temp("dump", &spec.build());

    let (header, lines) = vol::dump_header(&path).unwrap();
    assert_eq!(header.num_bscans, spec.num_bscans);
    assert_eq!(header.pid, spec.pid);

    assert!(lines.iter().any(|l| l.contains("sizeX") && l.contains('6')));
    assert!(lines.iter().any(|l| l.contains("scanPosition") && l.contains("OD")));
    assert!(lines.iter().any(|l| l.contains("patientID") && l.contains("PAT-0077")));
}
