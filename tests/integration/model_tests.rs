//! Model invariants exercised through the public API.

use image::GrayImage;
use oct_importer::{BScan, BScanData, Oct, SloImage, Timestamp};

#[test]
fn get_or_create_returns_the_same_entity_at_every_level() {
    let mut oct = Oct::new();

    oct.patient_mut(1).set_surname("First");
    oct.patient_mut(1).study_mut(2).set_study_date(Timestamp::from_unix(86_400, 0));
    oct.patient_mut(1).study_mut(2).series_mut(3).set_scan_focus(2.0);

    // a second pass by the same ids sees everything the first pass wrote
    let patient = oct.patient_mut(1);
    assert_eq!(patient.surname(), "First");
    let study = patient.study_mut(2);
    assert!(study.study_date().is_decoded());
    assert_eq!(study.series_mut(3).scan_focus(), 2.0);

    assert_eq!(oct.patient_count(), 1);
    assert_eq!(oct.patient(1).unwrap().study_count(), 1);
    assert_eq!(oct.patient(1).unwrap().study(2).unwrap().series_count(), 1);
}

#[test]
fn second_slo_transfer_releases_the_first() {
    let mut oct = Oct::new();
    let series = oct.patient_mut(1).study_mut(1).series_mut(1);

    series.take_slo_image(SloImage::new(GrayImage::new(4, 4)));
    series.take_slo_image(SloImage::new(GrayImage::new(16, 16)));

    // exactly one SLO image reachable, and it is the second one
    let slo = series.slo_image().unwrap();
    assert_eq!((slo.width(), slo.height()), (16, 16));
}

#[test]
fn bscans_append_in_transfer_order() {
    let mut oct = Oct::new();
    let series = oct.patient_mut(1).study_mut(1).series_mut(1);

    for quality in [3.0f32, 1.0, 2.0] {
        let data = BScanData {
            image_quality: quality,
            ..Default::default()
        };
        series.take_bscan(BScan::new(GrayImage::new(2, 2), data));
    }

    let qualities: Vec<f32> = series.bscans().iter().map(|b| b.image_quality()).collect();
    assert_eq!(qualities, vec![3.0, 1.0, 2.0]);
}
