#[macro_use]
extern crate assert_float_eq;

pub mod test_utils;

use geo_types::{coord, Coord, LineString, Point};
use test_utils::points;
use track_store::track::{self, TrackPoint};

#[test]
fn default_track_order() {
    let default = track::default_track();
    let raw: Vec<(f64, f64)> = default.iter().map(|p| (p.latitude, p.longitude)).collect();
    assert_eq!(raw, vec![(36.0, 139.4), (35.8, 139.8), (35.5, 139.2)]);
}

#[test]
fn point_validation() {
    assert!(TrackPoint::new(36.0, 139.4).is_valid());
    assert!(TrackPoint::new(-90.0, 180.0).is_valid());
    assert!(!TrackPoint::new(90.5, 0.0).is_valid());
    assert!(!TrackPoint::new(0.0, -180.5).is_valid());
    assert!(!TrackPoint::new(f64::NAN, 0.0).is_valid());

    let err = TrackPoint::new(0.0, 181.0).validate().unwrap_err();
    assert_eq!(err.to_string(), "longitude out of range: 181");
}

#[test]
fn track_validation_names_index() {
    assert!(track::validate_track(&track::default_track()).is_ok());
    assert!(track::validate_track(&[]).is_ok());

    let bad = points(&[(0.0, 0.0), (10.0, 10.0), (-100.0, 0.0)]);
    let err = track::validate_track(&bad).unwrap_err();
    assert_eq!(err.to_string(), "invalid track point at index 2");
    assert_eq!(err.root_cause().to_string(), "latitude out of range: -100");
}

#[test]
fn geo_types_conversion() {
    let p = TrackPoint::new(35.8, 139.8);
    let c: Coord = p.into();
    assert_eq!(c, coord! { x: 139.8, y: 35.8 });
    assert_eq!(TrackPoint::from(c), p);

    let point: Point = p.into();
    assert_eq!(point.x(), 139.8);
    assert_eq!(point.y(), 35.8);
    assert_eq!(TrackPoint::from(point), p);
}

#[test]
fn line_string() {
    let default = track::default_track();
    let line_string = track::to_line_string(&default);
    assert_eq!(
        line_string,
        LineString::from(vec![(139.4, 36.0), (139.8, 35.8), (139.2, 35.5)])
    );
    assert_eq!(track::from_line_string(&line_string), default);
}

#[test]
fn length() {
    assert_eq!(track::track_length_m(&[]), 0.0);
    assert_eq!(track::track_length_m(&points(&[(35.0, 139.0)])), 0.0);

    // two degrees of latitude along a meridian, split in two legs
    let meridian = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    assert_float_absolute_eq!(track::track_length_m(&meridian), 222389.853, 0.01);

    let default = track::default_track();
    let expected = default[0].distance_to_m(&default[1]) + default[1].distance_to_m(&default[2]);
    assert_float_absolute_eq!(track::track_length_m(&default), expected, 1e-9);
}

#[test]
fn bounding_box() {
    assert!(track::bounding_box(&[]).is_none());

    let rect = track::bounding_box(&track::default_track()).unwrap();
    assert_eq!(rect.min(), coord! { x: 139.2, y: 35.5 });
    assert_eq!(rect.max(), coord! { x: 139.8, y: 36.0 });

    let single = track::bounding_box(&points(&[(1.0, 2.0)])).unwrap();
    assert_eq!(single.min(), single.max());
}

#[test]
fn serde_format() {
    let json = serde_json::to_string(&TrackPoint::new(36.0, 139.4)).unwrap();
    assert_eq!(json, r#"{"latitude":36.0,"longitude":139.4}"#);
    let p: TrackPoint = serde_json::from_str(&json).unwrap();
    assert_eq!(p, TrackPoint::new(36.0, 139.4));
}
