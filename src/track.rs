use anyhow::{Context, Result};
use geo_types::{coord, Coord, LineString, Point, Rect};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::utils;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
}

pub type Track = Vec<TrackPoint>;

lazy_static! {
    static ref DEFAULT_TRACK: Track = vec![
        TrackPoint::new(36.0, 139.4),
        TrackPoint::new(35.8, 139.8),
        TrackPoint::new(35.5, 139.2),
    ];
}

/// The track a fresh `TrackState` starts with.
pub fn default_track() -> Track {
    DEFAULT_TRACK.clone()
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        utils::is_valid_latitude(self.latitude) && utils::is_valid_longitude(self.longitude)
    }

    pub fn validate(&self) -> Result<()> {
        if !utils::is_valid_latitude(self.latitude) {
            bail!("latitude out of range: {}", self.latitude);
        }
        if !utils::is_valid_longitude(self.longitude) {
            bail!("longitude out of range: {}", self.longitude);
        }
        Ok(())
    }

    pub fn distance_to_m(&self, other: &TrackPoint) -> f64 {
        utils::haversine_distance_m(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

// geo_types uses x for longitude and y for latitude.
impl From<TrackPoint> for Coord {
    fn from(p: TrackPoint) -> Self {
        coord! { x: p.longitude, y: p.latitude }
    }
}

impl From<Coord> for TrackPoint {
    fn from(c: Coord) -> Self {
        TrackPoint::new(c.y, c.x)
    }
}

impl From<TrackPoint> for Point {
    fn from(p: TrackPoint) -> Self {
        Point::new(p.longitude, p.latitude)
    }
}

impl From<Point> for TrackPoint {
    fn from(p: Point) -> Self {
        TrackPoint::new(p.y(), p.x())
    }
}

pub fn validate_track(points: &[TrackPoint]) -> Result<()> {
    for (i, point) in points.iter().enumerate() {
        point
            .validate()
            .with_context(|| format!("invalid track point at index {i}"))?;
    }
    Ok(())
}

pub fn track_length_m(points: &[TrackPoint]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.distance_to_m(b))
        .sum()
}

// TODO: tracks crossing the antimeridian get a box spanning the whole globe.
pub fn bounding_box(points: &[TrackPoint]) -> Option<Rect> {
    let first = points.first()?;
    let (min_lat, max_lat, min_lng, max_lng) = points.iter().fold(
        (
            first.latitude,
            first.latitude,
            first.longitude,
            first.longitude,
        ),
        |(min_lat, max_lat, min_lng, max_lng), p| {
            (
                min_lat.min(p.latitude),
                max_lat.max(p.latitude),
                min_lng.min(p.longitude),
                max_lng.max(p.longitude),
            )
        },
    );
    Some(Rect::new(
        coord! { x: min_lng, y: min_lat },
        coord! { x: max_lng, y: max_lat },
    ))
}

pub fn to_line_string(points: &[TrackPoint]) -> LineString {
    points.iter().map(|p| Coord::from(*p)).collect()
}

pub fn from_line_string(line_string: &LineString) -> Track {
    line_string.coords().map(|c| TrackPoint::from(*c)).collect()
}
