use std::ops::RangeInclusive;

// unit: meter
pub const EARTH_RADIUS: f64 = 6371000.0;

pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

pub fn is_valid_latitude(lat: f64) -> bool {
    LATITUDE_RANGE.contains(&lat)
}

pub fn is_valid_longitude(lng: f64) -> bool {
    LONGITUDE_RANGE.contains(&lng)
}

// https://en.wikipedia.org/wiki/Haversine_formula
pub fn haversine_distance_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // `a` can drift slightly above 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS * c
}
