use crate::types::track::{Bounds, TrackStatistics, Waypoint};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub fn compute_statistics(waypoints: &[Waypoint]) -> TrackStatistics {
    TrackStatistics {
        points: waypoints.len(),
        bounds: bounds(waypoints),
        distance_m: total_distance(waypoints),
        trackpoints: waypoints.to_vec(),
    }
}

pub fn bounds(waypoints: &[Waypoint]) -> Option<Bounds> {
    let (first, rest) = waypoints.split_first()?;

    let initial = Bounds {
        min_lat: first.lat,
        max_lat: first.lat,
        min_lon: first.lon,
        max_lon: first.lon,
    };

    Some(rest.iter().fold(initial, |b, p| Bounds {
        min_lat: b.min_lat.min(p.lat),
        max_lat: b.max_lat.max(p.lat),
        min_lon: b.min_lon.min(p.lon),
        max_lon: b.max_lon.max(p.lon),
    }))
}

/// Sum of segment lengths between consecutive points, in visiting order.
pub fn total_distance(waypoints: &[Waypoint]) -> f64 {
    let mut distance_m = 0.0;

    for i in 1..waypoints.len() {
        distance_m += haversine_distance(&waypoints[i - 1], &waypoints[i]);
    }

    distance_m
}

pub fn haversine_distance(from: &Waypoint, to: &Waypoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_phi = (to.lat - from.lat).to_radians();
    let d_lambda = (to.lon - from.lon).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // rounding can push `a` just outside [0, 1]
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}
