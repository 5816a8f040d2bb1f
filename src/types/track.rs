use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Summary of a parsed track. `bounds` is `None` only for an empty track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackStatistics {
    pub points: usize,
    pub bounds: Option<Bounds>,
    pub distance_m: f64,
    pub trackpoints: Vec<Waypoint>,
}

impl TrackStatistics {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }
}
