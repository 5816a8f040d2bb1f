pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod types;

pub use error::ParseError;
pub use pipeline::parse::parse_track;
pub use types::track::{Bounds, TrackStatistics, Waypoint};
