//! Decoded TCX (Training Center XML) object graph and the decode operation.
//!
//! The structs mirror the TCX schema one level per element; every field
//! defaults to its zero value when the element is absent, and unknown
//! elements (vendor extensions, heart rate, cadence) are ignored.

use serde::Deserialize;

use crate::TcxError;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TrainingCenterDatabase {
    #[serde(rename = "Activities", default)]
    pub activities: Activities,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Activities {
    #[serde(rename = "Activity", default)]
    pub activities: Vec<Activity>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Activity {
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Lap", default)]
    pub laps: Vec<Lap>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Lap {
    #[serde(rename = "@StartTime", default)]
    pub start_time: String,
    #[serde(rename = "TotalTimeSeconds", default)]
    pub total_time_seconds: f64,
    #[serde(rename = "DistanceMeters", default)]
    pub distance_meters: f64,
    #[serde(rename = "Track", default)]
    pub track: Track,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Track {
    #[serde(rename = "Trackpoint", default)]
    pub trackpoints: Vec<Trackpoint>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Trackpoint {
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "Position", default)]
    pub position: Position,
    #[serde(rename = "AltitudeMeters", default)]
    pub altitude_meters: f64,
    #[serde(rename = "DistanceMeters", default)]
    pub distance_meters: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Position {
    #[serde(rename = "LatitudeDegrees", default)]
    pub latitude_degrees: f64,
    #[serde(rename = "LongitudeDegrees", default)]
    pub longitude_degrees: f64,
}

/// Decode raw TCX bytes into the activity tree.
pub fn parse_tcx(input: &[u8]) -> Result<TrainingCenterDatabase, TcxError> {
    let text = std::str::from_utf8(input).map_err(|e| TcxError::Decode(e.to_string()))?;
    quick_xml::de::from_str(text).map_err(|e| TcxError::Decode(e.to_string()))
}
