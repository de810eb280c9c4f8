//! Core TCX trackpoint resampling library implemented in Rust.

pub mod sheet;
pub mod tcx;

use chrono::DateTime;
use thiserror::Error;
use tracing::{debug, warn};

use crate::tcx::Activity;

#[derive(Error, Debug)]
pub enum TcxError {
    #[error("failed to decode TCX document: {0}")]
    Decode(String),
    #[error("failed to write workbook: {0}")]
    Workbook(String),
}

/// One emitted spreadsheet row. Coordinates are pre-rounded to 6 decimals and
/// the display distance is quantized to the nearest 10 meters (then rescaled
/// to kilometers); `raw_distance_m` keeps the unrounded cumulative meters for
/// the boundary interpolation and is never written to the sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputRow {
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub altitude_m: f64,
    pub time_unix: i64,
    pub marker: bool,
    pub(crate) raw_distance_m: f64,
}

impl OutputRow {
    pub fn marker_text(&self) -> &'static str {
        if self.marker {
            "x"
        } else {
            ""
        }
    }
}

/// Resample decoded activities into an ordered row sequence: one candidate row
/// per trackpoint, an interpolated row at every lap boundary, and stride-based
/// downsampling that always keeps the first point of the recording and the
/// last point of each activity.
pub fn resample(activities: &[Activity], stride: u64) -> Vec<OutputRow> {
    let stride = stride.max(1);
    let mut rows = Vec::new();
    let mut previous: Option<OutputRow> = None;
    let mut counter: u64 = 0;

    for activity in activities {
        // Running total of completed-lap distances; the cumulative-distance
        // value the boundary interpolation targets.
        let mut completed_m = 0.0;

        for (lap_idx, lap) in activity.laps.iter().enumerate() {
            let last_lap = lap_idx + 1 == activity.laps.len();

            for (point_idx, point) in lap.track.trackpoints.iter().enumerate() {
                let last_point = point_idx + 1 == lap.track.trackpoints.len();
                counter += 1;

                let marker = counter == 1 || (last_lap && last_point);
                let candidate = OutputRow {
                    latitude: round6(point.position.latitude_degrees),
                    longitude: round6(point.position.longitude_degrees),
                    distance_km: quantize_km(point.distance_meters),
                    altitude_m: point.altitude_meters,
                    time_unix: parse_point_time(&point.time),
                    marker,
                    raw_distance_m: point.distance_meters,
                };

                if point_idx == 0 {
                    if let Some(prev) = previous.as_ref() {
                        rows.push(boundary_row(&candidate, prev, completed_m));
                    }
                }

                let keep =
                    stride == 1 || (counter - 1) % stride == 0 || (last_lap && last_point);
                previous = Some(candidate.clone());
                if keep {
                    rows.push(candidate);
                }
            }

            completed_m += lap.distance_meters;
        }

        debug!(
            activity = %activity.id,
            total_lap_distance_m = completed_m,
            "finished activity"
        );
    }

    rows
}

/// Synthesize the row at a lap boundary: where the athlete was, in time and
/// space, exactly at the cumulative-distance value `boundary_m` that separates
/// the finished laps from the current one. Recorded trackpoints rarely land
/// on the boundary, so the candidate and the previous row are blended by
/// distance. When the two rows sit at numerically the same distance the
/// candidate is copied as-is with the marker forced.
fn boundary_row(candidate: &OutputRow, previous: &OutputRow, boundary_m: f64) -> OutputRow {
    let dx = candidate.raw_distance_m - previous.raw_distance_m;
    if dx < 0.01 {
        return OutputRow {
            marker: true,
            ..candidate.clone()
        };
    }

    let d = (boundary_m - previous.raw_distance_m) / dx;
    let d_prev = (candidate.raw_distance_m - boundary_m) / dx;
    let raw_m = candidate.raw_distance_m * d + previous.raw_distance_m * d_prev;

    OutputRow {
        latitude: round6(candidate.latitude * d + previous.latitude * d_prev),
        longitude: round6(candidate.longitude * d + previous.longitude * d_prev),
        distance_km: quantize_km(raw_m),
        altitude_m: (candidate.altitude_m * d + previous.altitude_m * d_prev).round(),
        time_unix: (candidate.time_unix as f64 * d + previous.time_unix as f64 * d_prev).round()
            as i64,
        marker: true,
        raw_distance_m: raw_m,
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Display distance in kilometers, quantized by rounding to the nearest 10
/// meters and rescaling. Not a plain 2-decimal round of the kilometer value.
fn quantize_km(meters: f64) -> f64 {
    (meters / 10.0).round() / 100.0
}

/// Parse an ISO-8601 trackpoint time into unix seconds. Failures are tolerated
/// with the zero time so a single bad point never aborts the pass.
fn parse_point_time(raw: &str) -> i64 {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.timestamp(),
        Err(err) => {
            warn!("unparseable trackpoint time '{}': {}", raw, err);
            0
        }
    }
}
