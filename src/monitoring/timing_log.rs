use crate::shared_data::{Direction, IntersectionReport};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// One CSV row: a lane's timing within a processed intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    pub timestamp: u64,
    pub lane_id: String,
    pub direction: Direction,
    pub vehicle_count: u32,
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimingLogSummary {
    pub records: usize,
    pub intersections: usize,
    pub average_efficiency: f64,
}

// Appends rows to a CSV file, writing the header only when the file is new.
fn log_to_csv<T: Serialize>(path: &Path, records: &[T]) -> Result<(), Box<dyn Error>> {
    let file_exists = path.exists();
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn timing_records(report: &IntersectionReport) -> Vec<TimingRecord> {
    report
        .lanes
        .iter()
        .zip(&report.intersection_data.timings)
        .map(|(lane, timing)| TimingRecord {
            timestamp: report.timestamp,
            lane_id: lane.id.clone(),
            direction: timing.direction,
            vehicle_count: lane.vehicle_count,
            green: timing.green,
            yellow: timing.yellow,
            red: timing.red,
            efficiency: report.intersection_data.efficiency,
        })
        .collect()
}

pub fn log_intersection_report<P: AsRef<Path>>(
    path: P,
    report: &IntersectionReport,
) -> Result<(), Box<dyn Error>> {
    log_to_csv(path.as_ref(), &timing_records(report))
}

pub fn read_timing_log<P: AsRef<Path>>(path: P) -> Result<Vec<TimingRecord>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: TimingRecord = result?;
        records.push(record);
    }
    Ok(records)
}

// Requests are told apart by timestamp; every row of one request carries the same efficiency.
pub fn summarize_timing_log<P: AsRef<Path>>(path: P) -> Result<TimingLogSummary, Box<dyn Error>> {
    let records = read_timing_log(path)?;
    let intersections = records
        .iter()
        .map(|r| r.timestamp)
        .collect::<HashSet<_>>()
        .len();
    let average_efficiency = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.efficiency).sum::<f64>() / records.len() as f64
    };
    Ok(TimingLogSummary {
        records: records.len(),
        intersections,
        average_efficiency,
    })
}
