//! Delimited-File Loaders
//!
//! Capacitive recordings are comma-delimited `time,chA,chB,chC,chD` files
//! listed in a manifest of `file_name,start_time,wear,pen,line_no`. Strain-gauge
//! (LCM) recordings are tab-delimited `Sec,disp,v1,v2,v3,v4` files listed in a
//! manifest of `file_name,wear,pen,line_no`. None of the files carry headers.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conversions::drag_force_newtons;
use crate::{DataError, Sample, SensorType, TrialMetadata, TrialRecording};

const CAPACITIVE_COLUMNS: usize = 5;
const CAPACITIVE_MANIFEST_COLUMNS: usize = 5;
const LCM_COLUMNS: usize = 6;
const LCM_MANIFEST_COLUMNS: usize = 4;

/// How strain-gauge voltages become sample channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrainGaugeMode {
    /// Four raw bridge voltages v1-v4
    #[default]
    Voltages,
    /// One channel: drag force in kN
    DragForce,
}

/// One row of the capacitive manifest
#[derive(Debug, Clone, PartialEq)]
pub struct CapacitiveManifestEntry {
    pub file_name: String,
    /// Absolute recording time (s) at which the cutting pass starts
    pub start_time: f64,
    pub trial: TrialMetadata,
}

/// One row of the strain-gauge manifest
#[derive(Debug, Clone, PartialEq)]
pub struct StrainGaugeManifestEntry {
    pub file_name: String,
    pub trial: TrialMetadata,
}

/// Load every capacitive trial listed in `manifest`, resolving data files against `base_dir`
pub fn load_capacitive_trials(
    base_dir: &Path,
    manifest: &Path,
    experiment_length_s: f64,
) -> Result<Vec<TrialRecording>, DataError> {
    let entries = read_capacitive_manifest(manifest)?;
    let mut trials = Vec::with_capacity(entries.len());
    for entry in entries {
        let samples = read_capacitive_file(
            &base_dir.join(&entry.file_name),
            entry.start_time,
            experiment_length_s,
        )?;
        debug!("Loaded {} samples for {}", samples.len(), entry.trial);
        trials.push(TrialRecording::new(entry.trial, samples)?);
    }
    Ok(trials)
}

/// Load every strain-gauge trial listed in `manifest`, resolving data files against `base_dir`
pub fn load_strain_gauge_trials(
    base_dir: &Path,
    manifest: &Path,
    mode: StrainGaugeMode,
) -> Result<Vec<TrialRecording>, DataError> {
    let entries = read_strain_gauge_manifest(manifest)?;
    let mut trials = Vec::with_capacity(entries.len());
    for entry in entries {
        let samples = read_strain_gauge_file(&base_dir.join(&entry.file_name), mode)?;
        debug!("Loaded {} samples for {}", samples.len(), entry.trial);
        trials.push(TrialRecording::new(entry.trial, samples)?);
    }
    Ok(trials)
}

/// Parse the capacitive manifest (`file_name,start_time,wear,pen,line_no`)
pub fn read_capacitive_manifest(path: &Path) -> Result<Vec<CapacitiveManifestEntry>, DataError> {
    let mut rows = RecordSource::open(path, b',')?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next_record(CAPACITIVE_MANIFEST_COLUMNS)? {
        let start_time = row.number(1)?;
        let trial = row.trial(SensorType::Capacitive, 2, 3, 4)?;
        entries.push(CapacitiveManifestEntry {
            file_name: row.field(0).to_string(),
            start_time,
            trial,
        });
    }
    Ok(entries)
}

/// Parse the strain-gauge manifest (`file_name,wear,pen,line_no`)
pub fn read_strain_gauge_manifest(path: &Path) -> Result<Vec<StrainGaugeManifestEntry>, DataError> {
    let mut rows = RecordSource::open(path, b',')?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next_record(LCM_MANIFEST_COLUMNS)? {
        let trial = row.trial(SensorType::StrainGauge, 1, 2, 3)?;
        entries.push(StrainGaugeManifestEntry {
            file_name: row.field(0).to_string(),
            trial,
        });
    }
    Ok(entries)
}

/// Read the cutting pass of one capacitive file.
///
/// Keeps rows with `start_time <= t < start_time + experiment_length_s`, with
/// timestamps made relative to `start_time`, and stops reading at the first
/// row past the end of the pass.
pub fn read_capacitive_file(
    path: &Path,
    start_time: f64,
    experiment_length_s: f64,
) -> Result<Vec<Sample>, DataError> {
    let end_time = start_time + experiment_length_s;
    let mut rows = RecordSource::open(path, b',')?;
    let mut samples = Vec::new();
    while let Some(row) = rows.next_record(CAPACITIVE_COLUMNS)? {
        let time = row.number(0)?;
        if time < start_time {
            continue;
        }
        if time >= end_time {
            break;
        }
        let values = (1..CAPACITIVE_COLUMNS)
            .map(|column| row.number(column))
            .collect::<Result<Vec<_>, _>>()?;
        samples.push(Sample::new(time - start_time, values));
    }
    Ok(samples)
}

/// Read every row of one tab-delimited LCM file
pub fn read_strain_gauge_file(path: &Path, mode: StrainGaugeMode) -> Result<Vec<Sample>, DataError> {
    let mut rows = RecordSource::open(path, b'\t')?;
    let mut samples = Vec::new();
    while let Some(row) = rows.next_record(LCM_COLUMNS)? {
        let time = row.number(0)?;
        // column 1 is the displacement transducer, unused for classification
        let [v1, v2, v3, v4] = [row.number(2)?, row.number(3)?, row.number(4)?, row.number(5)?];
        let values = match mode {
            StrainGaugeMode::Voltages => vec![v1, v2, v3, v4],
            StrainGaugeMode::DragForce => vec![drag_force_newtons(v1, v2, v3, v4) / 1000.0],
        };
        samples.push(Sample::new(time, values));
    }
    Ok(samples)
}

/// Header-less delimited reader that tracks the record number for error reports
struct RecordSource {
    path: String,
    reader: csv::Reader<File>,
    record: StringRecord,
    count: usize,
}

impl RecordSource {
    fn open(path: &Path, delimiter: u8) -> Result<Self, DataError> {
        let display = path.display().to_string();
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)
            .map_err(|source| DataError::Read {
                path: display.clone(),
                source,
            })?;
        Ok(Self {
            path: display,
            reader,
            record: StringRecord::new(),
            count: 0,
        })
    }

    /// Advance to the next record, requiring exactly `columns` fields
    fn next_record(&mut self, columns: usize) -> Result<Option<Row<'_>>, DataError> {
        let more = self
            .reader
            .read_record(&mut self.record)
            .map_err(|source| DataError::Read {
                path: self.path.clone(),
                source,
            })?;
        if !more {
            return Ok(None);
        }
        self.count += 1;
        if self.record.len() != columns {
            return Err(DataError::ColumnCount {
                path: self.path.clone(),
                record: self.count,
                expected: columns,
                actual: self.record.len(),
            });
        }
        Ok(Some(Row {
            path: &self.path,
            number: self.count,
            record: &self.record,
        }))
    }
}

/// A validated record borrowed from a [`RecordSource`]
struct Row<'a> {
    path: &'a str,
    number: usize,
    record: &'a StringRecord,
}

impl Row<'_> {
    fn field(&self, column: usize) -> &str {
        self.record.get(column).unwrap_or("")
    }

    fn number(&self, column: usize) -> Result<f64, DataError> {
        let raw = self.field(column);
        raw.parse::<f64>().map_err(|_| DataError::InvalidNumber {
            path: self.path.to_string(),
            record: self.number,
            column,
            value: raw.to_string(),
        })
    }

    fn trial(
        &self,
        sensor: SensorType,
        wear_col: usize,
        pen_col: usize,
        line_col: usize,
    ) -> Result<TrialMetadata, DataError> {
        let raw_line = self.field(line_col);
        let line = raw_line.parse::<u32>().map_err(|_| DataError::InvalidNumber {
            path: self.path.to_string(),
            record: self.number,
            column: line_col,
            value: raw_line.to_string(),
        })?;
        Ok(TrialMetadata {
            sensor,
            wear: self.field(wear_col).parse()?,
            penetration: self.field(pen_col).parse()?,
            line,
        })
    }
}
