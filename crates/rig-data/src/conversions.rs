//! Physical Unit Conversions

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::TrialRecording;

/// Reference clock of the capacitive front end (Hz)
pub const REFERENCE_CLOCK_HZ: f64 = 40.0e6;

/// Default number of bits the capacitive counter is shifted by
pub const DEFAULT_GAIN_BITS: f64 = 4.0;

/// Drag calibration slope (lbf per volt)
const DRAG_SLOPE_LBF: f64 = 15_695_275.0;
/// Drag calibration offset (lbf)
const DRAG_OFFSET_LBF: f64 = 9088.0;
/// Pound-force to newtons
const LBF_TO_N: f64 = 4.44822;

/// Convert a raw capacitive counter value to oscillator frequency (Hz)
pub fn counts_to_frequency(count: f64, gain_bits: f64) -> f64 {
    REFERENCE_CLOCK_HZ * count / 2f64.powf(12.0 + gain_bits)
}

/// Capacitance (F) of an LC tank resonating at `frequency`, minus the filter capacitance
pub fn frequency_to_capacitance(frequency: f64, inductance: f64, filter_capacitance: f64) -> f64 {
    1.0 / (inductance * (2.0 * PI * frequency).powi(2)) - filter_capacitance
}

/// Convert counter values to (frequencies, capacitances)
pub fn frequency_and_capacitance(
    counts: &[f64],
    inductance: f64,
    filter_capacitance: f64,
    gain_bits: f64,
) -> (Vec<f64>, Vec<f64>) {
    let frequencies: Vec<f64> = counts
        .iter()
        .map(|&c| counts_to_frequency(c, gain_bits))
        .collect();
    let capacitances = frequencies
        .iter()
        .map(|&f| frequency_to_capacitance(f, inductance, filter_capacitance))
        .collect();
    (frequencies, capacitances)
}

/// Drag force in newtons from the four strain-gauge bridge voltages.
///
/// The bridge pairs (v1, v2) and (v3, v4) load in opposite directions.
pub fn drag_force_newtons(v1: f64, v2: f64, v3: f64, v4: f64) -> f64 {
    let x = -v1 - v2 + v3 + v4;
    let drag_lbf = DRAG_SLOPE_LBF * x + DRAG_OFFSET_LBF;
    LBF_TO_N * drag_lbf
}

/// LC-tank parameters for converting capacitive counts to capacitance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacitanceCalibration {
    /// Tank inductance (H)
    pub inductance: f64,
    /// Filter capacitance subtracted from the result (F)
    pub filter_capacitance: f64,
    /// Counter gain (bits shifted)
    #[serde(default = "default_gain_bits")]
    pub gain_bits: f64,
}

fn default_gain_bits() -> f64 {
    DEFAULT_GAIN_BITS
}

impl CapacitanceCalibration {
    /// Replace every channel value of a capacitive recording with its capacitance
    pub fn apply(&self, recording: &mut TrialRecording) {
        for sample in &mut recording.samples {
            for value in &mut sample.values {
                let frequency = counts_to_frequency(*value, self.gain_bits);
                *value = frequency_to_capacitance(frequency, self.inductance, self.filter_capacitance);
            }
        }
    }
}
