use std::ops::Index;
use crate::tech::DeviceParams;

/// Reference resistances a multi-level sense amplifier compares a column against.
///
/// `level_output` quantization levels need `level_output - 1` thresholds. They are
/// spaced linearly from the on resistance in steps of `R_off / level_output`.
// TODO: nonlinear quantization (e.g. log spaced thresholds for high on/off ratio devices)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceLadder {
    levels: Vec<f64>,
}

impl ReferenceLadder {
    pub fn linear(r_start: f64, r_index: f64, level_output: usize) -> Self {
        let levels = (1..level_output)
            .map(|i| r_start + i as f64 * r_index / level_output as f64)
            .collect();
        Self { levels }
    }

    /// Thresholds for a read of one cell, or of every row at once when `parallel`
    pub fn from_device(params: &DeviceParams, level_output: usize, parallel: bool) -> Self {
        let (r_start, r_index) = params.read_resistance_range(parallel);
        Self::linear(r_start, r_index, level_output)
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Every threshold but the lowest, the ones the settling time fits are calibrated on
    pub fn upper_levels(&self) -> &[f64] {
        self.levels.get(1..).unwrap_or(&[])
    }
}

impl Index<usize> for ReferenceLadder {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.levels[index]
    }
}
