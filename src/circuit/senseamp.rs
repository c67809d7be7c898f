use std::{fmt::Debug, sync::Arc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::tech::DeviceParams;
use super::{CircuitError, FunctionUnit};

/// Optional features of a current sense amplifier array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SenseAmpMode {
    pub parallel: bool,
    pub row_by_row: bool,
}

/// Single-bit current sense amplifier array queried by larger readout circuits
pub trait SenseAmp: Debug {
    fn initialize(
        &mut self,
        num_col: usize,
        mode: SenseAmpMode,
        clk_freq: f64,
        num_read_cell_per_operation: usize,
    ) -> Result<(), CircuitError>;

    fn calculate_unit_area(&mut self) -> Result<(), CircuitError>;

    /// Area of the whole array laid out along `dimension` (m)
    fn calculate_area(&mut self, dimension: f64) -> Result<(), CircuitError>;

    fn area(&self) -> f64;
}

/// Cell footprint in multiples of the feature size
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, derive_new::new)]
pub struct SenseAmpFootprint {
    pub height: f64,
    pub width: f64,
}

impl Default for SenseAmpFootprint {
    fn default() -> Self {
        Self::new(80.0, 10.0)
    }
}

/// Sense amplifier array built from identical cells packed in rows
#[derive(Debug)]
pub struct CurrentSenseAmp {
    pub params: Arc<DeviceParams>,
    pub footprint: SenseAmpFootprint,
    pub unit: FunctionUnit,

    pub num_col: usize,
    pub mode: SenseAmpMode,
    pub clk_freq: f64,
    pub num_read_cell_per_operation: usize,

    pub unit_height: f64,
    pub unit_width: f64,
    initialized: bool,
}

impl CurrentSenseAmp {
    pub fn new(params: Arc<DeviceParams>) -> Self {
        Self::with_footprint(params, SenseAmpFootprint::default())
    }

    pub fn with_footprint(params: Arc<DeviceParams>, footprint: SenseAmpFootprint) -> Self {
        Self {
            params,
            footprint,
            unit: FunctionUnit::default(),
            num_col: 0,
            mode: SenseAmpMode::default(),
            clk_freq: 0.0,
            num_read_cell_per_operation: 0,
            unit_height: 0.0,
            unit_width: 0.0,
            initialized: false,
        }
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn unit_area(&self) -> f64 {
        self.unit_height * self.unit_width
    }
}

impl SenseAmp for CurrentSenseAmp {
    fn initialize(
        &mut self,
        num_col: usize,
        mode: SenseAmpMode,
        clk_freq: f64,
        num_read_cell_per_operation: usize,
    ) -> Result<(), CircuitError> {
        if self.initialized {
            warn!("current sense amp already initialized");
            return Ok(());
        }

        self.num_col = num_col;
        self.mode = mode;
        self.clk_freq = clk_freq;
        self.num_read_cell_per_operation = num_read_cell_per_operation;
        self.initialized = true;
        Ok(())
    }

    fn calculate_unit_area(&mut self) -> Result<(), CircuitError> {
        if !self.initialized {
            return Err(CircuitError::NotInitialized("CurrentSenseAmp"));
        }

        let feature_size = self.params.feature_size();
        self.unit_height = self.footprint.height * feature_size;
        self.unit_width = self.footprint.width * feature_size;
        Ok(())
    }

    fn calculate_area(&mut self, dimension: f64) -> Result<(), CircuitError> {
        if !self.initialized {
            return Err(CircuitError::NotInitialized("CurrentSenseAmp"));
        }
        if !(dimension > 0.0 && dimension.is_finite()) {
            crate::invalid_arg!("sense amp array dimension must be positive but got {}", dimension);
        }
        if self.unit_width == 0.0 {
            self.calculate_unit_area()?;
        }

        self.unit.reset_geometry();
        if self.num_col == 0 {
            return Ok(());
        }

        let cells_per_row = ((dimension / self.unit_width).floor() as usize).max(1);
        let num_rows = self.num_col.div_ceil(cells_per_row);
        self.unit.width = dimension.max(self.unit_width);
        self.unit.height = num_rows as f64 * self.unit_height;
        self.unit.area = self.unit.height * self.unit.width;

        debug!(
            "current sense amp: {} cells in {} rows of {}, area {:e}",
            self.num_col, num_rows, cells_per_row, self.unit.area,
        );
        Ok(())
    }

    fn area(&self) -> f64 {
        self.unit.area
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use crate::tech::Roadmap;
    use super::*;

    fn sense_amp(num_col: usize) -> CurrentSenseAmp {
        let params = Arc::new(DeviceParams::new(100, Roadmap::LowPower, 1e3, 1e5, 64));
        let mut sa = CurrentSenseAmp::with_footprint(params, SenseAmpFootprint::new(20.0, 10.0));
        sa.initialize(num_col, SenseAmpMode::default(), 1e9, 8).unwrap();
        sa
    }

    #[test]
    fn test_unit_area() {
        let mut sa = sense_amp(4);
        sa.calculate_unit_area().unwrap();
        assert_relative_eq!(sa.unit_height, 2e-6, max_relative = 1e-12);
        assert_relative_eq!(sa.unit_width, 1e-6, max_relative = 1e-12);
        assert_relative_eq!(sa.unit_area(), 2e-12, max_relative = 1e-12);
    }

    #[test]
    fn test_single_row() {
        // 8 cells of 1um fit into a 10um row
        let mut sa = sense_amp(8);
        sa.calculate_unit_area().unwrap();
        sa.calculate_area(10e-6).unwrap();
        assert_relative_eq!(sa.unit.height, 2e-6, max_relative = 1e-12);
        assert_relative_eq!(sa.area(), 20e-12, max_relative = 1e-9);
    }

    #[test]
    fn test_multiple_rows() {
        let mut sa = sense_amp(25);
        sa.calculate_area(10.5e-6).unwrap();
        assert_relative_eq!(sa.unit.height, 6e-6, max_relative = 1e-12);
        assert_relative_eq!(sa.area(), 6e-6 * 10.5e-6, max_relative = 1e-9);
    }

    #[test]
    fn test_narrow_dimension() {
        let mut sa = sense_amp(3);
        sa.calculate_area(0.5e-6).unwrap();
        assert_relative_eq!(sa.unit.width, 1e-6, max_relative = 1e-12);
        assert_relative_eq!(sa.unit.height, 6e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_misuse() {
        let params = Arc::new(DeviceParams::new(100, Roadmap::LowPower, 1e3, 1e5, 64));
        let mut sa = CurrentSenseAmp::new(params);
        assert!(matches!(sa.calculate_area(1e-6), Err(CircuitError::NotInitialized(_))));

        let mut sa = sense_amp(3);
        assert!(matches!(sa.calculate_area(0.0), Err(CircuitError::InvalidArguments(_))));
        assert!(matches!(sa.calculate_area(f64::NAN), Err(CircuitError::InvalidArguments(_))));
    }

    #[test]
    fn test_initialize_once() {
        let mut sa = sense_amp(3);
        sa.initialize(99, SenseAmpMode { parallel: true, row_by_row: true }, 0.0, 1).unwrap();
        assert_eq!(sa.num_col, 3);
        assert_eq!(sa.mode, SenseAmpMode::default());
    }
}
