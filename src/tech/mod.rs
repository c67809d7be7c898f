mod error;
mod types;
pub use error::*;
pub use types::*;

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::{ErrorContext, MlSenseResult};

/// Process and device parameters shared by every circuit of one simulation run.
///
/// Circuits hold it behind an `Arc` and never write to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceParams {
    /// Technology node in nanometers
    pub tech_node: u32,
    pub roadmap: Roadmap,
    /// Fully-on cell resistance in ohms
    pub resistance_on: f64,
    /// Fully-off cell resistance in ohms
    pub resistance_off: f64,
    pub num_row_subarray: usize,
}

impl DeviceParams {
    pub fn new(tech_node: u32, roadmap: Roadmap, resistance_on: f64, resistance_off: f64, num_row_subarray: usize) -> Self {
        Self { tech_node, roadmap, resistance_on, resistance_off, num_row_subarray }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> MlSenseResult<Self> {
        let path: &Path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read device params '{}'", path.display()))?;
        let params: DeviceParams = serde_json::from_str(&content).context("parse device params")?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), TechError> {
        if self.tech_node == 0 {
            return Err(TechError::ZeroTechNode);
        }
        if !self.resistance_on.is_finite() || self.resistance_on < 0.0 {
            return Err(TechError::InvalidResistance("resistance_on", self.resistance_on));
        }
        if !self.resistance_off.is_finite() || self.resistance_off < 0.0 {
            return Err(TechError::InvalidResistance("resistance_off", self.resistance_off));
        }
        if self.resistance_off <= self.resistance_on {
            return Err(TechError::ResistanceOrder { on: self.resistance_on, off: self.resistance_off });
        }
        if self.num_row_subarray == 0 {
            return Err(TechError::ZeroRows);
        }
        Ok(())
    }

    /// Feature size in meters
    #[inline]
    pub fn feature_size(&self) -> f64 {
        self.tech_node as f64 * 1e-9
    }

    pub fn is_high_performance(&self) -> bool {
        self.roadmap == Roadmap::HighPerformance
    }

    /// On/off resistance seen by one read. Reading all rows of the sub array at
    /// once puts them in parallel on the bit line.
    pub fn read_resistance_range(&self, parallel: bool) -> (f64, f64) {
        if parallel {
            let rows = self.num_row_subarray as f64;
            (self.resistance_on / rows, self.resistance_off / rows)
        } else {
            (self.resistance_on, self.resistance_off)
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use super::*;

    fn lp65() -> DeviceParams {
        DeviceParams::new(65, Roadmap::LowPower, 6e3, 6e5, 128)
    }

    #[test]
    fn test_parse_params() {
        let json = r#"{
            "tech_node": 22,
            "roadmap": "HP",
            "resistance_on": 240000.0,
            "resistance_off": 2400000.0,
            "num_row_subarray": 64
        }"#;
        let params: DeviceParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.roadmap, Roadmap::HighPerformance);
        assert_eq!(params.num_row_subarray, 64);
        assert!(params.validate().is_ok());
        assert_relative_eq!(params.feature_size(), 22e-9);
    }

    #[test]
    fn test_read_resistance_range() {
        let params = lp65();
        assert_eq!(params.read_resistance_range(false), (6e3, 6e5));
        let (on, off) = params.read_resistance_range(true);
        assert_relative_eq!(on, 6e3 / 128.0);
        assert_relative_eq!(off, 6e5 / 128.0);
    }

    #[test]
    fn test_validate() {
        let mut params = lp65();
        params.num_row_subarray = 0;
        assert!(matches!(params.validate(), Err(TechError::ZeroRows)));

        let mut params = lp65();
        params.resistance_off = params.resistance_on;
        assert!(matches!(params.validate(), Err(TechError::ResistanceOrder { .. })));

        let mut params = lp65();
        params.resistance_on = f64::NAN;
        assert!(matches!(params.validate(), Err(TechError::InvalidResistance("resistance_on", _))));

        let mut params = lp65();
        params.tech_node = 0;
        assert!(matches!(params.validate(), Err(TechError::ZeroTechNode)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DeviceParams::load("./no/such/device.json").unwrap_err();
        assert!(err.to_string().contains("read device params"));
    }
}
