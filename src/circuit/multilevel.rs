use std::sync::Arc;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use crate::{
    fit::{is_open, is_short, lp_timing_fit, read_power_fit, TimingFit, DEFAULT_SETTLING_TIME, NANO, OPEN_COLUMN_POWER},
    invalid_arg,
    tech::DeviceParams,
};
use super::{AreaModify, CircuitError, CurrentSenseAmp, FunctionUnit, ReferenceLadder, SenseAmp, SenseAmpMode};

/// Bounds applied to the slowest column of one read
pub const MIN_COLUMN_LATENCY: f64 = NANO;
pub const MAX_COLUMN_LATENCY: f64 = 10.0 * NANO;

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(pattern = "owned", build_fn(validate = "Self::validate"))]
pub struct SenseAmpConfig {
    pub num_col: usize,
    /// Number of quantization levels resolved per column
    pub level_output: usize,
    /// Clock frequency in Hz
    #[builder(default)]
    #[serde(default)]
    pub clk_freq: f64,
    #[builder(default = "1")]
    #[serde(default = "default_read_cells")]
    pub num_read_cell_per_operation: usize,
    /// Read all rows of the sub array at once
    #[builder(default)]
    #[serde(default)]
    pub parallel: bool,
}

fn default_read_cells() -> usize {
    1
}

impl SenseAmpConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.level_output {
            Some(level_output) if level_output < 2 => Err(format!("level output must be at least 2 but got {}", level_output)),
            _ => Ok(()),
        }
    }
}

/// Multi-level current sense amplifier reading a multi-bit value out of a
/// resistive crossbar column.
///
/// Each column owns one single-bit comparator per quantization boundary. Timing
/// and power come from fits of SPICE sweeps against the column resistance.
#[derive(Debug)]
pub struct MultilevelSenseAmp {
    params: Arc<DeviceParams>,
    sense_amp: Box<dyn SenseAmp>,
    config: Option<SenseAmpConfig>,
    ladder: ReferenceLadder,
    pub unit: FunctionUnit,
}

impl MultilevelSenseAmp {
    const NAME: &'static str = "MultilevelSenseAmp";

    pub fn new(params: Arc<DeviceParams>) -> Self {
        let sense_amp = CurrentSenseAmp::new(params.clone());
        Self::with_sense_amp(params, sense_amp)
    }

    pub fn with_sense_amp(params: Arc<DeviceParams>, sense_amp: impl SenseAmp + 'static) -> Self {
        Self {
            params,
            sense_amp: Box::new(sense_amp),
            config: None,
            ladder: ReferenceLadder::default(),
            unit: FunctionUnit::default(),
        }
    }

    /// Build the reference ladder and the comparator array. Only the first call has an effect.
    pub fn initialize(&mut self, config: SenseAmpConfig) -> Result<(), CircuitError> {
        if self.initialized() {
            warn!("[{}] already initialized", Self::NAME);
            return Ok(());
        }
        if config.level_output < 2 {
            invalid_arg!("level output must be at least 2 but got {}", config.level_output);
        }

        let ladder = ReferenceLadder::from_device(&self.params, config.level_output, config.parallel);
        self.sense_amp.initialize(
            (config.level_output - 1) * config.num_col,
            SenseAmpMode::default(),
            config.clk_freq,
            config.num_read_cell_per_operation,
        )?;

        debug!("[{}] reference ladder {:?}", Self::NAME, ladder.levels());
        self.ladder = ladder;
        self.config = Some(config);
        Ok(())
    }

    /// Geometry under a height or width constraint (m). The width wins when both are given.
    pub fn calculate_area(&mut self, height: f64, width: f64, option: AreaModify) -> Result<(), CircuitError> {
        self.check_initialized()?;
        self.unit.reset_geometry();

        let dimension = if width != 0.0 {
            width
        } else if height != 0.0 {
            height
        } else {
            error!("[{}] no width or height assigned", Self::NAME);
            return Err(CircuitError::MissingAreaConstraint(Self::NAME));
        };

        self.sense_amp.calculate_unit_area()?;
        self.sense_amp.calculate_area(dimension)?;
        self.unit.area = self.sense_amp.area();
        if width != 0.0 {
            self.unit.width = width;
            self.unit.height = self.unit.area / width;
        } else {
            self.unit.height = height;
            self.unit.width = self.unit.area / height;
        }

        self.unit.new_height = height;
        self.unit.new_width = width;
        self.unit.modify_layout(option);
        Ok(())
    }

    /// Latency of `num_reads` reads with `num_col_muxed` columns sharing each amplifier
    pub fn calculate_latency(&mut self, column_resistances: &[f64], num_col_muxed: f64, num_reads: f64) -> Result<(), CircuitError> {
        self.check_initialized()?;
        self.unit.read_latency = 0.0;

        let mut latency_col: f64 = 0.0;
        for &column_res in column_resistances {
            let t_col = self.column_latency(column_res);
            if !column_res.is_nan() {
                latency_col = latency_col.max(t_col);
            }
            latency_col = latency_col.clamp(MIN_COLUMN_LATENCY, MAX_COLUMN_LATENCY);
        }

        self.unit.read_latency = latency_col * num_col_muxed * num_reads;
        debug!("[{}] read latency {:e} s over {} columns", Self::NAME, self.unit.read_latency, column_resistances.len());
        Ok(())
    }

    /// Dynamic read energy of `num_reads` reads. Leakage is not modeled and stays zero.
    pub fn calculate_power(&mut self, column_resistances: &[f64], num_reads: f64) -> Result<(), CircuitError> {
        self.check_initialized()?;
        self.unit.leakage = 0.0;
        self.unit.read_dynamic_energy = 0.0;

        let energy: f64 = column_resistances.iter()
            .filter(|column_res| !column_res.is_nan())
            .map(|&column_res| self.column_energy(column_res))
            .sum();

        self.unit.read_dynamic_energy = energy * num_reads;
        debug!("[{}] read dynamic energy {:e} J over {} columns", Self::NAME, self.unit.read_dynamic_energy, column_resistances.len());
        Ok(())
    }

    /// Worst settling time over the reference levels for one column (s).
    /// Shorted or open columns do not take part in the read and report zero.
    pub fn column_latency(&self, column_res: f64) -> f64 {
        if is_short(column_res) || is_open(column_res) {
            return 0.0;
        }
        if self.params.is_high_performance() {
            return DEFAULT_SETTLING_TIME;
        }

        match lp_timing_fit(self.params.tech_node) {
            Some(fit) => self.level_settling_times(fit, column_res).fold(0.0, f64::max),
            None => DEFAULT_SETTLING_TIME,
        }
    }

    /// Static power drawn while reading one column (W)
    pub fn column_read_power(&self, column_res: f64) -> f64 {
        if is_open(column_res) {
            OPEN_COLUMN_POWER
        } else if is_short(column_res) {
            0.0
        } else {
            read_power_fit(self.params.roadmap, self.params.tech_node).eval(column_res)
        }
    }

    /// Energy of resolving one column against every reference level (J)
    pub fn column_energy(&self, column_res: f64) -> f64 {
        if is_short(column_res) || is_open(column_res) {
            return 0.0;
        }

        let power = self.column_read_power(column_res);
        let flat = power * DEFAULT_SETTLING_TIME * self.ladder.len() as f64;
        if self.params.is_high_performance() {
            return flat;
        }

        match lp_timing_fit(self.params.tech_node) {
            Some(fit) => self.level_settling_times(fit, column_res).map(|t| power * t).sum(),
            None => flat,
        }
    }

    fn level_settling_times<'a>(&'a self, fit: &'a TimingFit, column_res: f64) -> impl Iterator<Item = f64> + 'a {
        let t_max = fit.max_settling_time(column_res);
        self.ladder.upper_levels()
            .iter()
            .map(move |r_ref| fit.settling_time(t_max, r_ref / column_res))
    }

    fn check_initialized(&self) -> Result<(), CircuitError> {
        if self.initialized() {
            Ok(())
        } else {
            error!("[{}] require initialization first", Self::NAME);
            Err(CircuitError::NotInitialized(Self::NAME))
        }
    }

    pub fn print_property(&self, name: &str) {
        self.unit.print_property(name);
    }
}

impl MultilevelSenseAmp {
    pub fn initialized(&self) -> bool {
        self.config.is_some()
    }

    pub fn config(&self) -> Option<&SenseAmpConfig> {
        self.config.as_ref()
    }

    pub fn ladder(&self) -> &ReferenceLadder {
        &self.ladder
    }

    pub fn params(&self) -> &DeviceParams {
        &self.params
    }

    pub fn sense_amp(&self) -> &dyn SenseAmp {
        self.sense_amp.as_ref()
    }

    pub fn area(&self) -> f64 {
        self.unit.area
    }

    pub fn height(&self) -> f64 {
        self.unit.height
    }

    pub fn width(&self) -> f64 {
        self.unit.width
    }

    pub fn read_latency(&self) -> f64 {
        self.unit.read_latency
    }

    pub fn leakage(&self) -> f64 {
        self.unit.leakage
    }

    pub fn read_dynamic_energy(&self) -> f64 {
        self.unit.read_dynamic_energy
    }
}
