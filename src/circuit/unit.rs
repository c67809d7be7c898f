use std::fmt::Display;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Post processing applied to a circuit's geometry once its area is known
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum AreaModify {
    #[default]
    #[serde(rename = "none")]
    None,

    /// Re-layout into a square of the same area
    #[serde(rename = "magic")]
    Magic,

    /// Force the geometry to the caller's height and width
    #[serde(rename = "override")]
    Override,
}

/// Geometry and per-call metrics every peripheral circuit reports.
///
/// Units: m, m², s, J, W.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionUnit {
    pub area: f64,
    pub height: f64,
    pub width: f64,
    pub new_height: f64,
    pub new_width: f64,

    pub read_latency: f64,
    pub read_dynamic_energy: f64,
    pub leakage: f64,
}

impl FunctionUnit {
    pub fn reset_geometry(&mut self) {
        self.area = 0.0;
        self.height = 0.0;
        self.width = 0.0;
    }

    pub fn modify_layout(&mut self, option: AreaModify) {
        match option {
            AreaModify::None => {}
            AreaModify::Magic => self.magic_layout(),
            AreaModify::Override => self.override_layout(),
        }
    }

    pub fn magic_layout(&mut self) {
        self.height = self.area.sqrt();
        self.width = if self.height > 0.0 { self.area / self.height } else { 0.0 };
    }

    /// Only a fully specified target replaces the geometry
    pub fn override_layout(&mut self) {
        if self.new_height != 0.0 && self.new_width != 0.0 {
            self.height = self.new_height;
            self.width = self.new_width;
            self.area = self.height * self.width;
        }
    }

    pub fn print_property(&self, name: &str) {
        info!("---------------------- {} ----------------------", name);
        info!("{}", self);
    }
}

impl Display for FunctionUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "area = {:e} m^2 (height = {:e} m, width = {:e} m), read latency = {:e} s, read dynamic energy = {:e} J, leakage = {:e} W",
            self.area, self.height, self.width,
            self.read_latency, self.read_dynamic_energy, self.leakage,
        )
    }
}
