//! Empirical fits of SPICE sweeps used by the sense amplifier models.
//!
//! Every curve is a closed-form function of the column resistance or of the
//! reference/column resistance ratio, tabulated per technology node.
mod timing;
mod power;
pub use timing::*;
pub use power::*;

/// One nanosecond in seconds
pub const NANO: f64 = 1e-9;
/// One micro unit (µW, µA) in SI
pub const MICRO: f64 = 1e-6;

/// Resistance all log fits are normalized against, in ohms
pub const REFERENCE_RESISTANCE: f64 = 1000.0;

/// Polynomial with coefficients ordered from the highest power down to the constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polynomial<const N: usize> {
    pub coefficients: [f64; N],
}

impl<const N: usize> Polynomial<N> {
    pub const fn new(coefficients: [f64; N]) -> Self {
        Self { coefficients }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, c| acc * x + c)
    }
}

pub type Cubic = Polynomial<4>;
pub type Quartic = Polynomial<5>;

/// `y = slope * ln(R / 1kΩ) + intercept`, scaled into SI by `unit`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogFit {
    pub slope: f64,
    pub intercept: f64,
    pub unit: f64,
}

impl LogFit {
    pub const fn new(slope: f64, intercept: f64, unit: f64) -> Self {
        Self { slope, intercept, unit }
    }

    pub fn eval(&self, resistance: f64) -> f64 {
        (self.slope * (resistance / REFERENCE_RESISTANCE).ln() + self.intercept) * self.unit
    }
}

/// Zero resistance and resistance whose reciprocal vanishes stand for columns
/// that are shorted or disconnected; the fits are never evaluated on them.
#[inline]
pub fn is_open(resistance: f64) -> bool {
    1.0 / resistance == 0.0
}

#[inline]
pub fn is_short(resistance: f64) -> bool {
    resistance == 0.0
}
