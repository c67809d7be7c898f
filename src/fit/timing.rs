use super::{Cubic, LogFit, Quartic, NANO};

/// Ratios at or beyond these bounds are outside the calibrated sweep
pub const RATIO_UPPER_LIMIT: f64 = 20.0;
pub const RATIO_LOWER_LIMIT: f64 = 0.05;
/// Ratios up to this bound settle along the cubic shape, above it along the quartic
pub const RATIO_LOW_BOUND: f64 = 0.9;

/// Settling time assumed whenever no calibrated curve applies
pub const DEFAULT_SETTLING_TIME: f64 = NANO;

/// Settling time of one comparison of a low power multi-level sense amplifier.
///
/// `t_max` gives the worst case settling time of a column, the two shape
/// polynomials scale it by the reference/column resistance ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingFit {
    pub t_max: LogFit,
    pub cubic: Cubic,
    pub quartic: Quartic,
}

impl TimingFit {
    pub const fn new(t_max: LogFit, cubic: Cubic, quartic: Quartic) -> Self {
        Self { t_max, cubic, quartic }
    }

    pub fn max_settling_time(&self, column_res: f64) -> f64 {
        self.t_max.eval(column_res)
    }

    /// Settling time against one reference given the column's `t_max`
    pub fn settling_time(&self, t_max: f64, ratio: f64) -> f64 {
        if ratio >= RATIO_UPPER_LIMIT || ratio <= RATIO_LOWER_LIMIT {
            DEFAULT_SETTLING_TIME
        } else if ratio <= RATIO_LOW_BOUND {
            t_max * self.cubic.eval(ratio)
        } else {
            t_max * self.quartic.eval(ratio)
        }
    }
}

const FIT_130NM: TimingFit = TimingFit::new(
    LogFit::new(0.2679, 0.0478, NANO),
    Cubic::new([3.915, -5.3996, 2.4653, 0.3856]),
    Quartic::new([0.0004, -0.0087, 0.0742, -0.2725, 1.2211]),
);

const FIT_90NM: TimingFit = TimingFit::new(
    LogFit::new(0.0586, 1.41, NANO),
    Cubic::new([3.726, -5.651, 2.8249, 0.3574]),
    Quartic::new([0.0000008, -0.00007, 0.0017, -0.0188, 0.9835]),
);

const FIT_65NM: TimingFit = TimingFit::new(
    LogFit::new(0.1239, 0.6642, NANO),
    Cubic::new([1.3899, -2.6913, 2.0483, 0.3202]),
    Quartic::new([0.0036, -0.0363, 0.1043, -0.0346, 1.0512]),
);

const FIT_45NM: TimingFit = TimingFit::new(
    LogFit::new(0.0714, 0.7651, NANO),
    Cubic::new([3.7949, -5.6685, 2.6492, 0.4807]),
    Quartic::new([0.000001, -0.00006, 0.0001, -0.0171, 1.0057]),
);

/// Low power timing fits, 32nm reuses the 45nm sweep
pub const LP_TIMING_FITS: &[(u32, TimingFit)] = &[
    (130, FIT_130NM),
    (90, FIT_90NM),
    (65, FIT_65NM),
    (45, FIT_45NM),
    (32, FIT_45NM),
];

/// `None` for nodes without a calibrated sweep (22nm and below)
pub fn lp_timing_fit(tech_node: u32) -> Option<&'static TimingFit> {
    LP_TIMING_FITS.iter()
        .find(|(node, _)| *node == tech_node)
        .map(|(_, fit)| fit)
}
