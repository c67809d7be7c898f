use crate::tech::Roadmap;
use super::{LogFit, MICRO};

/// Read power of a column whose reciprocal resistance vanishes
pub const OPEN_COLUMN_POWER: f64 = MICRO;

const fn micro(slope: f64, intercept: f64) -> LogFit {
    LogFit::new(slope, intercept, MICRO)
}

/// High performance read power fits; the last entry covers every smaller node
pub const HP_POWER_FITS: &[(u32, LogFit)] = &[
    (130, micro(0.00001, 9.8898)),
    (90, micro(0.0002, 9.09)),
    (65, micro(0.0001, 7.9579)),
    (45, micro(0.0037, 7.7017)),
    (32, micro(0.0064, 7.9648)),
    (22, micro(0.0087, 3.1939)),
    (14, micro(0.0087, 2.2)),
    (10, micro(0.0087, 1.7)),
    (7, micro(0.0087, 1.2)),
];

/// Low power read power fits; the last entry covers every smaller node
pub const LP_POWER_FITS: &[(u32, LogFit)] = &[
    (130, micro(0.2811, 7.0809)),
    (90, micro(0.0578, 7.6102)),
    (65, micro(0.0710, 6.4147)),
    (45, micro(0.0710, 6.4147)),
    (32, micro(0.0251, 4.7835)),
    (22, micro(0.0516, 2.2349)),
    (14, micro(0.0516, 1.5)),
    (10, micro(0.0516, 1.1)),
    (7, micro(0.0516, 0.7)),
];

pub fn power_fits(roadmap: Roadmap) -> &'static [(u32, LogFit)] {
    match roadmap {
        Roadmap::HighPerformance => HP_POWER_FITS,
        Roadmap::LowPower => LP_POWER_FITS,
    }
}

/// Nodes without their own entry fall back to the 7nm fit
pub fn read_power_fit(roadmap: Roadmap, tech_node: u32) -> &'static LogFit {
    let fits = power_fits(roadmap);
    fits.iter()
        .find(|(node, _)| *node == tech_node)
        .or_else(|| fits.last())
        .map(|(_, fit)| fit)
        .unwrap_or(&CATCH_ALL)
}

const CATCH_ALL: LogFit = micro(0.0516, 0.7);

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use super::*;

    #[test]
    fn test_tables_cover_same_nodes() {
        let hp: Vec<u32> = HP_POWER_FITS.iter().map(|(node, _)| *node).collect();
        let lp: Vec<u32> = LP_POWER_FITS.iter().map(|(node, _)| *node).collect();
        assert_eq!(hp, lp);
        assert_eq!(hp.last(), Some(&7));
    }

    #[test]
    fn test_lookup() {
        let fit = read_power_fit(Roadmap::HighPerformance, 45);
        assert_relative_eq!(fit.eval(1000.0), 7.7017e-6, max_relative = 1e-12);

        let fit = read_power_fit(Roadmap::LowPower, 22);
        assert_relative_eq!(fit.eval(1000.0), 2.2349e-6, max_relative = 1e-12);

        // 45nm low power reuses the 65nm sweep
        assert_eq!(read_power_fit(Roadmap::LowPower, 45), read_power_fit(Roadmap::LowPower, 65));
    }

    #[test]
    fn test_catch_all() {
        assert_eq!(read_power_fit(Roadmap::HighPerformance, 5), read_power_fit(Roadmap::HighPerformance, 7));
        assert_eq!(read_power_fit(Roadmap::LowPower, 180), read_power_fit(Roadmap::LowPower, 7));
        assert_eq!(read_power_fit(Roadmap::LowPower, 3), &CATCH_ALL);
    }
}
