#[derive(Debug, thiserror::Error)]
pub enum TechError {
    #[error("technology node must be positive")]
    ZeroTechNode,

    #[error("resistance '{0}' must be finite and non negative but got {1}")]
    InvalidResistance(&'static str, f64),

    #[error("off resistance {off} must be larger than on resistance {on}")]
    ResistanceOrder { on: f64, off: f64 },

    #[error("sub array must have at least one row")]
    ZeroRows,
}
