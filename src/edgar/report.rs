use once_cell::sync::Lazy;
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

/// Filing categories accepted by the browse-edgar `type=` filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, EnumIter)]
pub enum ReportType {
    #[default]
    Form8K,
    Form10K,
    Form10Q,
    Form6K,
    Form20F,
    FormS1,
    FormDEF14A,
    Other(String),
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Form8K => write!(f, "8-K"),
            ReportType::Form10K => write!(f, "10-K"),
            ReportType::Form10Q => write!(f, "10-Q"),
            ReportType::Form6K => write!(f, "6-K"),
            ReportType::Form20F => write!(f, "20-F"),
            ReportType::FormS1 => write!(f, "S-1"),
            ReportType::FormDEF14A => write!(f, "DEF 14A"),
            ReportType::Other(s) => write!(f, "{}", s),
        }
    }
}

pub static REPORT_TYPES: Lazy<String> = Lazy::new(|| {
    ReportType::iter()
        .filter(|t| !matches!(t, ReportType::Other(_)))
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
});

impl ReportType {
    pub fn list_types() -> &'static str {
        &REPORT_TYPES
    }

    /// Like `from_str`, but only accepts the listed filing types.
    pub fn parse_known(s: &str) -> Result<ReportType, String> {
        match ReportType::from_str(s)? {
            ReportType::Other(other) => Err(format!(
                "Unknown filing type {:?}, expected one of: {}",
                other,
                ReportType::list_types()
            )),
            known => Ok(known),
        }
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<ReportType, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Filing type cannot be empty".to_string());
        }
        match trimmed.to_uppercase().as_str() {
            "8-K" => Ok(ReportType::Form8K),
            "10-K" => Ok(ReportType::Form10K),
            "10-Q" => Ok(ReportType::Form10Q),
            "6-K" => Ok(ReportType::Form6K),
            "20-F" => Ok(ReportType::Form20F),
            "S-1" => Ok(ReportType::FormS1),
            "DEF 14A" => Ok(ReportType::FormDEF14A),
            other => Ok(ReportType::Other(other.to_string())),
        }
    }
}
