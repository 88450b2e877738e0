//! Chart type selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of chart types offered by the chart-type dropdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Pie,
}

impl ChartKind {
    /// Every variant, in dropdown order
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Bar, ChartKind::Pie];

    /// Dropdown value
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }

    /// Dropdown label
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Pie => "Pie Chart",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value that names no chart type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported chart type: {0:?} (expected one of line, bar, pie)")]
pub struct UnknownChartKind(pub String);

impl FromStr for ChartKind {
    type Err = UnknownChartKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownChartKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_variant() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.as_str().parse::<ChartKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_case_variants() {
        assert!("scatter".parse::<ChartKind>().is_err());
        assert!("Line".parse::<ChartKind>().is_err());
        assert!("".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_default_is_line() {
        assert_eq!(ChartKind::default(), ChartKind::Line);
    }
}
