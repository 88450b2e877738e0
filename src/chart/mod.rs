//! Chart Construction
//!
//! Builds chart figures from tabular data. Figures are plain serde types that
//! the browser client hands to Plotly.js unchanged.

mod figure;
mod kind;

pub use figure::{Annotation, Axis, AxisValues, Figure, FigureLayout, Title, Trace};
pub use kind::{ChartKind, UnknownChartKind};
