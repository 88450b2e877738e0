//! Figure model
//!
//! Serialises to the JSON shape Plotly.js accepts for `Plotly.react`:
//! `{"data": [...traces], "layout": {...}}`.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Values along a categorical or continuous axis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValues {
    Integers(Vec<i64>),
    Numbers(Vec<f64>),
    Times(Vec<DateTime<Utc>>),
}

impl AxisValues {
    pub fn len(&self) -> usize {
        match self {
            AxisValues::Integers(v) => v.len(),
            AxisValues::Numbers(v) => v.len(),
            AxisValues::Times(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One plotted series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter {
        x: AxisValues,
        y: Vec<f64>,
        mode: &'static str,
    },
    Bar {
        x: AxisValues,
        y: Vec<f64>,
    },
    Pie {
        labels: AxisValues,
        values: Vec<f64>,
    },
}

impl Trace {
    /// Number of plotted points
    pub fn point_count(&self) -> usize {
        match self {
            Trace::Scatter { y, .. } | Trace::Bar { y, .. } => y.len(),
            Trace::Pie { values, .. } => values.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

/// Centered text shown over an empty or failed figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub showarrow: bool,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureLayout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

/// A complete chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

impl Figure {
    fn titled(title: impl Into<String>) -> FigureLayout {
        FigureLayout {
            title: Title { text: title.into() },
            xaxis: None,
            yaxis: None,
            annotations: Vec::new(),
        }
    }

    fn with_axes(mut layout: FigureLayout, x_label: &str, y_label: &str) -> FigureLayout {
        layout.xaxis = Some(Axis {
            title: Title { text: x_label.to_string() },
        });
        layout.yaxis = Some(Axis {
            title: Title { text: y_label.to_string() },
        });
        layout
    }

    /// Line chart of `y` against `x`
    pub fn line(title: impl Into<String>, x: AxisValues, y: Vec<f64>, labels: (&str, &str)) -> Self {
        Self {
            data: vec![Trace::Scatter { x, y, mode: "lines" }],
            layout: Self::with_axes(Self::titled(title), labels.0, labels.1),
        }
    }

    /// Bar chart of `y` against `x`
    pub fn bar(title: impl Into<String>, x: AxisValues, y: Vec<f64>, labels: (&str, &str)) -> Self {
        Self {
            data: vec![Trace::Bar { x, y }],
            layout: Self::with_axes(Self::titled(title), labels.0, labels.1),
        }
    }

    /// Pie chart of `values` named by `labels`
    pub fn pie(title: impl Into<String>, labels: AxisValues, values: Vec<f64>) -> Self {
        Self {
            data: vec![Trace::Pie { labels, values }],
            layout: Self::titled(title),
        }
    }

    /// A figure with no traces and a centered message
    pub fn empty(title: impl Into<String>, message: impl Into<String>) -> Self {
        let mut layout = Self::titled(title);
        layout.annotations.push(Annotation {
            text: message.into(),
            showarrow: false,
            xref: "paper",
            yref: "paper",
            x: 0.5,
            y: 0.5,
        });
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// Total plotted points across all traces
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::point_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
