//! Binding functions
//!
//! Each function maps current input values (and the dataset or a live
//! snapshot) to new output content. None of them touch shared state.

use serde_json::Value;

use super::error::BindingResult;
use super::BindingContext;
use crate::chart::{AxisValues, ChartKind, Figure};
use crate::dataset::Dataset;
use crate::layout::ids::*;
use crate::layout::PropId;
use crate::live::Sample;

/// Label of the theme toggle after `n_clicks` clicks
pub fn theme_label(n_clicks: u64) -> &'static str {
    if n_clicks % 2 == 0 {
        "Dark Mode"
    } else {
        "Light Mode"
    }
}

/// GDP-per-capita chart of one country
pub fn main_chart(dataset: &Dataset, country: &str, kind: ChartKind) -> Figure {
    let rows: Vec<_> = dataset.rows_for(country).collect();
    let title = match kind {
        ChartKind::Line | ChartKind::Bar => format!("GDP Per Capita of {}", country),
        ChartKind::Pie => "GDP Share Over Years".to_string(),
    };

    if rows.is_empty() {
        return Figure::empty(title, no_data_message(country));
    }

    let years = AxisValues::Integers(rows.iter().map(|r| i64::from(r.year)).collect());
    let gdp: Vec<f64> = rows.iter().map(|r| r.gdp_per_capita).collect();

    match kind {
        ChartKind::Line => Figure::line(title, years, gdp, ("year", "gdpPercap")),
        ChartKind::Bar => Figure::bar(title, years, gdp, ("year", "gdpPercap")),
        ChartKind::Pie => Figure::pie(title, years, gdp),
    }
}

/// Population share per year of one country
pub fn population_pie(dataset: &Dataset, country: &str) -> Figure {
    let title = format!("Population Distribution in {}", country);
    let rows: Vec<_> = dataset.rows_for(country).collect();

    if rows.is_empty() {
        return Figure::empty(title, no_data_message(country));
    }

    Figure::pie(
        title,
        AxisValues::Integers(rows.iter().map(|r| i64::from(r.year)).collect()),
        rows.iter().map(|r| r.population as f64).collect(),
    )
}

/// Line chart of the live buffer contents
pub fn live_graph(samples: &[Sample]) -> Figure {
    let title = "Live Sensor Data";
    if samples.is_empty() {
        return Figure::empty(title, "Waiting for data...");
    }

    Figure::line(
        title,
        AxisValues::Times(samples.iter().map(|s| s.timestamp).collect()),
        samples.iter().map(|s| s.value as f64).collect(),
        ("Time", "Value"),
    )
}

/// Submit button label
pub fn submit_label(n_clicks: u64, text: Option<&str>) -> String {
    if n_clicks > 0 {
        format!("Submitted: {}", text.unwrap_or_default())
    } else {
        "Submit".to_string()
    }
}

fn no_data_message(country: &str) -> String {
    if country.is_empty() {
        "No country selected".to_string()
    } else {
        format!("No data for {}", country)
    }
}

// Adapters from request values to the functions above

pub(super) fn toggle_theme(ctx: &BindingContext<'_>) -> BindingResult<Vec<Value>> {
    let n_clicks = ctx.inputs.count(&PropId::new(THEME_TOGGLE, "n_clicks"))?;
    Ok(vec![Value::from(theme_label(n_clicks))])
}

pub(super) fn update_main_chart(ctx: &BindingContext<'_>) -> BindingResult<Vec<Value>> {
    let country = ctx
        .inputs
        .text(&PropId::new(COUNTRY_DROPDOWN, "value"))?
        .unwrap_or_default();
    let kind = match ctx.inputs.text(&PropId::new(CHART_TYPE, "value"))? {
        Some(value) => value.parse::<ChartKind>()?,
        None => ChartKind::default(),
    };

    Ok(vec![serde_json::to_value(main_chart(ctx.dataset, country, kind))?])
}

pub(super) fn update_population_pie(ctx: &BindingContext<'_>) -> BindingResult<Vec<Value>> {
    let country = ctx
        .inputs
        .text(&PropId::new(COUNTRY_DROPDOWN, "value"))?
        .unwrap_or_default();

    Ok(vec![serde_json::to_value(population_pie(ctx.dataset, country))?])
}

pub(super) fn update_live_graph(ctx: &BindingContext<'_>) -> BindingResult<Vec<Value>> {
    Ok(vec![serde_json::to_value(live_graph(ctx.live))?])
}

pub(super) fn handle_submit(ctx: &BindingContext<'_>) -> BindingResult<Vec<Value>> {
    let n_clicks = ctx.inputs.count(&PropId::new(SUBMIT_BUTTON, "n_clicks"))?;
    let text = ctx.inputs.text(&PropId::new(USER_INPUT, "value"))?;
    Ok(vec![Value::from(submit_label(n_clicks, text))])
}
