//! UI Layout Builder
//!
//! Declares the static widget tree once at startup. The tree is served as
//! JSON and rendered by the browser client; nothing here changes afterwards.

mod component;
pub mod ids;

pub use component::{Component, DropdownOption, TableAction, TableColumn};
pub use ids::{InvalidPropId, PropId};

use std::time::Duration;

use crate::chart::ChartKind;
use crate::dataset::{Dataset, Row};
use ids::*;

/// Country selected on first render
pub const DEFAULT_COUNTRY: &str = "India";

/// Rows per page in the data table
pub const TABLE_PAGE_SIZE: usize = 10;

/// The complete page
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Layout {
    pub title: String,
    pub root: Component,
}

impl Layout {
    /// Build the dashboard page for a dataset
    pub fn build(dataset: &Dataset, live_period: Duration) -> Self {
        let title = "📊 Advanced Data Dashboard".to_string();

        let root = Component::Container {
            fluid: true,
            children: vec![
                Component::row(vec![Component::col(
                    12,
                    Component::heading(1, &title, "text-center mt-4"),
                )]),
                Component::row_with_class(
                    "mb-3",
                    vec![Component::col(
                        3,
                        Component::button(THEME_TOGGLE, "Toggle Theme", "info"),
                    )],
                ),
                Component::row(vec![
                    Component::col(4, country_dropdown(dataset)),
                    Component::col(4, chart_type_dropdown()),
                ]),
                Component::row(vec![
                    Component::col(8, Component::graph(MAIN_CHART)),
                    Component::col(4, Component::graph(PIE_CHART)),
                ]),
                Component::row(vec![
                    Component::col(12, Component::heading(4, "📡 Live Data Stream", "mt-4")),
                    Component::col(12, Component::graph(LIVE_GRAPH)),
                    Component::col(
                        12,
                        Component::Interval {
                            id: LIVE_INTERVAL.to_string(),
                            interval_ms: live_period.as_millis() as u64,
                            n_intervals: 0,
                        },
                    ),
                ]),
                Component::row(vec![
                    Component::col(12, Component::heading(4, "✍️ User Data Entry", "mt-4")),
                    Component::col(
                        4,
                        Component::Input {
                            id: USER_INPUT.to_string(),
                            input_type: "text".to_string(),
                            placeholder: "Enter something...".to_string(),
                            value: String::new(),
                        },
                    ),
                    Component::col(2, Component::button(SUBMIT_BUTTON, "Submit", "success")),
                ]),
                Component::row(vec![
                    Component::col(12, Component::heading(4, "📋 Data Table", "mt-4")),
                    Component::col(12, data_table(dataset)),
                ]),
            ],
        };

        Self { title, root }
    }

    /// Find an addressable component by id
    pub fn find(&self, id: &str) -> Option<&Component> {
        let mut found = None;
        self.root.walk(&mut |node| {
            if found.is_none() && node.id() == Some(id) {
                found = Some(node);
            }
        });
        found
    }

    /// Whether the page has the given component property
    pub fn has_prop(&self, prop: &PropId) -> bool {
        self.find(&prop.component)
            .map(|c| c.properties().contains(&prop.property.as_str()))
            .unwrap_or(false)
    }

    /// Ids of all addressable components, in document order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.root.walk(&mut |node| {
            if let Some(id) = node.id() {
                ids.push(id);
            }
        });
        ids
    }

    /// Value a dropdown starts with
    pub fn initial_value(&self, id: &str) -> Option<&str> {
        match self.find(id)? {
            Component::Dropdown { value, .. } | Component::Input { value, .. } => {
                Some(value.as_str())
            }
            _ => None,
        }
    }
}

fn country_dropdown(dataset: &Dataset) -> Component {
    let options = dataset
        .countries()
        .iter()
        .map(|c| DropdownOption {
            label: c.clone(),
            value: c.clone(),
        })
        .collect();

    let value = if dataset.contains_country(DEFAULT_COUNTRY) {
        DEFAULT_COUNTRY.to_string()
    } else {
        // a loaded dataset always has at least one country
        dataset.countries().first().cloned().unwrap_or_default()
    };

    Component::Dropdown {
        id: COUNTRY_DROPDOWN.to_string(),
        options,
        value,
        clearable: false,
    }
}

fn chart_type_dropdown() -> Component {
    Component::Dropdown {
        id: CHART_TYPE.to_string(),
        options: ChartKind::ALL
            .iter()
            .map(|kind| DropdownOption {
                label: kind.label().to_string(),
                value: kind.as_str().to_string(),
            })
            .collect(),
        value: ChartKind::default().as_str().to_string(),
        clearable: false,
    }
}

fn data_table(dataset: &Dataset) -> Component {
    Component::DataTable {
        id: DATA_TABLE.to_string(),
        columns: Row::COLUMNS
            .iter()
            .map(|c| TableColumn {
                name: c.to_string(),
                id: c.to_string(),
            })
            .collect(),
        data: dataset.rows().to_vec(),
        page_size: TABLE_PAGE_SIZE,
        sort_action: TableAction::Native,
        filter_action: TableAction::Native,
    }
}
