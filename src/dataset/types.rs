//! Dataset row type

use serde::{Deserialize, Serialize};

/// One observation of the Gapminder table.
///
/// Field names on the wire follow the CSV header (`lifeExp`, `pop`,
/// `gdpPercap`) so the table view shows the familiar column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub country: String,
    pub continent: String,
    pub year: i32,
    #[serde(rename = "lifeExp")]
    pub life_expectancy: f64,
    #[serde(rename = "pop")]
    pub population: u64,
    #[serde(rename = "gdpPercap")]
    pub gdp_per_capita: f64,
}

impl Row {
    /// Column names in display order
    pub const COLUMNS: [&'static str; 6] =
        ["country", "continent", "year", "lifeExp", "pop", "gdpPercap"];
}
