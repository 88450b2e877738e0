//! Component identifiers and property addresses

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const THEME_TOGGLE: &str = "theme-toggle";
pub const COUNTRY_DROPDOWN: &str = "country-dropdown";
pub const CHART_TYPE: &str = "chart-type";
pub const MAIN_CHART: &str = "main-chart";
pub const PIE_CHART: &str = "pie-chart";
pub const LIVE_GRAPH: &str = "live-graph";
pub const LIVE_INTERVAL: &str = "live-interval";
pub const USER_INPUT: &str = "user-input";
pub const SUBMIT_BUTTON: &str = "submit-btn";
pub const DATA_TABLE: &str = "data-table";

/// Address of one widget property, written `<component-id>.<property>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropId {
    pub component: String,
    pub property: String,
}

impl PropId {
    pub fn new(component: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            property: property.into(),
        }
    }
}

impl fmt::Display for PropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.property)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid property id {0:?} (expected <component>.<property>)")]
pub struct InvalidPropId(pub String);

impl FromStr for PropId {
    type Err = InvalidPropId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('.') {
            Some((component, property)) if !component.is_empty() && !property.is_empty() => {
                Ok(PropId::new(component, property))
            }
            _ => Err(InvalidPropId(s.to_string())),
        }
    }
}

impl TryFrom<String> for PropId {
    type Error = InvalidPropId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PropId> for String {
    fn from(value: PropId) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: PropId = "country-dropdown.value".parse().unwrap();
        assert_eq!(id, PropId::new(COUNTRY_DROPDOWN, "value"));
        assert_eq!(id.to_string(), "country-dropdown.value");
    }

    #[test]
    fn test_parse_rejects_missing_parts() {
        assert!("value".parse::<PropId>().is_err());
        assert!(".value".parse::<PropId>().is_err());
        assert!("theme-toggle.".parse::<PropId>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = PropId::new(SUBMIT_BUTTON, "n_clicks");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"submit-btn.n_clicks\"");
        let back: PropId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
