//! Binding declarations
//!
//! Which inputs trigger which binding, and which outputs it writes.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use super::callbacks;
use super::error::{BindingResult, RegistryError};
use super::BindingContext;
use crate::chart::ChartKind;
use crate::layout::ids::*;
use crate::layout::{Component, Layout, PropId};

/// Computes one value per declared output
pub type ComputeFn = fn(&BindingContext<'_>) -> BindingResult<Vec<Value>>;

/// What causes a binding to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Trigger {
    /// A widget property changed in the browser
    Prop(PropId),
    /// The named timer fired
    Interval(String),
}

/// A declared rule from triggers to outputs
#[derive(Clone)]
pub struct Binding {
    pub name: &'static str,
    pub outputs: Vec<PropId>,
    pub triggers: Vec<Trigger>,
    /// Read at invocation time but never trigger the binding
    pub states: Vec<PropId>,
    /// Whether the binding needs a live-buffer snapshot
    pub reads_live: bool,
    pub compute: ComputeFn,
}

impl Binding {
    pub fn is_triggered_by(&self, changed: &[PropId]) -> bool {
        self.triggers.iter().any(|t| match t {
            Trigger::Prop(prop) => changed.contains(prop),
            Trigger::Interval(_) => false,
        })
    }

    pub fn is_triggered_by_interval(&self, interval: &str) -> bool {
        self.triggers
            .iter()
            .any(|t| matches!(t, Trigger::Interval(id) if id == interval))
    }

    fn declaration(&self) -> Declaration {
        Declaration {
            name: self.name,
            outputs: self.outputs.clone(),
            triggers: self.triggers.clone(),
            states: self.states.clone(),
        }
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("outputs", &self.outputs)
            .field("triggers", &self.triggers)
            .field("states", &self.states)
            .finish()
    }
}

/// Client-facing description of a binding
#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    pub name: &'static str,
    pub outputs: Vec<PropId>,
    pub triggers: Vec<Trigger>,
    pub states: Vec<PropId>,
}

/// All bindings of the page
#[derive(Debug, Clone)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
}

impl BindingRegistry {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    /// The dashboard's bindings
    pub fn standard() -> Self {
        Self::new(vec![
            Binding {
                name: "toggle_theme",
                outputs: vec![PropId::new(THEME_TOGGLE, "children")],
                triggers: vec![Trigger::Prop(PropId::new(THEME_TOGGLE, "n_clicks"))],
                states: vec![],
                reads_live: false,
                compute: callbacks::toggle_theme,
            },
            Binding {
                name: "update_main_chart",
                outputs: vec![PropId::new(MAIN_CHART, "figure")],
                triggers: vec![
                    Trigger::Prop(PropId::new(COUNTRY_DROPDOWN, "value")),
                    Trigger::Prop(PropId::new(CHART_TYPE, "value")),
                ],
                states: vec![],
                reads_live: false,
                compute: callbacks::update_main_chart,
            },
            Binding {
                name: "update_population_pie",
                outputs: vec![PropId::new(PIE_CHART, "figure")],
                triggers: vec![Trigger::Prop(PropId::new(COUNTRY_DROPDOWN, "value"))],
                states: vec![],
                reads_live: false,
                compute: callbacks::update_population_pie,
            },
            Binding {
                name: "update_live_graph",
                outputs: vec![PropId::new(LIVE_GRAPH, "figure")],
                triggers: vec![Trigger::Interval(LIVE_INTERVAL.to_string())],
                states: vec![],
                reads_live: true,
                compute: callbacks::update_live_graph,
            },
            Binding {
                name: "handle_submit",
                outputs: vec![PropId::new(SUBMIT_BUTTON, "children")],
                triggers: vec![Trigger::Prop(PropId::new(SUBMIT_BUTTON, "n_clicks"))],
                states: vec![PropId::new(USER_INPUT, "value")],
                reads_live: false,
                compute: callbacks::handle_submit,
            },
        ])
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn declarations(&self) -> Vec<Declaration> {
        self.bindings.iter().map(Binding::declaration).collect()
    }

    /// Whether any binding reads `prop` as a trigger or state
    pub fn is_input(&self, prop: &PropId) -> bool {
        self.bindings.iter().any(|b| {
            b.states.contains(prop)
                || b.triggers
                    .iter()
                    .any(|t| matches!(t, Trigger::Prop(p) if p == prop))
        })
    }

    /// Check the declarations against the page
    pub fn validate(&self, layout: &Layout) -> Result<(), RegistryError> {
        let mut owners: HashMap<&PropId, &'static str> = HashMap::new();

        for binding in &self.bindings {
            if binding.triggers.is_empty() {
                return Err(RegistryError::NoTriggers(binding.name));
            }

            for output in &binding.outputs {
                check_prop(layout, binding.name, output)?;
                if let Some(first) = owners.insert(output, binding.name) {
                    return Err(RegistryError::DuplicateOutput {
                        prop: output.clone(),
                        first,
                        second: binding.name,
                    });
                }
            }

            for state in &binding.states {
                check_prop(layout, binding.name, state)?;
            }

            for trigger in &binding.triggers {
                match trigger {
                    Trigger::Prop(prop) => check_prop(layout, binding.name, prop)?,
                    Trigger::Interval(id) => {
                        if !matches!(layout.find(id), Some(Component::Interval { .. })) {
                            return Err(RegistryError::UnknownInterval {
                                binding: binding.name,
                                interval: id.clone(),
                            });
                        }
                    }
                }
            }
        }

        check_chart_kinds(layout)
    }
}

fn check_prop(layout: &Layout, binding: &'static str, prop: &PropId) -> Result<(), RegistryError> {
    if layout.has_prop(prop) {
        Ok(())
    } else {
        Err(RegistryError::UnknownProperty {
            binding,
            prop: prop.clone(),
        })
    }
}

/// The chart-type dropdown must offer every chart kind exactly once
fn check_chart_kinds(layout: &Layout) -> Result<(), RegistryError> {
    let offered: Vec<String> = match layout.find(CHART_TYPE) {
        Some(Component::Dropdown { options, .. }) => {
            options.iter().map(|o| o.value.clone()).collect()
        }
        _ => Vec::new(),
    };

    let covers_all = offered.len() == ChartKind::ALL.len()
        && ChartKind::ALL
            .iter()
            .all(|kind| offered.iter().filter(|v| *v == kind.as_str()).count() == 1);

    if covers_all {
        Ok(())
    } else {
        Err(RegistryError::ChartKindMismatch { offered })
    }
}
