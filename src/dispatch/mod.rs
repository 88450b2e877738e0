//! Dispatcher
//!
//! Selects the bindings whose triggers fired, runs them against the dataset
//! and a live snapshot, and collects their outputs. Binding failures are
//! turned into per-output error states here and never reach the server loop.

mod messages;

pub use messages::{OutputUpdate, UpdateRequest, UpdateResponse};

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::bindings::{Binding, BindingContext, BindingError, BindingRegistry, Inputs};
use crate::dataset::Dataset;
use crate::layout::PropId;
use crate::live::{LiveBuffer, Sample};

/// Requests the dispatcher refuses to run
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown input property: {0}")]
    UnknownInput(PropId),
}

/// Runs bindings in response to input changes and timer ticks
pub struct Dispatcher {
    registry: BindingRegistry,
    dataset: Arc<Dataset>,
    live: LiveBuffer,
    debug: bool,
}

impl Dispatcher {
    pub fn new(registry: BindingRegistry, dataset: Arc<Dataset>, live: LiveBuffer, debug: bool) -> Self {
        Self {
            registry,
            dataset,
            live,
            debug,
        }
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    /// Run the bindings affected by a client request
    pub async fn dispatch(&self, request: &UpdateRequest) -> Result<UpdateResponse, DispatchError> {
        if let Some(unknown) = request.changed.iter().find(|p| !self.registry.is_input(p)) {
            return Err(DispatchError::UnknownInput(unknown.clone()));
        }

        let selected: Vec<&Binding> = self
            .registry
            .bindings()
            .iter()
            .filter(|b| request.initial || b.is_triggered_by(&request.changed))
            .collect();

        tracing::debug!(
            initial = request.initial,
            changed = ?request.changed,
            bindings = selected.len(),
            "Dispatching update"
        );

        Ok(self.run(&selected, &request.values).await)
    }

    /// Run the bindings driven by a timer
    pub async fn on_interval(&self, interval: &str) -> UpdateResponse {
        let selected: Vec<&Binding> = self
            .registry
            .bindings()
            .iter()
            .filter(|b| b.is_triggered_by_interval(interval))
            .collect();

        self.run(&selected, &HashMap::new()).await
    }

    async fn run(&self, selected: &[&Binding], values: &HashMap<PropId, Value>) -> UpdateResponse {
        let live: Arc<[Sample]> = if selected.iter().any(|b| b.reads_live) {
            self.live.snapshot().await
        } else {
            Arc::from(Vec::<Sample>::new())
        };

        let ctx = BindingContext {
            dataset: &self.dataset,
            live: &live,
            inputs: Inputs::new(values),
        };

        let mut outputs = Vec::new();
        for binding in selected {
            outputs.extend(self.invoke(binding, &ctx));
        }
        UpdateResponse { outputs }
    }

    fn invoke(&self, binding: &Binding, ctx: &BindingContext<'_>) -> Vec<OutputUpdate> {
        let result = (binding.compute)(ctx).and_then(|values| {
            if values.len() == binding.outputs.len() {
                Ok(values)
            } else {
                Err(BindingError::OutputArity {
                    name: binding.name,
                    expected: binding.outputs.len(),
                    actual: values.len(),
                })
            }
        });

        match result {
            Ok(values) => binding
                .outputs
                .iter()
                .cloned()
                .zip(values)
                .map(|(prop, value)| OutputUpdate {
                    prop,
                    value,
                    error: None,
                })
                .collect(),
            Err(e) => {
                tracing::warn!(binding = binding.name, error = %e, "Binding failed");
                binding
                    .outputs
                    .iter()
                    .map(|prop| OutputUpdate {
                        prop: prop.clone(),
                        value: Value::Null,
                        error: Some(self.error_message(prop, &e)),
                    })
                    .collect()
            }
        }
    }

    fn error_message(&self, prop: &PropId, error: &BindingError) -> String {
        if self.debug {
            error.to_string()
        } else {
            format!("Callback error updating {}", prop)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Trigger;
    use crate::layout::ids::*;
    use crate::live::{FeedConfig, LiveFeed};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn dispatcher_with(live: LiveBuffer, debug: bool) -> Dispatcher {
        let dataset = Arc::new(Dataset::embedded().unwrap());
        Dispatcher::new(BindingRegistry::standard(), dataset, live, debug)
    }

    fn dispatcher() -> Dispatcher {
        dispatcher_with(LiveBuffer::default(), true)
    }

    fn prop(component: &str, property: &str) -> PropId {
        PropId::new(component, property)
    }

    fn page_values(country: &str, kind: &str) -> HashMap<PropId, Value> {
        HashMap::from([
            (prop(THEME_TOGGLE, "n_clicks"), json!(0)),
            (prop(COUNTRY_DROPDOWN, "value"), json!(country)),
            (prop(CHART_TYPE, "value"), json!(kind)),
            (prop(SUBMIT_BUTTON, "n_clicks"), json!(0)),
            (prop(USER_INPUT, "value"), Value::Null),
        ])
    }

    #[tokio::test]
    async fn test_initial_render_runs_every_binding() {
        let d = dispatcher();
        let response = d
            .dispatch(&UpdateRequest::initial(page_values("India", "line")))
            .await
            .unwrap();

        assert_eq!(response.outputs.len(), 5);
        assert!(response.outputs.iter().all(|o| o.error.is_none()));
        assert_eq!(
            response.get(&prop(THEME_TOGGLE, "children")).unwrap().value,
            json!("Dark Mode")
        );
        assert_eq!(
            response.get(&prop(SUBMIT_BUTTON, "children")).unwrap().value,
            json!("Submit")
        );
        assert_eq!(
            response.get(&prop(LIVE_GRAPH, "figure")).unwrap().value["data"],
            json!([])
        );
    }

    #[tokio::test]
    async fn test_bar_then_pie_only_rerenders_main_chart() {
        let d = dispatcher();

        let bar = d
            .dispatch(&UpdateRequest::changed(
                vec![prop(CHART_TYPE, "value")],
                page_values("India", "bar"),
            ))
            .await
            .unwrap();
        assert_eq!(bar.outputs.len(), 1);
        let figure = &bar.get(&prop(MAIN_CHART, "figure")).unwrap().value;
        assert_eq!(figure["data"][0]["type"], "bar");
        assert_eq!(figure["layout"]["title"]["text"], "GDP Per Capita of India");
        assert_eq!(figure["data"][0]["y"].as_array().unwrap().len(), 12);

        let pie = d
            .dispatch(&UpdateRequest::changed(
                vec![prop(CHART_TYPE, "value")],
                page_values("India", "pie"),
            ))
            .await
            .unwrap();
        assert_eq!(pie.outputs.len(), 1);
        let figure = &pie.get(&prop(MAIN_CHART, "figure")).unwrap().value;
        assert_eq!(figure["data"][0]["type"], "pie");
        assert_eq!(figure["layout"]["title"]["text"], "GDP Share Over Years");
        assert!(pie.get(&prop(PIE_CHART, "figure")).is_none());
    }

    #[tokio::test]
    async fn test_country_change_updates_both_charts() {
        let d = dispatcher();
        let response = d
            .dispatch(&UpdateRequest::changed(
                vec![prop(COUNTRY_DROPDOWN, "value")],
                page_values("Kenya", "line"),
            ))
            .await
            .unwrap();

        let props: Vec<String> = response.outputs.iter().map(|o| o.prop.to_string()).collect();
        assert_eq!(props, vec!["main-chart.figure", "pie-chart.figure"]);
    }

    #[tokio::test]
    async fn test_submit_reads_text_state() {
        let d = dispatcher();
        let mut values = page_values("India", "line");
        values.insert(prop(SUBMIT_BUTTON, "n_clicks"), json!(3));
        values.insert(prop(USER_INPUT, "value"), json!("hello"));

        let response = d
            .dispatch(&UpdateRequest::changed(vec![prop(SUBMIT_BUTTON, "n_clicks")], values))
            .await
            .unwrap();
        assert_eq!(response.outputs[0].value, json!("Submitted: hello"));
    }

    #[tokio::test]
    async fn test_unknown_chart_type_is_an_output_error() {
        let d = dispatcher();
        let response = d
            .dispatch(&UpdateRequest::changed(
                vec![prop(CHART_TYPE, "value")],
                page_values("India", "scatter"),
            ))
            .await
            .unwrap();

        let output = &response.outputs[0];
        assert_eq!(output.value, Value::Null);
        assert!(output.error.as_deref().unwrap().contains("scatter"));
    }

    #[tokio::test]
    async fn test_production_mode_hides_error_detail() {
        let d = dispatcher_with(LiveBuffer::default(), false);
        let response = d
            .dispatch(&UpdateRequest::changed(
                vec![prop(CHART_TYPE, "value")],
                page_values("India", "scatter"),
            ))
            .await
            .unwrap();

        assert_eq!(
            response.outputs[0].error.as_deref(),
            Some("Callback error updating main-chart.figure")
        );
    }

    #[tokio::test]
    async fn test_unknown_country_is_not_an_error() {
        let d = dispatcher();
        let response = d
            .dispatch(&UpdateRequest::changed(
                vec![prop(COUNTRY_DROPDOWN, "value")],
                page_values("Atlantis", "bar"),
            ))
            .await
            .unwrap();

        for output in &response.outputs {
            assert!(output.error.is_none());
            assert_eq!(output.value["data"], json!([]));
        }
    }

    #[tokio::test]
    async fn test_unknown_changed_prop_is_rejected() {
        let d = dispatcher();
        let err = d
            .dispatch(&UpdateRequest::changed(
                vec![prop(MAIN_CHART, "figure")],
                HashMap::new(),
            ))
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::UnknownInput(prop(MAIN_CHART, "figure")));
    }

    #[tokio::test]
    async fn test_interval_renders_live_snapshot() {
        let feed = LiveFeed::new(FeedConfig::default());
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            feed.tick_with(&mut rng).await;
        }

        let d = dispatcher_with(feed.buffer().clone(), true);
        let response = d.on_interval(LIVE_INTERVAL).await;

        assert_eq!(response.outputs.len(), 1);
        let figure = &response.outputs[0].value;
        assert_eq!(figure["data"][0]["y"].as_array().unwrap().len(), 15);
        assert!(d.on_interval("other-timer").await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_output_count_becomes_error() {
        fn two_values(_: &BindingContext<'_>) -> Result<Vec<Value>, BindingError> {
            Ok(vec![json!(1), json!(2)])
        }

        let registry = BindingRegistry::new(vec![Binding {
            name: "broken",
            outputs: vec![prop(THEME_TOGGLE, "children")],
            triggers: vec![Trigger::Prop(prop(THEME_TOGGLE, "n_clicks"))],
            states: vec![],
            reads_live: false,
            compute: two_values,
        }]);
        let d = Dispatcher::new(
            registry,
            Arc::new(Dataset::embedded().unwrap()),
            LiveBuffer::default(),
            true,
        );

        let response = d
            .dispatch(&UpdateRequest::changed(
                vec![prop(THEME_TOGGLE, "n_clicks")],
                HashMap::new(),
            ))
            .await
            .unwrap();
        assert!(response.outputs[0].error.as_deref().unwrap().contains("broken"));
    }
}
