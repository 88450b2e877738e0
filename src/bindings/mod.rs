//! Reactive Bindings
//!
//! Each binding is a pure function from the current values of its declared
//! inputs (plus the dataset or a live snapshot) to new output content. The
//! [`BindingRegistry`] declares which inputs trigger which binding and is
//! checked against the layout once at startup.

mod callbacks;
mod error;
mod inputs;
mod registry;

pub use callbacks::{live_graph, main_chart, population_pie, submit_label, theme_label};
pub use error::{BindingError, BindingResult, RegistryError};
pub use inputs::Inputs;
pub use registry::{Binding, BindingRegistry, ComputeFn, Declaration, Trigger};

use crate::dataset::Dataset;
use crate::live::Sample;

/// Everything a binding may read
#[derive(Debug, Clone, Copy)]
pub struct BindingContext<'a> {
    pub dataset: &'a Dataset,
    /// Live snapshot; empty for bindings that do not read the buffer
    pub live: &'a [Sample],
    pub inputs: Inputs<'a>,
}
