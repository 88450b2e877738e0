//! Declarative widget tree

use serde::Serialize;

use crate::dataset::Row;

/// Option of a dropdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// Column of the data table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableColumn {
    pub name: String,
    pub id: String,
}

/// Client-side table behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableAction {
    Native,
}

/// One node of the page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Component {
    Container {
        fluid: bool,
        children: Vec<Component>,
    },
    Row {
        #[serde(skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
        children: Vec<Component>,
    },
    /// Grid column, `width` out of 12
    Col {
        width: u8,
        children: Vec<Component>,
    },
    Heading {
        level: u8,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
    },
    Button {
        id: String,
        children: String,
        n_clicks: u64,
        color: String,
    },
    Dropdown {
        id: String,
        options: Vec<DropdownOption>,
        value: String,
        clearable: bool,
    },
    Graph {
        id: String,
    },
    Input {
        id: String,
        input_type: String,
        placeholder: String,
        value: String,
    },
    /// Timer fired by the server's live feed
    Interval {
        id: String,
        interval_ms: u64,
        n_intervals: u64,
    },
    DataTable {
        id: String,
        columns: Vec<TableColumn>,
        data: Vec<Row>,
        page_size: usize,
        sort_action: TableAction,
        filter_action: TableAction,
    },
}

impl Component {
    pub fn row(children: Vec<Component>) -> Self {
        Component::Row {
            class_name: None,
            children,
        }
    }

    pub fn row_with_class(class_name: &str, children: Vec<Component>) -> Self {
        Component::Row {
            class_name: Some(class_name.to_string()),
            children,
        }
    }

    pub fn col(width: u8, child: Component) -> Self {
        Component::Col {
            width,
            children: vec![child],
        }
    }

    pub fn heading(level: u8, text: &str, class_name: &str) -> Self {
        Component::Heading {
            level,
            text: text.to_string(),
            class_name: Some(class_name.to_string()),
        }
    }

    pub fn button(id: &str, label: &str, color: &str) -> Self {
        Component::Button {
            id: id.to_string(),
            children: label.to_string(),
            n_clicks: 0,
            color: color.to_string(),
        }
    }

    pub fn graph(id: &str) -> Self {
        Component::Graph { id: id.to_string() }
    }

    /// Component id, if the node is addressable
    pub fn id(&self) -> Option<&str> {
        match self {
            Component::Button { id, .. }
            | Component::Dropdown { id, .. }
            | Component::Graph { id }
            | Component::Input { id, .. }
            | Component::Interval { id, .. }
            | Component::DataTable { id, .. } => Some(id.as_str()),
            Component::Container { .. }
            | Component::Row { .. }
            | Component::Col { .. }
            | Component::Heading { .. } => None,
        }
    }

    /// Properties bindings may read or write
    pub fn properties(&self) -> &'static [&'static str] {
        match self {
            Component::Button { .. } => &["n_clicks", "children"],
            Component::Dropdown { .. } => &["value", "options"],
            Component::Graph { .. } => &["figure"],
            Component::Input { .. } => &["value"],
            Component::Interval { .. } => &["n_intervals"],
            Component::DataTable { .. } => &["data"],
            Component::Container { .. }
            | Component::Row { .. }
            | Component::Col { .. }
            | Component::Heading { .. } => &[],
        }
    }

    pub fn children(&self) -> &[Component] {
        match self {
            Component::Container { children, .. }
            | Component::Row { children, .. }
            | Component::Col { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first visit of this node and its descendants
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Component)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
