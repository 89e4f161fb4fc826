//! Form Definition Types

use serde::Serialize;
use std::collections::BTreeMap;

/// One choice of a select element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: u32,
    pub label: String,
}

/// A renderable form element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormElement {
    Fieldset {
        key: String,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        markup: Option<String>,
        collapsible: bool,
        collapsed: bool,
        children: Vec<FormElement>,
    },
    Checkbox {
        name: String,
        title: String,
        default_value: bool,
    },
    #[serde(rename = "textfield")]
    TextField {
        name: String,
        title: String,
        default_value: String,
        size: u16,
        max_length: usize,
        required: bool,
    },
    Select {
        name: String,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        default_value: u32,
        options: Vec<SelectOption>,
    },
}

impl FormElement {
    /// Submitted value name; fieldsets have none
    pub fn name(&self) -> Option<&str> {
        match self {
            FormElement::Fieldset { .. } => None,
            FormElement::Checkbox { name, .. }
            | FormElement::TextField { name, .. }
            | FormElement::Select { name, .. } => Some(name.as_str()),
        }
    }

    pub fn children(&self) -> &[FormElement] {
        match self {
            FormElement::Fieldset { children, .. } => children,
            _ => &[],
        }
    }
}

/// Description of the settings form for the host to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDefinition {
    pub form_id: String,
    pub config_name: String,
    pub elements: Vec<FormElement>,
    /// Messages from a rejected submission, keyed by field name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormDefinition {
    /// Find a field anywhere in the tree by its name
    pub fn field(&self, name: &str) -> Option<&FormElement> {
        fn find<'a>(elements: &'a [FormElement], name: &str) -> Option<&'a FormElement> {
            elements.iter().find_map(|element| {
                if element.name() == Some(name) {
                    Some(element)
                } else {
                    find(element.children(), name)
                }
            })
        }
        find(&self.elements, name)
    }

    /// Find a fieldset by its key
    pub fn fieldset(&self, key: &str) -> Option<&FormElement> {
        fn find<'a>(elements: &'a [FormElement], key: &str) -> Option<&'a FormElement> {
            elements.iter().find_map(|element| match element {
                FormElement::Fieldset { key: k, children, .. } => {
                    if k == key {
                        Some(element)
                    } else {
                        find(children, key)
                    }
                }
                _ => None,
            })
        }
        find(&self.elements, key)
    }

    /// Names of all value fields, in render order
    pub fn field_names(&self) -> Vec<&str> {
        fn collect<'a>(elements: &'a [FormElement], names: &mut Vec<&'a str>) {
            for element in elements {
                if let Some(name) = element.name() {
                    names.push(name);
                }
                collect(element.children(), names);
            }
        }
        let mut names = Vec::new();
        collect(&self.elements, &mut names);
        names
    }
}
