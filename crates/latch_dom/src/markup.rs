//! Declarative element descriptions
//!
//! `ElementSpec` describes a subtree (tags, attributes, box sizes) and can be
//! deserialized from configuration files or assembled with the builder
//! methods, then materialized with [`Document::build`](crate::Document::build).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Description of an element and its children
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ElementSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    /// Visible size as `[width, height]`
    #[serde(default)]
    pub client: Option<[f32; 2]>,
    /// Content size as `[width, height]`
    #[serde(default)]
    pub scroll: Option<[f32; 2]>,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl Default for ElementSpec {
    fn default() -> Self {
        Self::new(default_tag())
    }
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            client: None,
            scroll: None,
            children: Vec::new(),
        }
    }

    /// Set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the visible size
    pub fn client_size(mut self, width: f32, height: f32) -> Self {
        self.client = Some([width, height]);
        self
    }

    /// Set the content size
    pub fn scroll_size(mut self, width: f32, height: f32) -> Self {
        self.scroll = Some([width, height]);
        self
    }

    /// Append a child description
    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for the first spec (including self) with the attribute value
    pub fn find(&self, name: &str, value: &str) -> Option<&ElementSpec> {
        if self.attributes.get(name).map(String::as_str) == Some(value) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name, value))
    }
}
