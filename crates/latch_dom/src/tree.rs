//! Element tree management

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::error::DomError;
use crate::events::PointerId;
use crate::markup::ElementSpec;
use crate::metrics::{Axis, BoxMetrics};

new_key_type! {
    pub struct ElementId;
}

/// A single element in the document
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: IndexMap<String, String>,
    styles: IndexMap<String, String>,
    metrics: BoxMetrics,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Inline style properties in insertion order
    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn metrics(&self) -> BoxMetrics {
        self.metrics
    }
}

/// An in-memory document: element arena plus pointer capture state
#[derive(Debug, Default)]
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    captures: FxHashMap<PointerId, ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
            captures: FxHashMap::default(),
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Create a detached element
    pub fn create_element(&mut self, tag: impl Into<String>) -> ElementId {
        self.elements.insert(Element {
            tag: tag.into(),
            ..Default::default()
        })
    }

    /// Materialize a markup description, returning the new subtree root
    pub fn build(&mut self, spec: &ElementSpec) -> ElementId {
        let id = self.create_element(spec.tag.clone());
        for (name, value) in &spec.attributes {
            self.set_attribute(id, name, value);
        }
        if let Some([width, height]) = spec.client {
            self.set_client_size(id, width, height);
        }
        if let Some([width, height]) = spec.scroll {
            self.set_scroll_size(id, width, height);
        }
        for child_spec in &spec.children {
            let child = self.build(child_spec);
            self.link(id, child);
        }
        id
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        for id in [parent, child] {
            if !self.elements.contains_key(id) {
                return Err(DomError::UnknownElement(id));
            }
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(DomError::CyclicAppend { parent, child });
        }
        self.unlink(child);
        self.link(parent, child);
        Ok(())
    }

    /// Remove an element and its subtree. Returns false for unknown ids.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if !self.elements.contains_key(id) {
            return false;
        }
        self.unlink(id);

        let mut doomed = vec![id];
        doomed.extend(self.descendants(id));
        for el in &doomed {
            self.elements.remove(*el);
        }
        self.captures.retain(|_, target| !doomed.contains(target));
        tracing::trace!("removed {} elements", doomed.len());
        true
    }

    fn link(&mut self, parent: ElementId, child: ElementId) {
        if let Some(el) = self.elements.get_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.elements.get_mut(parent) {
            el.children.push(child);
        }
    }

    fn unlink(&mut self, child: ElementId) {
        let Some(parent) = self.elements.get_mut(child).and_then(|el| el.parent.take()) else {
            return;
        };
        if let Some(el) = self.elements.get_mut(parent) {
            el.children.retain(|c| *c != child);
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|el| el.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent chain, nearest first (excludes `id` itself)
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Pre-order walk of the subtree below `id` (excludes `id` itself)
    pub fn descendants(&self, id: ElementId) -> Descendants<'_> {
        let mut stack: Vec<ElementId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Whether `id` lies inside the subtree rooted at `ancestor` (inclusive)
    pub fn is_within(&self, id: ElementId, ancestor: ElementId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    /// First descendant of `root` whose attribute `name` equals `value`
    pub fn find_by_attribute(&self, root: ElementId, name: &str, value: &str) -> Option<ElementId> {
        self.descendants(root)
            .find(|id| self.attribute(*id, name) == Some(value))
    }

    /// All descendants of `root` whose attribute `name` equals `value`, in document order
    pub fn find_all_by_attribute(&self, root: ElementId, name: &str, value: &str) -> Vec<ElementId> {
        self.descendants(root)
            .filter(|id| self.attribute(*id, name) == Some(value))
            .collect()
    }

    // =========================================================================
    // Attributes and inline styles
    // =========================================================================

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(id)
            .and_then(|el| el.attributes.get(name))
            .map(String::as_str)
    }

    /// Set an attribute. Returns false for unknown ids.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        el.attributes.insert(name.to_string(), value.to_string());
        true
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Option<String> {
        self.elements
            .get_mut(id)
            .and_then(|el| el.attributes.shift_remove(name))
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.elements
            .get(id)
            .and_then(|el| el.styles.get(property))
            .map(String::as_str)
    }

    /// Set an inline style property. Returns false for unknown ids.
    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        el.styles.insert(property.to_string(), value.to_string());
        true
    }

    pub fn remove_style(&mut self, id: ElementId, property: &str) -> Option<String> {
        self.elements
            .get_mut(id)
            .and_then(|el| el.styles.shift_remove(property))
    }

    // =========================================================================
    // Box metrics
    // =========================================================================

    pub fn metrics(&self, id: ElementId) -> Option<BoxMetrics> {
        self.elements.get(id).map(|el| el.metrics)
    }

    /// Set the visible size, re-clamping the scroll position
    pub fn set_client_size(&mut self, id: ElementId, width: f32, height: f32) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        el.metrics.client_width = width.max(0.0);
        el.metrics.client_height = height.max(0.0);
        el.metrics.clamp_scroll();
        true
    }

    /// Set the content size, re-clamping the scroll position
    pub fn set_scroll_size(&mut self, id: ElementId, width: f32, height: f32) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        el.metrics.scroll_width = width.max(0.0);
        el.metrics.scroll_height = height.max(0.0);
        el.metrics.clamp_scroll();
        true
    }

    pub fn scroll_position(&self, id: ElementId, axis: Axis) -> Option<f32> {
        self.elements
            .get(id)
            .map(|el| el.metrics.scroll_position(axis))
    }

    /// Set the scroll position along one axis (clamped). Returns true if it changed.
    pub fn set_scroll_position(&mut self, id: ElementId, axis: Axis, value: f32) -> bool {
        self.elements
            .get_mut(id)
            .is_some_and(|el| el.metrics.set_scroll_position(axis, value))
    }

    /// Set both scroll positions (clamped). Returns true if either changed.
    pub fn scroll_to(&mut self, id: ElementId, left: f32, top: f32) -> bool {
        let horizontal = self.set_scroll_position(id, Axis::Horizontal, left);
        let vertical = self.set_scroll_position(id, Axis::Vertical, top);
        horizontal || vertical
    }

    // =========================================================================
    // Pointer capture
    // =========================================================================

    /// Route all further events of `pointer_id` to `id` until released
    pub fn set_pointer_capture(&mut self, id: ElementId, pointer_id: PointerId) -> bool {
        if !self.elements.contains_key(id) {
            return false;
        }
        self.captures.insert(pointer_id, id);
        true
    }

    /// Release a capture held by `id`. Returns false if `id` did not hold it.
    pub fn release_pointer_capture(&mut self, id: ElementId, pointer_id: PointerId) -> bool {
        if self.captures.get(&pointer_id) == Some(&id) {
            self.captures.remove(&pointer_id);
            true
        } else {
            false
        }
    }

    pub fn pointer_capture(&self, pointer_id: PointerId) -> Option<ElementId> {
        self.captures.get(&pointer_id).copied()
    }

    pub fn has_pointer_capture(&self, id: ElementId, pointer_id: PointerId) -> bool {
        self.pointer_capture(pointer_id) == Some(id)
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Pre-order subtree iterator, see [`Document::descendants`]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<ElementId>,
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
