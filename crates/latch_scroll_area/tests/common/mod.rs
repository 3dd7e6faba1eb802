//! Shared fixture: a scroll area with a 100x100 viewport over 300x400 of
//! content, and one scrollbar per axis with a 100px track.

#![allow(dead_code)]

use latch_core::{ControllerId, Runtime};
use latch_dom::{Document, ElementId, ElementSpec};
use latch_scroll_area::{ScrollArea, ScrollAreaConfig};

pub const VIEWPORT_SIZE: f32 = 100.0;
pub const CONTENT_WIDTH: f32 = 300.0;
pub const CONTENT_HEIGHT: f32 = 400.0;

pub struct Fixture {
    pub runtime: Runtime,
    pub id: ControllerId,
    pub root: ElementId,
    pub viewport: ElementId,
    pub vertical: ElementId,
    pub vertical_thumb: ElementId,
    pub horizontal: ElementId,
    pub horizontal_thumb: ElementId,
}

pub fn scrollbar(orientation: &str) -> ElementSpec {
    let (width, height) = match orientation {
        "horizontal" => (VIEWPORT_SIZE, 10.0),
        _ => (10.0, VIEWPORT_SIZE),
    };
    ElementSpec::new("div")
        .attr("data-part", "scrollbar")
        .attr("data-orientation", orientation)
        .client_size(width, height)
        .child(ElementSpec::new("div").attr("data-part", "thumb"))
}

pub fn markup(scroll_type: &str) -> ElementSpec {
    ElementSpec::new("div")
        .attr("data-part", "root")
        .attr("data-type", scroll_type)
        .child(
            ElementSpec::new("div")
                .attr("data-part", "viewport")
                .client_size(VIEWPORT_SIZE, VIEWPORT_SIZE)
                .scroll_size(CONTENT_WIDTH, CONTENT_HEIGHT),
        )
        .child(scrollbar("vertical"))
        .child(scrollbar("horizontal"))
}

pub fn attach(scroll_type: &str) -> Fixture {
    attach_with(markup(scroll_type), ScrollAreaConfig::default())
}

pub fn attach_with(spec: ElementSpec, config: ScrollAreaConfig) -> Fixture {
    let mut doc = Document::new();
    let root = doc.build(&spec);
    let find = |doc: &Document, parent: ElementId, part: &str| {
        doc.find_by_attribute(parent, "data-part", part)
            .expect("fixture element")
    };

    let viewport = find(&doc, root, "viewport");
    let bars = doc.find_all_by_attribute(root, "data-part", "scrollbar");
    let vertical = bars[0];
    let horizontal = bars[1];
    let vertical_thumb = find(&doc, vertical, "thumb");
    let horizontal_thumb = find(&doc, horizontal, "thumb");

    let mut runtime = Runtime::new(doc);
    let id = runtime
        .connect(|cx| ScrollArea::connect_with(cx, root, config))
        .expect("scroll area attaches");

    Fixture {
        runtime,
        id,
        root,
        viewport,
        vertical,
        vertical_thumb,
        horizontal,
        horizontal_thumb,
    }
}

impl Fixture {
    pub fn area(&self) -> &ScrollArea {
        self.runtime
            .controller::<ScrollArea>(self.id)
            .expect("scroll area connected")
    }

    pub fn state(&self, scrollbar: ElementId) -> Option<&str> {
        self.runtime.document().attribute(scrollbar, "data-state")
    }

    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.runtime.document().style(element, property)
    }

    pub fn scroll_top(&self) -> f32 {
        self.runtime
            .document()
            .metrics(self.viewport)
            .map(|m| m.scroll_top)
            .unwrap_or_default()
    }
}
