mod common;

use common::{attach, attach_with, markup, scrollbar};
use latch_core::{Controller, Runtime};
use latch_dom::{Axis, Document, ElementSpec};
use latch_scroll_area::{
    ConfigError, ScrollArea, ScrollAreaConfig, ScrollAreaError, ScrollType, Visibility,
};

// =============================================================================
// Attach
// =============================================================================

#[test]
fn test_initial_state_hidden_except_always() {
    for scroll_type in ["auto", "hover", "scroll"] {
        let fx = attach(scroll_type);
        assert_eq!(fx.state(fx.vertical), Some("hidden"), "{scroll_type}");
        assert_eq!(fx.state(fx.horizontal), Some("hidden"), "{scroll_type}");
    }

    let fx = attach("always");
    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert_eq!(fx.state(fx.horizontal), Some("visible"));
}

#[test]
fn test_default_type_is_hover() {
    let spec = ElementSpec::new("div")
        .child(
            ElementSpec::new("div")
                .attr("data-part", "viewport")
                .client_size(100.0, 100.0),
        )
        .child(scrollbar("vertical"))
        .child(scrollbar("horizontal"));
    let fx = attach_with(spec, ScrollAreaConfig::default());
    assert_eq!(fx.area().scroll_type(), ScrollType::Hover);
}

#[test]
fn test_markup_overrides_config() {
    let spec = markup("scroll").attr("data-scroll-hide-delay", "250");
    let fx = attach_with(spec, ScrollAreaConfig::new(ScrollType::Always));
    assert_eq!(fx.area().scroll_type(), ScrollType::Scroll);
    assert_eq!(fx.area().config().hide_delay_ms, 250.0);
}

#[test]
fn test_overflow_styles_per_axis() {
    let fx = attach("hover");
    assert_eq!(fx.style(fx.viewport, "overflow-y"), Some("scroll"));
    assert_eq!(fx.style(fx.viewport, "overflow-x"), Some("scroll"));

    let mut doc = Document::new();
    let root = doc.build(
        &ElementSpec::new("div")
            .child(ElementSpec::new("div").attr("data-part", "viewport"))
            .child(scrollbar("horizontal")),
    );
    let viewport = doc.find_by_attribute(root, "data-part", "viewport").unwrap();
    let mut runtime = Runtime::new(doc);
    runtime.connect(|cx| ScrollArea::connect(cx, root)).unwrap();

    assert_eq!(runtime.document().style(viewport, "overflow-x"), Some("scroll"));
    assert_eq!(runtime.document().style(viewport, "overflow-y"), None);
}

#[test]
fn test_missing_viewport() {
    let mut doc = Document::new();
    let root = doc.build(&ElementSpec::new("div").child(scrollbar("vertical")));
    let mut runtime = Runtime::new(doc);

    let result = runtime.connect(|cx| ScrollArea::connect(cx, root));
    assert_eq!(result, Err(ScrollAreaError::MissingViewport(root)));
    assert_eq!(runtime.controller_count(), 0);
    assert_eq!(runtime.scheduler().pending_frames(), 0);
}

#[test]
fn test_invalid_markup_values() {
    let mut doc = Document::new();
    let root = doc.build(&markup("sometimes"));
    let mut runtime = Runtime::new(doc);
    let result = runtime.connect(|cx| ScrollArea::connect(cx, root));
    assert_eq!(
        result,
        Err(ScrollAreaError::Config(ConfigError::InvalidType(
            "sometimes".to_string()
        )))
    );

    let mut doc = Document::new();
    let root = doc.build(
        &ElementSpec::new("div")
            .child(ElementSpec::new("div").attr("data-part", "viewport"))
            .child(ElementSpec::new("div").attr("data-part", "scrollbar").attr("data-orientation", "diagonal")),
    );
    let mut runtime = Runtime::new(doc);
    let result = runtime.connect(|cx| ScrollArea::connect(cx, root));
    assert!(matches!(result, Err(ScrollAreaError::Config(ConfigError::Markup(_)))));
}

#[test]
fn test_scrollbar_without_thumb_keeps_state() {
    let mut doc = Document::new();
    let root = doc.build(
        &ElementSpec::new("div")
            .attr("data-type", "hover")
            .child(ElementSpec::new("div").attr("data-part", "viewport"))
            .child(ElementSpec::new("div").attr("data-part", "scrollbar")),
    );
    let bar = doc.find_by_attribute(root, "data-part", "scrollbar").unwrap();
    let mut runtime = Runtime::new(doc);
    runtime.connect(|cx| ScrollArea::connect(cx, root)).unwrap();

    assert_eq!(runtime.document().attribute(bar, "data-state"), Some("hidden"));
    runtime.pointer_enter(root);
    assert_eq!(runtime.document().attribute(bar, "data-state"), Some("visible"));
}

// =============================================================================
// Visibility policies
// =============================================================================

#[test]
fn test_hover_enter_leave() {
    let mut fx = attach("hover");
    assert_eq!(fx.state(fx.vertical), Some("hidden"));

    fx.runtime.pointer_enter(fx.root);
    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert_eq!(fx.state(fx.horizontal), Some("visible"));

    fx.runtime.pointer_leave(fx.root);
    assert_eq!(fx.state(fx.vertical), Some("hidden"));
    assert_eq!(fx.state(fx.horizontal), Some("hidden"));
}

#[test]
fn test_hover_leave_during_drag_hides_at_drag_end() {
    let mut fx = attach("hover");
    fx.runtime.pointer_enter(fx.root);
    fx.runtime.pointer_down(fx.vertical_thumb, 1, 5.0, 10.0);

    fx.runtime.pointer_leave(fx.root);
    assert_eq!(fx.state(fx.vertical), Some("visible"));

    fx.runtime.pointer_up(fx.vertical_thumb, 1, 5.0, 10.0);
    assert_eq!(fx.state(fx.vertical), Some("hidden"));
    assert_eq!(fx.state(fx.horizontal), Some("hidden"));
}

#[test]
fn test_scroll_shows_then_hides_after_delay() {
    let mut fx = attach("scroll");
    assert!(fx.runtime.scroll_to(fx.viewport, 0.0, 50.0));
    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert_eq!(fx.area().hide_timer_count(), 2);

    fx.runtime.advance(500.0);
    assert_eq!(fx.state(fx.vertical), Some("visible"));

    fx.runtime.advance(200.0);
    assert_eq!(fx.state(fx.vertical), Some("hidden"));
    assert_eq!(fx.state(fx.horizontal), Some("hidden"));
    assert_eq!(fx.area().hide_timer_count(), 0);
}

#[test]
fn test_scroll_activity_restarts_timer() {
    let mut fx = attach("scroll");
    fx.runtime.scroll_to(fx.viewport, 0.0, 50.0);
    fx.runtime.advance(400.0);
    fx.runtime.scroll_to(fx.viewport, 0.0, 60.0);
    assert_eq!(fx.runtime.scheduler().pending_timers(), 2);

    fx.runtime.advance(400.0);
    assert_eq!(fx.state(fx.vertical), Some("visible"));

    fx.runtime.advance(250.0);
    assert_eq!(fx.state(fx.vertical), Some("hidden"));
}

#[test]
fn test_hide_timers_are_independent() {
    let mut fx = attach("scroll");
    fx.runtime.scroll_to(fx.viewport, 0.0, 50.0);
    fx.runtime.advance(300.0);

    // Touching the horizontal thumb only re-arms the horizontal timer
    fx.runtime.pointer_down(fx.horizontal_thumb, 1, 10.0, 5.0);
    fx.runtime.pointer_up(fx.horizontal_thumb, 1, 10.0, 5.0);

    fx.runtime.advance(350.0);
    assert_eq!(fx.state(fx.vertical), Some("hidden"));
    assert_eq!(fx.state(fx.horizontal), Some("visible"));
    assert!(fx.area().hide_timer(Axis::Vertical).is_none());
    let horizontal = fx.area().hide_timer(Axis::Horizontal).unwrap();
    assert!(fx.runtime.scheduler().is_timer_pending(horizontal));

    fx.runtime.advance(300.0);
    assert_eq!(fx.state(fx.horizontal), Some("hidden"));
}

#[test]
fn test_timer_expiring_mid_drag_is_rearmed() {
    let mut fx = attach("scroll");
    fx.runtime.pointer_down(fx.vertical_thumb, 1, 5.0, 10.0);
    assert_eq!(fx.state(fx.vertical), Some("visible"));

    fx.runtime.advance(700.0);
    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert!(fx.area().hide_timer(Axis::Vertical).is_some());

    fx.runtime.pointer_up(fx.vertical_thumb, 1, 5.0, 10.0);
    fx.runtime.advance(700.0);
    assert_eq!(fx.state(fx.vertical), Some("hidden"));
}

#[test]
fn test_hover_scroll_outside_stays_hidden() {
    let mut fx = attach("hover");
    assert!(fx.runtime.scroll_to(fx.viewport, 0.0, 50.0));

    assert_eq!(fx.state(fx.vertical), Some("hidden"));
    assert_eq!(fx.state(fx.horizontal), Some("hidden"));
    assert_eq!(fx.area().hide_timer_count(), 0);

    fx.runtime.pointer_enter(fx.root);
    fx.runtime.scroll_to(fx.viewport, 0.0, 80.0);
    assert_eq!(fx.state(fx.vertical), Some("visible"));
}

#[test]
fn test_auto_scroll_without_overflow_stays_hidden() {
    let mut fx = attach("auto");
    // Vertical overflow only
    fx.runtime
        .document_mut()
        .set_scroll_size(fx.viewport, 100.0, 400.0);

    assert!(fx.runtime.scroll_to(fx.viewport, 0.0, 50.0));
    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert_eq!(fx.state(fx.horizontal), Some("hidden"));
    assert_eq!(fx.area().hide_timer_count(), 0);
}

#[test]
fn test_set_scroll_type_auto_uses_current_overflow() {
    let mut fx = attach("hover");
    fx.runtime
        .document_mut()
        .set_scroll_size(fx.viewport, 100.0, 400.0);

    let id = fx.id;
    fx.runtime
        .with_controller::<ScrollArea, _, _>(id, |area, cx| {
            area.set_scroll_type(cx, ScrollType::Auto)
        })
        .unwrap();

    // Applied before any frame runs
    assert_eq!(fx.runtime.scheduler().frame_count(), 0);
    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert_eq!(fx.state(fx.horizontal), Some("hidden"));
}

#[test]
fn test_always_never_hidden() {
    let mut fx = attach("always");
    fx.runtime.pointer_enter(fx.root);
    fx.runtime.pointer_leave(fx.root);
    fx.runtime.scroll_to(fx.viewport, 0.0, 50.0);
    fx.runtime.pointer_down(fx.vertical_thumb, 1, 5.0, 10.0);
    fx.runtime.pointer_up(fx.vertical_thumb, 1, 5.0, 10.0);
    fx.runtime.advance(2000.0);

    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert_eq!(fx.state(fx.horizontal), Some("visible"));
    assert_eq!(fx.area().hide_timer_count(), 0);
}

#[test]
fn test_auto_follows_content_resize() {
    let mut fx = attach("auto");
    fx.runtime.advance(16.0);
    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert_eq!(fx.state(fx.horizontal), Some("visible"));

    // No scroll or pointer activity, only a content resize
    fx.runtime
        .document_mut()
        .set_scroll_size(fx.viewport, 100.0, 400.0);
    fx.runtime.advance(16.0);
    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert_eq!(fx.state(fx.horizontal), Some("hidden"));

    fx.runtime
        .document_mut()
        .set_scroll_size(fx.viewport, 100.0, 100.0);
    fx.runtime.advance(16.0);
    assert_eq!(fx.state(fx.vertical), Some("hidden"));
}

#[test]
fn test_set_scroll_type() {
    let mut fx = attach("scroll");
    fx.runtime.scroll_to(fx.viewport, 0.0, 50.0);
    assert_eq!(fx.runtime.scheduler().pending_timers(), 2);

    let id = fx.id;
    fx.runtime
        .with_controller::<ScrollArea, _, _>(id, |area, cx| {
            area.set_scroll_type(cx, ScrollType::Hover)
        })
        .unwrap();
    assert_eq!(fx.area().hide_timer_count(), 0);
    assert_eq!(fx.runtime.scheduler().pending_timers(), 0);
    assert_eq!(fx.state(fx.vertical), Some("hidden"));

    fx.runtime
        .with_controller::<ScrollArea, _, _>(id, |area, cx| {
            area.set_scroll_type(cx, ScrollType::Always)
        })
        .unwrap();
    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert_eq!(fx.area().scrollbar_state(Axis::Horizontal), Some(Visibility::Visible));
}

#[test]
fn test_set_hide_delay() {
    let mut fx = attach("scroll");
    fx.runtime
        .with_controller::<ScrollArea, _, _>(fx.id, |area, _| area.set_hide_delay(100.0))
        .unwrap();

    fx.runtime.scroll_to(fx.viewport, 0.0, 50.0);
    fx.runtime.advance(120.0);
    assert_eq!(fx.state(fx.vertical), Some("hidden"));
}

// =============================================================================
// Geometry
// =============================================================================

#[test]
fn test_thumb_geometry_follows_scroll() {
    let mut fx = attach("hover");
    assert_eq!(fx.style(fx.vertical_thumb, "height"), None);

    fx.runtime.advance(16.0);
    assert_eq!(fx.style(fx.vertical_thumb, "height"), Some("25px"));
    assert_eq!(
        fx.style(fx.vertical_thumb, "transform"),
        Some("translate3d(0px, 0px, 0px)")
    );
    assert_eq!(fx.style(fx.horizontal_thumb, "width"), Some("33.33px"));

    fx.runtime.scroll_to(fx.viewport, 100.0, 150.0);
    fx.runtime.advance(16.0);
    assert_eq!(
        fx.style(fx.vertical_thumb, "transform"),
        Some("translate3d(0px, 37.5px, 0px)")
    );
    assert_eq!(
        fx.style(fx.horizontal_thumb, "transform"),
        Some("translate3d(33.33px, 0px, 0px)")
    );
}

#[test]
fn test_frame_loop_keeps_running() {
    let mut fx = attach("hover");
    let first = fx.area().frame_handle();
    assert!(first.is_some());

    fx.runtime.advance(64.0);
    let current = fx.area().frame_handle().unwrap();
    assert_ne!(Some(current), first);
    assert!(fx.runtime.scheduler().is_frame_pending(current));
    assert_eq!(fx.runtime.scheduler().pending_frames(), 1);
}

// =============================================================================
// Drag
// =============================================================================

#[test]
fn test_drag_scrolls_proportionally_and_clamps() {
    let mut fx = attach("hover");
    assert!(!fx.area().is_dragging());

    fx.runtime.pointer_down(fx.vertical_thumb, 1, 5.0, 10.0);
    assert!(fx.area().is_dragging());
    assert!(fx.runtime.document().has_pointer_capture(fx.vertical_thumb, 1));

    // 25px thumb on a 100px track: 75px of travel for 300px of scroll
    fx.runtime.pointer_move(fx.vertical_thumb, 1, 5.0, 47.5);
    assert_eq!(fx.scroll_top(), 150.0);

    fx.runtime.pointer_move(fx.vertical_thumb, 1, 5.0, 1000.0);
    assert_eq!(fx.scroll_top(), 300.0);

    fx.runtime.pointer_move(fx.vertical_thumb, 1, 5.0, -500.0);
    assert_eq!(fx.scroll_top(), 0.0);

    fx.runtime.pointer_up(fx.vertical_thumb, 1, 5.0, -500.0);
    assert!(!fx.area().is_dragging());
    assert_eq!(fx.runtime.document().pointer_capture(1), None);
}

#[test]
fn test_drag_starts_from_current_offset() {
    let mut fx = attach("hover");
    fx.runtime.scroll_to(fx.viewport, 0.0, 150.0);

    fx.runtime.pointer_down(fx.vertical_thumb, 1, 5.0, 50.0);
    fx.runtime.pointer_move(fx.vertical_thumb, 1, 5.0, 57.5);
    // 37.5 + 7.5 = 45px of thumb offset
    assert_eq!(fx.scroll_top(), 180.0);
}

#[test]
fn test_moves_follow_capture() {
    let mut fx = attach("hover");
    fx.runtime.pointer_down(fx.vertical_thumb, 1, 5.0, 10.0);

    // Retargeted to the capturing thumb
    fx.runtime.pointer_move(fx.viewport, 1, 5.0, 47.5);
    assert_eq!(fx.scroll_top(), 150.0);

    // Other pointers are ignored
    fx.runtime.pointer_move(fx.vertical_thumb, 2, 5.0, 85.0);
    assert_eq!(fx.scroll_top(), 150.0);
}

#[test]
fn test_single_drag_at_a_time() {
    let mut fx = attach("hover");
    fx.runtime.pointer_down(fx.vertical_thumb, 1, 5.0, 10.0);
    fx.runtime.pointer_down(fx.horizontal_thumb, 2, 10.0, 5.0);

    assert!(fx.runtime.document().has_pointer_capture(fx.vertical_thumb, 1));
    assert_eq!(fx.runtime.document().pointer_capture(2), None);

    fx.runtime.pointer_move(fx.horizontal_thumb, 2, 60.0, 5.0);
    assert_eq!(
        fx.runtime.document().metrics(fx.viewport).unwrap().scroll_left,
        0.0
    );
}

#[test]
fn test_drag_without_range_does_nothing() {
    let mut fx = attach("hover");
    fx.runtime
        .document_mut()
        .set_scroll_size(fx.viewport, 100.0, 100.0);

    fx.runtime.pointer_down(fx.vertical_thumb, 1, 5.0, 10.0);
    fx.runtime.pointer_move(fx.vertical_thumb, 1, 5.0, 90.0);
    assert_eq!(fx.scroll_top(), 0.0);
}

#[test]
fn test_cancel_releases_capture() {
    let mut fx = attach("hover");
    fx.runtime.pointer_down(fx.vertical_thumb, 1, 5.0, 10.0);
    fx.runtime.pointer_cancel(fx.vertical_thumb, 1);

    assert!(!fx.area().is_dragging());
    assert_eq!(fx.runtime.document().pointer_capture(1), None);
}

// =============================================================================
// Detach
// =============================================================================

#[test]
fn test_detach_with_nothing_scheduled() {
    let mut fx = attach("hover");
    let id = fx.id;
    fx.runtime
        .with_controller::<ScrollArea, _, _>(id, |area, cx| {
            area.disconnect(cx);
            area.disconnect(cx);
        })
        .unwrap();

    assert_eq!(fx.area().frame_handle(), None);
    assert_eq!(fx.area().hide_timer_count(), 0);
    assert_eq!(fx.runtime.listener_count(id), 0);
    assert!(fx.runtime.disconnect(id));
    assert!(!fx.runtime.disconnect(id));
}

#[test]
fn test_detach_clears_pending_timers() {
    let mut fx = attach("scroll");
    fx.runtime.scroll_to(fx.viewport, 0.0, 50.0);
    assert_eq!(fx.area().hide_timer_count(), 2);

    fx.runtime
        .with_controller::<ScrollArea, _, _>(fx.id, |area, cx| area.disconnect(cx))
        .unwrap();
    assert_eq!(fx.area().hide_timer_count(), 0);
    assert_eq!(fx.runtime.scheduler().pending_timers(), 0);
    assert_eq!(fx.runtime.scheduler().pending_frames(), 0);
    assert_eq!(fx.runtime.scheduler().owned_count(fx.id), 0);
}

#[test]
fn test_detach_releases_capture() {
    let mut fx = attach("hover");
    fx.runtime.pointer_down(fx.vertical_thumb, 1, 5.0, 10.0);

    assert!(fx.runtime.disconnect(fx.id));
    assert_eq!(fx.runtime.document().pointer_capture(1), None);
}

#[test]
fn test_nothing_runs_after_detach() {
    let mut fx = attach("scroll");
    fx.runtime.advance(16.0);
    fx.runtime.scroll_to(fx.viewport, 0.0, 50.0);
    fx.runtime.disconnect(fx.id);

    let transform = fx.style(fx.vertical_thumb, "transform").map(str::to_string);
    assert_eq!(fx.state(fx.vertical), Some("visible"));

    assert_eq!(fx.runtime.pointer_enter(fx.root), 0);
    fx.runtime.scroll_to(fx.viewport, 0.0, 300.0);
    fx.runtime.advance(1000.0);

    assert_eq!(fx.state(fx.vertical), Some("visible"));
    assert_eq!(
        fx.style(fx.vertical_thumb, "transform").map(str::to_string),
        transform
    );
    assert_eq!(fx.runtime.scheduler().pending_frames(), 0);
    assert_eq!(fx.runtime.scheduler().pending_timers(), 0);
}

#[test]
fn test_independent_instances() {
    let mut doc = Document::new();
    let first = doc.build(&markup("hover"));
    let second = doc.build(&markup("hover"));
    let second_bar = doc.find_by_attribute(second, "data-part", "scrollbar").unwrap();

    let mut runtime = Runtime::new(doc);
    let a = runtime.connect(|cx| ScrollArea::connect(cx, first)).unwrap();
    runtime.connect(|cx| ScrollArea::connect(cx, second)).unwrap();

    runtime.pointer_enter(first);
    assert_eq!(
        runtime.controller::<ScrollArea>(a).unwrap().scrollbar_state(Axis::Vertical),
        Some(Visibility::Visible)
    );
    assert_eq!(runtime.document().attribute(second_bar, "data-state"), Some("hidden"));
}
