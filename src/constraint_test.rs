#![allow(clippy::float_cmp)]

use super::*;
use crate::geometry::distance;

// =============================================================
// InRect
// =============================================================

#[test]
fn in_rect_leaves_inside_point_untouched() {
    let c = Constraint::InRect { width: 256.0, height: 128.0 };
    assert_eq!(c.apply(Point::new(10.0, 20.0)), Point::new(10.0, 20.0));
}

#[test]
fn in_rect_clamps_each_axis() {
    let c = Constraint::InRect { width: 256.0, height: 128.0 };
    assert_eq!(c.apply(Point::new(-5.0, 300.0)), Point::new(0.0, 128.0));
    assert_eq!(c.apply(Point::new(400.0, -1.0)), Point::new(256.0, 0.0));
}

#[test]
fn in_rect_boundary_is_inclusive() {
    let c = Constraint::InRect { width: 64.0, height: 64.0 };
    assert_eq!(c.apply(Point::new(64.0, 0.0)), Point::new(64.0, 0.0));
}

#[test]
fn in_rect_is_idempotent() {
    let c = Constraint::InRect { width: 100.0, height: 50.0 };
    let samples = [
        Point::new(-10.0, -10.0),
        Point::new(50.0, 25.0),
        Point::new(120.0, 80.0),
        Point::new(100.0, -3.5),
        Point::new(0.0, 50.0),
    ];
    for p in samples {
        let once = c.apply(p);
        assert_eq!(c.apply(once), once, "not idempotent for {p:?}");
    }
}

// =============================================================
// OuterRadius
// =============================================================

#[test]
fn outer_pins_y_to_center_row() {
    let c = Constraint::OuterRadius { inner_handle_x: 64.0, cy: 128.0 };
    assert_eq!(c.apply(Point::new(10.0, 3.0)).y, 128.0);
}

#[test]
fn outer_cannot_pass_inner_handle() {
    let c = Constraint::OuterRadius { inner_handle_x: 64.0, cy: 128.0 };
    assert_eq!(c.apply(Point::new(100.0, 128.0)), Point::new(64.0, 128.0));
}

#[test]
fn outer_radius_never_below_inner_for_any_drag() {
    let center = Point::new(128.0, 128.0);
    let rad_in = 64.0;
    let c = Constraint::OuterRadius { inner_handle_x: center.x - rad_in, cy: center.y };
    let mut x = -50.0;
    while x <= 300.0 {
        let p = c.apply(Point::new(x, 90.0));
        assert!(distance(center, p) >= rad_in, "x={x} gave radius {}", distance(center, p));
        x += 7.5;
    }
}

// =============================================================
// InnerRadius
// =============================================================

#[test]
fn inner_clamps_to_outer_handle() {
    // 256x256 image, rad_out = 128 -> outer handle at x = 0.
    let c = Constraint::InnerRadius { outer_handle_x: 0.0, cx: 128.0, cy: 128.0 };
    // Radius 140 would put the handle at x = -12.
    let p = c.apply(Point::new(-12.0, 128.0));
    assert_eq!(p, Point::new(0.0, 128.0));
    assert_eq!(distance(Point::new(128.0, 128.0), p), 128.0);
}

#[test]
fn inner_does_not_cross_center() {
    let c = Constraint::InnerRadius { outer_handle_x: 0.0, cx: 128.0, cy: 128.0 };
    assert_eq!(c.apply(Point::new(400.0, 128.0)), Point::new(128.0, 128.0));
}

#[test]
fn inner_free_between_bounds() {
    let c = Constraint::InnerRadius { outer_handle_x: 0.0, cx: 128.0, cy: 128.0 };
    assert_eq!(c.apply(Point::new(80.0, 50.0)), Point::new(80.0, 128.0));
}

#[test]
fn inner_radius_never_above_outer_for_any_drag() {
    let center = Point::new(128.0, 128.0);
    let rad_out = 100.0;
    let c = Constraint::InnerRadius { outer_handle_x: center.x - rad_out, cx: center.x, cy: center.y };
    let mut x = -200.0;
    while x <= 400.0 {
        let p = c.apply(Point::new(x, 0.0));
        assert!(distance(center, p) <= rad_out, "x={x}");
        x += 11.0;
    }
}

#[test]
fn inner_inverted_range_prefers_outer_handle() {
    let c = Constraint::InnerRadius { outer_handle_x: 140.0, cx: 128.0, cy: 128.0 };
    assert_eq!(c.apply(Point::new(10.0, 128.0)).x, 140.0);
}

// =============================================================
// KeepOnCy
// =============================================================

#[test]
fn keep_on_cy_only_touches_y() {
    let c = Constraint::KeepOnCy { cy: 110.0 };
    assert_eq!(c.apply(Point::new(-30.0, 5.0)), Point::new(-30.0, 110.0));
}
