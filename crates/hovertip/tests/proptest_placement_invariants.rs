//! Property-based invariant tests for the placement engine.
//!
//! 1. The optimal placement is always concrete.
//! 2. If any side fits on a screen, the optimal side fits too.
//! 3. A side with strictly the most room that fits is always chosen.
//! 4. A fitting primary is never overridden by a fallback.
//! 5. A returned fallback fits, is concrete and differs from the primary.
//! 6. Candidate rects touch the anchor on the facing side.
//! 7. Rect computation and screen checks are pure.

use hovertip::layout::{Point, Rect, Size};
use hovertip::placement::{
    fallback_placement, fits_on_any_screen, optimal_placement, tooltip_rect, AvailableSpace,
    Offsets, Placement, PlacementQuery,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500i32..2500, -500i32..1500, 0i32..600, 0i32..400)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn size_strategy() -> impl Strategy<Value = Size> {
    (0i32..400, 0i32..200).prop_map(|(w, h)| Size::new(w, h))
}

fn screens_strategy() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec(
        (-2000i32..2000, -1000i32..1000, 200i32..2000, 200i32..1200)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h)),
        0..4,
    )
}

fn placement_strategy() -> impl Strategy<Value = Placement> {
    prop_oneof![
        Just(Placement::Auto),
        Just(Placement::Left),
        Just(Placement::Right),
        Just(Placement::Top),
        Just(Placement::Bottom),
    ]
}

fn offsets_strategy() -> impl Strategy<Value = Offsets> {
    prop::array::uniform4((-20i32..20, -20i32..20)).prop_map(|pairs| {
        let [left, right, top, bottom] = pairs.map(|(x, y)| Point::new(x, y));
        Offsets {
            left,
            right,
            top,
            bottom,
        }
    })
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn optimal_is_concrete_and_prefers_fitting(
        anchor in rect_strategy(),
        container in rect_strategy(),
        screens in screens_strategy(),
        content in size_strategy(),
        triangle in 0i32..12,
        offsets in offsets_strategy(),
    ) {
        let query = PlacementQuery { anchor, screens: &screens, content, triangle_size: triangle, offsets: &offsets };
        let chosen = optimal_placement(&query, container);

        prop_assert!(chosen.is_concrete());
        let any_fits = Placement::PRIORITY.iter().any(|&p| query.fits(p));
        if any_fits {
            prop_assert!(query.fits(chosen));
        }
    }

    #[test]
    fn strictly_largest_fitting_space_wins(
        anchor in rect_strategy(),
        container in rect_strategy(),
        screens in screens_strategy(),
        content in size_strategy(),
        triangle in 0i32..12,
    ) {
        let offsets = Offsets::default();
        let query = PlacementQuery { anchor, screens: &screens, content, triangle_size: triangle, offsets: &offsets };
        let space = AvailableSpace::measure(anchor, container);

        for candidate in Placement::PRIORITY {
            let strictly_largest = Placement::PRIORITY
                .iter()
                .filter(|&&p| p != candidate)
                .all(|&p| space.toward(candidate) > space.toward(p));
            if strictly_largest && query.fits(candidate) {
                prop_assert_eq!(optimal_placement(&query, container), candidate);
            }
        }
    }

    #[test]
    fn fallback_respects_primary(
        anchor in rect_strategy(),
        screens in screens_strategy(),
        content in size_strategy(),
        primary in placement_strategy(),
        fallbacks in prop::collection::vec(placement_strategy(), 0..5),
    ) {
        let offsets = Offsets::default();
        let query = PlacementQuery { anchor, screens: &screens, content, triangle_size: 5, offsets: &offsets };

        match fallback_placement(&query, primary, &fallbacks) {
            None => {}
            Some(found) => {
                prop_assert!(!query.fits(primary));
                prop_assert!(found.is_concrete());
                prop_assert_ne!(found, primary);
                prop_assert!(query.fits(found));
                prop_assert!(fallbacks.contains(&found));
            }
        }
        if query.fits(primary) {
            prop_assert_eq!(fallback_placement(&query, primary, &fallbacks), None);
        }
    }

    #[test]
    fn candidates_touch_the_anchor(
        anchor in rect_strategy(),
        content in size_strategy(),
        triangle in 0i32..12,
    ) {
        let left = tooltip_rect(anchor, Placement::Left, content, triangle, Point::ZERO);
        let right = tooltip_rect(anchor, Placement::Right, content, triangle, Point::ZERO);
        let top = tooltip_rect(anchor, Placement::Top, content, triangle, Point::ZERO);
        let bottom = tooltip_rect(anchor, Placement::Bottom, content, triangle, Point::ZERO);

        prop_assert_eq!(left.right(), anchor.x);
        prop_assert_eq!(right.x, anchor.right());
        prop_assert_eq!(top.bottom(), anchor.y);
        prop_assert_eq!(bottom.y, anchor.bottom());

        prop_assert_eq!(left.width, content.width + triangle);
        prop_assert_eq!(top.height, content.height + triangle);
    }

    #[test]
    fn rect_and_fit_are_pure(
        anchor in rect_strategy(),
        screens in screens_strategy(),
        content in size_strategy(),
        placement in placement_strategy(),
    ) {
        let a = tooltip_rect(anchor, placement, content, 5, Point::new(3, -2));
        let b = tooltip_rect(anchor, placement, content, 5, Point::new(3, -2));
        prop_assert_eq!(a, b);
        prop_assert_eq!(fits_on_any_screen(&a, &screens), fits_on_any_screen(&b, &screens));
    }
}

#[test]
fn test_no_screens_means_nothing_fits() {
    let offsets = Offsets::default();
    let query = PlacementQuery {
        anchor: Rect::new(0, 0, 10, 10),
        screens: &[],
        content: Size::new(5, 5),
        triangle_size: 0,
        offsets: &offsets,
    };
    assert_eq!(optimal_placement(&query, Rect::new(0, 0, 100, 40)), Placement::Right);
    assert_eq!(fallback_placement(&query, Placement::Top, &[Placement::Left]), None);
}
