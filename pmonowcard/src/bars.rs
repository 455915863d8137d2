//! Decorative animated bar generation
//!
//! Each card carries a fixed number of equalizer-style bars. Their
//! horizontal layout is deterministic; their animation parameters are drawn
//! fresh on every render, so two renders of the same track animate
//! differently on purpose.

use rand::Rng;

/// Number of bars on a card
pub const BAR_COUNT: usize = 84;

/// Horizontal offset of the first bar (px)
const BAR_LEFT_BASE: u32 = 1;

/// Horizontal step between consecutive bars (px)
const BAR_LEFT_STEP: u32 = 4;

/// Bounds for the per-bar animation duration (ms), inclusive
const BAR_ANIM_MIN_MS: u32 = 500;
const BAR_ANIM_MAX_MS: u32 = 1000;

/// Markup for the bar elements, [`BAR_COUNT`] of them
pub fn bar_markup() -> String {
    "<div class='bar'></div>".repeat(BAR_COUNT)
}

/// Per-bar CSS: deterministic offsets, randomized animation
///
/// Bar `i` (1-based) sits at `left = 1 + 4·(i-1)` px. Each bar gets an
/// animation duration uniform in [500, 1000] ms and a cubic-bezier easing
/// whose control points are uniform in [0,1) (x) and [0,2) (y).
pub fn bar_css() -> String {
    let mut rng = rand::rng();
    let mut css = String::new();
    let mut left = BAR_LEFT_BASE;

    for index in 1..=BAR_COUNT {
        let anim = rng.random_range(BAR_ANIM_MIN_MS..=BAR_ANIM_MAX_MS);
        let x1 = rng.random::<f64>();
        let y1 = rng.random::<f64>() * 2.0;
        let x2 = rng.random::<f64>();
        let y2 = rng.random::<f64>() * 2.0;

        css.push_str(&format!(
            ".bar:nth-child({index}) {{ left: {left}px; animation-duration: 15s, {anim}ms; animation-timing-function: ease, cubic-bezier({x1},{y1},{x2},{y2}); }}"
        ));
        left += BAR_LEFT_STEP;
    }

    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_has_exactly_84_bars() {
        let markup = bar_markup();
        assert_eq!(markup.matches("<div class='bar'></div>").count(), BAR_COUNT);
    }

    #[test]
    fn test_css_covers_every_bar() {
        let css = bar_css();
        for index in 1..=BAR_COUNT {
            assert!(
                css.contains(&format!(".bar:nth-child({index}) ")),
                "missing rule for bar {index}"
            );
        }
        // And not one more
        assert!(!css.contains(&format!(".bar:nth-child({}) ", BAR_COUNT + 1)));
    }

    #[test]
    fn test_offsets_increase_by_fixed_step() {
        let css = bar_css();
        let mut expected_left = BAR_LEFT_BASE;
        for index in 1..=BAR_COUNT {
            assert!(
                css.contains(&format!(
                    ".bar:nth-child({index}) {{ left: {expected_left}px;"
                )),
                "bar {index} is not at {expected_left}px"
            );
            expected_left += BAR_LEFT_STEP;
        }
    }

    #[test]
    fn test_durations_within_bounds() {
        let css = bar_css();
        for rule in css.split("animation-duration: 15s, ").skip(1) {
            let ms: u32 = rule
                .split("ms")
                .next()
                .and_then(|v| v.parse().ok())
                .expect("unparseable duration");
            assert!((BAR_ANIM_MIN_MS..=BAR_ANIM_MAX_MS).contains(&ms), "duration {ms}ms out of range");
        }
    }

    #[test]
    fn test_bezier_points_within_bounds() {
        let css = bar_css();
        for rule in css.split("cubic-bezier(").skip(1) {
            let args = rule.split(')').next().expect("unterminated cubic-bezier");
            let points: Vec<f64> = args
                .split(',')
                .map(|v| v.trim().parse().expect("unparseable control point"))
                .collect();
            assert_eq!(points.len(), 4);
            assert!((0.0..1.0).contains(&points[0]));
            assert!((0.0..2.0).contains(&points[1]));
            assert!((0.0..1.0).contains(&points[2]));
            assert!((0.0..2.0).contains(&points[3]));
        }
    }
}
