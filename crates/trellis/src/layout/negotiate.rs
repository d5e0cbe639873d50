//! The geometry negotiation algorithm.
//!
//! Negotiation turns `{min, hint, max, policy}` tuples plus the space a
//! layout has into concrete boxes. Boxes produced here are anchored at their
//! top-left corner in a frame whose origin is the top-left of the layout's
//! window, with `y` growing downward. [`to_rendering_area`] converts them into
//! the center-origin convention item areas use.

use crate::{
    config::Config,
    geom::{Axis, Rect, Size},
    layout::{Arrangement, Nesting},
    policy::{AxisPolicy, Policy, SizePolicy},
};

/// The bounds and policy of one child, as seen by the negotiation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemInfo {
    /// Smallest acceptable size.
    pub min: Size,
    /// Preferred size.
    pub hint: Size,
    /// Largest acceptable size.
    pub max: Size,
    /// Per-axis capabilities.
    pub policy: SizePolicy,
}

impl ItemInfo {
    /// Bundle bounds and a policy.
    pub fn new(min: Size, hint: Size, max: Size, policy: SizePolicy) -> Self {
        Self {
            min,
            hint,
            max,
            policy,
        }
    }

    /// The hint along `axis`, if it takes part in negotiation. Invalid hints
    /// and ignored axes yield `None`.
    pub fn hint_along(&self, axis: Axis) -> Option<f32> {
        if self.hint.is_valid() && !self.policy.along(axis).can_ignore() {
            Some(self.hint.along(axis))
        } else {
            None
        }
    }
}

/// The adjustment still needed on each axis: `Fixed` when `achieved` is
/// within `tolerance` of `desired`, `Maximum` (shrink) when it is too large
/// and `Minimum` (grow) when it is too small.
pub fn shrink_or_grow(desired: Size, achieved: Size, tolerance: f32) -> SizePolicy {
    let axis_action = |axis: Axis| {
        let diff = achieved.along(axis) - desired.along(axis);
        if diff.abs() <= tolerance {
            Policy::Fixed
        } else if diff > 0.0 {
            Policy::Maximum
        } else {
            Policy::Minimum
        }
    };
    SizePolicy::new(axis_action(Axis::Horizontal), axis_action(Axis::Vertical))
}

/// The extent along `axis` an item takes when `delta` is applied to
/// `current`.
///
/// A fixed axis with a valid hint always yields the hint. Otherwise the
/// candidate is clamped to `[min, max]` and then snapped back to the hint if
/// it crossed the hint in a direction the policy forbids.
pub fn compute_along_from_policy(current: f32, delta: f32, info: &ItemInfo, axis: Axis) -> f32 {
    let policy = info.policy.along(axis);
    let hint = info.hint_along(axis);
    if let (Some(h), true) = (hint, policy.is_fixed()) {
        return h;
    }
    let candidate = (current + delta)
        .max(info.min.along(axis))
        .min(info.max.along(axis));
    match hint {
        Some(h) if candidate < h && !policy.can_shrink() => h,
        Some(h) if candidate > h && !policy.can_extend() => h,
        _ => candidate,
    }
}

/// The width an item takes when `delta` is applied to `current`.
pub fn compute_width_from_policy(current: Size, delta: f32, info: &ItemInfo) -> f32 {
    compute_along_from_policy(current.w, delta, info, Axis::Horizontal)
}

/// The height an item takes when `delta` is applied to `current`.
pub fn compute_height_from_policy(current: Size, delta: f32, info: &ItemInfo) -> f32 {
    compute_along_from_policy(current.h, delta, info, Axis::Vertical)
}

/// Both axes of [`compute_width_from_policy`] and
/// [`compute_height_from_policy`] at once.
pub fn compute_size_from_policy(current: Size, delta: Size, info: &ItemInfo) -> Size {
    Size::new(
        compute_width_from_policy(current, delta.w, info),
        compute_height_from_policy(current, delta.h, info),
    )
}

/// Can an item at `current` carry out `action` along `axis`?
fn can_act_along(info: &ItemInfo, current: Size, action: &AxisPolicy, axis: Axis) -> bool {
    let policy = info.policy.along(axis);
    let cur = current.along(axis);
    let min = info.min.along(axis);
    let max = info.max.along(axis);
    let hint = info.hint_along(axis);

    let shrink = action.can_shrink()
        && match hint {
            Some(h) if !policy.can_shrink() => cur > h.max(min),
            _ => policy.can_shrink() && cur > min,
        };
    let extend = action.can_extend()
        && match hint {
            Some(h) if !policy.can_extend() => cur < h.min(max),
            _ => policy.can_extend() && cur < max,
        };
    shrink || extend
}

/// Whether an item at `current` can help with `action` on each axis, as
/// `(horizontal, vertical)`.
///
/// Without a valid hint an item can shrink if its policy allows it and it is
/// above its minimum, and extend symmetrically against its maximum. With a
/// valid hint, an axis whose policy forbids shrinking (or extending) uses the
/// hint as its floor (or ceiling) instead.
pub fn can_be_used_to(info: &ItemInfo, current: Size, action: &SizePolicy) -> (bool, bool) {
    (
        can_act_along(info, current, &action.horizontal, Axis::Horizontal),
        can_act_along(info, current, &action.vertical, Axis::Vertical),
    )
}

/// Starting extent along `axis`: the hint when it takes part, otherwise
/// `fallback`.
fn initial_along(info: &ItemInfo, axis: Axis, fallback: f32) -> f32 {
    info.hint_along(axis).unwrap_or(fallback)
}

/// The extent along a non-negotiated axis: as close to `available` as the
/// item's policy allows.
fn fill_along(info: &ItemInfo, axis: Axis, available: f32) -> f32 {
    let start = initial_along(info, axis, available);
    compute_along_from_policy(start, available - start, info, axis)
}

/// Distribute `available` along `axis` among `infos`, starting from
/// `sizes`.
///
/// Each round splits the space still missing (or in excess) among the
/// children able to act on it, in proportion to their stretch weights.
/// When growing, children that expand take precedence over those that only
/// grow. A child that is offered space and does not move drops out;
/// children with zero stretch wait until the weighted ones saturate. Rounds stop when the total
/// is within tolerance, when nobody can act, or after the configured
/// number of rounds.
fn distribute(infos: &[ItemInfo], sizes: &mut [f32], axis: Axis, available: f32, config: &Config) {
    let mut adjustable = vec![true; infos.len()];
    for _ in 0..config.max_negotiation_passes {
        let used: f32 = sizes.iter().sum();
        let mut desired = Size::zero();
        desired.set_along(axis, available);
        let mut achieved = Size::zero();
        achieved.set_along(axis, used);
        let action = shrink_or_grow(desired, achieved, config.tolerance);
        let act = *action.along(axis);
        if act.is_fixed() {
            break;
        }

        let mut candidates: Vec<usize> = (0..infos.len())
            .filter(|&i| {
                let mut current = Size::zero();
                current.set_along(axis, sizes[i]);
                let usable = can_be_used_to(&infos[i], current, &action);
                adjustable[i]
                    && match axis {
                        Axis::Horizontal => usable.0,
                        Axis::Vertical => usable.1,
                    }
            })
            .collect();
        if act.can_extend() {
            let expanders: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&i| infos[i].policy.along(axis).can_expand())
                .collect();
            if !expanders.is_empty() {
                candidates = expanders;
            }
        }
        if candidates.is_empty() {
            break;
        }

        let remaining = available - used;
        let total: f32 = candidates
            .iter()
            .map(|&i| infos[i].policy.along(axis).stretch())
            .sum();
        for &i in &candidates {
            let weight = if total > 0.0 {
                infos[i].policy.along(axis).stretch() / total
            } else {
                1.0 / candidates.len() as f32
            };
            let delta = remaining * weight;
            let next = compute_along_from_policy(sizes[i], delta, &infos[i], axis);
            // A zero share says nothing about whether the child can move.
            if delta.abs() > f32::EPSILON && (next - sizes[i]).abs() <= f32::EPSILON {
                adjustable[i] = false;
            }
            sizes[i] = next;
        }
    }
}

/// Negotiate boxes for `infos` inside a window of size `window`.
///
/// Returned boxes are top-left anchored relative to the window, in the same
/// order as `infos`.
pub fn negotiate(
    infos: &[ItemInfo],
    window: Size,
    arrangement: Arrangement,
    margin: Size,
    spacing: f32,
    config: &Config,
) -> Vec<Rect> {
    if infos.is_empty() {
        return Vec::new();
    }
    let interior = Size::new(
        (window.w - 2.0 * margin.w).max(0.0),
        (window.h - 2.0 * margin.h).max(0.0),
    );

    let Some(main) = arrangement.axis() else {
        return infos
            .iter()
            .map(|info| {
                let sz = Size::new(
                    fill_along(info, Axis::Horizontal, interior.w),
                    fill_along(info, Axis::Vertical, interior.h),
                );
                Rect::new(
                    margin.w + (interior.w - sz.w) / 2.0,
                    margin.h + (interior.h - sz.h) / 2.0,
                    sz.w,
                    sz.h,
                )
            })
            .collect();
    };
    let cross = main.cross();

    let gaps = spacing.max(0.0) * (infos.len() - 1) as f32;
    let available = (interior.along(main) - gaps).max(0.0);
    let share = available / infos.len() as f32;

    let mut sizes: Vec<f32> = infos
        .iter()
        .map(|info| {
            let start = initial_along(info, main, share);
            compute_along_from_policy(start, 0.0, info, main)
        })
        .collect();
    distribute(infos, &mut sizes, main, available, config);

    let total: f32 = sizes.iter().sum::<f32>() + gaps;
    let mut pos = margin.along(main) + ((interior.along(main) - total) / 2.0).max(0.0);
    infos
        .iter()
        .zip(sizes)
        .map(|(info, extent)| {
            let cross_extent = fill_along(info, cross, interior.along(cross));
            let mut anchor = Size::zero();
            anchor.set_along(main, pos);
            anchor.set_along(
                cross,
                margin.along(cross) + (interior.along(cross) - cross_extent) / 2.0,
            );
            let mut sz = Size::zero();
            sz.set_along(main, extent);
            sz.set_along(cross, cross_extent);
            pos += extent + spacing.max(0.0);
            Rect::new(anchor.w, anchor.h, sz.w, sz.h)
        })
        .collect()
}

/// Convert a negotiated box into the center-origin area an item uses.
///
/// The box is shifted by half the window and half its own size, and the
/// vertical sense is flipped. Boxes of a nested layout additionally carry the
/// window's own center, which is already in the shared frame.
pub fn to_rendering_area(b: &Rect, window: &Rect, nesting: Nesting) -> Rect {
    let cx = b.x + b.w / 2.0 - window.w / 2.0;
    let cy = window.h / 2.0 - b.y - b.h / 2.0;
    let r = Rect::new(cx, cy, b.w, b.h);
    match nesting {
        Nesting::Root => r,
        Nesting::Nested => r.translate(window.anchor()),
    }
}
