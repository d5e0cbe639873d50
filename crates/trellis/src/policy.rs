use std::{fmt, str::FromStr};

use bitflags::bitflags;

use crate::{
    error::{Error, Result},
    geom::Axis,
};

bitflags! {
    /// What an item may do along one axis when space is negotiated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// The item can be made smaller than its hint.
        const SHRINK = 1 << 0;
        /// The item can be made larger than its hint.
        const GROW = 1 << 1;
        /// The item wants as much space as it can get.
        const EXPAND = 1 << 2;
        /// The hint is disregarded on this axis.
        const IGNORE = 1 << 3;
    }
}

/// Named size policy presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// The hint is the only acceptable size.
    Fixed,
    /// The hint is a minimum; the item may grow.
    Minimum,
    /// The hint is a maximum; the item may shrink.
    Maximum,
    /// The hint is preferred, but the item may shrink or grow.
    Preferred,
    /// Like `Preferred`, but the item actively claims spare space.
    Expanding,
    /// Like `Minimum`, but the item actively claims spare space.
    MinimumExpanding,
    /// The hint is ignored; the item takes whatever it gets.
    Ignored,
}

/// Static name table for the presets.
const POLICY_NAMES: &[(&str, Policy)] = &[
    ("fixed", Policy::Fixed),
    ("minimum", Policy::Minimum),
    ("maximum", Policy::Maximum),
    ("preferred", Policy::Preferred),
    ("expanding", Policy::Expanding),
    ("minimum_expanding", Policy::MinimumExpanding),
    ("ignored", Policy::Ignored),
];

impl Policy {
    /// The capability set this preset stands for.
    pub fn capabilities(self) -> Capabilities {
        match self {
            Self::Fixed => Capabilities::empty(),
            Self::Minimum => Capabilities::GROW,
            Self::Maximum => Capabilities::SHRINK,
            Self::Preferred => Capabilities::SHRINK | Capabilities::GROW,
            Self::Expanding => Capabilities::SHRINK | Capabilities::GROW | Capabilities::EXPAND,
            Self::MinimumExpanding => Capabilities::GROW | Capabilities::EXPAND,
            Self::Ignored => Capabilities::SHRINK | Capabilities::GROW | Capabilities::IGNORE,
        }
    }

    /// The preset's name in the name table.
    pub fn name(self) -> &'static str {
        POLICY_NAMES
            .iter()
            .find(|(_, p)| *p == self)
            .map(|(n, _)| *n)
            .unwrap_or("fixed")
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        POLICY_NAMES
            .iter()
            .find(|(n, _)| *n == s)
            .map(|(_, p)| *p)
            .ok_or_else(|| Error::UnknownSizePolicy(s.into()))
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capabilities plus a stretch weight for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPolicy {
    /// Shrink/grow/expand/ignore flags.
    pub caps: Capabilities,
    /// Relative share of spare space, never negative.
    stretch: f32,
}

impl Default for AxisPolicy {
    fn default() -> Self {
        Policy::Preferred.into()
    }
}

impl From<Policy> for AxisPolicy {
    fn from(p: Policy) -> Self {
        Self {
            caps: p.capabilities(),
            stretch: 1.0,
        }
    }
}

impl AxisPolicy {
    /// Build an axis policy from raw capabilities.
    pub fn new(caps: Capabilities, stretch: f32) -> Self {
        Self {
            caps,
            stretch: stretch.max(0.0),
        }
    }

    /// A policy allowing nothing, used as "no action" by the negotiation.
    pub fn fixed() -> Self {
        Policy::Fixed.into()
    }

    /// Return a copy with a different stretch weight. Negative weights clamp
    /// to zero.
    pub fn with_stretch(mut self, stretch: f32) -> Self {
        self.stretch = stretch.max(0.0);
        self
    }

    /// The stretch weight.
    pub fn stretch(&self) -> f32 {
        self.stretch
    }

    /// Can the item be made smaller?
    pub fn can_shrink(&self) -> bool {
        self.caps.contains(Capabilities::SHRINK)
    }

    /// Can the item be made larger?
    pub fn can_grow(&self) -> bool {
        self.caps.contains(Capabilities::GROW)
    }

    /// Does the item claim spare space?
    pub fn can_expand(&self) -> bool {
        self.caps.contains(Capabilities::EXPAND)
    }

    /// Is the hint disregarded?
    pub fn can_ignore(&self) -> bool {
        self.caps.contains(Capabilities::IGNORE)
    }

    /// Can the item be made larger in any way?
    pub fn can_extend(&self) -> bool {
        self.can_grow() || self.can_expand()
    }

    /// A fixed axis cannot shrink, grow or expand.
    pub fn is_fixed(&self) -> bool {
        !self.can_shrink() && !self.can_grow() && !self.can_expand()
    }
}

/// Per-axis sizing capabilities of an item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizePolicy {
    /// Horizontal axis.
    pub horizontal: AxisPolicy,
    /// Vertical axis.
    pub vertical: AxisPolicy,
}

impl From<Policy> for SizePolicy {
    fn from(p: Policy) -> Self {
        Self::uniform(p)
    }
}

impl SizePolicy {
    /// Build a policy from one preset per axis.
    pub fn new(horizontal: Policy, vertical: Policy) -> Self {
        Self {
            horizontal: horizontal.into(),
            vertical: vertical.into(),
        }
    }

    /// The same preset on both axes.
    pub fn uniform(p: Policy) -> Self {
        Self::new(p, p)
    }

    /// A policy permitting nothing on either axis.
    pub fn fixed() -> Self {
        Self::uniform(Policy::Fixed)
    }

    /// Parse a preset name and apply it to both axes.
    pub fn by_name(name: &str) -> Result<Self> {
        Ok(Self::uniform(name.parse()?))
    }

    /// Set the stretch weights of both axes.
    pub fn with_stretch(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal = self.horizontal.with_stretch(horizontal);
        self.vertical = self.vertical.with_stretch(vertical);
        self
    }

    /// The policy along `axis`.
    pub fn along(&self, axis: Axis) -> &AxisPolicy {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    /// Mutable access to the policy along `axis`.
    pub fn along_mut(&mut self, axis: Axis) -> &mut AxisPolicy {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Is `axis` fixed?
    pub fn is_fixed(&self, axis: Axis) -> bool {
        self.along(axis).is_fixed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let fixed = AxisPolicy::from(Policy::Fixed);
        assert!(fixed.is_fixed());
        assert!(!fixed.can_shrink() && !fixed.can_grow() && !fixed.can_expand());
        assert!(!fixed.can_ignore());

        let min = AxisPolicy::from(Policy::Minimum);
        assert!(min.can_grow() && !min.can_shrink() && !min.is_fixed());

        let max = AxisPolicy::from(Policy::Maximum);
        assert!(max.can_shrink() && !max.can_extend());

        let exp = AxisPolicy::from(Policy::MinimumExpanding);
        assert!(exp.can_expand() && exp.can_extend() && !exp.can_shrink());

        assert!(AxisPolicy::from(Policy::Ignored).can_ignore());
    }

    #[test]
    fn names() -> Result<()> {
        for (name, policy) in POLICY_NAMES {
            assert_eq!(name.parse::<Policy>()?, *policy);
            assert_eq!(policy.to_string(), *name);
        }
        assert!(matches!(
            "stretchy".parse::<Policy>(),
            Err(Error::UnknownSizePolicy(_))
        ));
        let p = SizePolicy::by_name("expanding")?;
        assert!(p.horizontal.can_expand() && p.vertical.can_expand());
        Ok(())
    }

    #[test]
    fn stretch_is_never_negative() {
        let p = SizePolicy::default().with_stretch(-3.0, 2.0);
        assert_eq!(p.horizontal.stretch(), 0.0);
        assert_eq!(p.vertical.stretch(), 2.0);
        assert!(p.is_fixed(Axis::Horizontal) == p.horizontal.is_fixed());
    }
}
