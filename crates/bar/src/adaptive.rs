//! Single-row container that sheds and reclaims components as its width
//! changes.
//!
//! # Invariants
//!
//! 1. `active` is always sorted by ascending `position`.
//! 2. `evicted` is a stack: the most recently evicted component is restored
//!    first.
//! 3. Only `Priority::Low` components are ever evicted.
//! 4. Eviction needs `remaining < min_remaining_space`, restoration needs
//!    `remaining > min_remaining_space`. Both can never hold at the same
//!    width, so a bar resting at one width does not flicker.
//!
//! # Failure Modes
//!
//! Resizing never fails. When nothing evictable is left the bar is simply
//! allowed to overflow.

use crate::component::{BarComponent, BarWidth};
use formbar_config::AdaptiveBarConfig;
use formbar_core::{LayoutError, Result};
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace, warn};

/// Tuning for an [`AdaptiveBar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarMetrics {
    pub min_remaining_space: u32,
    pub unit_padding: u32,
}

impl BarMetrics {
    /// Build metrics from the config file's `[bar]` section.
    pub fn from_config(cfg: &AdaptiveBarConfig) -> Self {
        Self {
            min_remaining_space: cfg.min_remaining_space,
            unit_padding:        cfg.unit_padding,
        }
    }
}

impl Default for BarMetrics {
    fn default() -> Self {
        Self::from_config(&AdaptiveBarConfig::default())
    }
}

/// Horizontal slot assigned to an active component by [`AdaptiveBar::arrange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement<K> {
    pub key: K,
    pub x: u32,
    pub width: u32,
}

#[derive(Debug, Clone)]
pub struct AdaptiveBar<K> {
    metrics: BarMetrics,
    active: Vec<BarComponent<K>>,
    evicted: Vec<BarComponent<K>>,
    next_position: usize,
    last_width: u32,
    placements: Vec<Placement<K>>,
}

impl<K> AdaptiveBar<K>
where
    K: Clone + PartialEq + fmt::Debug,
{
    pub fn new(metrics: BarMetrics) -> Self {
        Self {
            metrics,
            active: Vec::new(),
            evicted: Vec::new(),
            next_position: 0,
            last_width: 0,
            placements: Vec::new(),
        }
    }

    pub fn metrics(&self) -> BarMetrics {
        self.metrics
    }

    /// Append a component at the next position and return that position.
    ///
    /// A key may only be added once.
    pub fn add_component(&mut self, mut component: BarComponent<K>) -> Result<usize> {
        if self.contains(component.key()) {
            return Err(LayoutError::InvalidArgument(format!(
                "bar component {:?} is already present",
                component.key()
            )));
        }
        let position = self.next_position;
        component.set_position(position);
        self.next_position += 1;
        self.active.push(component);
        Ok(position)
    }

    /// Remove a component whether it is active or evicted, then re-arrange.
    pub fn remove_component(&mut self, key: &K) -> Option<BarComponent<K>> {
        let removed = if let Some(index) = self.active.iter().position(|c| c.key() == key) {
            self.active.remove(index)
        } else {
            let index = self.evicted.iter().position(|c| c.key() == key)?;
            self.evicted.remove(index)
        };
        self.arrange();
        Some(removed)
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    /// Active components in position order.
    pub fn active(&self) -> &[BarComponent<K>] {
        &self.active
    }

    /// Evicted components, oldest eviction first.
    pub fn evicted(&self) -> &[BarComponent<K>] {
        &self.evicted
    }

    /// Result of the last [`arrange`](Self::arrange).
    pub fn placements(&self) -> &[Placement<K>] {
        &self.placements
    }

    pub fn last_width(&self) -> u32 {
        self.last_width
    }

    pub fn contains(&self, key: &K) -> bool {
        self.is_active(key) || self.evicted.iter().any(|c| c.key() == key)
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.active.iter().any(|c| c.key() == key)
    }

    /// Sum of the declared widths of active fixed components.
    pub fn total_active_fixed_width(&self) -> u32 {
        self.active.iter().map(|c| c.width().fixed_or_zero()).sum()
    }

    // ── Layout ───────────────────────────────────────────────────────────────

    /// Lay the active components out left to right at the last known width.
    ///
    /// Fixed components get their declared width. Flexible components split
    /// what is left after fixed widths and per-component padding; the split
    /// is floored and never negative.
    pub fn arrange(&mut self) {
        let bar_width = i64::from(self.last_width);
        let fixed = i64::from(self.total_active_fixed_width());
        let padding = i64::from(self.metrics.unit_padding) * self.active.len() as i64;
        let flexible = self.active.iter().filter(|c| c.width().is_flexible()).count();

        let share = if flexible > 0 {
            let leftover = (bar_width - fixed - padding).max(0);
            u32::try_from(leftover / flexible as i64).unwrap_or(u32::MAX)
        } else {
            0
        };

        let unit_padding = self.metrics.unit_padding;
        let mut x = 0u32;
        self.placements = self
            .active
            .iter()
            .map(|c| {
                let width = match c.width() {
                    BarWidth::Fixed(width) => width,
                    BarWidth::Flexible => share,
                };
                let placement = Placement {
                    key: c.key().clone(),
                    x,
                    width,
                };
                x = x.saturating_add(width).saturating_add(unit_padding);
                placement
            })
            .collect();

        trace!(
            width = self.last_width,
            active = self.active.len(),
            evicted = self.evicted.len(),
            share,
            "arranged bar"
        );
    }

    /// React to a new container width: shed Low-priority components when
    /// shrinking, bring evicted ones back when growing, then re-arrange.
    pub fn on_resize(&mut self, new_width: u32) {
        if new_width == self.last_width {
            return;
        }

        if new_width < self.last_width {
            self.shed(new_width);
        } else {
            self.reclaim(new_width);
        }

        let needed = u64::from(self.total_active_fixed_width())
            + u64::from(self.metrics.unit_padding) * self.active.len() as u64;
        if needed > u64::from(new_width) {
            warn!(width = new_width, needed, "bar overflows; nothing left to evict");
        }

        self.last_width = new_width;
        self.arrange();
    }

    fn remaining(&self, width: u32, extra: u32) -> i64 {
        i64::from(width) - i64::from(self.total_active_fixed_width()) - i64::from(extra)
    }

    fn shed(&mut self, new_width: u32) {
        let threshold = i64::from(self.metrics.min_remaining_space);

        loop {
            let remaining = self.remaining(new_width, 0);
            if remaining >= threshold {
                break;
            }

            // Rightmost evictable component.
            let Some(index) = self.active.iter().rposition(BarComponent::is_evictable) else {
                break;
            };

            // Dropping a flexible component frees no fixed width, so the
            // shortfall cannot be fixed this way. Stop here; components
            // further left are not considered.
            if self.active[index].width().is_flexible() {
                debug!(
                    key = ?self.active[index].key(),
                    remaining,
                    "eviction stopped at flexible component"
                );
                break;
            }

            let victim = self.active.remove(index);
            debug!(
                key = ?victim.key(),
                position = victim.position(),
                remaining,
                "evicting bar component"
            );
            self.evicted.push(victim);
        }
    }

    fn reclaim(&mut self, new_width: u32) {
        let threshold = i64::from(self.metrics.min_remaining_space);

        while let Some(candidate) = self.evicted.last() {
            let remaining = self.remaining(new_width, candidate.width().fixed_or_zero());
            if remaining <= threshold {
                break;
            }
            let Some(restored) = self.evicted.pop() else {
                break;
            };
            debug!(
                key = ?restored.key(),
                position = restored.position(),
                remaining,
                "restoring bar component"
            );
            let at = self
                .active
                .partition_point(|c| c.position() < restored.position());
            self.active.insert(at, restored);
        }
    }
}

impl<K> Default for AdaptiveBar<K>
where
    K: Clone + PartialEq + fmt::Debug,
{
    fn default() -> Self {
        Self::new(BarMetrics::default())
    }
}
