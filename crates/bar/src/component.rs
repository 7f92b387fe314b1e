use serde::{Deserialize, Serialize};

/// Horizontal sizing rule of a bar component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarWidth {
    /// Always exactly this wide.
    Fixed(u32),
    /// Shares whatever the fixed components leave over.
    Flexible,
}

impl BarWidth {
    #[inline]
    pub fn is_flexible(self) -> bool {
        matches!(self, BarWidth::Flexible)
    }

    /// Declared width; flexible components claim nothing up front.
    #[inline]
    pub fn fixed_or_zero(self) -> u32 {
        match self {
            BarWidth::Fixed(width) => width,
            BarWidth::Flexible => 0,
        }
    }
}

/// Eviction eligibility. Only `Low` components are shed under space pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Low,
}

impl Priority {
    /// Flexible components stay, fixed ones may go.
    pub fn default_for(width: BarWidth) -> Self {
        match width {
            BarWidth::Flexible => Priority::High,
            BarWidth::Fixed(_) => Priority::Low,
        }
    }
}

/// One entry of an [`AdaptiveBar`](crate::AdaptiveBar).
///
/// `K` is whatever the host uses to find its widget again (an id, a name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarComponent<K> {
    key: K,
    width: BarWidth,
    priority: Priority,
    /// Insertion index, assigned by the bar. Evicted components keep it so
    /// they return to the same slot.
    position: usize,
}

impl<K> BarComponent<K> {
    pub fn new(key: K, width: BarWidth) -> Self {
        Self {
            key,
            width,
            priority: Priority::default_for(width),
            position: 0,
        }
    }

    pub fn fixed(key: K, width: u32) -> Self {
        Self::new(key, BarWidth::Fixed(width))
    }

    pub fn flexible(key: K) -> Self {
        Self::new(key, BarWidth::Flexible)
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn width(&self) -> BarWidth {
        self.width
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_evictable(&self) -> bool {
        self.priority == Priority::Low
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}
