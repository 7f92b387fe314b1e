//! Width-constrained tool/status bar.
//!
//! An [`AdaptiveBar`] keeps an ordered row of components, each either fixed
//! width or flexible, and evicts Low-priority ones right to left as the bar
//! narrows. Evicted components come back in reverse order once there is room
//! again. The bar only decides membership and horizontal slots; drawing is
//! the host's business.

pub mod adaptive;
pub mod component;

pub use adaptive::{AdaptiveBar, BarMetrics, Placement};
pub use component::{BarComponent, BarWidth, Priority};
