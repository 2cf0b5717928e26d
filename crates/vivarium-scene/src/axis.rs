//! Fixed local rotation axes

use serde::{Deserialize, Serialize};

/// One of a node's three designated local rotation axes.
///
/// Axes are identified by this enum and used as array indices, so angle and
/// extent storage stays array-backed and per-instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    U = 0,
    V = 1,
    W = 2,
}

impl Axis {
    /// All three axes in the fixed evaluation order u, v, w
    pub const ALL: [Axis; 3] = [Axis::U, Axis::V, Axis::W];

    /// Array index backing this axis
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Axis::U => "u",
            Axis::V => "v",
            Axis::W => "w",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_indices() {
        assert_eq!(Axis::U.index(), 0);
        assert_eq!(Axis::V.index(), 1);
        assert_eq!(Axis::W.index(), 2);
    }

    #[test]
    fn test_axis_order() {
        assert_eq!(Axis::ALL, [Axis::U, Axis::V, Axis::W]);
    }
}
