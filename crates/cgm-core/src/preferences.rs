//! Display preferences read by the trend graph
//!
//! The preferences are owned by the host (configured on the phone and synced
//! to the watch). The graph only reads them, once per frame.

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Preference validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreferencesError {
    /// The graph's vertical range is empty or inverted
    #[error("Graph range is empty (bottom {bottom} >= top {top})")]
    EmptyGraphRange {
        /// Configured lower bound of the graph
        bottom: u16,
        /// Configured upper bound of the graph
        top: u16,
    },
}

/// Vertical scale and reference lines of the trend graph, in mg/dL
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphPreferences {
    /// Value mapped to the bottom row of the graph
    pub bottom_of_graph: u16,
    /// Value mapped just above the top row of the graph
    pub top_of_graph: u16,
    /// Lower bound of the target range
    pub bottom_of_range: u16,
    /// Upper bound of the target range
    pub top_of_range: u16,
    /// Spacing between horizontal gridlines, 0 disables them
    pub h_gridlines: u16,
}

impl Default for GraphPreferences {
    fn default() -> Self {
        Self {
            bottom_of_graph: 40,
            top_of_graph: 250,
            bottom_of_range: 70,
            top_of_range: 180,
            h_gridlines: 50,
        }
    }
}

impl GraphPreferences {
    /// Check that the preferences describe a drawable graph.
    ///
    /// The renderer assumes this holds and does not check it per frame.
    pub fn validate(&self) -> Result<(), PreferencesError> {
        if self.top_of_graph <= self.bottom_of_graph {
            return Err(PreferencesError::EmptyGraphRange {
                bottom: self.bottom_of_graph,
                top: self.top_of_graph,
            });
        }
        Ok(())
    }

    /// Target range bounds in drawing order (upper first)
    pub fn target_range(&self) -> [u16; 2] {
        [self.top_of_range, self.bottom_of_range]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(GraphPreferences::default().validate(), Ok(()));
    }

    #[test]
    fn test_equal_bounds_rejected() {
        let prefs = GraphPreferences {
            bottom_of_graph: 100,
            top_of_graph: 100,
            ..GraphPreferences::default()
        };

        assert_eq!(
            prefs.validate(),
            Err(PreferencesError::EmptyGraphRange {
                bottom: 100,
                top: 100
            })
        );
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let prefs = GraphPreferences {
            bottom_of_graph: 300,
            top_of_graph: 40,
            ..GraphPreferences::default()
        };

        assert!(prefs.validate().is_err());
    }

    #[test]
    fn test_target_range_order() {
        let prefs = GraphPreferences::default();
        assert_eq!(prefs.target_range(), [180, 70]);
    }
}
