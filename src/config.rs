//! Driver configuration.
//!
//! ```
//! use graph_walk::config::TraversalConfig;
//!
//! let config = TraversalConfig::from_json(r#"{ "max_visits": 10 }"#).unwrap();
//! assert_eq!(config.max_visits, Some(10));
//! assert!(config.reset_marks);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{TraversalError, TraversalResult};

/// Settings applied by [`BasicTraversal`](crate::driver::BasicTraversal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Stop after this many visits. `None` walks until the iterator is
    /// exhausted. Must be positive when set.
    pub max_visits: Option<usize>,

    /// Clear the visited flags and counters of the graph at `init`.
    /// Default: true. Disable to resume a walk over already marked nodes.
    pub reset_marks: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_visits: None,
            reset_marks: true,
        }
    }
}

impl TraversalConfig {
    /// Sets the visit limit.
    #[must_use]
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = Some(max_visits);
        self
    }

    /// Sets whether scratch fields are cleared at `init`.
    #[must_use]
    pub fn with_reset_marks(mut self, reset_marks: bool) -> Self {
        self.reset_marks = reset_marks;
        self
    }

    /// Checks the settings for consistency.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `max_visits` is `Some(0)`.
    pub fn validate(&self) -> TraversalResult<()> {
        if self.max_visits == Some(0) {
            return Err(TraversalError::InvalidConfig(
                "max_visits must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    /// Returns `Json` on malformed input and `InvalidConfig` if validation fails.
    pub fn from_json(json: &str) -> TraversalResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the settings to JSON.
    ///
    /// # Errors
    /// Returns `Json` if serialization fails.
    pub fn to_json(&self) -> TraversalResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
