//! Per-signal configuration.

/// Default number of tombstones tolerated before the slot order is compacted.
pub const DEFAULT_COMPACT_AFTER: usize = 8;

/// Settings applied when a [`Signal`](crate::Signal) is created.
///
/// ## Field semantics
/// - `label`: name attached to the signal's log events (`None` = `"signal"`)
/// - `compact_after`: number of disconnected slots to accumulate before the
///   registration order is compacted (min 1). Compaction never runs while a
///   dispatch is in progress.
#[derive(Clone, Debug)]
pub struct SignalConfig {
    pub label: Option<String>,
    pub compact_after: usize,
}

impl SignalConfig {
    /// Set the label used in log events.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the compaction threshold. Zero is treated as one.
    pub fn with_compact_after(mut self, compact_after: usize) -> Self {
        self.compact_after = compact_after.max(1);
        self
    }

    pub(crate) fn label_or_default(&self) -> &str {
        self.label.as_deref().unwrap_or("signal")
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            label: None,
            compact_after: DEFAULT_COMPACT_AFTER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SignalConfig::default();
        assert_eq!(config.label_or_default(), "signal");
        assert_eq!(config.compact_after, DEFAULT_COMPACT_AFTER);
    }

    #[test]
    fn test_builder_clamps_threshold() {
        let config = SignalConfig::default()
            .with_label("document_changed")
            .with_compact_after(0);
        assert_eq!(config.label_or_default(), "document_changed");
        assert_eq!(config.compact_after, 1);
    }
}
