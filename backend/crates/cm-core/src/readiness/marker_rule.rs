/// Lifecycle step a marker line announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerTarget {
    Starting,
    Ready,
    ShutdownWarning,
    NetworkDown,
    Stopped,
}

/// Substring that, when found in a log line, announces a lifecycle step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRule {
    pub marker: String,
    pub target: MarkerTarget,
}

impl MarkerRule {
    pub fn new<S: Into<String>>(marker: S, target: MarkerTarget) -> Self {
        Self {
            marker: marker.into(),
            target,
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        line.contains(self.marker.as_str())
    }
}
