//! Per-run resolver configuration.

/// Immutable settings for one resolution run.
///
/// The defaults reproduce the classic flattening behavior: marker comments
/// on, `.tex` appended to bare filenames, unbounded recursion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Emit begin/end marker comments around each inserted file.
    pub markers: bool,
    /// Extension appended to filenames that do not already end with it.
    pub extension: String,
    /// Maximum inclusion depth; `None` leaves recursion unbounded.
    pub max_depth: Option<usize>,
    /// Fail fast when a file includes itself, directly or transitively.
    pub detect_cycles: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markers: true,
            extension: ".tex".to_string(),
            max_depth: None,
            detect_cycles: false,
        }
    }
}

impl Config {
    /// Create the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable marker comments.
    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    /// Set the default extension appended to bare filenames.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Limit how deep inclusions may nest.
    ///
    /// Exceeding the limit aborts the run with
    /// [`ResolveError::TooDeep`](crate::ResolveError::TooDeep) instead of
    /// recursing further.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Enable or disable cycle detection.
    ///
    /// When enabled, a file appearing twice on the stack of currently open
    /// files aborts the run with a clean
    /// [`ResolveError::Cycle`](crate::ResolveError::Cycle) rather than
    /// recursing until resources run out.
    pub fn with_cycle_detection(mut self, detect: bool) -> Self {
        self.detect_cycles = detect;
        self
    }
}
