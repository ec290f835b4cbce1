//! Builder for configuring contour-tree pipelines.

use crate::pipeline::ContourTreePipeline;

/// Configures and constructs [`ContourTreePipeline`] instances.
///
/// # Examples
/// ```
/// use contour_core::ContourTreeBuilder;
///
/// let pipeline = ContourTreeBuilder::new().with_simplify(true).build();
/// assert!(pipeline.simplify());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContourTreeBuilder {
    simplify: bool,
}

impl ContourTreeBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use contour_core::ContourTreeBuilder;
    ///
    /// assert!(!ContourTreeBuilder::new().simplify());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Condenses the final contour tree to its own significant vertices when
    /// enabled.
    #[must_use]
    pub const fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    /// Returns whether the final contour tree will be simplified.
    #[must_use]
    pub const fn simplify(&self) -> bool {
        self.simplify
    }

    /// Constructs the configured pipeline.
    #[must_use]
    pub const fn build(self) -> ContourTreePipeline {
        ContourTreePipeline::new(self.simplify)
    }
}
