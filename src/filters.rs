use std::fmt;

pub type Filter = Box<dyn Fn(String) -> String + Send + Sync>;

/// Extension points, both identity until replaced.
pub struct Filters {
    /// rewrites the css expression used to pick notices, before it is compiled
    selector: Filter,
    /// post-processes the notifications page body
    output: Filter,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            selector: Box::new(|s| s),
            output: Box::new(|s| s),
        }
    }
}

impl fmt::Debug for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filters").finish_non_exhaustive()
    }
}

impl Filters {
    pub fn selector<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.selector = Box::new(f);
        self
    }

    pub fn output<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.output = Box::new(f);
        self
    }

    pub fn apply_selector(&self, expression: String) -> String {
        (self.selector)(expression)
    }

    pub fn apply_output(&self, html: String) -> String {
        (self.output)(html)
    }
}
