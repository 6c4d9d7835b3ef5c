//! Configuration types for walks

use super::error::ErrorHandler;

/// Configuration for a walk. Resolved once when the walk starts.
#[derive(Debug)]
pub struct WalkConfig {
    /// Descend into a subtree before moving on to the next sibling.
    /// Ignored for bottom-up walks, which are always depth-first.
    pub depth_first: bool,
    /// Yield a directory before its children (true) or after all of its
    /// descendants (false).
    pub top_down: bool,
    /// List directories reached through symlinks. There is no cycle
    /// detection: a link back to an ancestor walks forever.
    pub follow_symlinks: bool,
    /// Receives directories that could not be listed. None drops them.
    pub on_error: Option<ErrorHandler>,
}

impl WalkConfig {
    pub fn breadth_first(mut self) -> Self {
        self.depth_first = false;
        self
    }

    pub fn bottom_up(mut self) -> Self {
        self.top_down = false;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn on_error(mut self, handler: ErrorHandler) -> Self {
        self.on_error = Some(handler);
        self
    }

    /// The order this configuration actually produces.
    pub fn order(&self) -> Order {
        match (self.top_down, self.depth_first) {
            (false, _) => Order::BottomUp,
            (true, true) => Order::DepthFirst,
            (true, false) => Order::BreadthFirst,
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            depth_first: true,
            top_down: true,
            follow_symlinks: false,
            on_error: None,
        }
    }
}

/// Effective visiting order of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Parent first, then each child's whole subtree.
    DepthFirst,
    /// Parent first, then level by level.
    BreadthFirst,
    /// Every descendant first, parent last.
    BottomUp,
}
