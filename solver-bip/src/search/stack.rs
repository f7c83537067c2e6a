//! Explicit work stack for depth-first exploration.
//!
//! A branched node pushes `Merge`, then its up child, then its down child, so
//! the down subtree is completed before the up subtree starts and the merge
//! runs only once both children have left their results on the result stack.

use super::SearchNode;
use crate::model::SearchResult;

/// Pending work.
#[derive(Debug)]
pub(crate) enum Frame {
    /// Solve and resolve this node.
    Visit(SearchNode),

    /// Combine the two most recent child results of node `node_id`.
    Merge {
        /// Node whose children are being combined.
        node_id: u64,
        /// Depth of that node.
        depth: usize,
    },
}

/// LIFO stack of frames plus the stack of finished subtree results.
#[derive(Debug, Default)]
pub(crate) struct WorkStack {
    /// Frames still to process.
    frames: Vec<Frame>,

    /// Results of finished subtrees, in completion order.
    results: Vec<SearchResult>,

    /// Largest number of pending frames seen.
    peak_len: usize,
}

impl WorkStack {
    /// Create an empty work stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the root node.
    pub fn with_root(root: SearchNode) -> Self {
        let mut stack = Self::new();
        stack.push_frame(Frame::Visit(root));
        stack
    }

    fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
        self.peak_len = self.peak_len.max(self.frames.len());
    }

    /// Schedule both children of `node_id`, down child first.
    pub fn push_children(&mut self, node_id: u64, depth: usize, down: SearchNode, up: SearchNode) {
        self.push_frame(Frame::Merge { node_id, depth });
        self.push_frame(Frame::Visit(up));
        self.push_frame(Frame::Visit(down));
    }

    /// Get the next frame.
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Record a finished subtree.
    pub fn push_result(&mut self, result: SearchResult) {
        self.results.push(result);
    }

    /// Take the (down, up) results of the most recently completed sibling pair.
    pub fn pop_sibling_results(&mut self) -> Option<(SearchResult, SearchResult)> {
        if self.results.len() < 2 {
            return None;
        }
        let up = self.results.pop()?;
        let down = self.results.pop()?;
        Some((down, up))
    }

    /// Take the final result once all frames are processed.
    pub fn take_final(&mut self) -> Option<SearchResult> {
        if self.frames.is_empty() && self.results.len() == 1 {
            self.results.pop()
        } else {
            None
        }
    }

    /// Number of pending frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Largest number of pending frames seen.
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }
}
