//! Ambiguity detection.
//!
//! Two siblings are ambiguous when an example input of one is also accepted
//! by the other: whichever is tried first would shadow the other for that
//! input. Detection is heuristic since it only sees the examples argument
//! types choose to publish.

use std::collections::BTreeSet;

use tracing::debug;

use super::{CommandTree, NodeId};
use crate::Source;

/// `child` publishes example `inputs` that `sibling` also accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    /// Common parent of the two nodes.
    pub parent: NodeId,
    /// The node whose examples were tried.
    pub child: NodeId,
    /// The node that accepted them.
    pub sibling: NodeId,
    /// The overlapping inputs.
    pub inputs: BTreeSet<String>,
}

impl<S: Source> CommandTree<S> {
    /// Every ambiguous sibling pair in the tree, in registration order.
    ///
    /// Each ordered pair is reported separately, so overlap in both
    /// directions yields two entries.
    pub fn find_ambiguities(&self) -> Vec<Ambiguity> {
        let mut found = Vec::new();
        self.collect_ambiguities(self.root(), &mut found);
        found
    }

    fn collect_ambiguities(&self, parent: NodeId, found: &mut Vec<Ambiguity>) {
        let node = self.node(parent);
        for child in node.children() {
            let examples = self.node(child).examples();
            for sibling in node.children().filter(|s| *s != child) {
                let sibling_node = self.node(sibling);
                let inputs: BTreeSet<String> = examples
                    .iter()
                    .filter(|input| sibling_node.is_valid_input(input))
                    .cloned()
                    .collect();
                if !inputs.is_empty() {
                    debug!(
                        parent = %parent,
                        child = %self.node(child).name(),
                        sibling = %sibling_node.name(),
                        count = inputs.len(),
                        "Ambiguous siblings"
                    );
                    found.push(Ambiguity {
                        parent,
                        child,
                        sibling,
                        inputs,
                    });
                }
            }
            self.collect_ambiguities(child, found);
        }
    }
}
