//! Usage strings.
//!
//! [`CommandTree::all_usage`] lists every executable path. [`CommandTree::smart_usage`]
//! gives one condensed line per child, using `[optional]` for parts that may
//! be left off and `(a|b)` for required alternatives.

use super::{CommandTree, NodeId};
use crate::Source;

const OPTIONAL_OPEN: &str = "[";
const OPTIONAL_CLOSE: &str = "]";
const REQUIRED_OPEN: &str = "(";
const REQUIRED_CLOSE: &str = ")";
const OR: &str = "|";
const SEPARATOR: &str = " ";

impl<S: Source> CommandTree<S> {
    /// Every usage under `node`, one per executable path or redirect.
    ///
    /// With `restricted`, nodes `source` cannot use are skipped.
    pub fn all_usage(&self, node: NodeId, source: &S, restricted: bool) -> Vec<String> {
        let mut result = Vec::new();
        self.collect_usage(node, source, &mut result, String::new(), restricted);
        result
    }

    fn collect_usage(
        &self,
        id: NodeId,
        source: &S,
        result: &mut Vec<String>,
        prefix: String,
        restricted: bool,
    ) {
        let node = self.node(id);
        if restricted && !node.can_use(source) {
            return;
        }
        if node.command().is_some() {
            result.push(prefix.clone());
        }
        if let Some(target) = node.redirect() {
            let redirect = self.redirect_text(target);
            if prefix.is_empty() {
                result.push(format!("{}{SEPARATOR}{redirect}", node.usage_text()));
            } else {
                result.push(format!("{prefix}{SEPARATOR}{redirect}"));
            }
        } else {
            for child in node.children() {
                let usage = self.node(child).usage_text();
                let next = if prefix.is_empty() {
                    usage
                } else {
                    format!("{prefix}{SEPARATOR}{usage}")
                };
                self.collect_usage(child, source, result, next, restricted);
            }
        }
    }

    /// One condensed usage line per child of `node` that `source` can use,
    /// in registration order.
    pub fn smart_usage(&self, node: NodeId, source: &S) -> Vec<(NodeId, String)> {
        let parent = self.node(node);
        let optional = parent.command().is_some();
        parent
            .children()
            .filter_map(|child| {
                self.smart_usage_of(child, source, optional, false)
                    .map(|usage| (child, usage))
            })
            .collect()
    }

    fn smart_usage_of(&self, id: NodeId, source: &S, optional: bool, deep: bool) -> Option<String> {
        let node = self.node(id);
        if !node.can_use(source) {
            return None;
        }

        let this = if optional {
            format!("{OPTIONAL_OPEN}{}{OPTIONAL_CLOSE}", node.usage_text())
        } else {
            node.usage_text()
        };
        if deep {
            return Some(this);
        }

        let child_optional = node.command().is_some();
        let (open, close) = if child_optional {
            (OPTIONAL_OPEN, OPTIONAL_CLOSE)
        } else {
            (REQUIRED_OPEN, REQUIRED_CLOSE)
        };

        if let Some(target) = node.redirect() {
            return Some(format!("{this}{SEPARATOR}{}", self.redirect_text(target)));
        }

        let children: Vec<NodeId> = node
            .children()
            .filter(|c| self.node(*c).can_use(source))
            .collect();
        match children.as_slice() {
            [] => {}
            [only] => {
                if let Some(usage) = self.smart_usage_of(*only, source, child_optional, child_optional) {
                    return Some(format!("{this}{SEPARATOR}{usage}"));
                }
            }
            many => {
                let mut child_usage: Vec<String> = Vec::new();
                for child in many {
                    if let Some(usage) = self.smart_usage_of(*child, source, child_optional, true) {
                        if !child_usage.contains(&usage) {
                            child_usage.push(usage);
                        }
                    }
                }
                if let [usage] = child_usage.as_slice() {
                    let usage = if child_optional {
                        format!("{OPTIONAL_OPEN}{usage}{OPTIONAL_CLOSE}")
                    } else {
                        usage.clone()
                    };
                    return Some(format!("{this}{SEPARATOR}{usage}"));
                }
                if child_usage.len() > 1 {
                    let alternatives: Vec<String> =
                        many.iter().map(|c| self.node(*c).usage_text()).collect();
                    return Some(format!(
                        "{this}{SEPARATOR}{open}{}{close}",
                        alternatives.join(OR)
                    ));
                }
            }
        }
        Some(this)
    }

    fn redirect_text(&self, target: NodeId) -> String {
        if target == self.root() {
            "...".to_owned()
        } else {
            format!("-> {}", self.node(target).usage_text())
        }
    }
}
