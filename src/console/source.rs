//! The value console commands run on behalf of.

use std::sync::Arc;

/// Who a console command runs as.
///
/// `execute as` forks one source per name; `execute deop` drops operator
/// rights for the rest of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSource {
    name: Arc<str>,
    operator: bool,
}

impl ConsoleSource {
    pub fn new(name: impl Into<Arc<str>>, operator: bool) -> Self {
        Self {
            name: name.into(),
            operator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_operator(&self) -> bool {
        self.operator
    }

    /// Same rights, different name.
    pub fn with_name(&self, name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            operator: self.operator,
        }
    }

    pub fn without_operator(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            operator: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_sources() {
        let console = ConsoleSource::new("console", true);
        let alice = console.with_name("alice");
        assert_eq!(alice.name(), "alice");
        assert!(alice.is_operator());
        let plain = alice.without_operator();
        assert_eq!(plain.name(), "alice");
        assert!(!plain.is_operator());
    }
}
