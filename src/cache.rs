use crate::ast::normalize;
use crate::error::CompilationError;
use crate::expression::{compile, CompiledExpression};
use log::trace;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Remembers recent compilation outcomes, failures included.
///
/// Entries are keyed by the normalized text, so inputs that differ only in case
/// or whitespace share one entry. Parentheses survive normalization, which keeps
/// the error classification of a cached failure correct.
pub struct ExpressionCache {
    entries: LruCache<String, Result<CompiledExpression, CompilationError>>,
}

impl ExpressionCache {
    /// Creates a cache holding at most `capacity` outcomes (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn get_or_compile(&mut self, text: &str) -> Result<CompiledExpression, CompilationError> {
        let key = normalize(text);
        if let Some(outcome) = self.entries.get(&key) {
            trace!("Cache hit for {:?}", key);
            return outcome.clone();
        }

        let outcome = compile(text);
        self.entries.put(key, outcome.clone());
        outcome
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ExpressionCache {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_inputs_share_entry() {
        let mut cache = ExpressionCache::new(8);
        let a = cache.get_or_compile("X + 3.5").unwrap();
        let b = cache.get_or_compile("  x +3.5 ").unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(a, b);
        assert_eq!(b.evaluate(1.0), 4.5);
    }

    #[test]
    fn test_failures_are_cached() {
        let mut cache = ExpressionCache::new(8);
        assert_eq!(
            cache.get_or_compile("x*(x)"),
            Err(CompilationError::ParenthesesUnsupported)
        );
        assert_eq!(
            cache.get_or_compile("x * (x)"),
            Err(CompilationError::ParenthesesUnsupported)
        );
        assert_eq!(cache.get_or_compile("xx"), Err(CompilationError::InvalidSyntax));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_eviction_and_clear() {
        let mut cache = ExpressionCache::new(2);
        cache.get_or_compile("x").unwrap();
        cache.get_or_compile("x+1").unwrap();
        cache.get_or_compile("x+2").unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = ExpressionCache::new(0);
        cache.get_or_compile("x").unwrap();
        cache.get_or_compile("2*x").unwrap();
        assert_eq!(cache.len(), 1);
    }
}
