//! Rule registry
//!
//! Maps rule names to predicates, in three shapes:
//!
//! | shape          | signature                                   | used for                 |
//! |----------------|---------------------------------------------|--------------------------|
//! | zero-parameter | `Fn(&str) -> bool`                          | `email`, `uuid`, ...     |
//! | parameterized  | `Fn(&str, &[String]) -> bool`               | `length(2|20)`, `in(..)` |
//! | custom-typed   | `Fn(&Shape<'_>, &dyn Record) -> bool`       | cross-field checks       |
//!
//! String predicates see the canonical rendering of the value (see
//! [`Scalar::render`](crate::Scalar::render)), never its native form.
//!
//! A process-wide registry backs the free functions ([`register_rule`],
//! [`crate::validate`], ...). Validation works on a snapshot taken at the
//! start of the call and holds no lock while walking, so custom predicates
//! may validate nested values or register rules. Registration copies the
//! tables when a snapshot is still in use.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::foundation::{Record, Shape};

/// Zero-parameter string predicate.
pub type RuleFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Parameterized string predicate.
pub type ParamRuleFn = Arc<dyn Fn(&str, &[String]) -> bool + Send + Sync>;

/// Typed predicate with access to the owning record.
pub type CustomRuleFn = Arc<dyn Fn(&Shape<'_>, &dyn Record) -> bool + Send + Sync>;

/// Which table a rule name lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleArity {
    ZeroParam,
    Parameterized,
    Custom,
}

// ============================================================================
// RULE REGISTRY
// ============================================================================

/// Name-to-predicate tables consulted by the field validator.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, RuleFn>,
    param_rules: HashMap<String, ParamRuleFn>,
    custom_rules: HashMap<String, CustomRuleFn>,
}

impl RuleRegistry {
    /// A registry with no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in leaf rules.
    #[must_use]
    pub fn with_builtins() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::empty();
        #[cfg(feature = "builtins")]
        crate::rules::register_builtins(&mut registry);
        registry
    }

    /// Adds or replaces a zero-parameter rule.
    pub fn register_rule<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Adds or replaces a parameterized rule.
    pub fn register_param_rule<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(&str, &[String]) -> bool + Send + Sync + 'static,
    {
        self.param_rules.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Adds or replaces a custom-typed rule.
    pub fn register_custom_rule<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(&Shape<'_>, &dyn Record) -> bool + Send + Sync + 'static,
    {
        self.custom_rules.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Removes `name` from every table. Returns whether anything was removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        let a = self.rules.remove(name).is_some();
        let b = self.param_rules.remove(name).is_some();
        let c = self.custom_rules.remove(name).is_some();
        a || b || c
    }

    pub fn rule(&self, name: &str) -> Option<&RuleFn> {
        self.rules.get(name)
    }

    pub fn param_rule(&self, name: &str) -> Option<&ParamRuleFn> {
        self.param_rules.get(name)
    }

    pub fn custom_rule(&self, name: &str) -> Option<&CustomRuleFn> {
        self.custom_rules.get(name)
    }

    /// Looks a name up in dispatch order: custom, parameterized, zero-parameter.
    pub fn arity(&self, name: &str) -> Option<RuleArity> {
        if self.custom_rules.contains_key(name) {
            Some(RuleArity::Custom)
        } else if self.param_rules.contains_key(name) {
            Some(RuleArity::Parameterized)
        } else if self.rules.contains_key(name) {
            Some(RuleArity::ZeroParam)
        } else {
            None
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arity(name).is_some()
    }

    /// All registered names, sorted and deduplicated.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rules
            .keys()
            .chain(self.param_rules.keys())
            .chain(self.custom_rules.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len() + self.param_rules.len() + self.custom_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &sorted_keys(&self.rules))
            .field("param_rules", &sorted_keys(&self.param_rules))
            .field("custom_rules", &sorted_keys(&self.custom_rules))
            .finish()
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

// ============================================================================
// PROCESS-WIDE REGISTRY
// ============================================================================

static GLOBAL: LazyLock<RwLock<Arc<RuleRegistry>>> =
    LazyLock::new(|| RwLock::new(Arc::new(RuleRegistry::with_builtins())));

/// Snapshot of the process-wide registry. Later registrations do not affect
/// a snapshot already taken.
pub fn global() -> Arc<RuleRegistry> {
    GLOBAL.read().clone()
}

fn update_global(apply: impl FnOnce(&mut RuleRegistry)) {
    let mut guard = GLOBAL.write();
    apply(Arc::make_mut(&mut *guard));
}

/// Adds or replaces a zero-parameter rule in the process-wide registry.
pub fn register_rule<F>(name: impl Into<String>, predicate: F)
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    let name = name.into();
    tracing::debug!(rule = %name, "registering rule");
    update_global(|registry| {
        registry.register_rule(name, predicate);
    });
}

/// Adds or replaces a parameterized rule in the process-wide registry.
pub fn register_param_rule<F>(name: impl Into<String>, predicate: F)
where
    F: Fn(&str, &[String]) -> bool + Send + Sync + 'static,
{
    let name = name.into();
    tracing::debug!(rule = %name, "registering parameterized rule");
    update_global(|registry| {
        registry.register_param_rule(name, predicate);
    });
}

/// Adds or replaces a custom-typed rule in the process-wide registry.
pub fn register_custom_rule<F>(name: impl Into<String>, predicate: F)
where
    F: Fn(&Shape<'_>, &dyn Record) -> bool + Send + Sync + 'static,
{
    let name = name.into();
    tracing::debug!(rule = %name, "registering custom rule");
    update_global(|registry| {
        registry.register_custom_rule(name, predicate);
    });
}

/// Removes a rule from the process-wide registry.
pub fn unregister_rule(name: &str) -> bool {
    let mut removed = false;
    update_global(|registry| removed = registry.unregister(name));
    removed
}

// ============================================================================
// TESTS
// ============================================================================
