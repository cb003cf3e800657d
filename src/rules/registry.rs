//! Variant registry for name lookup.
//!
//! The `VariantRegistry` maps variant names to constructors. It is
//! populated from an explicit list at startup; nothing is discovered at
//! runtime.

use rustc_hash::FxHashMap;

use super::policy::RulePolicy;
use crate::core::{EngineError, Result};
use crate::games::{Klondike, Yukon};

/// Constructor for a variant's rule policy.
pub type VariantFactory = fn() -> Box<dyn RulePolicy>;

/// Registry of playable variants.
///
/// ## Example
///
/// ```
/// use solitaire_engine::rules::VariantRegistry;
///
/// let registry = VariantRegistry::standard();
/// let klondike = registry.create("Klondike").unwrap();
/// assert_eq!(klondike.config().num_tableau(), 7);
/// assert!(registry.create("Spider").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct VariantRegistry {
    variants: FxHashMap<String, VariantFactory>,
}

impl VariantRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in variant.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(|| Box::new(Klondike::default()));
        registry.register(|| Box::new(Klondike::draw_one()));
        registry.register(|| Box::new(Yukon::default()));
        registry
    }

    /// Register a variant under its configured name.
    ///
    /// Panics if a variant with the same name is already registered.
    pub fn register(&mut self, factory: VariantFactory) {
        let name = factory().name().to_string();
        if self.variants.contains_key(&name) {
            panic!("Variant '{}' already registered", name);
        }
        log::debug!("register variant {}", name);
        self.variants.insert(name, factory);
    }

    /// Build a variant's rule policy by name.
    pub fn create(&self, name: &str) -> Result<Box<dyn RulePolicy>> {
        self.variants
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| EngineError::UnknownVariant(name.to_string()))
    }

    /// Check if a variant name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variants.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Variant chosen when no saved name is usable: the first name sorted.
    #[must_use]
    pub fn default_name(&self) -> Option<&str> {
        self.names().into_iter().next()
    }

    /// Get the number of registered variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
