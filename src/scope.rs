//! Binding scope definitions.

/// Scope controlling whether a binding caches its instance.
///
/// Every binding starts out [`Scope::Transient`]; the scope selector returned
/// by [`Binder::to`](crate::Binder::to) and
/// [`Binder::to_factory`](crate::Binder::to_factory) upgrades it.
///
/// Changing the scope never rewrites history: instances handed out while the
/// binding was transient stay independent, and only resolutions that happen
/// after the switch share the cached instance.
///
/// # Examples
///
/// ```rust
/// use token_ioc::{Registry, Scope, Token};
/// use std::sync::Arc;
///
/// let registry = Registry::new();
/// let token = Token::new("Counter");
///
/// let selector = registry.bind::<u32>(token).unwrap().to_factory(|| Arc::new(7));
/// assert_eq!(selector.scope(), Scope::Transient);
///
/// selector.in_singleton_scope();
/// assert_eq!(registry.descriptor(token).unwrap().scope, Scope::Singleton);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Scope {
    /// New instance per resolution, never cached
    #[default]
    Transient,
    /// Created on first resolution, then shared until the binding is removed
    Singleton,
}

impl Scope {
    /// Returns true when resolutions are cached.
    #[inline]
    pub fn caches(self) -> bool {
        matches!(self, Scope::Singleton)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Transient => f.write_str("transient"),
            Scope::Singleton => f.write_str("singleton"),
        }
    }
}
