//! Binding descriptors for introspection and diagnostics.

use crate::binding::{Binding, ProviderKind};
use crate::scope::Scope;
use crate::token::Token;

/// Snapshot of one binding's configuration
///
/// Produced by [`Registry::descriptor`](crate::Registry::descriptor) and
/// [`Registry::descriptors`](crate::Registry::descriptors). It is a copy:
/// later changes to the binding are not reflected.
///
/// # Examples
///
/// ```rust
/// use token_ioc::{ProviderKind, Registry, Scope, Token};
///
/// #[derive(Default)]
/// struct Cache;
///
/// let registry = Registry::new();
/// let cache = Token::new("Cache");
/// registry.bind::<Cache>(cache).unwrap().to::<Cache>().in_singleton_scope();
///
/// let descriptor = registry.descriptor(cache).unwrap();
/// assert_eq!(descriptor.scope, Scope::Singleton);
/// assert!(matches!(descriptor.provider, ProviderKind::Constructible(_)));
/// assert!(!descriptor.cached);
///
/// registry.get_item::<Cache>(cache).unwrap();
/// assert!(registry.descriptor(cache).unwrap().cached);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    pub token: Token,
    /// Name of the type the binding resolves to
    pub value_type: &'static str,
    pub provider: ProviderKind,
    pub scope: Scope,
    /// Whether a singleton instance is currently cached
    pub cached: bool,
}

impl BindingDescriptor {
    pub(crate) fn of(binding: &Binding) -> Self {
        Self {
            token: binding.token,
            value_type: binding.value_type_name,
            provider: binding.provider_kind(),
            scope: binding.scope(),
            cached: binding.is_cached(),
        }
    }

    /// Returns true when a provider is attached.
    pub fn is_resolvable(&self) -> bool {
        self.provider != ProviderKind::None
    }
}

impl std::fmt::Display for BindingDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({}", self.token, self.value_type, self.scope)?;
        match self.provider {
            ProviderKind::None => write!(f, ", no provider")?,
            ProviderKind::Constructible(name) => write!(f, ", constructs {}", name)?,
            ProviderKind::Factory => write!(f, ", factory")?,
        }
        if self.cached {
            write!(f, ", cached")?;
        }
        write!(f, ")")
    }
}
