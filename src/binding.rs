//! Binding records stored by the registry.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::error::{IocError, IocResult};
use crate::internal::{OnceCell, RwLock};
use crate::scope::Scope;
use crate::token::Token;

// Type-erased Arc for storage. Always wraps an `Arc<T>` so unsized `T`
// (trait objects) survive the round trip through `Any`.
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

pub(crate) type ErasedCtor = Arc<dyn Fn() -> AnyArc + Send + Sync>;

#[inline]
pub(crate) fn erase<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> AnyArc {
    Arc::new(value)
}

/// How a binding produces instances.
#[derive(Clone)]
pub(crate) enum Provider {
    None,
    /// Zero-argument construction of a concrete type
    Constructible {
        type_name: &'static str,
        create: ErasedCtor,
    },
    Factory(ErasedCtor),
}

impl Provider {
    pub(crate) fn kind(&self) -> ProviderKind {
        match self {
            Provider::None => ProviderKind::None,
            Provider::Constructible { type_name, .. } => ProviderKind::Constructible(type_name),
            Provider::Factory(_) => ProviderKind::Factory,
        }
    }
}

/// Public view of a binding's provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Nothing attached yet
    None,
    /// Bound with [`Binder::to`](crate::Binder::to); carries the concrete type name
    Constructible(&'static str),
    /// Bound with [`Binder::to_factory`](crate::Binder::to_factory)
    Factory,
}

struct BindingState {
    provider: Provider,
    scope: Scope,
}

/// Provider, scope and singleton cache for one token.
pub(crate) struct Binding {
    pub(crate) token: Token,
    pub(crate) value_type: TypeId,
    pub(crate) value_type_name: &'static str,
    state: RwLock<BindingState>,
    cache: OnceCell<AnyArc>,
}

impl Binding {
    pub(crate) fn new<T: ?Sized + 'static>(token: Token) -> Self {
        Self {
            token,
            value_type: TypeId::of::<T>(),
            value_type_name: std::any::type_name::<T>(),
            state: RwLock::new(BindingState {
                provider: Provider::None,
                scope: Scope::Transient,
            }),
            cache: OnceCell::new(),
        }
    }

    /// Replaces the provider; last write wins.
    pub(crate) fn set_provider(&self, provider: Provider) {
        self.state.write().provider = provider;
    }

    pub(crate) fn set_scope(&self, scope: Scope) {
        self.state.write().scope = scope;
    }

    pub(crate) fn scope(&self) -> Scope {
        self.state.read().scope
    }

    pub(crate) fn provider_kind(&self) -> ProviderKind {
        self.state.read().provider.kind()
    }

    pub(crate) fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }

    pub(crate) fn check_type<T: ?Sized + 'static>(&self) -> IocResult<()> {
        if self.value_type == TypeId::of::<T>() {
            Ok(())
        } else {
            Err(IocError::TypeMismatch {
                token: self.token,
                bound: self.value_type_name,
                requested: std::any::type_name::<T>(),
            })
        }
    }

    /// Produces an instance according to the current scope.
    ///
    /// Returns the erased instance and whether it came from the cache. The
    /// state lock is released before the provider runs, so providers may
    /// resolve other tokens from the same registry.
    pub(crate) fn resolve(&self) -> IocResult<(AnyArc, bool)> {
        let (create, scope) = {
            let state = self.state.read();
            match &state.provider {
                Provider::None => return Err(IocError::NoProviderBound { token: self.token }),
                Provider::Constructible { create, .. } | Provider::Factory(create) => {
                    (create.clone(), state.scope)
                }
            }
        };

        if !scope.caches() {
            return Ok((create(), false));
        }

        if let Some(cached) = self.cache.get() {
            return Ok((cached.clone(), true));
        }

        let mut constructed = false;
        let instance = self.cache.get_or_init(|| {
            constructed = true;
            create()
        });
        Ok((instance.clone(), !constructed))
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("token", &self.token)
            .field("value_type", &self.value_type_name)
            .field("provider", &self.provider_kind())
            .field("scope", &self.scope())
            .field("cached", &self.is_cached())
            .finish()
    }
}
