//! Lazily resolved injection sites on consumer objects.
//!
//! An [`Injector`] is built once per registry. It describes sites
//! ([`InjectionSite`]) that consumers turn into an [`Inject`] field when they
//! are constructed. The field resolves its token on first read.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::IocResult;
use crate::internal::OnceCell;
use crate::registry::Registry;
use crate::token::Token;

/// Modifier for an injection site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Resolve through the registry on every read instead of keeping the
    /// first value on the consumer.
    NoCache,
}

/// Shorthand for [`Marker::NoCache`].
pub const NOCACHE: Marker = Marker::NoCache;

/// Builds injection sites bound to one registry.
///
/// # Examples
///
/// ```rust
/// use token_ioc::{Inject, Injector, Registry, Token, NOCACHE};
/// use std::sync::Arc;
///
/// let registry = Arc::new(Registry::new());
/// let config = Token::new("config");
/// registry.bind::<String>(config).unwrap().to_value_factory(|| "debug".to_string());
///
/// let injector = Injector::new(registry.clone());
///
/// struct Consumer {
///     config: Inject<String>,
///     live_config: Inject<String>,
/// }
///
/// let consumer = Consumer {
///     config: injector.site(config, &[]).materialize(),
///     live_config: injector.site(config, &[NOCACHE]).materialize(),
/// };
///
/// assert_eq!(*consumer.config.get().unwrap(), "debug");
/// assert!(consumer.config.is_resolved());
///
/// assert_eq!(*consumer.live_config.get().unwrap(), "debug");
/// assert!(!consumer.live_config.is_resolved());
/// ```
#[derive(Clone)]
pub struct Injector {
    registry: Arc<Registry>,
}

impl Injector {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Describes a site resolving `token` as `T`, modified by `markers`.
    pub fn site<T>(&self, token: Token, markers: &[Marker]) -> InjectionSite<T>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        InjectionSite {
            registry: self.registry.clone(),
            token,
            memoize: !markers.contains(&Marker::NoCache),
            _marker: PhantomData,
        }
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector").field("registry", &self.registry.name()).finish()
    }
}

/// Description of a lazily resolved field: which token, and whether to memoize.
///
/// Sites hold no value. Each call to [`materialize`](Self::materialize)
/// yields an independent [`Inject`] for one consumer instance.
pub struct InjectionSite<T: ?Sized> {
    registry: Arc<Registry>,
    token: Token,
    memoize: bool,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl<T> InjectionSite<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    /// Creates the per-instance lazy field.
    pub fn materialize(&self) -> Inject<T> {
        Inject {
            registry: self.registry.clone(),
            token: self.token,
            memoize: self.memoize,
            slot: OnceCell::new(),
        }
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn memoizes(&self) -> bool {
        self.memoize
    }
}

impl<T: ?Sized> Clone for InjectionSite<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            token: self.token,
            memoize: self.memoize,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for InjectionSite<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionSite")
            .field("token", &self.token)
            .field("memoize", &self.memoize)
            .finish()
    }
}

/// Lazily resolved field on a consumer object.
///
/// The first [`get`](Self::get) resolves the token. A memoizing field keeps
/// that value and never asks the registry again, even if the binding is later
/// removed or rebound. A `NoCache` field asks the registry on every read, so
/// it sees the binding's own scope: fresh transient instances, or the shared
/// singleton.
pub struct Inject<T: ?Sized> {
    registry: Arc<Registry>,
    token: Token,
    memoize: bool,
    slot: OnceCell<Arc<T>>,
}

impl<T> Inject<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    /// Creates a lazy field directly, without an [`Injector`].
    pub fn new(registry: Arc<Registry>, token: Token, markers: &[Marker]) -> Self {
        Injector::new(registry).site(token, markers).materialize()
    }

    /// Returns the value, resolving it on first access.
    ///
    /// A failed resolution stores nothing; the next read tries again. Threads
    /// racing on the first read of a memoizing field wait for one resolution.
    pub fn get(&self) -> IocResult<Arc<T>> {
        if !self.memoize {
            return self.registry.get_item::<T>(self.token);
        }
        // Concurrent first reads block on the cell, so the provider runs once.
        self.slot
            .get_or_try_init(|| self.registry.get_item::<T>(self.token))
            .cloned()
    }

    /// Returns true once a memoized value is stored.
    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn memoizes(&self) -> bool {
        self.memoize
    }
}

impl<T: ?Sized> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("token", &self.token)
            .field("memoize", &self.memoize)
            .field("resolved", &self.slot.get().is_some())
            .finish()
    }
}
