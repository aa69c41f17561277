//! The token-keyed registry.

use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Instant;

use crate::binder::Binder;
use crate::binding::{Binding, ProviderKind};
use crate::config::RegistryConfig;
use crate::descriptors::BindingDescriptor;
use crate::error::{IocError, IocResult, Operation};
use crate::internal::{Map, RwLock};
use crate::observer::{IocObserver, LoggingObserver, Observers};
use crate::token::Token;

/// Registry mapping tokens to bindings.
///
/// A token can be bound once; binding it again fails until the token is
/// removed. Resolution is typed at the call site: `get_item::<T>` must name
/// the same `T` the token was bound with.
///
/// # Thread Safety
///
/// `Registry` is `Send + Sync`. The token map sits behind a read-write lock
/// and singleton caches are one-shot cells, so concurrent first resolutions
/// of a singleton construct exactly one instance. Providers run with no
/// registry lock held and may resolve other tokens.
///
/// # Examples
///
/// ```
/// use token_ioc::{Registry, Token};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let registry = Registry::new();
/// let greeting = Token::new("greeting");
///
/// let count = Arc::new(AtomicUsize::new(1));
/// registry
///     .bind::<String>(greeting)
///     .unwrap()
///     .to_value_factory(move || format!("hello world {}", count.fetch_add(1, Ordering::SeqCst)));
///
/// assert_eq!(*registry.get_item::<String>(greeting).unwrap(), "hello world 1");
/// assert_eq!(*registry.get_item::<String>(greeting).unwrap(), "hello world 2");
///
/// registry.remove_item(greeting).unwrap();
/// assert!(registry.get_item::<String>(greeting).is_err());
/// ```
pub struct Registry {
    name: String,
    bindings: RwLock<Map<Token, Arc<Binding>>>,
    observers: Observers,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    /// Creates an empty registry from configuration.
    pub fn with_config(config: &RegistryConfig) -> Self {
        let mut observers = Observers::new();
        if config.trace_resolutions {
            observers.add(Arc::new(LoggingObserver::with_prefix(config.name.clone())));
        }

        Self {
            name: config.name.clone(),
            bindings: RwLock::new(Map::with_capacity_and_hasher(
                config.initial_capacity,
                Default::default(),
            )),
            observers,
        }
    }

    /// Name given by the configuration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers an observer for bind, remove and resolve events.
    pub fn add_observer(&mut self, observer: Arc<dyn IocObserver>) {
        self.observers.add(observer);
    }

    /// Starts a binding for `token`, resolved later as `T`.
    ///
    /// The new binding is transient and has no provider; attach one with the
    /// returned [`Binder`].
    ///
    /// # Errors
    ///
    /// [`IocError::DuplicateBinding`] if `token` is already bound.
    pub fn bind<T>(&self, token: Token) -> IocResult<Binder<'_, T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let binding = {
            let mut bindings = self.bindings.write();
            match bindings.entry(token) {
                Entry::Occupied(_) => return Err(IocError::DuplicateBinding { token }),
                Entry::Vacant(slot) => slot.insert(Arc::new(Binding::new::<T>(token))).clone(),
            }
        };

        tracing::debug!(registry = %self.name, %token, value_type = binding.value_type_name, "binding created");
        self.observers.bound(token, binding.value_type_name);
        Ok(Binder::new(binding))
    }

    /// Resolves `token` to an instance of `T`.
    ///
    /// Transient bindings run their provider on every call. Singleton
    /// bindings run it once and return the same `Arc` afterwards.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    ///
    /// - [`IocError::UnboundToken`] if `token` has no binding
    /// - [`IocError::NoProviderBound`] if no provider was attached
    /// - [`IocError::TypeMismatch`] if the binding was made for another type
    pub fn get_item<T>(&self, token: Token) -> IocResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if !self.observers.has_observers() {
            return self.resolve::<T>(token).map(|(instance, _)| instance);
        }

        self.observers.resolving(token);
        let started = Instant::now();
        match self.resolve::<T>(token) {
            Ok((instance, cache_hit)) => {
                self.observers.resolved(token, started.elapsed(), cache_hit);
                Ok(instance)
            }
            Err(error) => {
                self.observers.failed(token, &error);
                Err(error)
            }
        }
    }

    fn resolve<T>(&self, token: Token) -> IocResult<(Arc<T>, bool)>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let binding = self.binding(token, Operation::Resolve)?;
        if binding.provider_kind() == ProviderKind::None {
            return Err(IocError::NoProviderBound { token });
        }
        binding.check_type::<T>()?;

        let (erased, cache_hit) = binding.resolve()?;
        let instance = erased
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| IocError::TypeMismatch {
                token,
                bound: binding.value_type_name,
                requested: std::any::type_name::<T>(),
            })?;
        Ok((instance, cache_hit))
    }

    /// Removes the binding for `token`, dropping any cached instance.
    ///
    /// Returns the registry so removals can be chained.
    ///
    /// # Errors
    ///
    /// [`IocError::UnboundToken`] if `token` has no binding.
    pub fn remove_item(&self, token: Token) -> IocResult<&Self> {
        let removed = self.bindings.write().remove(&token);
        if removed.is_none() {
            return Err(IocError::UnboundToken { token, op: Operation::Remove });
        }

        tracing::debug!(registry = %self.name, %token, "binding removed");
        self.observers.removed(token);
        Ok(self)
    }

    /// Returns true if `token` is bound.
    pub fn contains(&self, token: Token) -> bool {
        self.bindings.read().contains_key(&token)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Describes the binding for `token`, if any.
    pub fn descriptor(&self, token: Token) -> Option<BindingDescriptor> {
        self.bindings.read().get(&token).map(|binding| BindingDescriptor::of(binding))
    }

    /// Describes every binding, ordered by token creation.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        let mut descriptors: Vec<BindingDescriptor> = self
            .bindings
            .read()
            .values()
            .map(|binding| BindingDescriptor::of(binding))
            .collect();
        descriptors.sort_by_key(|descriptor| descriptor.token);
        descriptors
    }

    fn binding(&self, token: Token, op: Operation) -> IocResult<Arc<Binding>> {
        self.bindings
            .read()
            .get(&token)
            .cloned()
            .ok_or(IocError::UnboundToken { token, op })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("bindings", &self.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
