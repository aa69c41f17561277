//! Fluent registration: attach a provider, then optionally pick a scope.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::binding::{erase, Binding, ErasedCtor, Provider};
use crate::scope::Scope;

/// Conversion from a constructed `Arc<Self>` into the bound abstraction.
///
/// Every type implements `Implements<Self>`, so binding a concrete type to
/// itself needs nothing extra. Binding a concrete type to a trait object
/// needs one upcast impl, which [`implements!`](crate::implements) writes.
///
/// # Examples
///
/// ```rust
/// use token_ioc::{implements, Registry, Token};
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// #[derive(Default)]
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".to_string()
///     }
/// }
///
/// implements!(English => dyn Greeter);
///
/// let registry = Registry::new();
/// let greeter = Token::new("Greeter");
/// registry.bind::<dyn Greeter>(greeter).unwrap().to::<English>();
///
/// assert_eq!(registry.get_item::<dyn Greeter>(greeter).unwrap().greet(), "hello");
/// ```
pub trait Implements<T: ?Sized> {
    /// Converts the freshly constructed instance into the abstraction.
    fn upcast(self: Arc<Self>) -> Arc<T>;
}

impl<C> Implements<C> for C {
    #[inline(always)]
    fn upcast(self: Arc<Self>) -> Arc<C> {
        self
    }
}

/// Declares that a concrete type can be bound to a trait object with
/// [`Binder::to`].
#[macro_export]
macro_rules! implements {
    ($concrete:ty => $($abstraction:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$abstraction> for $concrete {
                #[inline(always)]
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$abstraction> {
                    self
                }
            }
        )+
    };
}

/// First half of a registration, returned by [`Registry::bind`](crate::Registry::bind).
///
/// Holds a handle to the new binding. Providers can be attached more than
/// once; the last one wins. Dropping it without attaching a provider leaves
/// the binding empty, and resolving it fails with
/// [`IocError::NoProviderBound`](crate::IocError::NoProviderBound).
#[must_use = "a binding without a provider cannot be resolved"]
pub struct Binder<'r, T: ?Sized> {
    binding: Arc<Binding>,
    _marker: PhantomData<(&'r (), fn() -> Arc<T>)>,
}

impl<'r, T> Binder<'r, T>
where
    T: ?Sized + Send + Sync + 'static,
{
    pub(crate) fn new(binding: Arc<Binding>) -> Self {
        Self { binding, _marker: PhantomData }
    }

    /// Binds to a constructible type: each construction is `C::default()`.
    ///
    /// Replaces any provider attached earlier through this binder.
    pub fn to<C>(&self) -> ScopeSelector<'r, T>
    where
        C: Default + Implements<T> + Send + Sync + 'static,
    {
        let create: ErasedCtor =
            Arc::new(|| erase::<T>(<C as Implements<T>>::upcast(Arc::new(C::default()))));
        let type_name = std::any::type_name::<C>();
        tracing::trace!(token = %self.binding.token, constructible = type_name, "provider attached");
        self.binding.set_provider(Provider::Constructible { type_name, create });
        ScopeSelector::new(self.binding.clone())
    }

    /// Binds to a zero-argument factory returning a shared instance.
    ///
    /// Replaces any provider attached earlier through this binder.
    ///
    /// ```rust
    /// use token_ioc::{ProviderKind, Registry, Token};
    /// use std::sync::Arc;
    ///
    /// #[derive(Default)]
    /// struct Fallback;
    ///
    /// let registry = Registry::new();
    /// let token = Token::new("cache");
    /// let binder = registry.bind::<Fallback>(token).unwrap();
    /// binder.to::<Fallback>();
    /// binder.to_factory(|| Arc::new(Fallback));
    ///
    /// assert_eq!(registry.descriptor(token).unwrap().provider, ProviderKind::Factory);
    /// ```
    pub fn to_factory<F>(&self, factory: F) -> ScopeSelector<'r, T>
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        let create: ErasedCtor = Arc::new(move || erase::<T>(factory()));
        tracing::trace!(token = %self.binding.token, "factory attached");
        self.binding.set_provider(Provider::Factory(create));
        ScopeSelector::new(self.binding.clone())
    }
}

impl<'r, T> Binder<'r, T>
where
    T: Send + Sync + 'static,
{
    /// Binds to a factory returning the value itself.
    ///
    /// ```rust
    /// use token_ioc::{Registry, Token};
    ///
    /// let registry = Registry::new();
    /// let port = Token::new("port");
    /// registry.bind::<u16>(port).unwrap().to_value_factory(|| 8080);
    /// assert_eq!(*registry.get_item::<u16>(port).unwrap(), 8080);
    /// ```
    pub fn to_value_factory<F>(&self, factory: F) -> ScopeSelector<'r, T>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.to_factory(move || Arc::new(factory()))
    }
}

impl<T: ?Sized> std::fmt::Debug for Binder<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binder").field("binding", &self.binding).finish()
    }
}

/// Second half of a registration, returned once a provider is attached.
///
/// Dropping it keeps the default [`Scope::Transient`].
pub struct ScopeSelector<'r, T: ?Sized> {
    binding: Arc<Binding>,
    _marker: PhantomData<(&'r (), fn() -> Arc<T>)>,
}

impl<'r, T: ?Sized> ScopeSelector<'r, T> {
    fn new(binding: Arc<Binding>) -> Self {
        Self { binding, _marker: PhantomData }
    }

    /// Caches the first resolved instance and hands it out from then on.
    ///
    /// Idempotent. Instances resolved before this call are unaffected.
    pub fn in_singleton_scope(self) {
        tracing::trace!(token = %self.binding.token, "singleton scope selected");
        self.binding.set_scope(Scope::Singleton);
    }

    /// Keeps producing a fresh instance per resolution.
    pub fn in_transient_scope(self) {
        self.binding.set_scope(Scope::Transient);
    }

    /// Scope currently configured on the binding.
    pub fn scope(&self) -> Scope {
        self.binding.scope()
    }
}

impl<T: ?Sized> std::fmt::Debug for ScopeSelector<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeSelector").field("binding", &self.binding).finish()
    }
}
