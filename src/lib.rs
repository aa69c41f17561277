//! # token-ioc
//!
//! Minimal inversion-of-control container keyed by opaque tokens.
//!
//! ## Features
//!
//! - **Token keys**: abstractions are identified by [`Token`]s with identity equality
//! - **Fluent registration**: `bind(token).to::<C>()` or `.to_factory(f)`, then
//!   optionally `.in_singleton_scope()`
//! - **Transient and singleton scopes**: fresh instance per resolution, or one
//!   cached instance
//! - **Lazy injection sites**: [`Inject`] fields resolve on first read and
//!   memoize unless marked [`NOCACHE`]
//! - **Thread-safe**: the registry is `Send + Sync`, singletons are built once
//!   even under contention
//! - **Typed errors**: [`IocError`] distinguishes duplicate, unbound,
//!   provider-less and mistyped bindings
//!
//! ## Quick Start
//!
//! ```rust
//! use token_ioc::{implements, Registry, Token};
//! use std::sync::Mutex;
//!
//! trait Counter: Send + Sync {
//!     fn next(&self) -> u32;
//! }
//!
//! #[derive(Default)]
//! struct MemoryCounter {
//!     count: Mutex<u32>,
//! }
//!
//! impl Counter for MemoryCounter {
//!     fn next(&self) -> u32 {
//!         let mut count = self.count.lock().unwrap();
//!         *count += 1;
//!         *count
//!     }
//! }
//!
//! implements!(MemoryCounter => dyn Counter);
//!
//! let registry = Registry::new();
//! let counter = Token::new("Counter");
//!
//! registry
//!     .bind::<dyn Counter>(counter)
//!     .unwrap()
//!     .to::<MemoryCounter>()
//!     .in_singleton_scope();
//!
//! assert_eq!(registry.get_item::<dyn Counter>(counter).unwrap().next(), 1);
//! assert_eq!(registry.get_item::<dyn Counter>(counter).unwrap().next(), 2);
//! ```
//!
//! ## Injection Sites
//!
//! ```rust
//! use token_ioc::{Inject, Injector, Registry, Token};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(Registry::new());
//! let name = Token::new("name");
//! registry.bind::<String>(name).unwrap().to_value_factory(|| "ioc".to_string());
//!
//! let injector = Injector::new(registry);
//! let site = injector.site::<String>(name, &[]);
//!
//! struct Consumer {
//!     name: Inject<String>,
//! }
//!
//! let consumer = Consumer { name: site.materialize() };
//! assert_eq!(*consumer.name.get().unwrap(), "ioc");
//! ```

pub mod binder;
pub mod config;
pub mod descriptors;
pub mod error;
pub mod inject;
pub mod observer;
pub mod registry;
pub mod scope;
pub mod token;

mod binding;
mod internal;

pub use binder::{Binder, Implements, ScopeSelector};
pub use binding::ProviderKind;
pub use config::RegistryConfig;
pub use descriptors::BindingDescriptor;
pub use error::{ErrorKind, IocError, IocResult, Operation};
pub use inject::{Inject, InjectionSite, Injector, Marker, NOCACHE};
pub use observer::{IocObserver, LoggingObserver, MetricsObserver};
pub use registry::Registry;
pub use scope::Scope;
pub use token::Token;
