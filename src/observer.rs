//! Observers for registry events.
//!
//! Observers are notified synchronously from inside registry calls, after
//! every lock has been released. Keep implementations cheap.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::IocError;
use crate::token::Token;

/// Observer trait for registry events.
///
/// Only the resolution hooks are required; registration hooks default to
/// doing nothing.
///
/// # Examples
///
/// ```
/// use token_ioc::{IocObserver, Registry, Token};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     events: Mutex<Vec<String>>,
/// }
///
/// impl IocObserver for Recorder {
///     fn resolving(&self, token: Token) {
///         self.events.lock().unwrap().push(format!("resolving {}", token));
///     }
///
///     fn resolved(&self, token: Token, _duration: Duration, cache_hit: bool) {
///         self.events.lock().unwrap().push(format!("resolved {} hit={}", token, cache_hit));
///     }
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let mut registry = Registry::new();
/// registry.add_observer(recorder.clone());
///
/// let answer = Token::new("answer");
/// registry.bind::<u8>(answer).unwrap().to_value_factory(|| 42);
/// registry.get_item::<u8>(answer).unwrap();
///
/// assert_eq!(
///     *recorder.events.lock().unwrap(),
///     vec!["resolving Token(answer)", "resolved Token(answer) hit=false"]
/// );
/// ```
pub trait IocObserver: Send + Sync {
    /// Called when `bind` inserted a new binding.
    fn bound(&self, _token: Token, _value_type: &'static str) {}

    /// Called when `remove_item` deleted a binding.
    fn removed(&self, _token: Token) {}

    /// Called before a resolution looks up the binding.
    fn resolving(&self, token: Token);

    /// Called after a successful resolution.
    ///
    /// `cache_hit` is true when a singleton was returned without running the
    /// provider.
    fn resolved(&self, token: Token, duration: Duration, cache_hit: bool);

    /// Called when a resolution fails.
    fn failed(&self, _token: Token, _error: &IocError) {}
}

/// Fan-out list of registered observers.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn IocObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self { observers: Vec::new() }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn IocObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub(crate) fn bound(&self, token: Token, value_type: &'static str) {
        for observer in &self.observers {
            observer.bound(token, value_type);
        }
    }

    #[inline]
    pub(crate) fn removed(&self, token: Token) {
        for observer in &self.observers {
            observer.removed(token);
        }
    }

    #[inline]
    pub(crate) fn resolving(&self, token: Token) {
        for observer in &self.observers {
            observer.resolving(token);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, token: Token, duration: Duration, cache_hit: bool) {
        for observer in &self.observers {
            observer.resolved(token, duration, cache_hit);
        }
    }

    #[inline]
    pub(crate) fn failed(&self, token: Token, error: &IocError) {
        for observer in &self.observers {
            observer.failed(token, error);
        }
    }
}

/// Built-in observer that forwards events to `tracing`.
///
/// Resolutions are logged at `DEBUG`, registrations at `INFO` and failures
/// at `WARN`, all under the `token_ioc` target.
///
/// # Examples
///
/// ```
/// use token_ioc::{LoggingObserver, Registry};
/// use std::sync::Arc;
///
/// let mut registry = Registry::new();
/// registry.add_observer(Arc::new(LoggingObserver::with_prefix("app")));
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self { prefix: "token-ioc".to_string() }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl IocObserver for LoggingObserver {
    fn bound(&self, token: Token, value_type: &'static str) {
        tracing::info!(target: "token_ioc", registry = %self.prefix, %token, value_type, "bound");
    }

    fn removed(&self, token: Token) {
        tracing::info!(target: "token_ioc", registry = %self.prefix, %token, "removed");
    }

    fn resolving(&self, token: Token) {
        tracing::debug!(target: "token_ioc", registry = %self.prefix, %token, "resolving");
    }

    fn resolved(&self, token: Token, duration: Duration, cache_hit: bool) {
        tracing::debug!(
            target: "token_ioc",
            registry = %self.prefix,
            %token,
            ?duration,
            cache_hit,
            "resolved"
        );
    }

    fn failed(&self, token: Token, error: &IocError) {
        tracing::warn!(target: "token_ioc", registry = %self.prefix, %token, %error, "resolution failed");
    }
}

/// Observer that counts resolutions, cache hits and failures.
pub struct MetricsObserver {
    resolution_count: AtomicU64,
    cache_hits: AtomicU64,
    failure_count: AtomicU64,
    total_resolution_time: AtomicU64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            resolution_count: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
            total_resolution_time: AtomicU64::new(0),
        }
    }

    /// Successful resolutions, cache hits included.
    pub fn resolution_count(&self) -> u64 {
        self.resolution_count.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn total_resolution_time(&self) -> Duration {
        Duration::from_nanos(self.total_resolution_time.load(Ordering::Relaxed))
    }

    pub fn average_resolution_time(&self) -> Option<Duration> {
        let count = self.resolution_count();
        if count == 0 {
            return None;
        }
        let total_ns = self.total_resolution_time.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total_ns / count))
    }

    pub fn reset(&self) {
        self.resolution_count.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.failure_count.store(0, Ordering::Relaxed);
        self.total_resolution_time.store(0, Ordering::Relaxed);
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl IocObserver for MetricsObserver {
    fn resolving(&self, _token: Token) {}

    fn resolved(&self, _token: Token, duration: Duration, cache_hit: bool) {
        self.resolution_count.fetch_add(1, Ordering::Relaxed);
        if cache_hit {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        }
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .total_resolution_time
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |total| Some(total.saturating_add(nanos)));
    }

    fn failed(&self, _token: Token, _error: &IocError) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }
}
