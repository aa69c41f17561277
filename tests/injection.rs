/// Injection site tests
///
/// Consumers hold `Inject<T>` fields created from an `Injector` when they are
/// constructed; these tests check per-instance memoization and the NoCache
/// marker against transient and singleton bindings.

use token_ioc::{implements, Inject, InjectionSite, Injector, IocError, Registry, Token, NOCACHE};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

trait Queue: Send + Sync {
    fn add(&self, value: i32);
    fn values(&self) -> Vec<i32>;
}

#[derive(Default)]
struct VecQueue {
    items: Mutex<Vec<i32>>,
}

impl Queue for VecQueue {
    fn add(&self, value: i32) {
        self.items.lock().unwrap().push(value);
    }

    fn values(&self) -> Vec<i32> {
        self.items.lock().unwrap().clone()
    }
}

implements!(VecQueue => dyn Queue);

struct Consumer {
    queue: Inject<dyn Queue>,
}

impl Consumer {
    fn new(site: &InjectionSite<dyn Queue>) -> Self {
        Self { queue: site.materialize() }
    }
}

fn counting_factory(registry: &Registry, token: Token) -> Arc<AtomicUsize> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    registry
        .bind::<String>(token)
        .unwrap()
        .to_value_factory(move || format!("v{}", counter.fetch_add(1, Ordering::SeqCst) + 1));
    calls
}

#[test]
fn test_default_site_memoizes_transient_binding() {
    let registry = Arc::new(Registry::new());
    let token = Token::new("value");
    let calls = counting_factory(&registry, token);

    let injector = Injector::new(registry);
    let field = injector.site::<String>(token, &[]).materialize();

    assert_eq!(*field.get().unwrap(), "v1");
    assert_eq!(*field.get().unwrap(), "v1");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_nocache_site_resolves_every_read() {
    let registry = Arc::new(Registry::new());
    let token = Token::new("value");
    let calls = counting_factory(&registry, token);

    let injector = Injector::new(registry);
    let field = injector.site::<String>(token, &[NOCACHE]).materialize();

    assert_eq!(*field.get().unwrap(), "v1");
    assert_eq!(*field.get().unwrap(), "v2");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(!field.is_resolved());
}

#[test]
fn test_nocache_site_still_sees_registry_singleton() {
    let registry = Arc::new(Registry::new());
    let token = Token::new("queue");
    registry
        .bind::<dyn Queue>(token)
        .unwrap()
        .to::<VecQueue>()
        .in_singleton_scope();

    let injector = Injector::new(registry);
    let field = injector.site::<dyn Queue>(token, &[NOCACHE]).materialize();

    let first = field.get().unwrap();
    let second = field.get().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_each_consumer_gets_its_own_instance() {
    let registry = Arc::new(Registry::new());
    let token = Token::new("LinkedList");
    registry.bind::<dyn Queue>(token).unwrap().to::<VecQueue>();

    let site = Injector::new(registry).site::<dyn Queue>(token, &[]);
    let a = Consumer::new(&site);
    let b = Consumer::new(&site);

    a.queue.get().unwrap().add(1);
    a.queue.get().unwrap().add(10);
    a.queue.get().unwrap().add(5);
    b.queue.get().unwrap().add(7);

    assert_eq!(a.queue.get().unwrap().values(), vec![1, 10, 5]);
    assert_eq!(b.queue.get().unwrap().values(), vec![7]);
}

#[test]
fn test_memoized_field_ignores_rebinding() {
    let registry = Arc::new(Registry::new());
    let token = Token::new("value");
    counting_factory(&registry, token);

    let field: Inject<String> = Inject::new(registry.clone(), token, &[]);
    let live: Inject<String> = Inject::new(registry.clone(), token, &[NOCACHE]);
    assert_eq!(*field.get().unwrap(), "v1");
    assert_eq!(*live.get().unwrap(), "v2");

    registry.remove_item(token).unwrap();
    registry
        .bind::<String>(token)
        .unwrap()
        .to_value_factory(|| "replacement".to_string());

    assert_eq!(*field.get().unwrap(), "v1");
    assert_eq!(*live.get().unwrap(), "replacement");
}

#[test]
fn test_site_errors_propagate() {
    let registry = Arc::new(Registry::new());
    let token = Token::new("empty");
    let _ = registry.bind::<String>(token).unwrap();

    let field: Inject<String> = Inject::new(registry, token, &[]);
    assert_eq!(field.get().unwrap_err(), IocError::NoProviderBound { token });
}

#[test]
fn test_site_reads_are_lazy() {
    let registry = Arc::new(Registry::new());
    let token = Token::new("value");
    let calls = counting_factory(&registry, token);

    let site = Injector::new(registry).site::<String>(token, &[]);
    let _consumers: Vec<Inject<String>> = (0..5).map(|_| site.materialize()).collect();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
