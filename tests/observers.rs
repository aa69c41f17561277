/// Observer integration tests

use token_ioc::{ErrorKind, IocError, IocObserver, MetricsObserver, Registry, RegistryConfig, Token};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl IocObserver for RecordingObserver {
    fn bound(&self, token: Token, value_type: &'static str) {
        self.push(format!("bound {} as {}", token.description(), value_type));
    }

    fn removed(&self, token: Token) {
        self.push(format!("removed {}", token.description()));
    }

    fn resolving(&self, token: Token) {
        self.push(format!("resolving {}", token.description()));
    }

    fn resolved(&self, token: Token, _duration: Duration, cache_hit: bool) {
        self.push(format!("resolved {} hit={}", token.description(), cache_hit));
    }

    fn failed(&self, token: Token, error: &IocError) {
        self.push(format!("failed {} {:?}", token.description(), error.kind()));
    }
}

#[test]
fn test_observer_sees_full_lifecycle() {
    let recorder = Arc::new(RecordingObserver::default());
    let mut registry = Registry::new();
    registry.add_observer(recorder.clone());

    let token = Token::new("svc");
    registry.bind::<u32>(token).unwrap().to_value_factory(|| 1).in_singleton_scope();
    registry.get_item::<u32>(token).unwrap();
    registry.get_item::<u32>(token).unwrap();
    registry.remove_item(token).unwrap();
    assert!(registry.get_item::<u32>(token).is_err());

    assert_eq!(
        recorder.events(),
        vec![
            "bound svc as u32",
            "resolving svc",
            "resolved svc hit=false",
            "resolving svc",
            "resolved svc hit=true",
            "removed svc",
            "resolving svc",
            "failed svc UnboundToken",
        ]
    );
}

#[test]
fn test_metrics_observer_with_registry() {
    let metrics = Arc::new(MetricsObserver::new());
    let mut registry = Registry::new();
    registry.add_observer(metrics.clone());

    let singleton = Token::new("singleton");
    let empty = Token::new("empty");
    registry.bind::<u8>(singleton).unwrap().to_value_factory(|| 1).in_singleton_scope();
    let _ = registry.bind::<u8>(empty).unwrap();

    for _ in 0..5 {
        registry.get_item::<u8>(singleton).unwrap();
    }
    assert_eq!(
        registry.get_item::<u8>(empty).unwrap_err().kind(),
        ErrorKind::NoProviderBound
    );

    assert_eq!(metrics.resolution_count(), 5);
    assert_eq!(metrics.cache_hits(), 4);
    assert_eq!(metrics.failure_count(), 1);
    assert!(metrics.average_resolution_time().is_some());
}

#[test]
fn test_traced_registry_resolves_normally() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("token_ioc=debug")
        .with_test_writer()
        .try_init();

    let registry = Registry::with_config(&RegistryConfig {
        name: "traced".to_string(),
        initial_capacity: 4,
        trace_resolutions: true,
    });
    let token = Token::new("traced-value");
    registry.bind::<String>(token).unwrap().to_value_factory(|| "ok".to_string());

    assert_eq!(*registry.get_item::<String>(token).unwrap(), "ok");
    assert!(registry.get_item::<u8>(token).is_err());
    registry.remove_item(token).unwrap();
}
