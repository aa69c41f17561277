#![no_main]

use libfuzzer_sys::fuzz_target;
use token_ioc::{Injector, Registry, Token, NOCACHE};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let registry = Arc::new(Registry::new());
    let token = Token::new("fuzz-site");
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let selector = registry
        .bind::<usize>(token)
        .unwrap()
        .to_value_factory(move || counter.fetch_add(1, Ordering::SeqCst));
    let singleton = data[0] & 1 == 1;
    if singleton {
        selector.in_singleton_scope();
    }

    let injector = Injector::new(registry);
    let memoized = injector.site::<usize>(token, &[]).materialize();
    let uncached = injector.site::<usize>(token, &[NOCACHE]).materialize();

    let mut memoized_value = None;
    for &byte in &data[1..] {
        if byte & 1 == 0 {
            let value = *memoized.get().unwrap();
            assert_eq!(*memoized_value.get_or_insert(value), value);
        } else {
            uncached.get().unwrap();
        }
    }

    if singleton {
        assert!(calls.load(Ordering::SeqCst) <= 1);
    }
});
