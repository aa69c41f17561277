#![no_main]

use libfuzzer_sys::fuzz_target;
use token_ioc::{IocError, Registry, Token};
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq)]
enum Slot {
    Empty,
    Transient,
    Singleton,
}

fuzz_target!(|data: &[u8]| {
    let registry = Registry::new();
    let tokens: Vec<Token> = (0..8).map(|_| Token::new("fuzz")).collect();
    let mut model: HashMap<usize, Slot> = HashMap::new();

    // Each byte is one operation: low 3 bits pick the token, the rest the action
    for &byte in data {
        let index = (byte & 0x07) as usize;
        let token = tokens[index];

        match byte >> 3 {
            0..=7 => {
                let result = registry.bind::<u32>(token);
                match (model.contains_key(&index), result) {
                    (true, Err(IocError::DuplicateBinding { .. })) => {}
                    (false, Ok(binder)) => {
                        let slot = match byte % 3 {
                            0 => Slot::Empty,
                            1 => {
                                binder.to_value_factory(move || byte as u32);
                                Slot::Transient
                            }
                            _ => {
                                binder.to_value_factory(move || byte as u32).in_singleton_scope();
                                Slot::Singleton
                            }
                        };
                        model.insert(index, slot);
                    }
                    _ => panic!("bind disagreed with model"),
                }
            }
            8..=23 => {
                let result = registry.get_item::<u32>(token);
                match (model.get(&index), result) {
                    (None, Err(IocError::UnboundToken { .. })) => {}
                    (Some(Slot::Empty), Err(IocError::NoProviderBound { .. })) => {}
                    (Some(Slot::Transient), Ok(_)) => {}
                    (Some(Slot::Singleton), Ok(first)) => {
                        let second = registry.get_item::<u32>(token).unwrap();
                        assert!(std::sync::Arc::ptr_eq(&first, &second));
                    }
                    _ => panic!("resolution disagreed with model"),
                }
            }
            _ => {
                let removed = registry.remove_item(token).is_ok();
                assert_eq!(removed, model.remove(&index).is_some());
            }
        }

        assert_eq!(registry.len(), model.len());
    }
});
