//! Wires a linked list into a consumer through an injection site.
//!
//! Run with `RUST_LOG=token_ioc=debug cargo run --example linked_list`.

use std::sync::{Arc, LazyLock, Mutex};

use token_ioc::{implements, Inject, InjectionSite, Injector, IocResult, Registry, RegistryConfig, Token};

trait IntList: Send + Sync {
    fn add(&self, value: i32);
    fn dequeue(&self) -> Option<i32>;
    fn values(&self) -> Vec<i32>;
}

struct Node {
    value: i32,
    next: Option<Box<Node>>,
}

/// Singly linked list with O(1) pushes at the tail.
#[derive(Default)]
struct LinkedList {
    inner: Mutex<ListInner>,
}

#[derive(Default)]
struct ListInner {
    head: Option<Box<Node>>,
    len: usize,
}

impl IntList for LinkedList {
    fn add(&self, value: i32) {
        let mut inner = self.inner.lock().unwrap();
        let mut cursor = &mut inner.head;
        while cursor.is_some() {
            cursor = &mut cursor.as_mut().expect("checked by loop condition").next;
        }
        *cursor = Some(Box::new(Node { value, next: None }));
        inner.len += 1;
    }

    fn dequeue(&self) -> Option<i32> {
        let mut inner = self.inner.lock().unwrap();
        let head = inner.head.take()?;
        inner.head = head.next;
        inner.len -= 1;
        Some(head.value)
    }

    fn values(&self) -> Vec<i32> {
        let inner = self.inner.lock().unwrap();
        let mut values = Vec::with_capacity(inner.len);
        let mut cursor = inner.head.as_deref();
        while let Some(node) = cursor {
            values.push(node.value);
            cursor = node.next.as_deref();
        }
        values
    }
}

implements!(LinkedList => dyn IntList);

struct DataStructures {
    linked_list: Token,
}

static DATA_STRUCTURES: LazyLock<DataStructures> = LazyLock::new(|| DataStructures {
    linked_list: Token::new("LinkedList"),
});

struct ExampleItem {
    linked_list: Inject<dyn IntList>,
}

impl ExampleItem {
    fn new(site: &InjectionSite<dyn IntList>) -> Self {
        Self { linked_list: site.materialize() }
    }
}

fn main() -> IocResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = RegistryConfig::from_env()?;
    let registry = Arc::new(Registry::with_config(&config));
    registry
        .bind::<dyn IntList>(DATA_STRUCTURES.linked_list)?
        .to::<LinkedList>();

    let inject = Injector::new(registry.clone());
    let linked_list_site = inject.site::<dyn IntList>(DATA_STRUCTURES.linked_list, &[]);

    let example_item = ExampleItem::new(&linked_list_site);
    let list = example_item.linked_list.get()?;
    list.add(1);
    list.add(10);
    list.add(5);
    println!("result {:?}", example_item.linked_list.get()?.values());

    let other_item = ExampleItem::new(&linked_list_site);
    println!("fresh item {:?}", other_item.linked_list.get()?.values());
    println!("dequeued {:?}", list.dequeue());

    for descriptor in registry.descriptors() {
        println!("{}", descriptor);
    }
    Ok(())
}
