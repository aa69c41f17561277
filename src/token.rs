//! Opaque binding tokens.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for an abstraction registered in a [`Registry`](crate::Registry).
///
/// Tokens compare by identity, not by description: two tokens created with the
/// same description are still different keys. Create each token once per
/// abstraction (a `static` behind `LazyLock`, a field on a wiring struct, a
/// constant table) and share copies of it.
///
/// # Examples
///
/// ```rust
/// use token_ioc::Token;
///
/// let a = Token::new("LinkedList");
/// let b = Token::new("LinkedList");
/// let a2 = a;
///
/// assert_eq!(a, a2);
/// assert_ne!(a, b);
/// assert_eq!(a.description(), "LinkedList");
/// assert_eq!(a.to_string(), "Token(LinkedList)");
/// ```
#[derive(Clone, Copy)]
pub struct Token {
    id: u64,
    description: &'static str,
}

impl Token {
    /// Creates a fresh token, distinct from every other token in the process.
    pub fn new(description: &'static str) -> Self {
        let id = NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed);
        Self { id, description }
    }

    /// The human-readable description given at creation.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// The process-unique numeric identity of this token.
    pub fn id(&self) -> u64 {
        self.id
    }
}

// Identity only; the description is diagnostics.
impl PartialEq for Token {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl PartialOrd for Token {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// Creation order
impl Ord for Token {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::hash::Hash for Token {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}#{})", self.description, self.id)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.description)
    }
}
