//! Error types for the container.

use std::fmt;

use crate::token::Token;

/// Registry operation that reported an unbound token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// [`Registry::get_item`](crate::Registry::get_item)
    Resolve,
    /// [`Registry::remove_item`](crate::Registry::remove_item)
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Resolve => f.write_str("resolve"),
            Operation::Remove => f.write_str("remove"),
        }
    }
}

/// Discriminant of an [`IocError`], for branching without matching fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DuplicateBinding,
    UnboundToken,
    NoProviderBound,
    TypeMismatch,
    Config,
}

/// Container errors
///
/// Every variant carries the [`Token`] involved rather than a formatted
/// message, so callers can branch on the failure and still render it.
///
/// # Examples
///
/// ```rust
/// use token_ioc::{ErrorKind, IocError, Registry, Token};
///
/// let registry = Registry::new();
/// let token = Token::new("example");
///
/// match registry.get_item::<String>(token) {
///     Err(IocError::UnboundToken { token: t, .. }) => assert_eq!(t, token),
///     _ => unreachable!(),
/// }
///
/// registry.bind::<String>(token).unwrap();
/// let err = registry.bind::<String>(token).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::DuplicateBinding);
/// assert_eq!(err.to_string(), "Token(example) is already bound");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IocError {
    /// `bind` was called for a token that already has a binding
    DuplicateBinding { token: Token },
    /// The token has no binding (never bound, or removed)
    UnboundToken { token: Token, op: Operation },
    /// The binding exists but neither a constructible nor a factory was attached
    NoProviderBound { token: Token },
    /// The binding was registered for a different value type than requested
    TypeMismatch {
        token: Token,
        bound: &'static str,
        requested: &'static str,
    },
    /// Configuration could not be loaded
    Config(String),
}

impl IocError {
    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IocError::DuplicateBinding { .. } => ErrorKind::DuplicateBinding,
            IocError::UnboundToken { .. } => ErrorKind::UnboundToken,
            IocError::NoProviderBound { .. } => ErrorKind::NoProviderBound,
            IocError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            IocError::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns the token the error refers to, if any.
    pub fn token(&self) -> Option<Token> {
        match self {
            IocError::DuplicateBinding { token }
            | IocError::UnboundToken { token, .. }
            | IocError::NoProviderBound { token }
            | IocError::TypeMismatch { token, .. } => Some(*token),
            IocError::Config(_) => None,
        }
    }
}

impl fmt::Display for IocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IocError::DuplicateBinding { token } => write!(f, "{} is already bound", token),
            IocError::UnboundToken { token, op } => {
                write!(f, "cannot {} {}: nothing is bound", op, token)
            }
            IocError::NoProviderBound { token } => {
                write!(f, "{} is bound without a constructible or factory", token)
            }
            IocError::TypeMismatch { token, bound, requested } => write!(
                f,
                "{} is bound to {} but {} was requested",
                token, bound, requested
            ),
            IocError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for IocError {}

/// Result type for container operations
pub type IocResult<T> = Result<T, IocError>;
