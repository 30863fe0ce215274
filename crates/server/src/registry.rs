//! Token-to-middleware resolution.

use std::collections::HashMap;
use std::fmt;

use crate::middleware::Middleware;

type Factory = Box<dyn Fn() -> Box<dyn Middleware> + Send + Sync>;

/// Maps opaque tokens to middleware factories.
///
/// Resolution constructs a fresh instance on every call; instances are
/// never pooled or reused across dispatches.
#[derive(Default)]
pub struct MiddlewareRegistry {
    factories: HashMap<String, Factory>,
}

impl fmt::Debug for MiddlewareRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        f.debug_struct("MiddlewareRegistry").field("tokens", &tokens).finish()
    }
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `token`, replacing any previous one.
    pub fn register<F, M>(&mut self, token: impl Into<String>, factory: F)
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: Middleware + 'static,
    {
        self.factories.insert(token.into(), Box::new(move || Box::new(factory())));
    }

    pub fn contains(&self, token: &str) -> bool {
        self.factories.contains_key(token)
    }

    /// A fresh instance for `token`, or `None` when unregistered.
    pub fn resolve(&self, token: &str) -> Option<Box<dyn Middleware>> {
        self.factories.get(token).map(|factory| factory())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
