use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

// A consumer factory upgrades the request and runs the connection. Whatever
// state the consumer needs (the chat room) is captured by the closure when
// the route is registered, so the binding is visible at the call site.
pub type ConsumerFactory =
    Arc<dyn Fn(&HttpRequest, web::Payload) -> actix_web::Result<HttpResponse> + Send + Sync>;

pub struct ConsumerEntry {
    pub name: &'static str,
    pub start: ConsumerFactory,
}

// The factory is an opaque closure, so Debug can only show the name.
impl std::fmt::Debug for ConsumerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsumerEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RouteError {
    NotFound(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::NotFound(path) => write!(f, "No route registered for path '{}'", path),
        }
    }
}

// Built once in main, shared as Arc, never mutated after build().
pub struct RouteTable {
    entries: HashMap<String, ConsumerEntry>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder {
            entries: HashMap::new(),
        }
    }

    pub fn resolve(&self, path: &str) -> Result<&ConsumerEntry, RouteError> {
        self.entries
            .get(normalize(path))
            .ok_or_else(|| RouteError::NotFound(path.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct RouteTableBuilder {
    entries: HashMap<String, ConsumerEntry>,
}

impl RouteTableBuilder {
    // Registering a pattern that already exists replaces the earlier entry,
    // so the table holds exactly one handler per pattern.
    pub fn register(mut self, pattern: &str, name: &'static str, start: ConsumerFactory) -> Self {
        self.entries
            .insert(normalize(pattern).to_string(), ConsumerEntry { name, start });
        self
    }

    pub fn build(self) -> RouteTable {
        RouteTable {
            entries: self.entries,
        }
    }
}

// "", "/" and "chat", "/chat", "chat/" are the same pattern.
fn normalize(path: &str) -> &str {
    path.trim_matches('/')
}
