//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler. A path that exists under another method answers 405, a path
//! that exists nowhere answers 404, both with the JSON error envelope.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Holds the shared application state `S`; every handler receives an
/// `Arc<S>` clone alongside the request. Build it once at startup and pass it
/// to [`Server::serve`](crate::Server::serve).
pub struct Router<S = ()> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: Arc<S>,
}

/// Outcome of matching a method + path against the route table.
pub(crate) enum Lookup<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    MethodNotAllowed,
    NotFound,
}

impl Router<()> {
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl<S> Router<S>
where
    S: Send + Sync + 'static,
{
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), state: Arc::new(state) }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid matchit route or conflicts with an
    /// already registered one. Routes are static, so this surfaces at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn state(&self) -> &Arc<S> {
        &self.state
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Lookup<S> {
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(handler, params);
        }

        let elsewhere = self.routes.iter()
            .any(|(m, tree)| *m != method && tree.at(path).is_ok());
        if elsewhere { Lookup::MethodNotAllowed } else { Lookup::NotFound }
    }

    /// Routes one request and produces its response.
    ///
    /// This is what the server calls per request; it is public so the route
    /// table can be exercised without a socket.
    pub async fn handle(&self, mut req: Request) -> Response {
        match self.lookup(req.method, &req.path) {
            Lookup::Found(handler, params) => {
                req.params = params;
                handler.call(req, Arc::clone(&self.state)).await
            }
            Lookup::MethodNotAllowed => Response::error(
                Status::MethodNotAllowed,
                format!("{} not allowed for {}", req.method, req.path),
            ),
            Lookup::NotFound => {
                Response::error(Status::NotFound, format!("Path not found: {}", req.path))
            }
        }
    }

    /// Answers a request whose method is not one of [`Method`]'s variants.
    pub(crate) fn unsupported_method(&self, method: &str, path: &str) -> Response {
        Response::error(Status::MethodNotAllowed, format!("{method} not allowed for {path}"))
    }
}

impl Default for Router<()> {
    fn default() -> Self { Self::new() }
}
