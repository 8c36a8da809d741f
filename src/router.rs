//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Every handler receives a
//! clone of the router's state alongside the request. Paths are matched as
//! received; captured parameters are percent-decoded before the handler sees
//! them. Requests that match no route go to the fallback together with the
//! status that describes why.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

type Fallback = Arc<dyn Fn(Status) -> Response + Send + Sync + 'static>;

/// The application router.
///
/// Build it once at startup with [`Router::with_state`], chain
/// [`Router::on`] registrations, then hand it to
/// [`Server::serve`](crate::Server::serve).
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
    fallback: Fallback,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn with_state(state: S) -> Self {
        Self {
            routes: HashMap::new(),
            state,
            fallback: Arc::new(Response::status),
        }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read back with
    /// `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if the path is not a valid route or conflicts with one already
    /// registered for the same method. Routes are fixed at startup, so this is
    /// a programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// Builds the response for requests no route accepts.
    ///
    /// Called with `Status::NotFound` when no route has the path,
    /// `Status::MethodNotAllowed` when the path exists under another method
    /// (or the method is unknown), and `Status::BadRequest` when the request
    /// body could not be read. Defaults to an empty response with that status.
    pub fn fallback<F>(mut self, f: F) -> Self
    where
        F: Fn(Status) -> Response + Send + Sync + 'static,
    {
        self.fallback = Arc::new(f);
        self
    }

    /// Routes one request and produces its response.
    pub async fn handle(&self, mut req: Request) -> Response {
        match self.lookup(req.method, &req.path) {
            Ok((handler, params)) => {
                req.params = params;
                handler.call(self.state.clone(), req).await
            }
            Err(status) => self.reject(status),
        }
    }

    pub(crate) fn reject(&self, status: Status) -> Response {
        (self.fallback)(status)
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(BoxedHandler<S>, HashMap<String, String>), Status> {
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), percent_decode_str(v).decode_utf8_lossy().into_owned()))
                .collect();
            return Ok((handler, params));
        }

        let elsewhere = self.routes.iter()
            .any(|(m, tree)| *m != method && tree.at(path).is_ok());
        if elsewhere {
            Err(Status::MethodNotAllowed)
        } else {
            Err(Status::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::HeaderMap;

    async fn echo_id(prefix: &'static str, req: Request) -> String {
        format!("{prefix}{}", req.param("id").unwrap_or("?"))
    }

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path, HeaderMap::new(), Bytes::new())
    }

    fn router() -> Router<&'static str> {
        Router::with_state("id=")
            .on(Method::Get, "/things/{id}", echo_id)
            .fallback(|status| Response::text(format!("miss {}", status.code())))
    }

    #[tokio::test]
    async fn passes_state_and_params() {
        let res = router().handle(request(Method::Get, "/things/7")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"id=7");
    }

    #[tokio::test]
    async fn params_are_percent_decoded() {
        let res = router().handle(request(Method::Get, "/things/a%20b%2Fc+d")).await;
        assert_eq!(res.body(), b"id=a b/c+d");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let res = router().handle(request(Method::Get, "/nothing")).await;
        assert_eq!(res.body(), b"miss 404");
    }

    #[tokio::test]
    async fn wrong_method_is_method_not_allowed() {
        let res = router().handle(request(Method::Delete, "/things/7")).await;
        assert_eq!(res.body(), b"miss 405");
    }

    #[tokio::test]
    async fn default_fallback_is_bare_status() {
        let app = Router::with_state(()).on(Method::Get, "/", |_: (), _: Request| async { "hi" });
        let res = app.handle(request(Method::Post, "/")).await;
        assert_eq!(res.status_code(), 405);
        assert!(res.body().is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_routes_panic() {
        let _ = Router::with_state("")
            .on(Method::Get, "/things/{id}", echo_id)
            .on(Method::Get, "/things/{name}", echo_id);
    }
}
