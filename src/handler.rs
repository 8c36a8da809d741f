//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router keeps handlers of *different* concrete types in one
//! `HashMap<Method, Tree>`, so each one is hidden behind the
//! `dyn ErasedHandler<S>` trait object:
//!
//! ```text
//! async fn get(store: ShowStore, req: Request) -> impl IntoResponse
//!        ↓ router.on(Method::Get, "/shows/{id}", get)
//! get.into_boxed_handler()                        ← Handler<S> blanket impl
//!        ↓
//! Arc::new(HandlerFn(get))                        ← stored as BoxedHandler<S>
//!        ↓
//! handler.call(state.clone(), req)  per request   ← one vtable dispatch
//!        ↓
//! Box::pin(async { get(state, req).await.into_response() })
//! ```
//!
//! The state `S` is whatever the router was built with. It is cloned once per
//! request, so it should be a cheap handle (an `Arc` or a struct wrapping one).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler<S> {
    fn call(&self, state: S, req: Request) -> ResponseFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler<S> = Arc<dyn ErasedHandler<S> + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler on a `Router<S>`.
///
/// Automatically satisfied for any `async fn` with the signature:
///
/// ```text
/// async fn name(state: S, req: Request) -> impl IntoResponse
/// ```
///
/// Sealed: only the blanket impl below can satisfy it.
pub trait Handler<S>: private::Sealed<S> + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler<S>;
}

mod private {
    pub trait Sealed<S> {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R, S> private::Sealed<S> for F
where
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R, S> Handler<S> for F
where
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
    S: 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler<S> {
        Arc::new(HandlerFn(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Holds a concrete handler `F` and bridges it to [`ErasedHandler`].
struct HandlerFn<F>(F);

impl<F, Fut, R, S> ErasedHandler<S> for HandlerFn<F>
where
    F: Fn(S, Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, state: S, req: Request) -> ResponseFuture {
        let fut = (self.0)(state, req);
        Box::pin(async move { fut.await.into_response() })
    }
}
