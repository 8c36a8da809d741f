//! The JSON API: route table, envelope, and handlers.
//!
//! | Route | Method | Success |
//! |---|---|---|
//! | `/` | GET | 200 `{content: "hello world!"}` |
//! | `/mirror/{name}` | GET | 200 `{name}` |
//! | `/healthz` | GET | 200 `{status: "ok"}` |
//! | `/shows` | GET | 200 `{shows: [...]}` |
//! | `/shows` | POST | 201 created show |
//! | `/shows/{id}` | GET | 200 show |
//! | `/shows/{id}` | PUT | 201 updated show |
//! | `/shows/{id}` | DELETE | 200 "Show deleted" |
//!
//! Anything else answers with a 404 or 405 envelope.

mod envelope;
mod error;
mod shows;

pub use envelope::Envelope;
pub use error::{ApiError, ApiResult, FieldError};

use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::ShowStore;

/// Builds the full route table over `store`.
pub fn router(store: ShowStore) -> Router<ShowStore> {
    Router::with_state(store)
        .on(Method::Get,    "/",               hello_world)
        .on(Method::Get,    "/mirror/{name}",  mirror)
        .on(Method::Get,    "/healthz",        liveness)
        .on(Method::Get,    "/shows",          shows::list)
        .on(Method::Post,   "/shows",          shows::create)
        .on(Method::Get,    "/shows/{id}",     shows::get)
        .on(Method::Put,    "/shows/{id}",     shows::update)
        .on(Method::Delete, "/shows/{id}",     shows::delete)
        .fallback(unmatched)
}

async fn hello_world(_store: ShowStore, _req: Request) -> ApiResult<Envelope> {
    Envelope::new(Status::Ok).entry("content", "hello world!")
}

async fn mirror(_store: ShowStore, req: Request) -> ApiResult<Envelope> {
    let name = req.param("name").unwrap_or_default();
    Envelope::new(Status::Ok).entry("name", name)
}

/// Liveness check: if the process can answer HTTP at all, it is alive.
async fn liveness(_store: ShowStore, _req: Request) -> ApiResult<Envelope> {
    Envelope::new(Status::Ok).entry("status", "ok")
}

fn unmatched(status: Status) -> Response {
    let message = match status {
        Status::MethodNotAllowed => "Method not allowed",
        Status::BadRequest => "Could not read the request body",
        _ => "Not found",
    };
    Envelope::new(status).message(message).into_response()
}


#[cfg(test)]
mod tests {
    use super::testing::send;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn hello_world_greets() {
        let env = send(&ShowStore::default(), Method::Get, "/", "").await;
        assert_eq!(env.code, 200);
        assert!(env.success);
        assert_eq!(env.message, "");
        assert_eq!(env.result, json!({"content": "hello world!"}).as_object().cloned());
    }

    #[tokio::test]
    async fn mirror_decodes_the_segment() {
        let env = send(&ShowStore::default(), Method::Get, "/mirror/h4i%20rocks", "").await;
        assert_eq!(env.result, json!({"name": "h4i rocks"}).as_object().cloned());
    }

    #[tokio::test]
    async fn liveness_is_ok() {
        let env = send(&ShowStore::default(), Method::Get, "/healthz", "").await;
        assert_eq!(env.result, json!({"status": "ok"}).as_object().cloned());
    }

    #[tokio::test]
    async fn unknown_route_is_enveloped_404() {
        let env = send(&ShowStore::default(), Method::Get, "/movies", "").await;
        assert_eq!(env.code, 404);
        assert!(!env.success);
        assert_eq!(env.result, None);
    }

    #[tokio::test]
    async fn wrong_method_is_enveloped_405() {
        let env = send(&ShowStore::default(), Method::Patch, "/shows/1", "").await;
        assert_eq!(env.code, 405);
        assert_eq!(env.message, "Method not allowed");
    }
}
