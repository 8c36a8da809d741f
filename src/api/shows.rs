//! `/shows` handlers.

use serde::Deserialize;
use tracing::info;

use crate::api::envelope::Envelope;
use crate::api::error::{ApiError, ApiResult, FieldError};
use crate::request::Request;
use crate::status::Status;
use crate::store::{Id, NewShow, ShowPatch, ShowStore};

const NO_SUCH_SHOW: &str = "No show with this id exists";
const NO_SUCH_OBJECT: &str = "The object with this specified id does not exist.";

/// Form body for create and update. Every field is optional at this level;
/// the handlers decide what "missing" means.
#[derive(Debug, Default, Deserialize)]
struct ShowForm {
    name: Option<String>,
    episodes_seen: Option<String>,
}

impl ShowForm {
    fn from_request(req: &Request) -> ApiResult<Self> {
        req.form().map_err(|e| {
            let content_type = req.header("content-type").unwrap_or("none");
            ApiError::Malformed(format!(
                "Request body must be form-encoded (content-type: {content_type}): {e}"
            ))
        })
    }

    /// `name` if supplied and non-empty.
    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    /// `episodes_seen` if supplied and non-empty, still unparsed.
    fn episodes_seen(&self) -> Option<&str> {
        self.episodes_seen.as_deref().filter(|s| !s.is_empty())
    }
}

/// Reads the `{id}` segment.
///
/// Any decimal integer is a well-formed id. One no record can carry (negative,
/// or beyond `Id`) is reported as `missing` rather than as malformed input.
fn parse_id(req: &Request, missing: &'static str) -> ApiResult<Id> {
    let raw = req.param("id").unwrap_or_default().trim();
    match raw.parse::<Id>() {
        Ok(id) => Ok(id),
        Err(_) if is_integer(raw) => Err(ApiError::NotFound(missing)),
        Err(_) => Err(ApiError::Malformed(format!("Show id must be an integer, got `{raw}`"))),
    }
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_episodes(raw: &str) -> ApiResult<u32> {
    raw.trim().parse().map_err(|_| {
        ApiError::Malformed(format!("episodes_seen must be a non-negative integer, got `{raw}`"))
    })
}

/// `GET /shows`
pub(super) async fn list(store: ShowStore, _req: Request) -> ApiResult<Envelope> {
    Envelope::new(Status::Ok).entry("shows", store.list())
}

/// `GET /shows/{id}`
pub(super) async fn get(store: ShowStore, req: Request) -> ApiResult<Envelope> {
    let id = parse_id(&req, NO_SUCH_SHOW)?;
    let show = store.get(id).ok_or(ApiError::NotFound(NO_SUCH_SHOW))?;
    Envelope::new(Status::Ok).record(show)
}

/// `POST /shows`
///
/// Both fields are checked before anything is reported, so a caller sees
/// every missing field in one response.
pub(super) async fn create(store: ShowStore, req: Request) -> ApiResult<Envelope> {
    let form = ShowForm::from_request(&req)?;

    let name = form.name();
    let episodes_seen = form.episodes_seen();

    let mut missing = Vec::new();
    if name.is_none() {
        missing.push(FieldError { field: "name", message: "You did not enter a name." });
    }
    if episodes_seen.is_none() {
        missing.push(FieldError {
            field: "episodes_seen",
            message: "You did not enter an episodes_seen number.",
        });
    }

    let (Some(name), Some(episodes_seen)) = (name, episodes_seen) else {
        return Err(ApiError::Validation(missing));
    };

    let new = NewShow { name: name.to_owned(), episodes_seen: parse_episodes(episodes_seen)? };
    let show = store.create(new);
    info!(id = show.id, "show added");
    Envelope::new(Status::Created).record(show)
}

/// `PUT /shows/{id}`
///
/// Missing or empty fields keep their stored value. An absent id is a 404
/// whatever the body holds.
pub(super) async fn update(store: ShowStore, req: Request) -> ApiResult<Envelope> {
    let id = parse_id(&req, NO_SUCH_OBJECT)?;
    store.get(id).ok_or(ApiError::NotFound(NO_SUCH_OBJECT))?;

    let form = ShowForm::from_request(&req)?;

    let patch = ShowPatch {
        name: form.name().map(str::to_owned),
        episodes_seen: form.episodes_seen().map(parse_episodes).transpose()?,
    };

    let show = store.update(id, patch).ok_or(ApiError::NotFound(NO_SUCH_OBJECT))?;
    Envelope::new(Status::Created).record(show)
}

/// `DELETE /shows/{id}`
pub(super) async fn delete(store: ShowStore, req: Request) -> ApiResult<Envelope> {
    let id = parse_id(&req, NO_SUCH_SHOW)?;
    store.delete(id).ok_or(ApiError::NotFound(NO_SUCH_SHOW))?;
    info!(id, "show removed");
    Ok(Envelope::new(Status::Ok).message("Show deleted"))
}
