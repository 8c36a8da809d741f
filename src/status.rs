//! HTTP status codes as a typed enum.
//!
//! Only the codes this service actually answers with are listed. Use
//! [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.

/// The status codes the service produces.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                   // 200
    Created,              // 201
    NoContent,            // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,           // 400
    NotFound,             // 404
    MethodNotAllowed,     // 405
    UnprocessableContent, // 422

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,  // 500
}

impl Status {
    pub fn code(self) -> u16 {
        u16::from(self)
    }

    /// `true` for every 2xx code.
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.code())
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                   => 200,
            Status::Created              => 201,
            Status::NoContent            => 204,
            Status::BadRequest           => 400,
            Status::NotFound             => 404,
            Status::MethodNotAllowed     => 405,
            Status::UnprocessableContent => 422,
            Status::InternalServerError  => 500,
        }
    }
}

impl TryFrom<u16> for Status {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            200 => Ok(Status::Ok),
            201 => Ok(Status::Created),
            204 => Ok(Status::NoContent),
            400 => Ok(Status::BadRequest),
            404 => Ok(Status::NotFound),
            405 => Ok(Status::MethodNotAllowed),
            422 => Ok(Status::UnprocessableContent),
            500 => Ok(Status::InternalServerError),
            other => Err(other),
        }
    }
}
