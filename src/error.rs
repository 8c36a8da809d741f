//! Infrastructure error type.

use thiserror::Error;

/// The error type returned by the server's fallible operations.
///
/// Application-level failures (404, 422, ...) never show up here: they are
/// rendered as envelopes by [`ApiError`](crate::api::ApiError). This type
/// covers what happens below the handlers: parsing the listen address,
/// binding the port, accepting connections.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_display() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken").into();
        assert_eq!(err.to_string(), "io: taken");
    }

    #[test]
    fn addr_error_names_the_input() {
        let source = "nope".parse::<std::net::SocketAddr>().unwrap_err();
        let err = Error::Addr { addr: "nope".into(), source };
        assert!(err.to_string().starts_with("invalid listen address `nope`"));
    }
}
