//! Unified error type for the server crate.

use mnemo_protocol::ProtocolError;

use crate::transport::TransportError;

/// Top-level error for the server's accept and handler loops.
///
/// Room and game errors never appear here: the handler translates them
/// into wire responses instead of propagating them, so only transport
/// and codec failures can tear down a connection.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A socket-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A codec-level error while encoding a reply.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::SendFailed(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "gone",
        ));
        let server_err: ServerError = err.into();
        assert!(matches!(server_err, ServerError::Transport(_)));
        assert!(server_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let server_err: ServerError = err.into();
        assert!(matches!(server_err, ServerError::Protocol(_)));
    }
}
