//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding messages.
///
/// Decode errors are common in normal operation: a server newer than the
/// client may emit classes this build has never heard of, and frames that
/// fail to decode are dropped by the connector rather than treated as
/// fatal. The error type exists so the connector can log what it dropped.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a message into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a message).
    ///
    /// Common causes: malformed JSON, missing required fields, or a
    /// truncated frame.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
