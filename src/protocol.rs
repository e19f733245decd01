//! Wire protocol for the host/device sync session
//!
//! Plain text over one TCP connection. Inbound control messages are
//! `*`-terminated tokens (`started capture*`, `send timestamps*`);
//! the outbound transmission is one decimal timestamp per line,
//! newline-terminated, in schedule index order. The token strings are
//! matched in exactly one place here and surfaced as a tagged
//! [`ControlMessage`] so the session logic never compares raw bytes.

use std::io::{BufRead, Write};
use thiserror::Error;

/// Terminator appended by the device to every control message
pub const MESSAGE_TERMINATOR: u8 = b'*';

/// Token signalling that the device has started video capture
pub const START_CAPTURE_TOKEN: &str = "started capture";

/// Token requesting transmission of the recorded timestamps
pub const SEND_TIMESTAMPS_TOKEN: &str = "send timestamps";

/// Errors raised by session I/O
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("peer disconnected before the session completed")]
    PeerDisconnected,

    #[error("timed out waiting for a control message")]
    Timeout,

    #[error("session I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

/// A control message received from the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    /// Device capture is rolling; begin the key-press schedule
    StartCapture,
    /// Device requests the recorded timestamps
    SendTimestamps,
    /// Anything else; the session ignores it and keeps waiting
    Unknown(String),
}

impl ControlMessage {
    /// Classify a token with its terminator already stripped
    pub fn from_token(token: &str) -> Self {
        match token {
            START_CAPTURE_TOKEN => Self::StartCapture,
            SEND_TIMESTAMPS_TOKEN => Self::SendTimestamps,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Read one `*`-terminated control message from the connection.
///
/// Returns [`ProtocolError::PeerDisconnected`] on EOF (clean or
/// mid-message) and [`ProtocolError::Timeout`] when the socket's read
/// timeout expires.
pub fn read_message<R: BufRead>(reader: &mut R) -> Result<ControlMessage> {
    let mut buf = Vec::new();
    let n = reader.read_until(MESSAGE_TERMINATOR, &mut buf).map_err(|e| {
        match e.kind() {
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => {
                ProtocolError::Timeout
            }
            std::io::ErrorKind::UnexpectedEof
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted => ProtocolError::PeerDisconnected,
            _ => ProtocolError::Io(e),
        }
    })?;

    if n == 0 {
        return Err(ProtocolError::PeerDisconnected);
    }
    if buf.last() != Some(&MESSAGE_TERMINATOR) {
        // Stream ended mid-message
        return Err(ProtocolError::PeerDisconnected);
    }
    buf.pop();
    let token = String::from_utf8_lossy(&buf).into_owned();
    Ok(ControlMessage::from_token(&token))
}

/// Write the recorded timestamps, one decimal value per line in index
/// order, and flush
pub fn write_timestamps<W: Write>(writer: &mut W, timestamps: &[i64]) -> Result<()> {
    for ts in timestamps {
        writeln!(writer, "{ts}")?;
    }
    writer.flush()?;
    Ok(())
}
