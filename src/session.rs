//! Host/device synchronization session
//!
//! One accepted TCP connection drives the whole measurement run through a
//! two-phase handshake: wait for `started capture`, run the key-press
//! schedule, wait for `send timestamps`, transmit the recorded
//! timestamps. Unknown tokens are ignored and the reader keeps waiting;
//! only a disconnect or an expired read timeout fails the session.

use std::io::{BufRead, BufReader};
use std::net::TcpStream;

use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::injector::KeyInjector;
use crate::protocol::{self, ControlMessage, ProtocolError};
use crate::schedule::Schedule;
use crate::scheduler::EventScheduler;

/// Session progress through the two-phase handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Blocking on the `started capture` token
    AwaitingStart,
    /// Key-press schedule in progress
    Running,
    /// Blocking on the `send timestamps` token
    AwaitingSendRequest,
    /// Writing the timestamp lines
    Transmitting,
    /// Handshake complete
    Done,
}

/// A single measurement session over one accepted connection
pub struct MeasurementSession<'a, I: KeyInjector> {
    config: &'a SessionConfig,
    injector: I,
}

impl<'a, I: KeyInjector> MeasurementSession<'a, I> {
    /// Create a session ready to serve one connection
    pub fn new(config: &'a SessionConfig, injector: I) -> Self {
        Self { config, injector }
    }

    /// Drive the session to completion on `stream`, returning the
    /// generated schedule after its timestamps have been transmitted.
    ///
    /// No partial schedule is ever written: a disconnect or timeout in
    /// either waiting state aborts before transmission begins.
    pub fn run(self, stream: TcpStream) -> Result<Schedule, ProtocolError> {
        stream.set_read_timeout(self.config.read_timeout)?;
        let mut writer = stream.try_clone()?;
        let mut reader = BufReader::new(stream);
        let mut state = SessionState::AwaitingStart;

        Self::wait_for(&mut reader, &ControlMessage::StartCapture, state)?;

        state = SessionState::Running;
        debug!(?state, "session state");
        info!("capture started, running key-press schedule");
        let schedule = EventScheduler::new(self.config, self.injector).generate();
        info!(events = schedule.len() - 1, "key simulation ended");

        state = SessionState::AwaitingSendRequest;
        debug!(?state, "session state");
        Self::wait_for(&mut reader, &ControlMessage::SendTimestamps, state)?;

        state = SessionState::Transmitting;
        debug!(?state, "session state");
        protocol::write_timestamps(&mut writer, &schedule.timestamps())?;
        info!(lines = schedule.len(), "timestamps transmitted");

        state = SessionState::Done;
        debug!(?state, "session state");
        Ok(schedule)
    }

    /// Block until `expected` arrives, ignoring any other token
    fn wait_for<R: BufRead>(
        reader: &mut R,
        expected: &ControlMessage,
        state: SessionState,
    ) -> Result<(), ProtocolError> {
        loop {
            let message = protocol::read_message(reader)?;
            if message == *expected {
                return Ok(());
            }
            debug!(?state, ?message, "ignoring unexpected control message");
        }
    }
}
