//! CommandLoop: read a line, process it, acknowledge it, repeat.
//!
//! The loop is generic over the transport halves so that the serial port and
//! in-memory test streams go through exactly the same code.  Each line is
//! handled to completion (including a momentary hold) before the next read is
//! issued, so frames of two commands never interleave.  Lines that arrive in
//! the meantime wait in the transport's receive buffer.
//!
//! Shutdown is only observed while waiting for the next line.

use std::io;

use digitizer_core::Response;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::application::process_command::CommandProcessor;

/// Writes acknowledgment lines back to the host.
pub struct ResponseEmitter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> ResponseEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `OK\n` or `ERROR <message>\n` and flushes.
    ///
    /// # Errors
    ///
    /// Returns the transport's I/O error.
    pub async fn emit(&mut self, response: &Response) -> io::Result<()> {
        self.writer.write_all(response.to_line().as_bytes()).await?;
        self.writer.flush().await
    }
}

/// Why a command session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The reader hit end of stream.
    EndOfStream,
    /// Shutdown was requested while waiting for a line.
    Shutdown,
}

/// Runs the command loop until end of stream or shutdown.
///
/// A final line without a trailing newline is still processed.
///
/// # Errors
///
/// Returns the I/O error if reading a line or writing a response fails.  The
/// processor, and with it the pointer state, is untouched by the failure and
/// can be handed to the next session.
pub async fn run_command_loop<R, W>(
    mut reader: R,
    emitter: &mut ResponseEmitter<W>,
    processor: &mut CommandProcessor,
    shutdown: &mut watch::Receiver<bool>,
) -> io::Result<SessionEnd>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::with_capacity(64);

    loop {
        line.clear();
        let read = tokio::select! {
            biased;
            _ = shutdown_requested(shutdown) => {
                info!("shutdown requested; leaving command loop");
                return Ok(SessionEnd::Shutdown);
            }
            read = reader.read_until(b'\n', &mut line) => read?,
        };
        if read == 0 {
            debug!("command stream closed");
            return Ok(SessionEnd::EndOfStream);
        }

        if let Some(response) = processor.handle_line(&line).await {
            emitter.emit(&response).await?;
        }
    }
}

/// Resolves once the flag is `true`.  If the sender is gone no shutdown can
/// be requested any more, so this never resolves.
pub(crate) async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|requested| *requested).await.is_err() {
        std::future::pending::<()>().await;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
