//! Process I/O Streams
//!
//! Channel-backed wrappers around the interpreter's I/O: the blocking PTY
//! reads and writes happen on bridge threads (see `process`), and these
//! types carry the async-friendly ends. Output is a single merged stream;
//! input is line-oriented and flushed on every write.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender as StdSender;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::{Error, Result};

/// Channel ends of a spawned interpreter process
pub struct ProcessStreams {
    /// Receiver for merged output bytes (stdout + stderr)
    output_rx: UnboundedReceiver<Vec<u8>>,
    /// Sender for input bytes to the process stdin
    input_tx: StdSender<Vec<u8>>,
}

impl ProcessStreams {
    /// Create process streams from the bridge channels
    pub fn from_channels(
        output_rx: UnboundedReceiver<Vec<u8>>,
        input_tx: StdSender<Vec<u8>>,
    ) -> Self {
        Self {
            output_rx,
            input_tx,
        }
    }

    /// Split into the relay's output receiver and the caller's input sender
    pub fn into_parts(self) -> (UnboundedReceiver<Vec<u8>>, StdSender<Vec<u8>>) {
        (self.output_rx, self.input_tx)
    }
}

/// Line-oriented input channel to the running interpreter.
///
/// Writes one line plus terminator per call; the bridge thread flushes after
/// every write since the interpreter reads stdin line-buffered. Safe to use
/// concurrently with the relay reading output.
#[derive(Clone)]
pub struct InputSink {
    tx: StdSender<Vec<u8>>,
    terminated: Arc<AtomicBool>,
}

impl InputSink {
    /// Create an input sink bound to the termination flag of its session
    pub fn new(tx: StdSender<Vec<u8>>, terminated: Arc<AtomicBool>) -> Self {
        Self { tx, terminated }
    }

    /// Write one line (verbatim plus `\n`) to the process input and flush.
    ///
    /// After the process has terminated this yields
    /// [`Error::WriteAfterTermination`]; it never faults the relay.
    pub fn send_line(&self, line: &str) -> Result<()> {
        if self.terminated.load(Ordering::SeqCst) {
            return Err(Error::WriteAfterTermination);
        }

        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');

        self.tx.send(bytes).map_err(|_| {
            // The writer thread is gone; treat a racing exit as termination
            if self.terminated.load(Ordering::SeqCst) {
                Error::WriteAfterTermination
            } else {
                Error::InputSendFailed {
                    reason: "input channel closed".to_string(),
                }
            }
        })
    }

    /// Whether the session this sink belongs to has terminated
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }
}
