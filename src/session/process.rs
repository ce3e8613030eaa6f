//! Interpreter Process Spawning
//!
//! Spawns the interpreter under a PTY via `portable-pty` and bridges its
//! blocking master I/O to async code over channels. A PTY gives a single
//! combined output stream: stderr is merged into stdout at the terminal
//! layer, which keeps interleaved diagnostics and program output in
//! arrival order.

use portable_pty::{native_pty_system, Child, CommandBuilder, PtyPair, PtySize};
use std::io::{Read, Write};
use std::sync::mpsc::channel;
use std::thread;
use tokio::sync::mpsc::unbounded_channel;

use super::command::CommandSpec;
use super::streams::ProcessStreams;
use crate::error::{Error, Result};
use crate::models::ScriptProcess;

/// Child handle returned by the PTY spawn
pub type ChildHandle = Box<dyn Child + Send + Sync>;

/// Spawn the interpreter for one script run.
///
/// Returns the lifecycle model (already marked started), the channel-backed
/// streams, and the child handle the relay waits on.
pub async fn spawn_script_process(
    spec: &CommandSpec,
) -> Result<(ScriptProcess, ProcessStreams, ChildHandle)> {
    let pty_system = native_pty_system();

    let pair = pty_system
        .openpty(PtySize {
            rows: 24,
            cols: 80,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(|e| Error::PtyCreationFailed {
            command: spec.to_string(),
            reason: e.to_string(),
        })?;

    let mut cmd = CommandBuilder::new(spec.program());
    cmd.args(spec.args());
    // Relative script paths resolve against the caller's working directory
    if let Ok(cwd) = std::env::current_dir() {
        cmd.cwd(cwd);
    }

    let child = pair
        .slave
        .spawn_command(cmd)
        .map_err(|e| Error::SpawnFailed {
            command: spec.to_string(),
            reason: e.to_string(),
        })?;

    let pid = child.process_id().unwrap_or(0);

    let mut process = ScriptProcess::new(spec.to_string());
    process.mark_started(pid);

    let streams = create_process_streams(pair)?;

    debug!("Spawned interpreter: {} (pid {})", spec, pid);
    Ok((process, streams, child))
}

/// Bridge the PTY master's blocking I/O to channels via dedicated threads
fn create_process_streams(pair: PtyPair) -> Result<ProcessStreams> {
    let mut master_reader = pair
        .master
        .try_clone_reader()
        .map_err(|e| Error::ReaderCloneFailed {
            reason: e.to_string(),
        })?;
    let mut master_writer = pair
        .master
        .take_writer()
        .map_err(|e| Error::WriterTakeFailed {
            reason: e.to_string(),
        })?;

    // Channel: merged interpreter output -> relay
    let (tx_output, rx_output) = unbounded_channel::<Vec<u8>>();
    // Channel: forwarded input -> writer thread
    let (tx_input, rx_input) = channel::<Vec<u8>>();

    // Reader thread: blocking reads from the PTY master until end-of-stream
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        let mut consecutive_errors = 0;
        const MAX_CONSECUTIVE_ERRORS: u32 = 5;

        loop {
            match master_reader.read(&mut buf) {
                Ok(0) => {
                    // End-of-stream: the interpreter closed its output
                    debug!("Interpreter output reached end-of-stream");
                    break;
                }
                Ok(n) => {
                    consecutive_errors = 0;
                    if tx_output.send(buf[..n].to_vec()).is_err() {
                        debug!("Output receiver dropped, stopping reader thread");
                        break;
                    }
                }
                Err(e) => {
                    if e.kind() == std::io::ErrorKind::Interrupted {
                        continue;
                    }
                    if e.kind() == std::io::ErrorKind::WouldBlock {
                        thread::sleep(std::time::Duration::from_millis(10));
                        continue;
                    }

                    consecutive_errors += 1;
                    warn!(
                        "Interpreter output read error ({}): {} (attempt {}/{})",
                        e.kind(),
                        e,
                        consecutive_errors,
                        MAX_CONSECUTIVE_ERRORS
                    );
                    if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                        error!("Too many consecutive read errors, stopping reader thread");
                        break;
                    }
                    thread::sleep(std::time::Duration::from_millis(50));
                }
            }
        }
        debug!("Reader thread exiting");
    });

    // Writer thread: forwards each input line and flushes immediately
    thread::spawn(move || {
        while let Ok(data) = rx_input.recv() {
            if let Err(e) = write_input(master_writer.as_mut(), &data) {
                warn!("Interpreter input write failed: {}", e);
                break;
            }
        }
        debug!("Writer thread exiting");
    });

    Ok(ProcessStreams::from_channels(rx_output, tx_input))
}

/// One write-and-flush to the PTY master, retrying interrupted writes
fn write_input(writer: &mut (dyn Write + Send), data: &[u8]) -> std::io::Result<()> {
    loop {
        match writer.write_all(data) {
            Ok(()) => {
                if let Err(e) = writer.flush() {
                    // Flush errors are usually transient on a PTY; the next
                    // write surfaces anything persistent
                    debug!("Input flush error: {}", e);
                }
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
