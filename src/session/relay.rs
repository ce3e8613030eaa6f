//! Output Relay
//!
//! The background loop of one script run: assembles raw output chunks into
//! lines, classifies and publishes them in receive order, waits for the
//! interpreter to exit, reports the exit code through the same line channel,
//! and finally deletes the script artifact after a grace interval.
//!
//! Every terminal path publishes `Ended`, even after a stream error, and
//! releasing the single-flight guard is the relay's last act, so a new run
//! is only accepted once cleanup finished.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::artifact::ScriptArtifact;
use super::events::{SessionEvent, SessionEventBus};
use super::process::ChildHandle;
use crate::diagnostics::DiagnosticMatcher;
use crate::models::{OutputLine, RunResult, ScriptProcess};

/// Everything the relay task needs for one run
pub(crate) struct RelayContext {
    pub session_id: String,
    pub bus: SessionEventBus,
    pub artifact: ScriptArtifact,
    pub matcher: DiagnosticMatcher,
    pub grace: Duration,
    pub terminated: Arc<AtomicBool>,
    pub active: Arc<AtomicBool>,
    pub process: Arc<RwLock<ScriptProcess>>,
}

/// Spawn the relay task for one run
pub(crate) fn spawn_relay(
    ctx: RelayContext,
    child: ChildHandle,
    output_rx: UnboundedReceiver<Vec<u8>>,
) -> JoinHandle<()> {
    tokio::spawn(run_relay(ctx, child, output_rx))
}

async fn run_relay(ctx: RelayContext, mut child: ChildHandle, mut output_rx: UnboundedReceiver<Vec<u8>>) {
    let pid = { ctx.process.read().await.pid };
    ctx.bus.publish(SessionEvent::Started {
        session_id: ctx.session_id.clone(),
        pid,
    });

    let mut assembler = LineAssembler::new();
    let mut line_number = 0usize;

    let publish_line = |text: String, line_number: &mut usize| {
        let line = OutputLine::classified(text, *line_number, &ctx.matcher);
        *line_number += 1;
        ctx.bus.publish(SessionEvent::Line {
            session_id: ctx.session_id.clone(),
            line,
        });
    };

    // Read until end-of-stream; the reader thread closes the channel when
    // the interpreter's output ends (normally at exit)
    while let Some(chunk) = output_rx.recv().await {
        for text in assembler.push(&chunk) {
            publish_line(text, &mut line_number);
        }
    }
    if let Some(text) = assembler.flush() {
        publish_line(text, &mut line_number);
    }

    // Block until the child has fully exited and its code is known
    let exit_code = match tokio::task::spawn_blocking(move || child.wait()).await {
        Ok(Ok(status)) => status.exit_code() as i32,
        Ok(Err(e)) => {
            error!("Failed to retrieve interpreter exit status: {}", e);
            -1
        }
        Err(e) => {
            error!("Exit-status task failed: {}", e);
            -1
        }
    };
    debug!("Interpreter exited with code {}", exit_code);

    {
        let mut process = ctx.process.write().await;
        process.mark_terminated(exit_code);
    }
    ctx.terminated.store(true, Ordering::SeqCst);

    // The exit code joins the output history as the final line
    publish_line(format!("Exit code {}", exit_code), &mut line_number);

    let result = {
        ctx.process.read().await.run_result().unwrap_or(RunResult {
            exit_code,
            duration: None,
        })
    };
    ctx.bus.publish(SessionEvent::Ended {
        session_id: ctx.session_id.clone(),
        result,
    });

    // Grace interval: the interpreter may still be finishing file-system
    // activity against the script right after exit
    tokio::time::sleep(ctx.grace).await;

    if let Err(e) = ctx.artifact.remove() {
        error!("Script cleanup failed: {}", e);
        ctx.bus.publish(SessionEvent::CleanupFailed {
            session_id: ctx.session_id.clone(),
            path: ctx.artifact.path().to_path_buf(),
            reason: e.to_string(),
        });
    }

    ctx.active.store(false, Ordering::SeqCst);
    debug!("Relay for session {} finished", ctx.session_id);
}

/// Splits raw output chunks into complete lines.
///
/// The PTY layer emits `\r\n` terminators; the assembler strips them and
/// buffers partial lines across chunk boundaries, so multi-byte characters
/// split between reads survive intact.
pub(crate) struct LineAssembler {
    buf: Vec<u8>,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Feed one chunk; returns the lines it completed
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in chunk {
            if byte == b'\n' {
                lines.push(self.take_line());
            } else {
                self.buf.push(byte);
            }
        }
        lines
    }

    /// Drain any trailing text that never saw a terminator
    pub fn flush(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            None
        } else {
            Some(self.take_line())
        }
    }

    fn take_line(&mut self) -> String {
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        line
    }
}
