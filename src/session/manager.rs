//! Session Manager
//!
//! Entry point for running a script: writes the artifact, spawns the
//! interpreter, starts the relay, and hands the caller an owned
//! [`ScriptSession`]. A single-flight guard refuses a second `start()` while
//! a session is live, so a run can never spawn untracked overlapping
//! interpreter processes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::artifact::ScriptArtifact;
use super::command::CommandSpec;
use super::events::{SessionEventBus, SessionEventSubscription};
use super::process::spawn_script_process;
use super::relay::{spawn_relay, RelayContext};
use super::streams::InputSink;
use crate::config::Config;
use crate::diagnostics::DiagnosticMatcher;
use crate::error::{Error, Result};
use crate::models::ScriptProcess;

/// Manages at most one live script session at a time
pub struct SessionManager {
    config: Config,
    bus: SessionEventBus,
    active: Arc<AtomicBool>,
}

impl SessionManager {
    /// Create a manager from the given configuration
    pub fn new(config: Config) -> Self {
        let bus = SessionEventBus::new(config.session.event_capacity);
        Self {
            config,
            bus,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The event bus sessions publish on.
    ///
    /// Subscribe before calling [`start`](Self::start) to observe the
    /// `Started` event of the next run.
    pub fn event_bus(&self) -> &SessionEventBus {
        &self.bus
    }

    /// Subscribe to session events
    pub async fn subscribe(&self) -> SessionEventSubscription {
        self.bus.subscribe().await
    }

    /// Whether a session is currently live (relay not yet finished)
    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Start one script run from the given source text.
    ///
    /// Writes the script artifact, spawns the interpreter, and starts the
    /// output relay. Fails fast with [`Error::SessionAlreadyActive`] while a
    /// previous run is still live (including its cleanup window).
    pub async fn start(&self, source: &str) -> Result<ScriptSession> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::SessionAlreadyActive);
        }

        // Any failure before the relay exists must release the guard itself
        match self.start_session(source).await {
            Ok(session) => Ok(session),
            Err(e) => {
                self.active.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    async fn start_session(&self, source: &str) -> Result<ScriptSession> {
        let interpreter = &self.config.interpreter;

        let artifact = ScriptArtifact::new(interpreter.script_path.clone());
        artifact.write(source)?;

        let matcher = DiagnosticMatcher::new(&interpreter.source_extension)?;
        let spec = CommandSpec::new(interpreter);

        let (process, streams, child) = match spawn_script_process(&spec).await {
            Ok(spawned) => spawned,
            Err(e) => {
                // The run never started; a leftover artifact would feed a
                // stale script into the next run at the same path
                if let Err(cleanup) = artifact.remove() {
                    warn!("Could not remove script after failed spawn: {}", cleanup);
                }
                return Err(e);
            }
        };

        let session_id = Uuid::new_v4().to_string();
        let pid = process.pid;
        let terminated = Arc::new(AtomicBool::new(false));
        let process = Arc::new(RwLock::new(process));
        let (output_rx, input_tx) = streams.into_parts();
        let input = InputSink::new(input_tx, terminated.clone());

        let relay = spawn_relay(
            RelayContext {
                session_id: session_id.clone(),
                bus: self.bus.clone(),
                artifact,
                matcher,
                grace: Duration::from_millis(self.config.session.cleanup_grace_ms),
                terminated: terminated.clone(),
                active: self.active.clone(),
                process: process.clone(),
            },
            child,
            output_rx,
        );

        info!("Started session {} ({})", session_id, spec);
        Ok(ScriptSession {
            id: session_id,
            pid,
            input,
            terminated,
            process,
            relay,
        })
    }
}

/// One in-flight script execution, owned by the caller for the run's
/// duration. Dropping the session does not stop the run; the relay keeps
/// publishing until process exit (cancellation is not supported).
pub struct ScriptSession {
    id: String,
    pid: Option<u32>,
    input: InputSink,
    terminated: Arc<AtomicBool>,
    process: Arc<RwLock<ScriptProcess>>,
    relay: JoinHandle<()>,
}

impl ScriptSession {
    /// Unique identifier of this session
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Process ID of the interpreter
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Forward one line of user input to the running interpreter.
    ///
    /// The line is written verbatim plus a terminator and flushed
    /// immediately. After process exit this returns
    /// [`Error::WriteAfterTermination`].
    pub fn send_input(&self, line: &str) -> Result<()> {
        self.input.send_line(line)
    }

    /// Whether the interpreter process has terminated
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    /// Snapshot of the process lifecycle model
    pub async fn process_info(&self) -> ScriptProcess {
        self.process.read().await.clone()
    }

    /// Wait until the relay has finished (exit reported and cleanup done)
    pub async fn wait_until_finished(self) {
        if let Err(e) = self.relay.await {
            debug!("Relay task join failed: {}", e);
        }
    }
}
