//! Script Process Model
//!
//! Tracks the lifecycle of one interpreter invocation: created, running,
//! terminated, with timestamps and the eventual exit code. The model is
//! plain data; the actual process handle lives in the session layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Represents the state of the interpreter process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProcessState {
    /// Process has been created but not started
    #[default]
    Created,
    /// Process is currently running
    Running,
    /// Process has terminated
    Terminated,
}

/// Terminal summary of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Exit code of the interpreter process
    pub exit_code: i32,
    /// Wall-clock duration of the run, when both timestamps are known
    pub duration: Option<Duration>,
}

impl RunResult {
    /// Whether the run finished with exit code 0
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Lifecycle of one interpreter invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptProcess {
    /// OS process identifier
    pub pid: Option<u32>,

    /// Current state of the process
    pub state: ProcessState,

    /// When the process was started
    pub start_time: Option<DateTime<Utc>>,

    /// When the process terminated (if applicable)
    pub end_time: Option<DateTime<Utc>>,

    /// Exit code (if the process has terminated)
    pub exit_code: Option<i32>,

    /// Full command line the process was launched with
    pub command: String,
}

impl ScriptProcess {
    /// Create a new process model in the Created state
    pub fn new(command: String) -> Self {
        Self {
            pid: None,
            state: ProcessState::Created,
            start_time: None,
            end_time: None,
            exit_code: None,
            command,
        }
    }

    /// Mark the process as started with the given PID
    pub fn mark_started(&mut self, pid: u32) {
        self.pid = Some(pid);
        self.state = ProcessState::Running;
        self.start_time = Some(Utc::now());
    }

    /// Mark the process as terminated with the given exit code
    pub fn mark_terminated(&mut self, exit_code: i32) {
        self.state = ProcessState::Terminated;
        self.end_time = Some(Utc::now());
        self.exit_code = Some(exit_code);
    }

    /// Check if the process is currently running
    pub fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running)
    }

    /// Check if the process has terminated
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }

    /// Get the execution duration if the process has terminated
    pub fn execution_duration(&self) -> Option<Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                Some(end.signed_duration_since(start).to_std().unwrap_or_default())
            }
            _ => None,
        }
    }

    /// Check if the process exited successfully (exit code 0)
    pub fn exited_successfully(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Terminal run summary, once the process has terminated
    pub fn run_result(&self) -> Option<RunResult> {
        self.exit_code.map(|exit_code| RunResult {
            exit_code,
            duration: self.execution_duration(),
        })
    }
}

impl std::fmt::Display for ScriptProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state_str = match self.state {
            ProcessState::Created => "Created",
            ProcessState::Running => "Running",
            ProcessState::Terminated => "Terminated",
        };
        let pid_str = self.pid.map_or("N/A".to_string(), |pid| pid.to_string());
        write!(
            f,
            "{} [{}] - {}{}",
            self.command,
            pid_str,
            state_str,
            self.exit_code
                .map_or(String::new(), |code| format!(" (exit: {})", code))
        )
    }
}
