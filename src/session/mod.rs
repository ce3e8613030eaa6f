//! Script Session Management
//!
//! Owns the lifecycle of at most one interpreter invocation: building the
//! platform command line, writing the script artifact, spawning the process
//! under a PTY (stderr merged into stdout), relaying output lines as events,
//! forwarding input, and cleaning up the artifact once the run terminates.

pub mod artifact;
pub mod command;
pub mod events;
pub mod manager;
pub mod process;
pub mod streams;

mod relay;

// Re-exports for convenience
pub use artifact::ScriptArtifact;
pub use command::CommandSpec;
pub use events::{SessionEvent, SessionEventBus, SessionEventSubscription};
pub use manager::{ScriptSession, SessionManager};
pub use process::spawn_script_process;
pub use streams::{InputSink, ProcessStreams};
