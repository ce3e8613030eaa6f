//! Unit Tests for Command Line Construction
//!
//! Verifies the platform-normalized interpreter command for both host
//! families and for customized interpreter configurations.

use std::path::PathBuf;

use ktspad::session::CommandSpec;
use ktspad::InterpreterConfig;

#[test]
fn test_default_posix_invocation() {
    let spec = CommandSpec::for_platform(&InterpreterConfig::default(), false);
    assert_eq!(
        spec.tokens(),
        &[
            "/usr/bin/env".to_string(),
            "kotlinc".to_string(),
            "-script".to_string(),
            "TempKotlin.kts".to_string(),
        ]
    );
}

#[test]
fn test_default_windows_invocation() {
    let spec = CommandSpec::for_platform(&InterpreterConfig::default(), true);
    assert_eq!(spec.program(), "cmd");
    assert_eq!(spec.args()[0], "/c");
    assert_eq!(spec.args()[1], "kotlinc");
}

#[test]
fn test_custom_interpreter() {
    let cfg = InterpreterConfig {
        binary: "kotlin".to_string(),
        script_flag: "-howtorun".to_string(),
        script_path: PathBuf::from("scratch/Work.kts"),
        source_extension: "kts".to_string(),
    };
    let spec = CommandSpec::for_platform(&cfg, false);
    assert_eq!(
        spec.tokens(),
        &[
            "/usr/bin/env".to_string(),
            "kotlin".to_string(),
            "-howtorun".to_string(),
            "scratch/Work.kts".to_string(),
        ]
    );
}

#[test]
fn test_program_and_args_split() {
    let spec = CommandSpec::for_platform(&InterpreterConfig::default(), false);
    assert_eq!(spec.program(), "/usr/bin/env");
    assert_eq!(spec.args().len(), 3);
}

#[test]
fn test_current_platform_constructor() {
    // `new` must agree with the explicit platform variant for this host
    let cfg = InterpreterConfig::default();
    assert_eq!(
        CommandSpec::new(&cfg),
        CommandSpec::for_platform(&cfg, cfg!(windows))
    );
}

#[test]
fn test_display_format() {
    let spec = CommandSpec::for_platform(&InterpreterConfig::default(), false);
    assert_eq!(format!("{}", spec), "/usr/bin/env kotlinc -script TempKotlin.kts");
}
