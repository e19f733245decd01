//! OS-level key injection
//!
//! The scheduler talks to the operating system's input-synthesis layer
//! through the [`KeyInjector`] trait so tests can substitute a mock. The
//! production implementation shells out to an external typing tool
//! (`xdotool type` by default), the same external-command posture as the
//! device bridge invocations.

use std::process::Command;
use thiserror::Error;

/// Errors raised by key injection
#[derive(Error, Debug)]
pub enum InjectError {
    #[error("failed to spawn injector command '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("injector command '{command}' exited with {status}: {stderr}")]
    NonZeroExit {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Capability to inject a key symbol at the OS level
pub trait KeyInjector {
    /// Type `symbol` into whatever currently holds input focus
    fn inject(&mut self, symbol: &str) -> Result<(), InjectError>;
}

/// Injector that runs a configured external command with the symbol
/// appended as the final argument
#[derive(Debug, Clone)]
pub struct CommandKeyInjector {
    command: Vec<String>,
}

impl CommandKeyInjector {
    /// Create an injector for the given command prefix,
    /// e.g. `["xdotool", "type"]`
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl KeyInjector for CommandKeyInjector {
    fn inject(&mut self, symbol: &str) -> Result<(), InjectError> {
        let Some(program) = self.command.first() else {
            return Err(InjectError::Spawn {
                command: String::new(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "injector command is empty",
                ),
            });
        };
        let output = Command::new(program)
            .args(&self.command[1..])
            .arg(symbol)
            .output()
            .map_err(|source| InjectError::Spawn {
                command: self.command.join(" "),
                source,
            })?;

        if !output.status.success() {
            return Err(InjectError::NonZeroExit {
                command: self.command.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Injector that does nothing, for dry runs and loopback tests where no
/// screen is being captured
#[derive(Debug, Clone, Default)]
pub struct NullInjector;

impl KeyInjector for NullInjector {
    fn inject(&mut self, _symbol: &str) -> Result<(), InjectError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_injector_always_succeeds() {
        let mut injector = NullInjector;
        assert!(injector.inject("m").is_ok());
        assert!(injector.inject("").is_ok());
    }

    #[test]
    fn test_command_injector_spawn_failure() {
        let mut injector =
            CommandKeyInjector::new(vec!["definitely-not-a-real-binary-xyz".to_string()]);
        let err = injector.inject("m").unwrap_err();
        assert!(matches!(err, InjectError::Spawn { .. }));
        assert!(err.to_string().contains("definitely-not-a-real-binary-xyz"));
    }

    #[test]
    fn test_command_injector_nonzero_exit() {
        // `false` ignores its arguments and exits 1
        let mut injector = CommandKeyInjector::new(vec!["false".to_string()]);
        let err = injector.inject("m").unwrap_err();
        assert!(matches!(err, InjectError::NonZeroExit { .. }));
    }

    #[test]
    fn test_command_injector_success() {
        // `true` ignores its arguments and exits 0
        let mut injector = CommandKeyInjector::new(vec!["true".to_string()]);
        assert!(injector.inject("m").is_ok());
    }
}
