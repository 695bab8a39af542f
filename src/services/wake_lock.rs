//! Keep the machine from idling or sleeping while a session runs

use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::error::WakeLockError;

pub const DEFAULT_INHIBIT_COMMAND: &str = "systemd-inhibit";

/// Inhibitor lock held by a long-lived `systemd-inhibit` child
#[derive(Debug)]
pub struct WakeLock {
    command: String,
    child: Option<Child>,
}

impl WakeLock {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            child: None,
        }
    }

    pub fn is_held(&self) -> bool {
        self.child.is_some()
    }

    /// Take the inhibitor lock. No-op when already held.
    pub fn acquire(&mut self) -> Result<(), WakeLockError> {
        if self.child.is_some() {
            return Ok(());
        }

        let child = Command::new(&self.command)
            .args([
                "--what=idle:sleep",
                "--who=round-bell",
                "--why=Training session in progress",
                "--mode=block",
                "sleep",
                "infinity",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| WakeLockError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        debug!("Inhibitor pid: {:?}", child.id());
        self.child = Some(child);
        info!("Wake lock acquired");
        Ok(())
    }

    /// Drop the inhibitor lock. No-op when not held.
    pub async fn release(&mut self) -> Result<(), WakeLockError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        child.kill().await.map_err(WakeLockError::Release)?;
        info!("Wake lock released");
        Ok(())
    }
}

impl Default for WakeLock {
    fn default() -> Self {
        Self::new(DEFAULT_INHIBIT_COMMAND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_release_without_acquire_is_noop() {
        let mut lock = WakeLock::default();
        assert!(!lock.is_held());
        lock.release().await.unwrap();
        assert!(!lock.is_held());
    }

    #[tokio::test]
    async fn test_failed_acquire_holds_nothing() {
        let mut lock = WakeLock::new("round-bell-no-such-inhibitor");
        assert!(matches!(lock.acquire(), Err(WakeLockError::Spawn { .. })));
        assert!(!lock.is_held());
    }
}
