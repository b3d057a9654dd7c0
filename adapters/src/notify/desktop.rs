use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use corelib::{Notification, NotificationSink};
use tokio::process::Command;
use tracing::debug;

const NOTIFY_PROGRAM: &str = "notify-send";

/// Pops a desktop notification through `notify-send`.
///
/// The child is spawned and left to the runtime to reap; the poll loop never
/// waits on it.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    program: String,
    icon_dir: PathBuf,
}

impl DesktopNotifier {
    pub fn new(icon_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: NOTIFY_PROGRAM.to_string(),
            icon_dir: icon_dir.into(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn icon_dir(&self) -> &Path {
        &self.icon_dir
    }

    pub fn icon_path(&self, notification: &Notification) -> PathBuf {
        self.icon_dir
            .join(format!("{}.ico", notification.icon.file_stem()))
    }

    pub fn command_args(&self, notification: &Notification) -> Vec<String> {
        let expire_ms = u64::from(notification.display_seconds) * 1000;
        vec![
            "--app-name".to_string(),
            notification.title.clone(),
            "--expire-time".to_string(),
            expire_ms.to_string(),
            "--icon".to_string(),
            self.icon_path(notification).display().to_string(),
            notification.title.clone(),
            notification.message.clone(),
        ]
    }
}

impl NotificationSink for DesktopNotifier {
    fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        let args = self.command_args(notification);
        debug!(program = %self.program, ?args, "spawning desktop notification");

        Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.program))?;

        Ok(())
    }
}
