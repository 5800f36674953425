use std::io::Write;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use super::sanitize::sanitize;
use crate::config::Assistant as Settings;
use crate::display::status;
use crate::error::{AlchemistError, Result};

const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// Runs prompts through the external assistant CLI
pub struct Runner<'a> {
    settings: &'a Settings,
    probed: AtomicBool,
}

impl<'a> Runner<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            probed: AtomicBool::new(false),
        }
    }

    pub fn program(&self) -> &str {
        &self.settings.program
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.settings.timeout_secs)
    }

    /// Ask the assistant for its version string
    pub async fn version(&self) -> Result<String> {
        let child = Command::new(&self.settings.program)
            .args(&self.settings.version_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AlchemistError::Assistant(format!(
                    "cannot start '{}': {}",
                    self.settings.program, e
                ))
            })?;

        let output = tokio::time::timeout(PROBE_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| AlchemistError::Timeout(PROBE_TIMEOUT))??;

        if !output.status.success() {
            return Err(AlchemistError::Assistant(format!(
                "'{}' exited with {}",
                self.settings.program, output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Check the assistant once per run; a missing assistant only warns
    pub async fn probe(&self) {
        if self.probed.swap(true, Ordering::SeqCst) {
            return;
        }

        match self.version().await {
            Ok(version) => info!("Found assistant CLI: {}", version),
            Err(e) => {
                debug!("Assistant probe failed: {}", e);
                warn!(
                    "Assistant CLI '{}' not found. Some features may not work properly.",
                    self.settings.program
                );
                warn!("Install it, or point [assistant].program in alchemist.toml at it.");
            }
        }
    }

    /// Send `prompt` on stdin and return the sanitized reply
    pub async fn query(&self, prompt: &str) -> Result<String> {
        self.probe().await;

        let mut prompt_file = tempfile::Builder::new()
            .prefix("alchemist-prompt-")
            .suffix(".txt")
            .tempfile()?;
        prompt_file.write_all(prompt.as_bytes())?;
        prompt_file.flush()?;
        let stdin = prompt_file.reopen()?;

        status::progress("⏳ Querying assistant...");
        debug!(
            program = %self.settings.program,
            prompt_bytes = prompt.len(),
            "Running assistant query"
        );

        let child = Command::new(&self.settings.program)
            .args(&self.settings.args)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AlchemistError::Assistant(format!(
                    "cannot start '{}': {}",
                    self.settings.program, e
                ))
            })?;

        // Dropping the wait future on timeout kills the child
        let output = tokio::time::timeout(self.timeout(), child.wait_with_output())
            .await
            .map_err(|_| AlchemistError::Timeout(self.timeout()))??;

        if !output.status.success() {
            let stderr = sanitize(&String::from_utf8_lossy(&output.stderr));
            return Err(AlchemistError::Assistant(format!(
                "'{}' exited with {}: {}",
                self.settings.program, output.status, stderr
            )));
        }

        Ok(sanitize(String::from_utf8_lossy(&output.stdout).trim()))
    }

    /// Hand the terminal to the assistant's own login flow
    pub async fn login(&self) -> Result<()> {
        let status = Command::new(&self.settings.program)
            .args(&self.settings.login_args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                AlchemistError::Assistant(format!(
                    "cannot start '{}': {}",
                    self.settings.program, e
                ))
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(AlchemistError::Assistant(format!(
                "login exited with {}",
                status
            )))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn settings(program: &str, args: &[&str]) -> Settings {
        Settings {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            version_args: vec!["--version".to_string()],
            login_args: vec![],
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_query_feeds_prompt_on_stdin() {
        let settings = settings("cat", &[]);
        let runner = Runner::new(&settings);

        let reply = runner.query("Analyze this\n\n\nplease").await.unwrap();
        assert_eq!(reply, "Analyze this\nplease");
    }

    #[tokio::test]
    async fn test_query_sanitizes_output() {
        let settings = settings("printf", &["\\033[31mRed flag\\033[0m\\n\\n"]);
        let runner = Runner::new(&settings);

        let reply = runner.query("ignored").await.unwrap();
        assert_eq!(reply, "Red flag");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_assistant_error() {
        let settings = settings("sh", &["-c", "echo 'not authenticated' >&2; exit 3"]);
        let runner = Runner::new(&settings);

        let err = runner.query("hello").await.unwrap_err();
        match err {
            AlchemistError::Assistant(msg) => assert!(msg.contains("not authenticated")),
            other => panic!("Expected Assistant error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_assistant_error() {
        let settings = settings("definitely-not-an-assistant-cli", &[]);
        let runner = Runner::new(&settings);

        let err = runner.query("hello").await.unwrap_err();
        assert!(matches!(err, AlchemistError::Assistant(_)));
    }

    #[tokio::test]
    async fn test_slow_assistant_times_out() {
        let mut settings = settings("sleep", &["10"]);
        settings.timeout_secs = 1;
        let runner = Runner::new(&settings);

        let err = runner.query("hello").await.unwrap_err();
        assert!(matches!(err, AlchemistError::Timeout(d) if d == Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn test_version_reports_stdout() {
        let mut settings = settings("echo", &[]);
        settings.version_args = vec!["q 1.2.3".to_string()];
        let runner = Runner::new(&settings);

        assert_eq!(runner.version().await.unwrap(), "q 1.2.3");
    }
}
