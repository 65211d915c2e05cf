//! Assistant bridge for forwarding prompts to an external coding agent.
//!
//! The [`AssistantBridge`] trait decouples the loop from the agent backend.
//! The contract the loop depends on: synchronous, blocking, returns text,
//! never fails. Backends map their own failures to a textual error reply.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};
use tracing::{info, instrument, warn};

use crate::io::config::AssistantConfig;

/// Number of prompt characters echoed for observability.
const PROMPT_PREVIEW_CHARS: usize = 200;

/// Fixed reply returned by [`StubAssistant`].
pub const STUB_REPLY: &str = "PLACEHOLDER: assistant reply goes here";

/// Abstraction over assistant backends.
pub trait AssistantBridge {
    /// Forward `prompt` and return the agent's textual reply.
    fn send(&self, prompt: &str) -> String;
}

/// Bridge that performs no external call.
///
/// Prints a prompt preview for observability and returns a fixed
/// placeholder reply. Selected when no assistant command is configured.
pub struct StubAssistant;

impl AssistantBridge for StubAssistant {
    fn send(&self, prompt: &str) -> String {
        let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
        info!(prompt_chars = prompt.chars().count(), "stub assistant invoked");
        eprintln!("--- prompt preview ---\n{preview}...\n----------------------");
        STUB_REPLY.to_string()
    }
}

/// Bridge that spawns an external command, writing the prompt to its stdin
/// and returning captured stdout.
///
/// No timeout is applied: the loop blocks for as long as the agent runs.
/// Spawn failures and non-zero exits become textual error replies.
pub struct CommandAssistant {
    command: Vec<String>,
    workdir: PathBuf,
}

impl CommandAssistant {
    pub fn new(command: Vec<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            workdir: workdir.into(),
        }
    }

    fn invoke(&self, prompt: &str) -> Result<String> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| anyhow!("assistant command is empty"))?;
        let mut child = Command::new(program)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("spawn assistant command")?;

        child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("stdin was not piped"))?
            .write_all(prompt.as_bytes())
            .context("write prompt to assistant stdin")?;

        let output = child.wait_with_output().context("wait for assistant")?;
        if !output.status.success() {
            return Err(anyhow!(
                "assistant exited with status {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl AssistantBridge for CommandAssistant {
    #[instrument(skip_all, fields(prompt_chars = prompt.chars().count()))]
    fn send(&self, prompt: &str) -> String {
        match self.invoke(prompt) {
            Ok(reply) => reply,
            Err(err) => {
                warn!(err = %err, "assistant call failed");
                format!("could not get a response from the assistant: {err:#}")
            }
        }
    }
}

/// Select a bridge from config: an empty command means the stub.
pub fn bridge_from_config(config: &AssistantConfig, workdir: &Path) -> Box<dyn AssistantBridge> {
    if config.command.is_empty() {
        Box::new(StubAssistant)
    } else {
        Box::new(CommandAssistant::new(config.command.clone(), workdir))
    }
}
