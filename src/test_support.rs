//! Test-only fakes and project fixtures.

use std::cell::RefCell;
use std::path::Path;

use anyhow::Result;
use tempfile::TempDir;

use crate::core::types::TestResult;
use crate::io::assistant::AssistantBridge;
use crate::io::init::{ProjectPaths, ensure_layout};
use crate::io::test_runner::{TestRequest, TestRunner};

/// Test runner that replays a fixed script of results.
///
/// The last scripted result repeats once the script is exhausted. Every
/// request is recorded for assertion.
pub struct ScriptedTestRunner {
    script: Vec<TestResult>,
    calls: RefCell<Vec<TestRequest>>,
}

impl ScriptedTestRunner {
    pub fn new(script: Vec<TestResult>) -> Self {
        assert!(!script.is_empty(), "script must not be empty");
        Self {
            script,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Number of invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Requests recorded so far.
    pub fn requests(&self) -> Vec<TestRequest> {
        self.calls.borrow().clone()
    }
}

impl TestRunner for ScriptedTestRunner {
    fn run(&self, request: &TestRequest) -> TestResult {
        let mut calls = self.calls.borrow_mut();
        let index = calls.len().min(self.script.len() - 1);
        calls.push(request.clone());
        self.script[index].clone()
    }
}

/// Assistant bridge that records prompts and replies with a fixed string.
pub struct RecordingAssistant {
    reply: String,
    prompts: RefCell<Vec<String>>,
}

impl RecordingAssistant {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl AssistantBridge for RecordingAssistant {
    fn send(&self, prompt: &str) -> String {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.reply.clone()
    }
}

/// Temporary project with scaffolding and both input documents in place.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let paths = ProjectPaths::new(dir.path());
        ensure_layout(&paths)?;
        std::fs::write(&paths.requirements_path, "Build a calculator.\n")?;
        std::fs::write(&paths.instructions_path, "Follow TDD strictly.\n")?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> ProjectPaths {
        ProjectPaths::new(self.dir.path())
    }
}
