//! Prompt construction for the assistant bridge.
//!
//! Two prompt shapes exist: the initial implementation request (system
//! instructions + requirements) and the debugging request (latest failing
//! test output). The bridge itself is shape-agnostic; both are built here.

use anyhow::Result;
use minijinja::{Environment, context};

const INITIAL_TEMPLATE: &str = include_str!("prompts/initial.md");
const DEBUG_TEMPLATE: &str = include_str!("prompts/debug.md");

/// Template engine wrapper around minijinja.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_template("initial", INITIAL_TEMPLATE)
            .expect("initial template should be valid");
        env.add_template("debug", DEBUG_TEMPLATE)
            .expect("debug template should be valid");
        Self { env }
    }

    /// Render the initial implementation prompt.
    pub fn render_initial(&self, instructions: &str, requirements: &str) -> Result<String> {
        let template = self.env.get_template("initial")?;
        let rendered = template.render(context! {
            instructions => instructions.trim(),
            requirements => requirements.trim(),
        })?;
        Ok(rendered)
    }

    /// Render the debugging prompt carrying the latest failing test output.
    pub fn render_debug(&self, iteration: u32, test_output: &str) -> Result<String> {
        let template = self.env.get_template("debug")?;
        let rendered = template.render(context! {
            iteration => iteration,
            test_output => test_output.trim(),
        })?;
        Ok(rendered)
    }
}

impl Default for PromptEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_prompt_embeds_both_documents() {
        let engine = PromptEngine::new();
        let prompt = engine
            .render_initial("Follow TDD strictly.", "Build a calculator.")
            .expect("render");

        assert!(prompt.contains("SYSTEM INSTRUCTIONS:"));
        assert!(prompt.contains("Follow TDD strictly."));
        assert!(prompt.contains("PROJECT REQUIREMENTS:"));
        assert!(prompt.contains("Build a calculator."));
        assert!(prompt.contains("Write tests FIRST"));
    }

    #[test]
    fn debug_prompt_embeds_iteration_and_test_output() {
        let engine = PromptEngine::new();
        let prompt = engine
            .render_debug(4, "AssertionError: expected 2, got 3")
            .expect("render");

        assert!(prompt.contains("iteration 4"));
        assert!(prompt.contains("AssertionError: expected 2, got 3"));
        assert!(prompt.contains("do NOT modify tests"));
    }
}
