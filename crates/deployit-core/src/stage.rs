//! Stage definitions.
//!
//! A stage is one unit of pipeline work. Stages form a forest: each stage
//! owns the ordered list of children that run after it. The tree is built
//! top-down during assembly and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::fields::{ConfigField, Configurable};
use crate::registry::Registry;

/// A stage in a pipeline, with the stages that run after it as children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Display name. Empty when the configuration names no stage.
    pub name: String,
    /// Cross-cutting stage options.
    pub opts: StageOpts,
    /// Type-specific parameters.
    pub params: StageParams,
    /// Stages that run after this one, in configuration order.
    pub children: Vec<Stage>,
}

impl Stage {
    /// Creates an unnamed stage with default options and no children.
    pub fn new(params: StageParams) -> Self {
        Self {
            name: String::new(),
            opts: StageOpts::default(),
            params,
            children: Vec::new(),
        }
    }

    /// The stage's type name, as used in configuration documents.
    pub fn kind(&self) -> &'static str {
        self.params.kind()
    }

    /// Appends a child stage, preserving insertion order.
    pub fn add_child(&mut self, child: Stage) {
        self.children.push(child);
    }
}

impl Configurable for Stage {
    fn config_fields(&mut self) -> Vec<ConfigField<'_>> {
        self.params.config_fields()
    }
}

/// Cross-cutting stage options.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StageOpts {
    /// Report the stage's full output instead of a truncated summary.
    pub report_full_output: bool,
}

/// Type-specific stage parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageParams {
    /// Run a single command.
    Command(CommandParams),
    /// Run a shell script file.
    ShellScript(ShellScriptParams),
}

impl StageParams {
    /// The type name, as used in configuration documents.
    pub fn kind(&self) -> &'static str {
        match self {
            StageParams::Command(_) => "command",
            StageParams::ShellScript(_) => "shell_script",
        }
    }
}

impl Configurable for StageParams {
    fn config_fields(&mut self) -> Vec<ConfigField<'_>> {
        match self {
            StageParams::Command(params) => params.config_fields(),
            StageParams::ShellScript(params) => params.config_fields(),
        }
    }
}

/// Parameters for a command stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandParams {
    /// Command line to run.
    pub command: String,
    /// Working directory.
    pub directory: String,
    /// Only run the stage when this command succeeds.
    pub only_if: String,
}

impl Configurable for CommandParams {
    fn config_fields(&mut self) -> Vec<ConfigField<'_>> {
        vec![
            ConfigField::substituted("command", &mut self.command),
            ConfigField::plain("directory", &mut self.directory),
            ConfigField::substituted("only_if", &mut self.only_if),
        ]
    }
}

/// Parameters for a shell script stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellScriptParams {
    /// Path of the script file to run.
    pub file: String,
    /// Working directory.
    pub directory: String,
}

impl Configurable for ShellScriptParams {
    fn config_fields(&mut self) -> Vec<ConfigField<'_>> {
        vec![
            ConfigField::plain("file", &mut self.file),
            ConfigField::plain("directory", &mut self.directory),
        ]
    }
}

/// The default stage registry: `command` and `shell_script`.
pub fn registry() -> Registry<Stage> {
    let mut registry = Registry::new("stage");
    registry.register("command", || {
        Stage::new(StageParams::Command(CommandParams::default()))
    });
    registry.register("shell_script", || {
        Stage::new(StageParams::ShellScript(ShellScriptParams::default()))
    });
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creates_command_stage() {
        let stage = registry().create("command").unwrap();
        assert_eq!(stage.kind(), "command");
        assert_eq!(stage.name, "");
        assert!(stage.children.is_empty());
        assert!(!stage.opts.report_full_output);
    }

    #[test]
    fn test_registry_creates_shell_script_stage() {
        let stage = registry().create("shell_script").unwrap();
        assert_eq!(stage.kind(), "shell_script");
    }

    #[test]
    fn test_registry_rejects_unknown_type() {
        let err = registry().create("teleport").unwrap_err();
        assert_eq!(err.to_string(), "unknown stage type: teleport");
    }

    #[test]
    fn test_add_child_preserves_order() {
        let mut parent = registry().create("command").unwrap();
        for name in ["first", "second", "third"] {
            let mut child = registry().create("command").unwrap();
            child.name = name.to_string();
            parent.add_child(child);
        }

        let names: Vec<&str> = parent.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_command_stage_declares_fields() {
        let mut stage = registry().create("command").unwrap();
        let keys: Vec<&str> = stage.config_fields().iter().map(|f| f.key).collect();
        assert_eq!(keys, ["command", "directory", "only_if"]);
    }
}
