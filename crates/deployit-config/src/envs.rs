//! Environment variable substitution for configuration values.
//!
//! Supports placeholders like:
//! - `$DEPLOY_TARGET` - bare form
//! - `${DEPLOY_TARGET}` - braced form
//!
//! A placeholder naming an undefined variable is left untouched.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// Regex for matching $NAME and ${NAME} placeholders
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([a-zA-Z_][a-zA-Z0-9_]*)\}|([a-zA-Z_][a-zA-Z0-9_]*))").unwrap()
});

/// An immutable snapshot of environment variables.
///
/// Captured once, then used for every substitution of one assembly pass, so
/// repeated substitutions of the same value always agree.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, String>,
}

impl EnvVars {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Adds a variable to the snapshot.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Looks up a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Substitutes every `$NAME` / `${NAME}` placeholder in the input with
    /// the snapshot's value for `NAME`. Placeholders naming undefined
    /// variables are left as-is.
    pub fn replace(&self, input: &str) -> String {
        PLACEHOLDER_REGEX
            .replace_all(input, |caps: &regex::Captures| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                match self.vars.get(name) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                }
            })
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envs() -> EnvVars {
        let mut envs = EnvVars::new();
        envs.set("TARGET", "production");
        envs.set("REGION", "eu-west-1");
        envs
    }

    #[test]
    fn test_bare_placeholder() {
        assert_eq!(envs().replace("deploy to $TARGET"), "deploy to production");
    }

    #[test]
    fn test_braced_placeholder() {
        assert_eq!(
            envs().replace("deploy to ${TARGET}-cluster"),
            "deploy to production-cluster"
        );
    }

    #[test]
    fn test_multiple_placeholders() {
        assert_eq!(
            envs().replace("$TARGET in ${REGION}"),
            "production in eu-west-1"
        );
    }

    #[test]
    fn test_undefined_variable_left_literal() {
        assert_eq!(envs().replace("echo $UNDEFINED"), "echo $UNDEFINED");
        assert_eq!(envs().replace("echo ${UNDEFINED}"), "echo ${UNDEFINED}");
    }

    #[test]
    fn test_no_placeholder_passthrough() {
        assert_eq!(envs().replace("plain text, $ alone"), "plain text, $ alone");
    }

    #[test]
    fn test_replace_is_pure() {
        let envs = envs();
        assert_eq!(envs.replace("$TARGET"), envs.replace("$TARGET"));
    }

    #[test]
    fn test_from_process_sees_real_environment() {
        // PATH exists on every platform the test suite runs on.
        let envs = EnvVars::from_process();
        assert!(envs.get("PATH").is_some());
    }
}
