//! Generic field mapping.
//!
//! Copies values from a configuration mapping into any [`Configurable`]
//! target, driven entirely by the target's declared field descriptors. Only
//! string values are handled; a declared key with a null value warns and
//! leaves the field at its current value. Keys the target does not declare
//! are ignored, so unknown keys never fail a parse.

use deployit_core::Configurable;
use serde_yaml::Mapping;
use tracing::{debug, warn};

use crate::envs::EnvVars;

/// Populates `target`'s declared fields from `record`.
pub fn apply_fields(target: &mut dyn Configurable, record: &Mapping, envs: &EnvVars) {
    for field in target.config_fields() {
        for (key, value) in record {
            if key.as_str() != Some(field.key) {
                continue;
            }
            if value.is_null() {
                warn!("config value for \"{}\" is not specified", field.key);
            } else if let Some(text) = value.as_str() {
                *field.slot = if field.substitute {
                    envs.replace(text)
                } else {
                    text.to_string()
                };
            } else {
                debug!("config value for \"{}\" is not a string, skipped", field.key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deployit_core::stage::CommandParams;
    use serde_yaml::Value;

    fn record(yaml: &str) -> Mapping {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        value.as_mapping().unwrap().clone()
    }

    fn envs() -> EnvVars {
        let mut envs = EnvVars::new();
        envs.set("RELEASE", "v1.2.3");
        envs
    }

    #[test]
    fn test_fields_copied_by_key() {
        let mut params = CommandParams::default();
        apply_fields(
            &mut params,
            &record("command: make\ndirectory: /src"),
            &envs(),
        );
        assert_eq!(params.command, "make");
        assert_eq!(params.directory, "/src");
        assert_eq!(params.only_if, "");
    }

    #[test]
    fn test_substitution_only_where_flagged() {
        let mut params = CommandParams::default();
        apply_fields(
            &mut params,
            &record("command: deploy $RELEASE\ndirectory: /builds/$RELEASE"),
            &envs(),
        );
        // "command" substitutes, "directory" does not.
        assert_eq!(params.command, "deploy v1.2.3");
        assert_eq!(params.directory, "/builds/$RELEASE");
    }

    #[test]
    fn test_null_value_leaves_default() {
        let mut params = CommandParams::default();
        apply_fields(&mut params, &record("command: ~\ndirectory: /src"), &envs());
        assert_eq!(params.command, "");
        assert_eq!(params.directory, "/src");
    }

    #[test]
    fn test_non_string_value_skipped() {
        let mut params = CommandParams::default();
        apply_fields(&mut params, &record("command: 42"), &envs());
        assert_eq!(params.command, "");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut params = CommandParams::default();
        apply_fields(
            &mut params,
            &record("command: make\nfuture_option: whatever"),
            &envs(),
        );
        assert_eq!(params.command, "make");
    }

    #[test]
    fn test_double_apply_is_idempotent() {
        let mut params = CommandParams::default();
        let record = record("command: deploy $RELEASE");
        let envs = envs();

        apply_fields(&mut params, &record, &envs);
        let first = params.command.clone();
        apply_fields(&mut params, &record, &envs);
        assert_eq!(params.command, first);
    }
}
