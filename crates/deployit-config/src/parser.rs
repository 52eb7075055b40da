//! Pipeline configuration assembly.
//!
//! Turns a parsed YAML document into [`Resources`]: the main pipeline, the
//! cleanup pipeline, the messenger and the service. Stage records nest via
//! `run_after`, so stage assembly recurses; a failure anywhere aborts the
//! whole assembly and no partial result escapes.

use deployit_core::{
    Messenger, Pipeline, Registry, Resources, Service, Stage, messenger, service, stage,
};
use serde_yaml::{Mapping, Value};
use tracing::{debug, info, warn};

use crate::envs::EnvVars;
use crate::error::{ConfigError, ConfigResult};
use crate::mapper;

/// Key pair where an old spelling still works but warns on use.
struct KeyAlias {
    primary: &'static str,
    deprecated: &'static str,
}

const STAGE_TYPE_KEYS: KeyAlias = KeyAlias {
    primary: "type",
    deprecated: "stage_type",
};

const STAGE_NAME_KEYS: KeyAlias = KeyAlias {
    primary: "name",
    deprecated: "stage_name",
};

/// Assembles configuration documents into [`Resources`].
///
/// Owns the type registries and the environment snapshot, so every document
/// assembled through one `Assembler` resolves types and placeholders the
/// same way.
pub struct Assembler {
    stages: Registry<Stage>,
    services: Registry<Service>,
    messengers: Registry<Messenger>,
    envs: EnvVars,
}

impl Assembler {
    /// Creates an assembler with the default registries and a snapshot of
    /// the process environment.
    pub fn new() -> Self {
        Self::with_envs(EnvVars::from_process())
    }

    /// Creates an assembler with the default registries and the given
    /// environment snapshot.
    pub fn with_envs(envs: EnvVars) -> Self {
        Self {
            stages: stage::registry(),
            services: service::registry(),
            messengers: messenger::registry(),
            envs,
        }
    }

    /// Assembles a whole document.
    ///
    /// The document must be a mapping with a `pipeline` sequence; `service`,
    /// `messenger` and `cleanup` blocks are optional and fall back to the
    /// local service, the fake messenger and an empty cleanup pipeline.
    pub fn assemble(&self, doc: &Value) -> ConfigResult<Resources> {
        let root = doc.as_mapping().ok_or_else(|| {
            ConfigError::MalformedRecord("top-level document must be a mapping".to_string())
        })?;

        let service = match lookup(root, "service").and_then(Value::as_mapping) {
            Some(block) => {
                info!("found \"service\" block");
                self.map_service(block)?
            }
            None => {
                debug!("no \"service\" block, defaulting to local");
                self.services.create("local")?
            }
        };

        let messenger = match lookup(root, "messenger").and_then(Value::as_mapping) {
            Some(block) => {
                info!("found \"messenger\" block");
                self.map_messenger(block)?
            }
            None => {
                debug!("no \"messenger\" block, defaulting to fake");
                self.messengers.create("fake")?
            }
        };

        let cleanup = match lookup(root, "cleanup") {
            Some(block) => {
                info!("found \"cleanup\" block");
                let records = block.as_sequence().ok_or_else(|| {
                    ConfigError::MalformedRecord(
                        "\"cleanup\" must be a sequence of stage records".to_string(),
                    )
                })?;
                self.build_pipeline(records)?
            }
            None => Pipeline::new(),
        };

        let pipeline = match lookup(root, "pipeline").and_then(Value::as_sequence) {
            Some(records) => self.build_pipeline(records)?,
            None => return Err(ConfigError::MissingPipeline),
        };

        Ok(Resources {
            pipeline,
            cleanup,
            messenger,
            service,
        })
    }

    fn map_service(&self, block: &Mapping) -> ConfigResult<Service> {
        let kind = lookup(block, "type")
            .and_then(Value::as_str)
            .ok_or_else(|| ConfigError::MissingField("service type".to_string()))?;
        info!(service_type = kind, "configuring service");

        let mut service = self.services.create(kind)?;
        mapper::apply_fields(&mut service, block, &self.envs);
        Ok(service)
    }

    fn map_messenger(&self, block: &Mapping) -> ConfigResult<Messenger> {
        let kind = lookup(block, "type")
            .and_then(Value::as_str)
            .ok_or_else(|| ConfigError::MissingField("messenger type".to_string()))?;
        info!(messenger_type = kind, "configuring messenger");

        let mut messenger = self.messengers.create(kind)?;
        mapper::apply_fields(&mut messenger, block, &self.envs);
        Ok(messenger)
    }

    fn build_pipeline(&self, records: &[Value]) -> ConfigResult<Pipeline> {
        let mut pipeline = Pipeline::new();
        for record in records {
            let record = record.as_mapping().ok_or_else(|| {
                ConfigError::MalformedRecord("stage record must be a mapping".to_string())
            })?;
            pipeline.add_stage(self.build_stage(record)?);
        }
        Ok(pipeline)
    }

    /// Builds one stage and, recursively, everything under its `run_after`
    /// sequence. Returns the fully populated stage or the first error; a
    /// failed child build discards the whole subtree.
    pub fn build_stage(&self, record: &Mapping) -> ConfigResult<Stage> {
        let kind = aliased_str(record, &STAGE_TYPE_KEYS).unwrap_or("command");
        let mut stage = self.stages.create(kind)?;

        if let Some(name) = aliased_str(record, &STAGE_NAME_KEYS) {
            stage.name = name.to_string();
        }

        if lookup(record, "report_full_output").is_some_and(|v| !v.is_null()) {
            stage.opts.report_full_output = true;
        }

        mapper::apply_fields(&mut stage, record, &self.envs);

        if let Some(run_after) = lookup(record, "run_after").filter(|v| !v.is_null()) {
            let children = run_after.as_sequence().ok_or_else(|| {
                ConfigError::MalformedRecord(
                    "\"run_after\" must be a sequence of stage records".to_string(),
                )
            })?;
            for child in children {
                let child = child.as_mapping().ok_or_else(|| {
                    ConfigError::MalformedRecord("stage record must be a mapping".to_string())
                })?;
                stage.add_child(self.build_stage(child)?);
            }
        }

        Ok(stage)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds a key in a mapping by exact string match.
fn lookup<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

/// Resolves a value under its primary key, falling back to the deprecated
/// spelling with a warning naming both keys.
fn aliased_str<'a>(map: &'a Mapping, alias: &KeyAlias) -> Option<&'a str> {
    if let Some(value) = lookup(map, alias.primary).and_then(Value::as_str) {
        return Some(value);
    }
    let value = lookup(map, alias.deprecated).and_then(Value::as_str)?;
    warn!(
        "property \"{}\" is deprecated, use \"{}\" instead",
        alias.deprecated, alias.primary
    );
    Some(value)
}
