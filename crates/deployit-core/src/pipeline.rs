//! Pipeline and resource aggregates.

use serde::{Deserialize, Serialize};

use crate::messenger::Messenger;
use crate::service::Service;
use crate::stage::Stage;

/// An ordered sequence of root stages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pipeline {
    /// Root stages, in configuration order.
    pub stages: Vec<Stage>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a root stage, preserving insertion order.
    pub fn add_stage(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// Number of root stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline holds no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Everything one configuration parse produces: the main pipeline, the
/// cleanup pipeline run afterwards, and the messenger and service the run
/// reports to and runs against. Handed to the executor as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resources {
    /// The main pipeline.
    pub pipeline: Pipeline,
    /// Stages run after the main pipeline, regardless of its outcome.
    pub cleanup: Pipeline,
    /// Where results are reported.
    pub messenger: Messenger,
    /// Where the pipeline runs.
    pub service: Service,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.len(), 0);
    }

    #[test]
    fn test_add_stage_preserves_order() {
        let mut pipeline = Pipeline::new();
        for name in ["build", "test", "deploy"] {
            let mut s = stage::registry().create("command").unwrap();
            s.name = name.to_string();
            pipeline.add_stage(s);
        }

        assert_eq!(pipeline.len(), 3);
        let names: Vec<&str> = pipeline.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["build", "test", "deploy"]);
    }
}
