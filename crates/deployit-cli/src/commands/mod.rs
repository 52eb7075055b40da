//! CLI command implementations.

use anyhow::Result;
use deployit_core::{Resources, Stage};
use serde::Serialize;

pub fn validate(path: &str) -> Result<()> {
    match deployit_config::parse_file(path) {
        Ok(_resources) => {
            println!("Configuration is valid");
            Ok(())
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

pub fn inspect(path: &str, json: bool) -> Result<()> {
    let resources = match deployit_config::parse_file(path) {
        Ok(resources) => resources,
        Err(e) => {
            println!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let summary = Summary::from_resources(&resources);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.render());
    }
    Ok(())
}

/// What `inspect` shows about an assembled configuration.
#[derive(Serialize)]
struct Summary {
    service: &'static str,
    messenger: &'static str,
    pipeline: Vec<StageSummary>,
    cleanup: Vec<StageSummary>,
}

#[derive(Serialize)]
struct StageSummary {
    name: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<StageSummary>,
}

impl Summary {
    fn from_resources(resources: &Resources) -> Self {
        Self {
            service: resources.service.kind(),
            messenger: resources.messenger.kind(),
            pipeline: resources
                .pipeline
                .stages
                .iter()
                .map(StageSummary::from_stage)
                .collect(),
            cleanup: resources
                .cleanup
                .stages
                .iter()
                .map(StageSummary::from_stage)
                .collect(),
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("service: {}\n", self.service));
        out.push_str(&format!("messenger: {}\n", self.messenger));
        out.push_str("pipeline:\n");
        for stage in &self.pipeline {
            render_stage(stage, 1, &mut out);
        }
        if self.cleanup.is_empty() {
            out.push_str("cleanup: (empty)\n");
        } else {
            out.push_str("cleanup:\n");
            for stage in &self.cleanup {
                render_stage(stage, 1, &mut out);
            }
        }
        out
    }
}

impl StageSummary {
    fn from_stage(stage: &Stage) -> Self {
        Self {
            name: stage.name.clone(),
            kind: stage.kind(),
            children: stage.children.iter().map(Self::from_stage).collect(),
        }
    }
}

fn render_stage(stage: &StageSummary, depth: usize, out: &mut String) {
    let label = if stage.name.is_empty() {
        "(unnamed)"
    } else {
        stage.name.as_str()
    };
    out.push_str(&format!("{}- {} ({})\n", "  ".repeat(depth), label, stage.kind));
    for child in &stage.children {
        render_stage(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(yaml: &str) -> Summary {
        let resources = deployit_config::parse_str(yaml).unwrap();
        Summary::from_resources(&resources)
    }

    #[test]
    fn test_render_tree() {
        let summary = summary(
            "pipeline:\n  \
             - name: build\n    \
               run_after:\n      \
                 - name: test\n",
        );

        assert_eq!(
            summary.render(),
            "service: local\n\
             messenger: fake\n\
             pipeline:\n  \
             - build (command)\n    \
             - test (command)\n\
             cleanup: (empty)\n"
        );
    }

    #[test]
    fn test_render_unnamed_stage() {
        let summary = summary("pipeline:\n  - command: make\n");
        assert!(summary.render().contains("- (unnamed) (command)"));
    }

    #[test]
    fn test_json_summary_shape() {
        let summary = summary("pipeline:\n  - name: build\n");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["service"], "local");
        assert_eq!(json["messenger"], "fake");
        assert_eq!(json["pipeline"][0]["name"], "build");
        assert_eq!(json["pipeline"][0]["kind"], "command");
    }
}
