//! Service targets.
//!
//! A service is the environment a pipeline runs against. The configuration
//! selects one by type name; its fields are then populated by the generic
//! field mapper.

use serde::{Deserialize, Serialize};

use crate::fields::{ConfigField, Configurable};
use crate::registry::Registry;

/// Target environment a pipeline runs against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Service {
    /// The local host. Default when no service block is configured.
    Local(LocalService),
    /// A GitHub repository whose commits drive the pipeline.
    GitHub(GitHubService),
}

impl Service {
    /// The service's type name, as used in configuration documents.
    pub fn kind(&self) -> &'static str {
        match self {
            Service::Local(_) => "local",
            Service::GitHub(_) => "github",
        }
    }
}

impl Configurable for Service {
    fn config_fields(&mut self) -> Vec<ConfigField<'_>> {
        match self {
            Service::Local(_) => Vec::new(),
            Service::GitHub(service) => service.config_fields(),
        }
    }
}

/// The local host. Carries no configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LocalService;

/// A GitHub repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubService {
    /// API token used to report statuses.
    pub token: String,
    /// Repository name ("owner/repo").
    pub repo: String,
    /// Account the repository belongs to.
    pub from: String,
}

impl Configurable for GitHubService {
    fn config_fields(&mut self) -> Vec<ConfigField<'_>> {
        vec![
            ConfigField::substituted("token", &mut self.token),
            ConfigField::plain("repo", &mut self.repo),
            ConfigField::plain("from", &mut self.from),
        ]
    }
}

/// The default service registry: `local` and `github`.
pub fn registry() -> Registry<Service> {
    let mut registry = Registry::new("service");
    registry.register("local", || Service::Local(LocalService));
    registry.register("github", || Service::GitHub(GitHubService::default()));
    registry
}
