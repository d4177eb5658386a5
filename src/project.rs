//! Project configuration: a named, ordered set of analyses.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::Analysis;
use crate::content::Scope;

/// The settings and configuration for a collected series of content
/// files.
///
/// The order of `analysis` is the execution order an orchestrator must
/// honor: later analyses may read processing state and metadata written
/// by earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub analysis: Vec<Analysis>,
}

impl Project {
    /// Parse a project configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let project: Project = serde_yaml::from_str(&content)?;
        Ok(project)
    }
}

/// Validate a project configuration eagerly.
///
/// Scope strings are normally validated lazily at resolution time; this
/// lets an orchestrator surface misconfiguration before any content is
/// loaded. Checks that every analysis names a plugin and that declared
/// scopes parse.
pub fn validate(project: &Project) -> anyhow::Result<()> {
    for analysis in &project.analysis {
        if analysis.plugin.is_empty() {
            anyhow::bail!("analysis {:?} does not name a plugin", analysis.name);
        }
        if let Some(scope) = analysis.scope.as_deref() {
            if !scope.is_empty() {
                scope.parse::<Scope>().map_err(|e| {
                    anyhow::anyhow!("analysis {:?}: {}", analysis.name, e)
                })?;
            }
        }
    }
    Ok(())
}
