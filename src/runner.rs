//! Runs a project's configured analyses against one content file.

use std::collections::HashMap;

use anyhow::Context;

use crate::analysis::{AnalysisArguments, AnalysisOutput, AnalysisPlugin};
use crate::content::Content;
use crate::project::Project;

/// Executes every analysis a project declares, in declaration order,
/// against a single content file.
///
/// Declaration order is an observable contract: later analyses may read
/// processing state and metadata written by earlier ones. Each plugin
/// invocation is bracketed by exactly one `write_start`/`write_end` pair
/// on the sink; the closing bracket is written even when the plugin
/// fails, and the failure then propagates.
#[derive(Default)]
pub struct Runner {
    plugins: HashMap<String, Box<dyn AnalysisPlugin>>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under the identifier analyses name it by.
    pub fn with_plugin(mut self, id: &str, plugin: Box<dyn AnalysisPlugin>) -> Self {
        self.plugins.insert(id.to_string(), plugin);
        self
    }

    /// Look up a registered plugin by identifier.
    pub fn plugin(&self, id: &str) -> Option<&dyn AnalysisPlugin> {
        self.plugins.get(id).map(|p| p.as_ref())
    }

    /// Run all of the project's analyses against `content`.
    pub fn run(
        &self,
        content: &mut Content,
        project: &Project,
        output: &mut dyn AnalysisOutput,
    ) -> anyhow::Result<()> {
        for analysis in &project.analysis {
            let plugin = self.plugins.get(&analysis.plugin).ok_or_else(|| {
                anyhow::anyhow!("no plugin registered for {:?}", analysis.plugin)
            })?;

            output.write_start();
            let run = plugin.process(AnalysisArguments {
                content: &mut *content,
                analysis,
                output: &mut *output,
            });
            output.write_end();
            run.with_context(|| {
                format!(
                    "analysis {:?} (plugin {:?}) failed",
                    analysis.name, analysis.plugin
                )
            })?;
        }
        Ok(())
    }
}
