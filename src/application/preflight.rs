//! Tool preflight
//!
//! Every required executable is looked up before anything is written, and
//! all missing ones are reported together.

use std::path::PathBuf;

use crate::domain::ports::ToolLocator;
use crate::domain::value_objects::Tool;
use crate::error::{HatchError, HatchResult};

use super::project::Project;

/// Lookup result for one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub tool: Tool,
    pub program: String,
    pub path: Option<PathBuf>,
}

impl ToolStatus {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Look up every tool; never fails.
pub fn tool_report<TL: ToolLocator>(project: &Project, locator: &TL) -> Vec<ToolStatus> {
    Tool::ALL
        .iter()
        .map(|tool| {
            let program = project.program(*tool).to_string();
            let path = locator.locate(&program);
            ToolStatus {
                tool: *tool,
                program,
                path,
            }
        })
        .collect()
}

/// Fail with `ToolMissing` naming every tool that cannot be found.
pub fn require_tools<TL: ToolLocator>(project: &Project, locator: &TL) -> HatchResult<Vec<ToolStatus>> {
    let report = tool_report(project, locator);
    let missing: Vec<Tool> = report
        .iter()
        .filter(|status| !status.found())
        .map(|status| status.tool)
        .collect();

    if missing.is_empty() {
        Ok(report)
    } else {
        Err(HatchError::ToolMissing { tools: missing })
    }
}
