use super::AppContext;
use crate::core::Project;
use crate::io::{self, create_writer, EstimateReport, OutputFormat};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn estimate_project(
    ctx: &AppContext,
    project_path: &Path,
    format: Option<OutputFormat>,
    output: Option<&Path>,
) -> Result<()> {
    let project: Project = io::read_json(project_path)?;
    tracing::info!(
        items = project.scope_items.len(),
        "Estimating {}",
        project.display_name()
    );
    let report = EstimateReport::build(&project, &ctx.config.review());
    write_report(&report, ctx.output_format(format), output)
}

/// Write `report` to `output`, or stdout when none is given.
pub fn write_report(report: &EstimateReport, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            create_writer(format, BufWriter::new(file)).write_report(report)?;
            println!("Wrote report to {}", path.display());
        }
        None => create_writer(format, std::io::stdout()).write_report(report)?,
    }
    Ok(())
}
