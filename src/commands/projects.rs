use super::estimate::write_report;
use super::AppContext;
use crate::cli::ProjectsAction;
use crate::core::Project;
use crate::estimate::{calculate_estimate, portfolio_stats};
use crate::formatting::format_currency;
use crate::io::{self, EstimateReport};
use crate::storage::{ProjectRecord, ProjectStore};
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use std::path::Path;

pub fn run_projects(ctx: &AppContext, action: ProjectsAction) -> Result<()> {
    let mut store = ctx.open_store()?;
    match action {
        ProjectsAction::List => list_projects(&store),
        ProjectsAction::Show { id, format } => {
            let project = store
                .get_project(&id)
                .with_context(|| format!("Failed to load project {}", id))?
                .into_project();
            let report = EstimateReport::build(&project, &ctx.config.review());
            write_report(&report, ctx.output_format(format), None)
        }
        ProjectsAction::Import { file } => {
            let id = import_project(&mut store, &file)?;
            println!("Imported project {}", id);
            Ok(())
        }
        ProjectsAction::Delete { id } => {
            store
                .delete_project(&id)
                .with_context(|| format!("Failed to delete project {}", id))?;
            println!("Deleted project {}", id);
            Ok(())
        }
        ProjectsAction::Stats => {
            let projects = load_all(&store)?;
            let stats = portfolio_stats(&projects);
            println!("Projects:        {}", stats.total_projects);
            println!("  Draft:         {}", stats.draft_projects);
            println!("  Active:        {}", stats.active_projects);
            println!("  Completed:     {}", stats.completed_projects);
            println!("Total budget:    {}", format_currency(stats.total_budget));
            println!(
                "Estimated cost:  {}",
                format_currency(stats.total_estimated_cost)
            );
            Ok(())
        }
    }
}

/// Store a project file and return the id it was saved under.
pub fn import_project<S: ProjectStore + ?Sized>(store: &mut S, file: &Path) -> Result<String> {
    let project: Project = io::read_json(file)?;
    let saved = store
        .upsert_project(ProjectRecord::from_project(&project, Vec::new()))
        .context("Failed to store project")?;
    Ok(saved.id)
}

fn load_all<S: ProjectStore + ?Sized>(store: &S) -> Result<Vec<Project>> {
    Ok(store
        .list_projects()
        .context("Failed to list projects")?
        .into_iter()
        .map(ProjectRecord::into_project)
        .collect())
}

fn list_projects<S: ProjectStore + ?Sized>(store: &S) -> Result<()> {
    let projects = load_all(store)?;
    if projects.is_empty() {
        println!("No projects stored yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Name", "Status", "Budget", "Estimate", "Updated"]);
    for project in &projects {
        let estimate = calculate_estimate(&project.scope_items, project.max_budget);
        table.add_row(vec![
            project.id.clone(),
            project.display_name().to_string(),
            project.status.as_str().to_string(),
            project
                .max_budget
                .map(format_currency)
                .unwrap_or_else(|| "-".to_string()),
            format_currency(estimate.total_cost),
            project
                .updated_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        ]);
    }
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    #[test]
    fn test_import_assigns_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        io::write_file(&path, r#"{"project_name":"Oak","max_budget":50000}"#).unwrap();

        let mut store = MemoryStore::new();
        let id = import_project(&mut store, &path).unwrap();
        let stored = store.get_project(&id).unwrap();
        assert_eq!(stored.project_name, "Oak");
        assert_eq!(load_all(&store).unwrap().len(), 1);
    }
}
