use crate::core::Project;
use crate::formatting;
use crate::io;
use crate::wizard::{validate_project, PropertyDetails};
use anyhow::Result;
use std::path::Path;

/// Print every problem with the project file; errors make the command fail.
pub fn validate_file(project_path: &Path) -> Result<()> {
    let project: Project = io::read_json(project_path)?;

    if let Some(details) = PropertyDetails::from_project(&project) {
        for warning in details.warnings() {
            println!("{}", formatting::warning(&format!("! {}", warning.message)));
        }
    }

    match validate_project(&project) {
        Ok(()) => {
            println!("{}", formatting::success("✓ Project is valid"));
            Ok(())
        }
        Err(errors) => {
            for error in errors.iter() {
                println!("{}", formatting::error(&format!("✗ {}", error)));
            }
            anyhow::bail!(
                "{} has {} validation error(s)",
                project_path.display(),
                errors.len()
            )
        }
    }
}
