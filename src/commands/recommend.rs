use crate::catalog::smart_recommendations;
use crate::core::Project;
use crate::formatting::{format_currency, format_days};
use crate::io;
use anyhow::Result;
use std::path::Path;

pub fn recommend(project_path: &Path) -> Result<()> {
    let project: Project = io::read_json(project_path)?;
    let recommendations = smart_recommendations(&project);

    if recommendations.is_empty() {
        println!("No recommendations for {}.", project.display_name());
        return Ok(());
    }

    println!("Recommended for {}:", project.display_name());
    for draft in &recommendations {
        println!(
            "  - {} [{}] {} over {}, ROI {:.0}%: {}",
            draft.name,
            draft.category,
            format_currency(draft.material_cost + draft.labor_cost),
            format_days(draft.days),
            draft.roi_impact,
            draft.description
        );
    }
    Ok(())
}
