use crate::catalog::{Catalog, CatalogCategory};
use crate::formatting::{self, format_currency, format_days};
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

pub fn show_catalog(category: Option<&str>) -> Result<()> {
    let catalog = Catalog::standard();
    let categories: Vec<&CatalogCategory> = match category {
        Some(name) => vec![catalog
            .category(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown catalog category '{}'", name))?],
        None => catalog.categories().iter().collect(),
    };

    for category in categories {
        println!("{}", formatting::header(&category.name));
        println!("{}", catalog_table(category));
        println!();
    }
    Ok(())
}

fn catalog_table(category: &CatalogCategory) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Item", "Class", "Materials", "Labor", "Total", "Days", "ROI"]);
    for entry in &category.entries {
        table.add_row(vec![
            entry.name.clone(),
            entry.class.to_string(),
            format_currency(entry.material_cost),
            format_currency(entry.labor_cost),
            format_currency(entry.total_cost()),
            format_days(entry.days),
            format!("{:.0}%", entry.roi_impact),
        ]);
    }
    table
}
