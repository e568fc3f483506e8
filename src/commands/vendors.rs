use super::AppContext;
use crate::cli::VendorsAction;
use crate::core::Vendor;
use crate::storage::VendorStore;
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

pub fn run_vendors(ctx: &AppContext, action: VendorsAction) -> Result<()> {
    let mut store = ctx.open_store()?;
    match action {
        VendorsAction::List => {
            let vendors = store.list_vendors().context("Failed to list vendors")?;
            if vendors.is_empty() {
                println!("No vendors stored yet.");
                return Ok(());
            }
            println!("{}", vendor_table(&vendors));
            Ok(())
        }
        VendorsAction::Add {
            company,
            contact,
            email,
            phone,
            specialties,
            notes,
        } => {
            let vendor = Vendor {
                contact_name: contact,
                email,
                phone,
                specialties,
                notes,
                ..Vendor::new(company)
            };
            vendor.validate()?;
            let saved = store.upsert_vendor(vendor).context("Failed to save vendor")?;
            println!("Added vendor {} ({})", saved.company_name, saved.id);
            Ok(())
        }
        VendorsAction::Remove { id } => {
            store
                .delete_vendor(&id)
                .with_context(|| format!("Failed to remove vendor {}", id))?;
            println!("Removed vendor {}", id);
            Ok(())
        }
    }
}

fn vendor_table(vendors: &[Vendor]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Company", "Contact", "Email", "Phone", "Specialties"]);
    for vendor in vendors {
        table.add_row(vec![
            vendor.id.clone(),
            vendor.company_name.clone(),
            vendor.contact_name.clone().unwrap_or_default(),
            vendor.email.clone().unwrap_or_default(),
            vendor.phone.clone().unwrap_or_default(),
            vendor.specialties.join(", "),
        ]);
    }
    table
}
