use super::AppContext;
use crate::cli::WizardAction;
use crate::formatting::{self, format_currency, format_percent};
use crate::io;
use crate::storage::ProjectStore;
use crate::wizard::{
    DraftSnapshot, EstimatorSession, StepOutcome, StepPayload, StepStatus, WarningLevel,
};
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

pub fn run_wizard(ctx: &AppContext, draft_path: &Path, action: WizardAction) -> Result<()> {
    let snapshot = DraftSnapshot::load_or_default(draft_path)
        .with_context(|| format!("Failed to load draft {}", draft_path.display()))?;
    let store = ctx.open_store()?;
    let mut session = snapshot
        .into_session(store)?
        .with_thresholds(ctx.config.review());

    match action {
        WizardAction::Status => {}
        WizardAction::Next { payload } => {
            let payload = read_payload(payload.as_deref(), &session)?;
            match session.advance_step(payload) {
                Ok(outcome) => print_outcome(&outcome),
                Err(e) => {
                    if let Some(errors) = e.validation_errors() {
                        for error in errors.iter() {
                            println!("{}", formatting::error(&format!("✗ {}", error)));
                        }
                    }
                    return Err(e).context("Step was not accepted");
                }
            }
        }
        WizardAction::Back => {
            session.retreat_step();
        }
        WizardAction::Jump { step } => {
            session.jump_to(step)?;
        }
        WizardAction::Save => {
            let id = session.save_draft().context("Failed to save project")?;
            println!("Saved project {}", id);
        }
        WizardAction::Reset => {
            session.reset_project();
            println!("Wizard reset");
        }
    }

    DraftSnapshot::of_session(&session)
        .save(draft_path)
        .with_context(|| format!("Failed to save draft {}", draft_path.display()))?;
    print_status(&session);
    Ok(())
}

/// The final review step needs no payload.
fn read_payload<S: ProjectStore>(
    path: Option<&Path>,
    session: &EstimatorSession<S>,
) -> Result<StepPayload> {
    match path {
        Some(path) => io::read_json(path),
        None if session.current_step().is_final() => Ok(StepPayload::FinalReview),
        None => anyhow::bail!(
            "Step {} needs a --payload file",
            session.current_step()
        ),
    }
}

fn print_outcome(outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Advanced { from, warnings, .. } => {
            println!("{}", formatting::success(&format!("✓ Completed {}", from)));
            for warning in warnings {
                let line = format!("  {}", warning.message);
                match warning.level {
                    WarningLevel::Warning => println!("{}", formatting::warning(&line)),
                    WarningLevel::Info => println!("{}", line.cyan()),
                }
            }
        }
        StepOutcome::Completed { project_id } => {
            println!(
                "{}",
                formatting::success(&format!("✓ Project saved as {}", project_id))
            );
        }
    }
}

fn print_status<S: ProjectStore>(session: &EstimatorSession<S>) {
    println!();
    println!(
        "{} ({} complete)",
        formatting::header(session.project().display_name()),
        format_percent(session.cursor().progress())
    );
    for (step, status) in session.step_statuses() {
        let line = match status {
            StepStatus::Completed => format!("  ✓ {}", step).green().to_string(),
            StepStatus::Current => format!("  > {}: {}", step, step.description())
                .bold()
                .to_string(),
            StepStatus::Pending => format!("    {}", step).dimmed().to_string(),
        };
        println!("{}", line);
    }

    let summary = session.estimate_summary();
    if session.project().scope_items.is_empty() {
        return;
    }
    println!();
    println!(
        "  Total {} (+{} contingency), budget usage {}, {} phases",
        format_currency(summary.total_cost),
        format_currency(summary.contingency),
        format_percent(summary.budget_usage),
        session.action_plan().phases().len()
    );
}
