//! Custom panic hook for structured crash reports.
//!
//! The report names the wizard step, operation and project that were active
//! so a crash can be reproduced from the user's draft.

use super::context::{get_current_context, SessionContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str =
    "════════════════════════════════════════════════════════════════════════════════";

/// Install the custom panic hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    eprintln!();
    eprintln!("{}", render_report(info, &context));
    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("Run with RUST_BACKTRACE=1 for stack trace");
    }
}

fn render_report(info: &PanicHookInfo<'_>, context: &SessionContext) -> String {
    let location = info
        .location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
    render_lines(&extract_panic_message(info), location.as_deref(), context).join("\n")
}

fn render_lines(message: &str, location: Option<&str>, context: &SessionContext) -> Vec<String> {
    let mut lines = vec![
        RULE.to_string(),
        format!("REHAB ESTIMATOR CRASH REPORT (v{})", VERSION),
        format!(
            "Platform: {}  Time: {}",
            std::env::consts::OS,
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ),
        RULE.to_string(),
        format!("PANIC: {}", truncate(message, 200)),
    ];
    if let Some(location) = location {
        lines.push(format!("Location: {}", location));
    }

    lines.push("Context:".to_string());
    match context.step {
        Some(step) => lines.push(format!("  Step: {} ({})", step.number(), step.name())),
        None => lines.push("  Step: (not set - crash occurred outside the wizard)".to_string()),
    }
    if let Some(operation) = context.operation {
        lines.push(format!("  Operation: {}", operation));
    }
    if let Some(metadata) = Span::current().metadata() {
        lines.push(format!("  Span: {}", metadata.name()));
    }
    if let Some(ref project) = context.project_id {
        lines.push(format!("  Project: {}", project));
    }
    lines.push(RULE.to_string());
    lines
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardStep;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_report_names_step_and_project() {
        let context = SessionContext {
            step: Some(WizardStep::FinalReview),
            operation: Some("save_project"),
            project_id: Some("p1".into()),
        };
        let report = render_lines("boom", Some("src/lib.rs:1:1"), &context).join("\n");
        assert!(report.contains("PANIC: boom"));
        assert!(report.contains("Step: 7 (Final Review)"));
        assert!(report.contains("Operation: save_project"));
        assert!(report.contains("Project: p1"));
    }

    #[test]
    fn test_report_without_context() {
        let report = render_lines("boom", None, &SessionContext::new()).join("\n");
        assert!(report.contains("outside the wizard"));
        assert!(!report.contains("Location:"));
    }
}
