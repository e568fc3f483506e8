use super::report::EstimateReport;
use crate::formatting::{self, format_currency, format_days, format_percent};
use crate::priority::Quadrant;
use crate::wizard::WarningLevel;
use colored::*;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_warnings(report)?;
        self.write_matrix(report)?;
        self.write_plan(report)?;
        self.write_dependencies(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Rehab Estimate: {}", report.project_name)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Status: {}", report.status.as_str())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        let review = &report.review;

        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_row("Total Cost", &format_currency(summary.total_cost))?;
        self.write_row("Materials", &format_currency(summary.material_cost))?;
        self.write_row("Labor", &format_currency(summary.labor_cost))?;
        self.write_row("Contingency (10%)", &format_currency(summary.contingency))?;
        self.write_row("Budget Usage", &format_percent(summary.budget_usage))?;
        self.write_row("Budget Risk", review.risk.label())?;
        self.write_row("ROI Impact", &format_percent(summary.roi_impact))?;
        self.write_row("ROI Rating", review.roi.label())?;
        self.write_row(
            "Timeline",
            &format!("{} ({} months)", format_days(review.total_days), review.months),
        )?;
        writeln!(self.writer)?;

        if !summary.category_breakdown.is_empty() {
            writeln!(self.writer, "### Cost by Category")?;
            writeln!(self.writer)?;
            for (category, cost) in &summary.category_breakdown {
                writeln!(self.writer, "- {}: {}", category, format_currency(*cost))?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_row(&mut self, metric: &str, value: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} |")?;
        Ok(())
    }

    fn write_warnings(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        if report.warnings.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Warnings")?;
        writeln!(self.writer)?;
        for warning in &report.warnings {
            let tag = match warning.level {
                WarningLevel::Warning => "**Warning**",
                WarningLevel::Info => "Info",
            };
            writeln!(self.writer, "- {}: {}", tag, warning.message)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_matrix(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        if report.priority_matrix.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Priority Matrix")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Item | Class | ROI | Urgency | Quadrant | Cost |"
        )?;
        writeln!(
            self.writer,
            "|------|-------|-----|---------|----------|------|"
        )?;
        for item in &report.priority_matrix {
            writeln!(
                self.writer,
                "| {} | {} | {:.0} | {} | {} | {} |",
                item.name,
                item.category,
                item.roi_impact,
                item.urgency,
                item.quadrant().label(),
                format_currency(item.cost)
            )?;
        }
        writeln!(self.writer)?;
        for line in &report.recommendations {
            writeln!(self.writer, "- {}", line)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_plan(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        if report.action_plan.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Action Plan")?;
        writeln!(self.writer)?;
        for phase in report.action_plan.phases() {
            let critical = if phase.critical_path { " (critical path)" } else { "" };
            writeln!(
                self.writer,
                "### {}{}: day {} to {}, {}",
                phase.name,
                critical,
                phase.start_day,
                phase.end_day,
                format_currency(phase.cost)
            )?;
            writeln!(self.writer)?;
            for task in &phase.tasks {
                writeln!(
                    self.writer,
                    "- [ ] {} ({}, {})",
                    task.name,
                    format_days(task.duration),
                    format_currency(task.cost)
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_dependencies(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let Some(chain) = &report.dependencies.critical_chain else {
            return Ok(());
        };
        writeln!(self.writer, "## Dependency Chain")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Longest chain: {} ({})",
            chain.items.join(" -> "),
            format_days(chain.total_days)
        )?;
        Ok(())
    }
}

/// Human-oriented output with tables and colour.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        self.print_header(report)?;
        self.print_summary(report)?;
        self.print_warnings(report)?;
        self.print_matrix(report)?;
        self.print_plan(report)?;
        self.print_verdict(report)?;
        Ok(())
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let title = format!("Rehab Estimate: {}", report.project_name);
        writeln!(self.writer, "{}", formatting::header(&title))?;
        writeln!(self.writer, "{}", "=".repeat(title.len()).blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_summary(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        let review = &report.review;

        let usage = format_percent(summary.budget_usage);
        let usage = if review.over_budget {
            usage.red().bold().to_string()
        } else {
            usage
        };

        writeln!(self.writer, "{}", "Summary:".bold())?;
        writeln!(self.writer, "  Total cost:   {}", format_currency(summary.total_cost))?;
        writeln!(
            self.writer,
            "  Materials:    {}  Labor: {}",
            format_currency(summary.material_cost),
            format_currency(summary.labor_cost)
        )?;
        writeln!(self.writer, "  Contingency:  {}", format_currency(summary.contingency))?;
        writeln!(
            self.writer,
            "  Budget usage: {} (risk: {})",
            usage,
            review.risk.label()
        )?;
        if let Some(remaining) = review.budget_remaining {
            writeln!(self.writer, "  Remaining:    {}", format_currency(remaining))?;
        }
        writeln!(
            self.writer,
            "  ROI impact:   {} ({})",
            format_percent(summary.roi_impact),
            review.roi.label()
        )?;
        writeln!(
            self.writer,
            "  Timeline:     {} across {} phases",
            format_days(review.total_days),
            review.phases
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_warnings(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        for warning in &report.warnings {
            let line = match warning.level {
                WarningLevel::Warning => formatting::warning(&format!("! {}", warning.message)),
                WarningLevel::Info => format!("i {}", warning.message).cyan().to_string(),
            };
            writeln!(self.writer, "{}", line)?;
        }
        if !report.warnings.is_empty() {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn print_matrix(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        if report.priority_matrix.is_empty() {
            return Ok(());
        }
        let mut table = new_table(vec!["Item", "Class", "ROI", "Urgency", "Quadrant", "Cost"]);
        for item in &report.priority_matrix {
            let quadrant = item.quadrant();
            let label = match quadrant {
                Quadrant::DoFirst => quadrant.label().red().bold().to_string(),
                Quadrant::Schedule => quadrant.label().yellow().to_string(),
                _ => quadrant.label().to_string(),
            };
            table.add_row(vec![
                item.name.clone(),
                item.category.to_string(),
                format!("{:.0}", item.roi_impact),
                item.urgency.to_string(),
                label,
                format_currency(item.cost),
            ]);
        }
        writeln!(self.writer, "{}", "Priority Matrix:".bold())?;
        writeln!(self.writer, "{table}")?;
        for line in &report.recommendations {
            writeln!(self.writer, "  - {}", line)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_plan(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        if report.action_plan.is_empty() {
            return Ok(());
        }
        let mut table = new_table(vec!["Phase", "Days", "Cost", "Tasks", "Critical"]);
        for phase in report.action_plan.phases() {
            let tasks: Vec<&str> = phase.tasks.iter().map(|t| t.name.as_str()).collect();
            table.add_row(vec![
                phase.name.clone(),
                format!("{}-{}", phase.start_day, phase.end_day),
                format_currency(phase.cost),
                tasks.join(", "),
                if phase.critical_path { "yes" } else { "" }.to_string(),
            ]);
        }
        writeln!(self.writer, "{}", "Action Plan:".bold())?;
        writeln!(self.writer, "{table}")?;
        if let Some(chain) = &report.dependencies.critical_chain {
            writeln!(
                self.writer,
                "  Longest dependency chain: {} ({})",
                chain.items.join(" -> "),
                format_days(chain.total_days)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_verdict(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let (symbol, status) = if report.review.over_budget {
            ("✗".red(), "OVER BUDGET".red().bold())
        } else {
            ("✓".green(), "WITHIN BUDGET".green().bold())
        };
        writeln!(self.writer, "{symbol} {status}")?;
        Ok(())
    }
}

pub fn create_writer<W: Write + 'static>(format: OutputFormat, writer: W) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PriorityTier, Project, ScopeItemDraft};

    fn report() -> EstimateReport {
        let mut roof = ScopeItemDraft::custom("Roof", "Shingles", 6000.0, 4000.0, 4)
            .with_priority(PriorityTier::Must)
            .with_roi(70.0)
            .into_item("roof", "");
        roof.phase = 1;
        let mut paint = ScopeItemDraft::custom("Paint", "Interior Paint", 1500.0, 1500.0, 3)
            .into_item("paint", "");
        paint.phase = 2;
        paint.depends_on = vec!["roof".into()];
        let project = Project {
            project_name: "Cedar".into(),
            max_budget: Some(20_000.0),
            scope_items: vec![roof, paint],
            ..Default::default()
        };
        EstimateReport::build(&project, &Default::default())
    }

    fn render(format: OutputFormat) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        let report = report();
        match format {
            OutputFormat::Json => JsonWriter::new(&mut buf).write_report(&report),
            OutputFormat::Markdown => MarkdownWriter::new(&mut buf).write_report(&report),
            OutputFormat::Terminal => TerminalWriter::new(&mut buf).write_report(&report),
        }
        .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_json_output_parses() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(value["summary"]["total_cost"], 13_000.0);
        assert_eq!(value["action_plan"]["phases"].as_array().unwrap().len(), 2);
        assert_eq!(value["dependencies"]["critical_chain"]["total_days"], 7);
    }

    #[test]
    fn test_markdown_sections() {
        let md = render(OutputFormat::Markdown);
        assert!(md.starts_with("# Rehab Estimate: Cedar"));
        assert!(md.contains("| Total Cost | $13,000 |"));
        assert!(md.contains("### Phase 1 (critical path): day 0 to 4, $10,000"));
        assert!(md.contains("Longest chain: roof -> paint (7 days)"));
    }

    #[test]
    fn test_terminal_output() {
        let out = render(OutputFormat::Terminal);
        assert!(out.contains("Total cost:   $13,000"));
        assert!(out.contains("Shingles"));
        assert!(out.contains("WITHIN BUDGET"));
    }

    #[test]
    fn test_format_names() {
        assert_eq!(
            serde_json::to_string(&OutputFormat::Markdown).unwrap(),
            "\"markdown\""
        );
    }
}
