use anyhow::Result;
use clap::Parser;
use rehab_estimator::cli::{Cli, Commands};
use rehab_estimator::commands::{self, AppContext};
use rehab_estimator::formatting::FormattingConfig;
use rehab_estimator::observability::{init_tracing, install_panic_hook};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();

    let ctx = AppContext::load(cli.config.as_deref())?;
    let plain = cli.plain || ctx.plain();
    init_tracing(cli.verbosity, plain);
    FormattingConfig::resolve(plain).apply();

    match cli.command {
        Commands::Init { force } => commands::init_config(force),
        Commands::Catalog { category } => commands::show_catalog(category.as_deref()),
        Commands::Estimate {
            project,
            format,
            output,
        } => commands::estimate_project(&ctx, &project, format, output.as_deref()),
        Commands::Recommend { project } => commands::recommend(&project),
        Commands::Validate { project } => commands::validate_file(&project),
        Commands::Wizard { draft, action } => {
            commands::wizard::run_wizard(&ctx, &draft, action)
        }
        Commands::Projects { action } => commands::projects::run_projects(&ctx, action),
        Commands::Vendors { action } => commands::vendors::run_vendors(&ctx, action),
    }
}
