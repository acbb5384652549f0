use anyhow::Result;
use clap::Parser;
use log::{debug, LevelFilter};

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands::{self, Context};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let ctx = Context::from_env(cli.vault.clone(), cli.quiet);
    let outcome = match cli.command {
        Commands::Open(args) => commands::open_command(&ctx, args),
        Commands::Daily => commands::daily_command(&ctx),
        Commands::Search(args) => commands::search_command(&ctx, args),
        Commands::SearchContent(args) => commands::search_content_command(&ctx, args),
        Commands::List(args) => commands::list_command(&ctx, args),
        Commands::Print(args) => commands::print_command(&ctx, args),
        Commands::Create(args) => commands::create_command(&ctx, args),
        Commands::Append(args) => commands::append_command(&ctx, args),
        Commands::Edit(args) => commands::edit_command(&ctx, args),
        Commands::Frontmatter(args) => commands::frontmatter_command(&ctx, args),
        Commands::SetDefault(args) => commands::set_default_command(&ctx, args),
        Commands::PrintDefault(args) => commands::print_default_command(&ctx, args),
        Commands::SetDailyPattern(args) => commands::set_daily_pattern_command(&ctx, args),
    };

    if let Err(e) = outcome {
        let severity = e.severity();
        debug!("Command failed with {} severity", severity);
        eprintln!("Error: {}", e);
        std::process::exit(severity.exit_code());
    }
    Ok(())
}

/// `--verbose` shows debug output, `--quiet` only errors; otherwise `RUST_LOG`
/// decides, defaulting to warnings
fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if quiet {
        builder.filter_level(LevelFilter::Error);
    }
    builder.format_timestamp(None).init();
}
