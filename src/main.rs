use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quran_tools::app::AppContext;
use quran_tools::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Chapters => commands::list_chapters(&ctx).await,
        Commands::Earab {
            chapter,
            verse,
            open,
        } => commands::show_earab(&ctx, chapter, verse, open).await,
        Commands::Translate { chapter, verse } => {
            commands::show_translation(&ctx, chapter, verse).await
        }
        Commands::Sarf { word } => commands::show_sarf(&ctx, &word).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
