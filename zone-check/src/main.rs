//! Point d'entrée CLI pour zone-check

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Valider les limites de zones de collecte dessinées à la main
#[derive(Parser)]
#[command(name = "zone-check")]
#[command(author, version)]
#[command(about = "Valider les limites de zones de collecte (GeoJSON) avant enregistrement")]
#[command(long_about = "Contrôle les limites de zones dessinées à la main : auto-intersection, surface, nombre de sommets, compacité, confinement dans la zone d'exploitation.\n\nLes seuils viennent d'un preset (struga, strict), d'un fichier JSON ou des variables ZONE_*.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Validate {
            path,
            rules,
            report,
            json,
        } => {
            info!(path = %path.display(), rules = %rules, "Validating zone boundaries");
            let all_valid = cli::cmd_validate(&path, &rules, report.as_deref(), json)?;
            if !all_valid {
                std::process::exit(1);
            }
        }
        Commands::Metrics { path } => {
            info!(path = %path.display(), "Computing zone metrics");
            cli::cmd_metrics(&path)?;
        }
        Commands::Export {
            path,
            output,
            srid,
            rules,
        } => {
            info!(path = %path.display(), output = %output.display(), srid = srid, "Exporting valid zones");
            cli::cmd_export(&path, &output, srid, &rules)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
