use clap::{Parser, Subcommand};
use mindcheck_core::{open_store, AssessmentService, CoreConfig, Lexicon, DEFAULT_HISTORY_LIMIT};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mindcheck")]
#[command(about = "Mindcheck stress assessment CLI")]
struct Cli {
    /// Document store location (`memory://`, `file://<dir>` or a directory)
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Store name under the database location
    #[arg(long, env = "DATABASE_NAME", global = true)]
    database_name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a piece of free text (stored if a database is configured)
    Score {
        /// Text to assess, at least 10 characters
        text: String,
    },
    /// List recent stored assessments
    History {
        /// Maximum number of assessments to show
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
    /// Print the keyword lexicon in matching order
    Lexicon,
}

fn build_service(cli: &Cli) -> Result<AssessmentService, Box<dyn std::error::Error>> {
    let cfg = Arc::new(CoreConfig::from_env_values(
        cli.database_url.clone(),
        cli.database_name.clone(),
    )?);

    let store = match open_store(&cfg) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Warning: document store unavailable: {}", e);
            None
        }
    };

    Ok(AssessmentService::new(cfg, store))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Score { text }) => {
            let service = build_service(&cli)?;
            let result = service.assess(text.as_str())?;

            println!("Score: {:.2}", result.score);
            println!("Label: {}", result.label);
            if result.keywords.is_empty() {
                println!("Keywords: (none)");
            } else {
                println!("Keywords: {}", result.keywords.join(", "));
            }
            if let Some(id) = result.id {
                println!("Stored with ID: {}", id);
            }
        }
        Some(Commands::History { limit }) => {
            let service = build_service(&cli)?;
            let history = service.history(*limit);
            if history.is_empty() {
                println!("No assessments found.");
            } else {
                for item in history {
                    println!(
                        "ID: {}, Score: {:.2}, Label: {}, Created: {}",
                        item.id,
                        item.score,
                        item.label,
                        item.created_at.to_rfc3339()
                    );
                }
            }
        }
        Some(Commands::Lexicon) => {
            for entry in Lexicon::standard().entries() {
                println!("{:<12} {}", entry.keyword, entry.weight);
            }
        }
        None => {
            println!("Use 'mindcheck --help' for commands");
        }
    }

    Ok(())
}
