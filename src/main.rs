//! Bountycatch CLI - track bug bounty targets in SQLite

use clap::{ArgGroup, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use bountycatch::config;
use bountycatch::project::Project;
use bountycatch::storage::SqliteStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bountycatch")]
#[command(version)]
#[command(about = "Manage bug bounty targets with SQLite")]
#[command(long_about = r#"
Bountycatch tracks reconnaissance targets: projects (bug bounty programs)
and the subdomains discovered under them.

Example usage:
  bountycatch add-project -p acme
  bountycatch add -p acme -f subdomains.txt
  bountycatch add -p acme -d "x.acme.com,y.acme.com"
  bountycatch search -p acme -q api
"#)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new project (top-level domain)
    AddProject {
        /// The project name
        #[arg(short, long)]
        project: String,
    },

    /// Add subdomains to a project, from a file or a comma-separated list
    #[command(group(ArgGroup::new("source").required(true).args(["file", "domains"])))]
    Add {
        /// The project name
        #[arg(short, long)]
        project: String,

        /// File containing one subdomain per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Comma-separated list of subdomains
        #[arg(short, long)]
        domains: Option<String>,
    },

    /// Print subdomains of a project
    Print {
        /// The project name
        #[arg(short, long)]
        project: String,
    },

    /// Count subdomains of a project
    Count {
        /// The project name
        #[arg(short, long)]
        project: String,
    },

    /// Delete a project and its subdomains
    Delete {
        /// The project name
        #[arg(short, long)]
        project: String,
    },

    /// Search subdomains within a project (full-text, token matching)
    Search {
        /// The project name
        #[arg(short, long)]
        project: String,

        /// Search query for subdomains
        #[arg(short, long)]
        query: String,
    },

    /// Search for projects by name substring
    SearchProjects {
        /// Search query for project names
        #[arg(short, long)]
        query: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        std::process::exit(1);
    };

    let file_config = config::load_config(None)?;
    let db_path = config::resolve_db_path(cli.db, file_config.as_ref());
    config::ensure_db_dir(&db_path)?;
    tracing::debug!(db = %db_path.display(), "opening database");

    let store = SqliteStore::open(&db_path)?;

    match command {
        Commands::AddProject { project } => {
            if store.add_project(&project)? {
                println!("Project '{}' added successfully.", project);
            } else {
                println!("Project '{}' already exists.", project);
            }
        }

        Commands::Add {
            project,
            file,
            domains,
        } => {
            let handle = Project::new(&store, project);
            if let Some(file) = file {
                if !file.exists() {
                    anyhow::bail!("File '{}' does not exist.", file.display());
                }
                let contents = std::fs::read_to_string(&file)?;
                let report = handle.import_lines(contents.lines())?;
                println!("{}", report);
            } else if let Some(domains) = domains {
                match handle.import_list(&domains)? {
                    Some(report) => println!("{}", report),
                    None => println!("No valid subdomains provided."),
                }
            }
        }

        Commands::Print { project } => {
            let handle = Project::new(&store, project);
            let domains = handle.domains()?;
            if domains.is_empty() {
                println!("No subdomains found for project '{}'.", handle.name());
            } else {
                println!("Subdomains for project '{}':", handle.name());
                for domain in domains {
                    println!("{}", domain);
                }
            }
        }

        Commands::Count { project } => {
            let handle = Project::new(&store, project);
            if !handle.exists()? {
                println!("Error: Project '{}' does not exist.", handle.name());
            } else {
                println!(
                    "There are {} subdomains in the project '{}'.",
                    handle.domain_count()?,
                    handle.name()
                );
            }
        }

        Commands::Delete { project } => {
            let handle = Project::new(&store, project);
            if handle.delete()? {
                println!("Project '{}' deleted successfully.", handle.name());
            } else {
                println!("No such project '{}' to delete.", handle.name());
            }
        }

        Commands::Search { project, query } => {
            let handle = Project::new(&store, project);
            let results = handle.search_domains(&query)?;
            if results.is_empty() {
                println!(
                    "No subdomains match the query '{}' in project '{}'.",
                    query,
                    handle.name()
                );
            } else {
                println!(
                    "Search results for '{}' in project '{}':",
                    query,
                    handle.name()
                );
                for domain in results {
                    println!("{}", domain);
                }
            }
        }

        Commands::SearchProjects { query } => {
            // Project search is global, so the handle is not bound to a name
            let handle = Project::new(&store, "");
            let results = handle.search_projects(&query)?;
            if results.is_empty() {
                println!("No projects match the query '{}'.", query);
            } else {
                println!("Search results for projects matching '{}':", query);
                for project in results {
                    println!("{}", project);
                }
            }
        }
    }

    store.close()?;
    Ok(())
}
