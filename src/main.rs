use clap::{Parser, Subcommand};
use colored::Colorize;
use myvcs::areas::repository::Repository;
use myvcs::commands::porcelain::log::LogOptions;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "myvcs",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal local version-control system",
    long_about = "Snapshots files into content-addressed commits, stages them through an index \
    and tracks history on named branches. Everything lives in a .myvcs directory at the root \
    of the working tree.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short = 'C',
        global = true,
        value_name = "DIR",
        help = "Run as if started in <DIR>"
    )]
    directory: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command records the current content hash of the given files in the staging index. \
        Directories are expanded to every non-hidden file below them."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "The files to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit from the staged files, reading their content from the working tree."
    )]
    Commit {
        #[arg(short, long, required_unless_present = "text", help = "The commit message")]
        message: Option<String>,
        #[arg(index = 1, conflicts_with = "message", help = "The commit message")]
        text: Option<String>,
    },
    #[command(
        name = "log",
        about = "Show commit history",
        long_about = "This command lists the commits of a branch from its tip back to the root commit."
    )]
    Log {
        #[arg(index = 1, help = "The branch to show (defaults to the current branch)")]
        branch: Option<String>,
        #[arg(long, help = "Show one commit per line")]
        oneline: bool,
    },
    #[command(
        name = "branch",
        about = "Create or list branches",
        long_about = "This command creates a branch at the current commit, or lists all branches when no name is given."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch branches",
        long_about = "This command points HEAD at another branch. \
        It is refused while the working tree has uncommitted changes."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        target: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the current one",
        long_about = "This command compares the tip of a branch with the current tip. \
        It never changes refs, the index or the working tree."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        target: String,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command lists every file that differs from the last commit or the staging index."
    )]
    Status,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(directory) = &cli.directory {
        std::env::set_current_dir(directory)
            .map_err(|err| anyhow::anyhow!("cannot change to '{}': {}", directory, err))?;
    }

    let pwd = std::env::current_dir()?;
    let open = |path: &str| Repository::new(path, Box::new(std::io::stdout()));

    match &cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => open(path.as_str())?,
                None => open(&pwd.to_string_lossy())?,
            };

            repository.init()?
        }
        Commands::Add { paths } => {
            let repository = open(&pwd.to_string_lossy())?;

            repository.add(paths)?
        }
        Commands::Commit { message, text } => {
            let repository = open(&pwd.to_string_lossy())?;
            let message = message.as_deref().or(text.as_deref()).unwrap_or_default();

            repository.commit(message)?;
        }
        Commands::Log { branch, oneline } => {
            let repository = open(&pwd.to_string_lossy())?;
            let opts = LogOptions {
                branch: branch.clone(),
                oneline: *oneline,
            };

            repository.log(&opts)?
        }
        Commands::Branch { name } => {
            let repository = open(&pwd.to_string_lossy())?;

            match name {
                Some(name) => {
                    repository.branch(name)?;
                }
                None => repository.list_branches()?,
            }
        }
        Commands::Checkout { target } => {
            let repository = open(&pwd.to_string_lossy())?;

            repository.checkout(target)?;
        }
        Commands::Merge { target } => {
            let repository = open(&pwd.to_string_lossy())?;

            repository.merge(target)?;
        }
        Commands::Status => {
            let repository = open(&pwd.to_string_lossy())?;

            repository.status()?;
        }
    }

    Ok(())
}
