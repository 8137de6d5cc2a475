use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::process::ExitCode;
use twig::areas::repository::Repository;
use twig::artifacts::core::PagerWriter;
use twig::errors::TwigError;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small single-user version control system",
    long_about = "twig snapshots a working directory into immutable commits, \
    keeps named branches over them and merges branches with a three-way merge.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
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
    #[command(name = "add", about = "Stage files for the next commit")]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit whose snapshot is the staging index."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file, or stop tracking it and delete it")]
    Rm {
        #[arg(index = 1)]
        path: String,
    },
    #[command(name = "log", about = "Show the first-parent history of HEAD")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of the commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes and untracked files")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore working files",
        long_about = "With `-- <path>...` this restores the given files from a commit (HEAD when omitted). \
        Otherwise it switches to the given branch."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch to switch to, or commit to restore files from")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "Files to restore")]
        files: Vec<String>,
    },
    #[command(name = "branch", about = "Create, delete or list branches")]
    Branch {
        #[command(subcommand)]
        command: BranchCommands,
    },
    #[command(name = "reset", about = "Move the current branch to a commit and check it out")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

#[derive(Subcommand)]
enum BranchCommands {
    #[command(name = "create", about = "Create a branch at HEAD")]
    Create {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "delete", about = "Delete a branch pointer")]
    Delete {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "list", about = "List all branches")]
    List,
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let stdout_is_terminal = std::io::stdout().is_terminal();
    if !stdout_is_terminal {
        colored::control::set_override(false);
    }

    let pager = (cli.command.is_paged()
        && stdout_is_terminal
        && std::env::var_os("NO_PAGER").is_none())
    .then(Pager::new);

    let writer: Box<dyn std::io::Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let result = match run(cli.command, writer).await {
        Ok(()) => match pager {
            Some(pager) => minus::page_all(pager).map_err(anyhow::Error::from),
            None => Ok(()),
        },
        Err(error) => Err(error),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match TwigError::from_anyhow(&error) {
            Some(twig_error) => {
                eprintln!("{twig_error}");
                ExitCode::from(1)
            }
            None => {
                eprintln!("fatal: {error:#}");
                ExitCode::from(128)
            }
        },
    }
}

async fn run(command: Commands, writer: Box<dyn std::io::Write>) -> anyhow::Result<()> {
    let path = match &command {
        Commands::Init { path: Some(path) } => path.clone(),
        _ => std::env::current_dir()?.to_string_lossy().to_string(),
    };

    let mut repository = Repository::new(&path, writer)?;
    if !matches!(command, Commands::Init { .. }) {
        repository.ensure_initialized()?;
    }

    match command {
        Commands::Init { .. } => repository.init().await,
        Commands::Add { paths } => repository.add(&paths).await,
        Commands::Commit { message } => repository.commit(&message).await,
        Commands::Rm { path } => repository.rm(&path).await,
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(&message),
        Commands::Status => repository.status().await,
        Commands::Checkout { target, files } => match (target, files.is_empty()) {
            (target, false) => repository.checkout_files(target.as_deref(), &files).await,
            (Some(branch), true) => repository.checkout_branch(&branch).await,
            (None, true) => anyhow::bail!("checkout needs a branch or `-- <path>...`"),
        },
        Commands::Branch { command } => match command {
            BranchCommands::Create { name } => repository.branch_create(&name),
            BranchCommands::Delete { name } => repository.branch_delete(&name),
            BranchCommands::List => repository.branch_list(),
        },
        Commands::Reset { commit } => repository.reset(&commit).await,
        Commands::Merge { branch } => repository.merge(&branch).await,
    }
}
