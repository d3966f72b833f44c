use anyhow::Result;
use clap::{Parser, Subcommand};
use grit::areas::repository::Repository;
use grit::artifacts::objects::commit::Author;
use grit::artifacts::objects::object_type::ObjectType;
use grit::commands::plumbing::hash_object::hash_object;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `GRIT_LOG=grit=debug`
const LOG_ENV: &str = "GRIT_LOG";

#[derive(Parser)]
#[command(
    name = "grit",
    version = "0.1.0",
    about = "A content-addressed version control store",
    long_about = "Loose objects, a binary staging index and reference resolution \
    laid out the way git lays them out on disk.",
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
        about = "Create an empty repository",
        long_about = "This command creates a repository in the specified directory, \
        or in the current one when no path is given."
    )]
    Init {
        #[arg(index = 1, help = "Where to create the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Compute an object ID and optionally store the object",
        long_about = "This command hashes a file as an object of the given type. \
        With -w the object is also written to the repository's object store."
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object store")]
        write: bool,
        #[arg(short = 't', long = "type", default_value = "blob", help = "Object type")]
        object_type: ObjectType,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the payload of an object",
        long_about = "This command resolves a name, peels it to the requested type \
        and prints the raw payload."
    )]
    CatFile {
        #[arg(index = 1, help = "Expected object type")]
        object_type: ObjectType,
        #[arg(index = 2, help = "Object name")]
        object: String,
    },
    #[command(name = "add", about = "Stage files")]
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    #[command(name = "rm", about = "Unstage files and delete them from the worktree")]
    Rm {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long, help = "Keep the files in the worktree")]
        cached: bool,
        #[arg(long, help = "Ignore paths that are not staged")]
        ignore_unmatch: bool,
    },
    #[command(
        name = "commit",
        about = "Record the index as a new commit",
        long_about = "This command creates a new commit from the staged files \
        and moves the current branch to it."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "ls-files", about = "List staged files")]
    LsFiles {
        #[arg(short, long, help = "Show stat data for every entry")]
        verbose: bool,
    },
    #[command(name = "ls-tree", about = "List the contents of a tree object")]
    LsTree {
        #[arg(short, long, help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1)]
        tree: String,
    },
    #[command(name = "rev-parse", about = "Resolve a name to an object ID")]
    RevParse {
        #[arg(long = "type", help = "Peel the object to this type")]
        object_type: Option<ObjectType>,
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "show-ref", about = "List references")]
    ShowRef,
    #[command(
        name = "tag",
        about = "List or create tags",
        long_about = "Without a name this command lists tags. With -a an annotated \
        tag object is written and the tag reference points at it."
    )]
    Tag {
        #[arg(short, long, help = "Create an annotated tag")]
        annotate: bool,
        #[arg(short, long, default_value = "", help = "Message for an annotated tag")]
        message: String,
        #[arg(index = 1)]
        name: Option<String>,
        #[arg(index = 2, default_value = "HEAD")]
        object: String,
    },
    #[command(
        name = "checkout",
        about = "Materialize a commit into an empty directory"
    )]
    Checkout {
        #[arg(index = 1)]
        commit: String,
        #[arg(index = 2)]
        directory: PathBuf,
    },
    #[command(name = "log", about = "Show commit history")]
    Log {
        #[arg(index = 1, default_value = "HEAD")]
        commit: String,
    },
    #[command(name = "write-tree", about = "Store the index as tree objects")]
    WriteTree,
}

fn discover_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Ok(Repository::discover(&pwd, Box::new(std::io::stdout()))?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => path,
                None => std::env::current_dir()?,
            };
            Repository::init(&path, Box::new(std::io::stdout()))?;
        }
        Commands::HashObject {
            write,
            object_type,
            file,
        } => {
            let repository = match write {
                true => Some(discover_repository()?),
                false => None,
            };
            let oid = hash_object(&file, object_type, repository.as_ref())?;
            writeln!(std::io::stdout(), "{oid}")?;
        }
        Commands::CatFile {
            object_type,
            object,
        } => discover_repository()?.cat_file(object_type, &object)?,
        Commands::Add { paths } => discover_repository()?.add(&paths)?,
        Commands::Rm {
            paths,
            cached,
            ignore_unmatch,
        } => discover_repository()?.remove(&paths, !cached, ignore_unmatch)?,
        Commands::Commit { message } => {
            discover_repository()?.commit(&message)?;
        }
        Commands::LsFiles { verbose } => discover_repository()?.ls_files(verbose)?,
        Commands::LsTree { recursive, tree } => discover_repository()?.ls_tree(&tree, recursive)?,
        Commands::RevParse { object_type, name } => {
            discover_repository()?.rev_parse(&name, object_type)?
        }
        Commands::ShowRef => discover_repository()?.show_ref()?,
        Commands::Tag {
            annotate,
            message,
            name,
            object,
        } => {
            let repository = discover_repository()?;
            match name {
                None => repository.list_tags()?,
                Some(name) => {
                    let tagger = Author::load();
                    let annotated = annotate.then_some((&tagger, message.as_str()));
                    repository.create_tag(&name, &object, annotated)?;
                }
            }
        }
        Commands::Checkout { commit, directory } => {
            discover_repository()?.checkout(&commit, &directory)?
        }
        Commands::Log { commit } => discover_repository()?.log(&commit)?,
        Commands::WriteTree => {
            discover_repository()?.write_tree()?;
        }
    }

    Ok(())
}
