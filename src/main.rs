//! Browse the projected tree of a MIDI file from the command line.

use clap::{Parser, Subcommand};
use midifs::prelude::*;
use std::{
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// The MIDI file to project
    midi_file: PathBuf,

    #[clap(subcommand)]
    command: Option<Command>,

    /// User id reported as the owner of every node
    #[clap(long)]
    uid: Option<u32>,

    /// Group id reported as the owner of every node
    #[clap(long)]
    gid: Option<u32>,

    /// Rewrite delta times in channel files so events keep their absolute tick
    #[clap(long)]
    absolute_deltas: bool,

    /// Log build progress
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every path with its size
    Tree,
    /// List a directory
    Ls {
        #[clap(default_value = "/")]
        path: String,
    },
    /// Print the attributes of a node
    Stat { path: String },
    /// Write the content of a file to stdout
    Cat { path: String },
    /// Copy every generated file below a directory
    Extract { dir: PathBuf },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let bytes = match read_source(&args.midi_file) {
        Ok(bytes) => bytes,
        Err(e) => return fatal(&args.midi_file, e),
    };
    let sequence = match Sequence::parse(&bytes) {
        Ok(sequence) => sequence,
        Err(e) => return fatal(&args.midi_file, e),
    };
    let fs = match MidiFs::mount(&sequence, &options(&args)) {
        Ok(fs) => fs,
        Err(e) => return fatal(&args.midi_file, e),
    };

    let result = match args.command.unwrap_or(Command::Tree) {
        Command::Tree => tree(&fs),
        Command::Ls { path } => ls(&fs, &path),
        Command::Stat { path } => stat(&fs, &path),
        Command::Cat { path } => cat(&fs, &path),
        Command::Extract { dir } => extract(&fs, &dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Fs(e)) => {
            eprintln!("{e} (errno {})", i32::from(e.errno()));
            ExitCode::FAILURE
        }
        Err(CliError::Io(e)) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn options(args: &Args) -> MountOptions {
    let current = Owner::current();
    let owner = Owner::new(
        args.uid.unwrap_or(current.uid),
        args.gid.unwrap_or(current.gid),
    );
    let delta_mode = if args.absolute_deltas {
        DeltaMode::Absolute
    } else {
        DeltaMode::Verbatim
    };
    MountOptions::default()
        .with_owner(owner)
        .with_delta_mode(delta_mode)
}

fn fatal(path: &Path, e: LoadError) -> ExitCode {
    error!("Could not load {}: {e}", path.display());
    ExitCode::FAILURE
}

enum CliError {
    Fs(FsError),
    Io(std::io::Error),
}

impl From<FsError> for CliError {
    fn from(e: FsError) -> Self {
        Self::Fs(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

fn tree(fs: &MidiFs) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    let mut result = Ok(());
    fs.tree().walk(|path, node| {
        if result.is_ok() {
            let suffix = if node.metadata().is_dir() { "/" } else { "" };
            result = writeln!(out, "{:>8}  {path}{suffix}", node.metadata().size);
        }
    });
    result.map_err(CliError::from)
}

fn ls(fs: &MidiFs, path: &str) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    for name in fs.readdir(path)? {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn stat(fs: &MidiFs, path: &str) -> Result<(), CliError> {
    let meta = fs.getattr(path)?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "mode:  {:o}", meta.mode())?;
    writeln!(out, "nlink: {}", meta.nlink)?;
    writeln!(out, "uid:   {}", meta.uid)?;
    writeln!(out, "gid:   {}", meta.gid)?;
    writeln!(out, "size:  {}", meta.size)?;
    Ok(())
}

fn cat(fs: &MidiFs, path: &str) -> Result<(), CliError> {
    let handle = fs.open(path, libc::O_RDONLY)?;
    let size = fs.getattr(path)?.size;
    let data = fs.read(path, size as usize, 0, handle)?;
    fs.release(path, handle)?;
    std::io::stdout().lock().write_all(&data)?;
    Ok(())
}

fn extract(fs: &MidiFs, dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)?;
    let mut result = Ok(());
    fs.tree().walk(|path, node| {
        if result.is_err() {
            return;
        }
        let target = dir.join(path.trim_start_matches('/'));
        result = match node {
            Node::Directory(_) => std::fs::create_dir_all(&target),
            Node::File(file) => std::fs::write(&target, file.data()),
        };
    });
    result.map_err(CliError::from)
}
