use clap::Parser;
use colored::*;
use refold::api::{self, CmdMessage, FoldsApi, FoldsPaths, MessageLevel, TrackedFile};
use refold::error::Result;
use refold::init::resolve_paths;
use refold::model::FoldRange;
use refold::store::fs::FsBackend;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

const LOG_ENV: &str = "REFOLD_LOG";
const PATH_WIDTH_MAX: usize = 60;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "refold=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let paths = resolve_paths(&cwd, cli.root.clone())?;

    match cli.command {
        Some(Commands::Init) => handle_init(&paths),
        command => run_with_store(paths, command),
    }
}

fn run_with_store(paths: FoldsPaths, command: Option<Commands>) -> Result<()> {
    let backend = FsBackend::new(paths.store_dir.clone());
    let mut api = FoldsApi::open(backend, paths)?;
    print_messages(&api.take_messages());

    match command {
        Some(Commands::Show { path }) => handle_show(&api, &path),
        Some(Commands::Rename { old, new }) => handle_rename(&mut api, &old, &new),
        Some(Commands::Doctor) => handle_doctor(&api),
        Some(Commands::Config { key }) => handle_config(&api, key.as_deref()),
        Some(Commands::List) | Some(Commands::Init) | None => handle_list(&api),
    }
}

fn handle_init(paths: &FoldsPaths) -> Result<()> {
    let result = api::init(paths)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &FoldsApi<FsBackend>) -> Result<()> {
    let result = api.list_files()?;
    print_tracked_files(&result.tracked_files);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(api: &FoldsApi<FsBackend>, path: &str) -> Result<()> {
    let result = api.show_folds(path)?;
    for record in &result.record_paths {
        println!("{}", record.display().to_string().dimmed());
    }
    print_folds(&result.folds);
    print_messages(&result.messages);
    Ok(())
}

fn handle_rename(api: &mut FoldsApi<FsBackend>, old: &str, new: &str) -> Result<()> {
    let result = api.rename(old, new)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(api: &FoldsApi<FsBackend>) -> Result<()> {
    let result = api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(api: &FoldsApi<FsBackend>, key: Option<&str>) -> Result<()> {
    let result = api.config(key)?;
    if let Some(config) = &result.config {
        if config.values.is_empty() {
            println!("{}", "config.json is empty".dimmed());
        }
        for (key, value) in &config.values {
            println!("{} = {}", key, value);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_tracked_files(files: &[TrackedFile]) {
    if files.is_empty() {
        println!("No folds saved yet.");
        return;
    }

    let width = files
        .iter()
        .map(|f| f.path.width())
        .max()
        .unwrap_or(0)
        .min(PATH_WIDTH_MAX);

    for file in files {
        let padding = width.saturating_sub(file.path.width());
        let count = match file.folds {
            0 => "no folds".dimmed(),
            1 => "1 fold".normal(),
            n => format!("{} folds", n).normal(),
        };
        println!(
            "{}{}  {}  {}",
            file.path,
            " ".repeat(padding),
            file.id.to_string().yellow(),
            count
        );
    }
}

fn print_folds(folds: &[FoldRange]) {
    if folds.is_empty() {
        println!("No folds saved for this file.");
        return;
    }
    for (i, fold) in folds.iter().enumerate() {
        println!(
            "{:>3}. {}:{} → {}:{}",
            i + 1,
            fold.start.row + 1,
            fold.start.column + 1,
            fold.end.row + 1,
            fold.end.column + 1
        );
    }
}
