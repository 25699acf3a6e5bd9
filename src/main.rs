// wob-catalog/src/main.rs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use notify::{recommended_watcher, Event, RecursiveMode, Watcher};
use std::{io, path::{Path, PathBuf}, process::ExitCode};
use tokio::sync::mpsc;
use tracing::{info, warn};

use wob_catalog::{validate_and_report, Catalog, ConfigManager, ReportFormat, TaskRecord};

#[derive(Parser)]
#[command(name = "wob-catalog", version, about = "Validate and browse the MiniWoB task catalog")]
struct Cli {
    /// Workspace root; `.wob-catalog/config.toml` is read from here
    #[arg(long, global = true, default_value = ".")]
    workspace: PathBuf,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run every catalog check; exits 1 when defects are found
    Check {
        /// Catalog file (JSON, or a script with BEGIN_DEF/END_DEF markers); builtin when omitted
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
    },
    /// Print id, filename and tags of each record
    List {
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Only records carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// Only untagged records, which need mouse and keyboard
        #[arg(long, conflicts_with = "tag")]
        keyboard: bool,
    },
    /// Re-run the checks whenever the catalog file changes
    Watch {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let cfg = match ConfigManager::load(&cli.workspace) {
        Ok(cm) => cm.get().clone(),
        Err(e) => {
            eprintln!("config unavailable, using defaults: {e:#}");
            Default::default()
        }
    };
    let filter = std::env::var("RUST_LOG").ok().or(cfg.log.filter.clone()).unwrap_or_else(|| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let configured = cfg.catalog_path(&cli.workspace);
    let result = match cli.cmd {
        Cmd::Check { catalog, format } => {
            let path = catalog.or(configured);
            run_check(path.as_deref(), format.or(cfg.report.format).unwrap_or_default())
        }
        Cmd::List { catalog, tag, keyboard } => {
            run_list(catalog.or(configured).as_deref(), tag.as_deref(), keyboard).map(|_| ExitCode::SUCCESS)
        }
        Cmd::Watch { catalog, format } => match catalog.or(configured) {
            Some(path) => run_watch(&path, format.or(cfg.report.format).unwrap_or_default()).await,
            None => Err(anyhow::anyhow!("watch needs --catalog or catalog.path in config")),
        },
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => Catalog::load(p).with_context(|| format!("load catalog {}", p.display())),
        None => Catalog::builtin().context("parse builtin catalog"),
    }
}

fn run_check(path: Option<&Path>, format: ReportFormat) -> Result<ExitCode> {
    let catalog = load_catalog(path)?;
    let mut reporter = format.reporter(io::stdout().lock());
    let report = validate_and_report(&catalog, reporter.as_mut())?;
    Ok(if report.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn run_list(path: Option<&Path>, tag: Option<&str>, keyboard: bool) -> Result<()> {
    use std::io::Write;
    let catalog = load_catalog(path)?;
    let mut out = io::stdout().lock();
    let records: Box<dyn Iterator<Item = &TaskRecord> + '_> = match (tag, keyboard) {
        (Some(t), _) => Box::new(catalog.with_tag(t)),
        (None, true) => Box::new(catalog.keyboard_required()),
        (None, false) => Box::new(catalog.records().iter()),
    };
    for r in records {
        writeln!(
            out, "{}\t{}\t{}",
            r.id.as_deref().unwrap_or("-"),
            r.filename.as_deref().unwrap_or("-"),
            r.tags().join(","),
        )?;
    }
    Ok(())
}

async fn run_watch(path: &Path, format: ReportFormat) -> Result<ExitCode> {
    let file_name = path.file_name().context("catalog path has no file name")?.to_os_string();
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.is_dir() { bail!("directory {} does not exist", dir.display()); }

    let (tx, mut rx) = mpsc::unbounded_channel::<()>();
    // Editors often replace the file, so watch the directory and filter by name.
    let mut watcher = recommended_watcher(move |res: notify::Result<Event>| {
        let Ok(ev) = res else { return; };
        if !(ev.kind.is_modify() || ev.kind.is_create()) { return; }
        if ev.paths.iter().any(|p| p.file_name() == Some(file_name.as_os_str())) {
            let _ = tx.send(());
        }
    })?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!(path = %path.display(), "watching catalog");

    let mut last = check_once(path, format);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.recv() => {
                if changed.is_none() { break; }
                while rx.try_recv().is_ok() {}
                last = check_once(path, format);
            }
        }
    }
    Ok(last)
}

fn check_once(path: &Path, format: ReportFormat) -> ExitCode {
    match run_check(Some(path), format) {
        Ok(code) => code,
        Err(e) => {
            warn!("{e:#}");
            ExitCode::from(2)
        }
    }
}
