use anyhow::Result;
use arete_config::{Config, IgnoreMatcher};
use arete_engine::{CardRange, VaultEntry, io};
use relative_path::RelativePathBuf;
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "[--json] [path] | --init <vault-path>";

#[derive(Debug, PartialEq)]
enum Command {
    /// Scan a note or a vault and report its cards.
    Scan { json: bool, path: Option<PathBuf> },
    /// Write a config file pointing at a vault.
    Init { vault_path: PathBuf },
}

fn parse_args(args: &[String]) -> Option<Command> {
    let mut json = false;
    let mut init = false;
    let mut path = None;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            "--init" => init = true,
            s if s.starts_with("--") => return None,
            s => {
                if path.is_some() {
                    return None;
                }
                path = Some(PathBuf::from(s));
            }
        }
    }

    if init {
        if json {
            return None;
        }
        return path.map(|vault_path| Command::Init { vault_path });
    }
    Some(Command::Scan { json, path })
}

/// Parses one note, or every note in a vault minus the ignored ones.
fn collect_entries(path: &Path, ignore: &IgnoreMatcher) -> Result<Vec<VaultEntry>> {
    if path.is_file() {
        let result = io::parse_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok(vec![VaultEntry {
            path: RelativePathBuf::from(name),
            result,
        }]);
    }

    let entries = io::scan_vault(path)?
        .into_iter()
        .filter(|e| {
            let ignored = ignore.is_ignored(e.path.as_str());
            if ignored {
                log::debug!("Ignoring {}", e.path);
            }
            !ignored
        })
        .collect();
    Ok(entries)
}

fn format_id(id: Option<i64>) -> String {
    id.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn format_card(card: &CardRange) -> String {
    format!(
        "  #{} lines {}-{} nid {} cid {}",
        card.index,
        card.start_line,
        card.end_line,
        format_id(card.nid),
        format_id(card.cid)
    )
}

fn render_text(entries: &[VaultEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in entries {
        let cards = &entry.result.ranges;
        let pending = cards.iter().filter(|c| c.nid.is_none()).count();
        lines.push(format!(
            "{}: {} cards ({} pending sync)",
            entry.path,
            cards.len(),
            pending
        ));
        lines.extend(cards.iter().map(format_card));
    }
    lines
}

fn run_scan(json: bool, path: Option<PathBuf>) -> Result<()> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let (path, ignore) = match (path, config) {
        (Some(path), config) => {
            let ignore = match config {
                Some(c) => c.ignore_matcher()?,
                None => IgnoreMatcher::default(),
            };
            (path, ignore)
        }
        (None, Some(config)) => {
            let ignore = config.ignore_matcher()?;
            (config.vault_path, ignore)
        }
        (None, None) => {
            eprintln!("Error: No path provided and no config file found");
            eprintln!("Usage: arete-cards {USAGE}");
            eprintln!("Or create a config file at {}", Config::config_path().display());
            process::exit(1);
        }
    };

    if !path.is_file()
        && let Err(e) = io::validate_vault_dir(&path)
    {
        eprintln!("Error: Path '{}' is invalid: {e}", path.display());
        process::exit(1);
    }

    let entries = collect_entries(&path, &ignore)?;
    log::info!("Found cards in {} files", entries.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for line in render_text(&entries) {
            println!("{line}");
        }
    }
    Ok(())
}

fn run_init(vault_path: PathBuf) -> Result<()> {
    if let Err(e) = io::validate_vault_dir(&vault_path) {
        eprintln!("Error: Vault path '{}' is invalid: {e}", vault_path.display());
        process::exit(1);
    }
    Config::new(vault_path).save()?;
    println!("Wrote {}", Config::config_path().display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = parse_args(&args[1..]) else {
        eprintln!("Usage: {} {USAGE}", args[0]);
        process::exit(1);
    };

    match command {
        Command::Scan { json, path } => run_scan(json, path),
        Command::Init { vault_path } => run_init(vault_path),
    }
}
