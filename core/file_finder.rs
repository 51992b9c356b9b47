use crate::stripper::Dialect;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ignore::overrides::{Override, OverrideBuilder};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    about = "Strip comments from hash-comment and C-family sources (main arguments)"
)]
pub struct DecommentArgs {
    #[clap(help = "Root directory (or single file) to process", default_value = ".")]
    pub path: PathBuf,

    #[clap(long, help = "Write changes in place instead of only reporting them")]
    pub apply: bool,

    #[clap(long, help = "Skip the confirmation prompt when applying")]
    pub no_confirm: bool,

    #[clap(
        long = "keep-keyword",
        value_name = "WORD",
        help = "Keep C-family comments containing WORD; replaces the default TODO/FIXME/NOTE/HACK set [multiple allowed]",
        action = clap::ArgAction::Append,
    )]
    pub keep_keywords: Vec<String>,

    #[clap(
        long = "skip-dir",
        value_name = "NAME",
        help = "Additional directory name to skip [multiple allowed]",
        action = clap::ArgAction::Append,
    )]
    pub skip_dirs: Vec<String>,

    #[clap(
        long,
        value_name = "PATTERN",
        help = "Glob pattern for files to include [multiple allowed]",
        action = clap::ArgAction::Append,
    )]
    pub include: Vec<String>,

    #[clap(
        long,
        value_name = "PATTERN",
        help = "Glob pattern for files/directories to exclude [multiple allowed]",
        action = clap::ArgAction::Append,
    )]
    pub exclude: Vec<String>,
}

impl Default for DecommentArgs {
    fn default() -> Self {
        DecommentArgs {
            path: PathBuf::from("."),
            apply: false,
            no_confirm: false,
            keep_keywords: Vec::new(),
            skip_dirs: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    #[clap(about = "Generate shell completion scripts")]
    Completion(CompletionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompletionArgs {
    #[clap(value_parser = clap::value_parser!(clap_complete::Shell))]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "decomment",
    version = "0.1.0",
    about = "Strip comments from hash-comment and C-family sources",
    long_about = "Removes '#' comments from .jai files and '//' / '/* */' comments from C-family files,\nkeeping marker comments (TODO, FIXME, NOTE, HACK) and collapsing the blank lines left behind.\nRuns as a dry run unless --apply is given.",
    propagate_version = true
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[clap(flatten)]
    pub main_opts: DecommentArgs,
}

const DEFAULT_SKIP_DIRS: &[&str] = &[".git", "__jaicache__", "vscode-extension-jai", "assets"];
const DEFAULT_SKIP_FILES: &[&str] = &["LICENSE"];
const LINE_DIALECT_EXTENSIONS: &[&str] = &["jai"];
const C_FAMILY_EXTENSIONS: &[&str] = &["c", "h", "m"];

/// Which files are visited and how each one is classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub skip_dirs: Vec<String>,
    pub skip_files: Vec<String>,
    pub docs_root: String,
    pub header_prefix: String,
    pub header_segment: String,
    pub line_extensions: Vec<String>,
    pub c_family_extensions: Vec<String>,
}

fn owned(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            skip_dirs: owned(DEFAULT_SKIP_DIRS),
            skip_files: owned(DEFAULT_SKIP_FILES),
            docs_root: "docs".to_string(),
            header_prefix: "test/".to_string(),
            header_segment: "/checks/".to_string(),
            line_extensions: owned(LINE_DIALECT_EXTENSIONS),
            c_family_extensions: owned(C_FAMILY_EXTENSIONS),
        }
    }
}

impl DiscoveryConfig {
    pub fn from_args(args: &DecommentArgs) -> Self {
        let mut config = DiscoveryConfig::default();
        for d in &args.skip_dirs {
            if !config.skip_dirs.contains(d) {
                config.skip_dirs.push(d.clone());
            }
        }
        config
    }

    pub fn dialect_for(&self, path: &Path) -> Option<Dialect> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if self.line_extensions.iter().any(|e| *e == ext) {
            Some(Dialect::Line)
        } else if self.c_family_extensions.iter().any(|e| *e == ext) {
            Some(Dialect::CFamily)
        } else {
            None
        }
    }

    /// Check files under `test/**/checks/` carry an expectation header.
    pub fn preserves_header(&self, relative: &str) -> bool {
        relative.starts_with(&self.header_prefix) && relative.contains(&self.header_segment)
    }

    fn in_docs(&self, relative: &str) -> bool {
        relative == self.docs_root
            || relative
                .strip_prefix(self.docs_root.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// One file selected for stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the discovery base, `/`-separated.
    pub relative: String,
    pub dialect: Dialect,
    pub preserve_header: bool,
}

pub fn relative_posix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        parts.join("/")
    }
}

pub fn find_files(args: &DecommentArgs) -> Result<Vec<SourceFile>> {
    let config = DiscoveryConfig::from_args(args);
    discover(&args.path, &config, &args.include, &args.exclude)
}

/// Walks `root`. Relative paths are taken against `root` itself, or against the
/// current directory when `root` is a single file inside it, so the header and
/// docs rules see `test/...` and `docs/...` either way.
pub fn discover(
    root: &Path,
    config: &DiscoveryConfig,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<SourceFile>> {
    let root = resolve(root)?;
    let base = if root.is_file() {
        file_base(&root)?
    } else {
        root.clone()
    };
    discover_from(&base, &root, config, include, exclude)
}

fn resolve(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        anyhow::bail!("Path not found: {}", path.display());
    }
    path.canonicalize()
        .with_context(|| format!("Resolve path: {}", path.display()))
}

fn file_base(file: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Current directory")?;
    let cwd = cwd.canonicalize().unwrap_or(cwd);
    if file.starts_with(&cwd) {
        return Ok(cwd);
    }
    file.parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("No parent directory: {}", file.display()))
}

/// Like [`discover`], with relative paths computed against `base`, which must
/// contain `root`.
pub fn discover_from(
    base: &Path,
    root: &Path,
    config: &DiscoveryConfig,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<SourceFile>> {
    let base = resolve(base)?;
    let root = resolve(root)?;
    if !root.starts_with(&base) {
        anyhow::bail!("{} is not inside {}", root.display(), base.display());
    }
    let overrides = build_overrides(&base, include, exclude)?;

    let mut files = Vec::new();
    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| keep_entry(e, config));
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(file) = classify(&base, entry.path(), config, &overrides) {
            files.push(file);
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(
        count = files.len(),
        root = %root.display(),
        base = %base.display(),
        "discovery finished"
    );
    Ok(files)
}

fn build_overrides(root: &Path, include: &[String], exclude: &[String]) -> Result<Override> {
    let mut o = OverrideBuilder::new(root);
    // The last matching glob wins, so excludes go after includes.
    for p in include {
        o.add(p).with_context(|| format!("Include: {}", p))?;
    }
    for p in exclude {
        let q = format!("!{}", p);
        o.add(&q).with_context(|| format!("Exclude: {}", p))?;
    }
    o.build().context("Overrides")
}

fn keep_entry(e: &DirEntry, config: &DiscoveryConfig) -> bool {
    if e.depth() == 0 {
        return true;
    }
    let name = e.file_name().to_string_lossy();
    if name.starts_with('.') {
        return false;
    }
    !(e.file_type().is_dir() && config.skip_dirs.iter().any(|d| *d == name))
}

fn classify(
    root: &Path,
    path: &Path,
    config: &DiscoveryConfig,
    overrides: &Override,
) -> Option<SourceFile> {
    let name = path.file_name()?.to_string_lossy();
    if config.skip_files.iter().any(|f| *f == name) {
        return None;
    }
    let relative = relative_posix(root, path);
    if config.in_docs(&relative) {
        return None;
    }
    if overrides.matched(path, false).is_ignore() {
        return None;
    }
    let dialect = config.dialect_for(path)?;
    let preserve_header = dialect == Dialect::Line && config.preserves_header(&relative);
    Some(SourceFile {
        path: path.to_path_buf(),
        relative,
        dialect,
        preserve_header,
    })
}
