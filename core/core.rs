pub mod file_finder;
pub mod processor;
pub mod stripper;

pub use file_finder::{
    CliArgs, Command, CompletionArgs, DecommentArgs, DiscoveryConfig, SourceFile, discover,
    discover_from, find_files,
};

pub use processor::{ProcessSummary, ProcessedFileResult, process_files, process_single_file};
pub use stripper::{
    CFamilyOptions, Dialect, LineDialectOptions, RetainedKeywords, StripOptions, strip_document,
};

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("File processing error in {path}: {message}")]
    Processing { path: String, message: String },
}

/// Builds strip options from the command line; `--keep-keyword` replaces the defaults.
pub fn strip_options_from_args(args: &DecommentArgs) -> StripOptions {
    let mut options = StripOptions::default();
    if !args.keep_keywords.is_empty() {
        options.c_family.keywords = RetainedKeywords::new(&args.keep_keywords);
    }
    options
}
