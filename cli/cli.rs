use decomment_core::{
    CliArgs, Command as CoreCommand, ProcessSummary, find_files, process_files,
    strip_options_from_args,
};
mod interaction;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use console::style;
use std::io;
use std::process::ExitCode;
use tracing::info;

fn print_completions_cli(shell: clap_complete::Shell) {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli: CliArgs = CliArgs::parse();

    if let Some(command_enum_val) = cli.command {
        match command_enum_val {
            CoreCommand::Completion(args) => {
                print_completions_cli(args.shell);
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let main_app_args = cli.main_opts;
    let options = strip_options_from_args(&main_app_args);
    info!(
        root = %main_app_args.path.display(),
        apply = main_app_args.apply,
        keywords = ?options.c_family.keywords.keywords(),
        "starting"
    );

    let files_to_process = match find_files(&main_app_args) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}", style(format!("Error finding files: {:#}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    if files_to_process.is_empty() {
        println!("No files found matching the criteria.");
        println!("files_changed=0 apply={}", main_app_args.apply);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Found {} files.", files_to_process.len());

    match interaction::confirm_apply(
        files_to_process.len(),
        main_app_args.apply,
        main_app_args.no_confirm,
    ) {
        Ok(true) => {}
        Ok(false) => return Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!(
                "{}",
                style(format!("Error during confirmation: {}", e)).red()
            );
            return Ok(ExitCode::FAILURE);
        }
    }

    let results = process_files(&files_to_process, &options, main_app_args.apply);
    let summary = ProcessSummary::from_results(&results);

    let verb = if main_app_args.apply {
        "updated"
    } else {
        "would change"
    };
    for result in &results {
        match &result.error {
            None if result.changed => {
                println!("  {} {}", style(verb).green(), style(&result.relative).dim());
            }
            None => {}
            Some(err_msg) => {
                eprintln!(
                    "  {} Failed: {} - {}",
                    style("⚠️").yellow(),
                    style(result.path.display()).dim(),
                    style(err_msg).red()
                );
            }
        }
    }

    println!(
        "files_changed={} apply={}",
        summary.changed, main_app_args.apply
    );
    if summary.failed > 0 {
        eprintln!(
            "{} {} failed.",
            style(summary.failed).red(),
            if summary.failed == 1 { "file" } else { "files" }
        );
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
