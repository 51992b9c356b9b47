use anyhow::Result;
use console::style;
use dialoguer::Confirm;

/// Only rewriting asks; dry runs never prompt.
pub fn confirm_apply(file_count: usize, apply: bool, no_confirm: bool) -> Result<bool> {
    if !apply || no_confirm {
        return Ok(true);
    }
    if file_count == 0 {
        println!("No files to process.");
        return Ok(false);
    }

    let prompt = format!(
        "Rewrite comments in place across {} files?",
        style(file_count).cyan()
    );

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    if !confirmed {
        println!("Aborted by user.");
    }

    Ok(confirmed)
}
