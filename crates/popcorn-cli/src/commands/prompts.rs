use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};
use std::ops::RangeInclusive;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default.filter(|d| !d.is_empty()) {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read password: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Pick one entry from a list, returning its index
pub fn prompt_select<T: ToString>(prompt: &str, items: &[T], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

/// Prompt for a number inside `range`, re-asking until the input is valid
pub fn prompt_number_in_range(
    prompt: &str,
    default: Option<u32>,
    range: RangeInclusive<u32>,
    output: &Output,
) -> Result<u32> {
    loop {
        let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

        if let Some(default_value) = default {
            input_builder = input_builder.default(default_value.to_string());
        }

        let input_str = input_builder
            .interact_text()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        let trimmed = input_str.trim();

        if trimmed.is_empty() {
            if let Some(default_value) = default {
                return Ok(default_value);
            }
            output.error("Invalid input. Please enter a valid number.");
            continue;
        }

        match trimmed.parse::<u32>() {
            Ok(num) if range.contains(&num) => return Ok(num),
            Ok(_) => {
                output.error(format!(
                    "Please enter a number between {} and {}.",
                    range.start(),
                    range.end()
                ));
            }
            Err(_) => output.error("Invalid input. Please enter a valid number."),
        }
    }
}
