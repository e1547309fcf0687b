/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};
use std::path::PathBuf;

use profile_editor::config::{ApiConfig, AppConfig, SessionConfig};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to Profile Editor Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a new editor configuration.").dim()
    );

    let theme = ColorfulTheme::default();
    let defaults = ApiConfig::default();

    if output.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?
    {
        bail!("refusing to overwrite {}", output.display());
    }

    println!("\n{}", style("--- User Service ---").bold());
    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Base URL")
        .default(defaults.base_url.clone())
        .interact_text()?;

    let timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Request timeout (seconds)")
        .default(defaults.timeout_secs)
        .interact_text()?;

    println!("\n{}", style("--- Session ---").bold());
    let user_id: String = Input::with_theme(&theme)
        .with_prompt("User ID")
        .validate_with(|value: &String| -> Result<(), &str> {
            if value.trim().is_empty() {
                Err("user id is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let token = Password::with_theme(&theme)
        .with_prompt("Bearer token (leave empty to sign out)")
        .allow_empty_password(true)
        .interact()?;

    let token_ttl_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Token lifetime (seconds)")
        .default(3600)
        .interact_text()?;

    println!("\n{}", style("--- Countries ---").bold());
    let countries_path = if Confirm::with_theme(&theme)
        .with_prompt("Use a custom country list?")
        .default(false)
        .interact()?
    {
        let path: String = Input::with_theme(&theme)
            .with_prompt("Country file (YAML or JSON)")
            .interact_text()?;
        Some(PathBuf::from(path))
    } else {
        None
    };

    let config = AppConfig {
        api: ApiConfig {
            base_url,
            timeout_secs,
            ..defaults
        },
        session: SessionConfig {
            user_id: user_id.trim().to_string(),
            token: Some(token).filter(|token| !token.is_empty()),
            token_ttl_secs,
        },
        countries_path,
        log_dir: None,
    };
    config.validate()?;

    let yaml = serde_yaml::to_string(&config).context("failed to serialize config to YAML")?;

    std::fs::write(&output, yaml)
        .context(format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
