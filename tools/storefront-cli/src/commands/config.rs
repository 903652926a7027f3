//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CouponMode, CONFIG_NAMES, TOKEN_ENV};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

/// Copy of the config safe to print.
fn redacted(config: &CliConfig) -> CliConfig {
    let mut config = config.clone();
    if config.api.token.is_some() {
        config.api.token = Some("********".to_string());
    }
    config
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = redacted(&ctx.config);

    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("timeout_secs", &config.api.timeout_secs.to_string());
    let token = if ctx.config.api.token().is_some() {
        "set"
    } else {
        "not set"
    };
    ctx.output.kv("token", token);

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());

    ctx.output.info("");
    ctx.output.info("[pricing]");
    let currency = config.pricing.currency;
    ctx.output
        .kv("shipping_cost", &currency.format(config.pricing.shipping_cost));
    ctx.output.kv(
        "free_shipping_threshold",
        &currency.format(config.pricing.free_shipping_threshold),
    );
    ctx.output.kv("currency", currency.code());

    ctx.output.info("");
    ctx.output.info("[coupons]");
    ctx.output.kv("mode", config.coupons.mode.as_str());
    if config.coupons.mode == CouponMode::Flat {
        ctx.output
            .kv("flat_amount", &currency.format(config.coupons.flat_amount));
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config.api.token().is_none() {
        warnings.push(format!(
            "no API token; set api.token or {} to use orders, addresses and cards",
            TOKEN_ENV
        ));
    }
    if ctx.config.api.token.is_some() {
        warnings.push(format!(
            "api.token is stored in the config file; prefer {}",
            TOKEN_ENV
        ));
    }
    if ctx.config.coupons.mode == CouponMode::Flat {
        warnings.push("coupons.mode = \"flat\" accepts every code".to_string());
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
