//! Command execution.
//!
//! Every command writes plain `key: value` or one-code-per-line output to the
//! supplied writer so it can be captured in tests and piped in scripts.

use std::io::Write;

use log::debug;
use mercator::{
    DataSource, DisplayNames, Locale, MercatorConfig, Territory, TerritoryCodeType,
};

use crate::cli::{Cli, Command, HierarchyArgs, LocaleArgs, TerritoryArgs};
use crate::error::Result;

/// Run `cli`, writing results to `stdout`.
///
/// # Errors
///
/// Returns configuration, lookup and output failures.
pub fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => MercatorConfig::load(path)?,
        None => MercatorConfig::default(),
    };
    let source = config.data_source(cli.data_root.as_deref())?;
    debug!(target: "mercator_cli", "running {:?}", cli.command);

    match &cli.command {
        Command::Territory(args) => territory(&source, &config, args, stdout),
        Command::Parents(args) => parents(&source, args, stdout),
        Command::Children(args) => children(&source, args, stdout),
        Command::Locale(args) => locale(&source, args, stdout),
    }
}

fn resolve(source: &DataSource, code: &str, code_type: Option<&str>) -> Result<Territory> {
    Ok(match code_type {
        Some(code_type) => Territory::parse_with_type(source, code, code_type)?,
        None => Territory::new(source, code)?,
    })
}

fn territory(
    source: &DataSource,
    config: &MercatorConfig,
    args: &TerritoryArgs,
    stdout: &mut dyn Write,
) -> Result<()> {
    let territory = resolve(source, &args.code, args.code_type.as_deref())?;

    writeln!(stdout, "code: {}", territory.code())?;
    writeln!(
        stdout,
        "origin: {} {}",
        territory.origin(),
        territory.origin_code()
    )?;
    for code_type in TerritoryCodeType::ALL {
        let code = territory.code_by_type(code_type).unwrap_or("-");
        writeln!(stdout, "{code_type}: {code}")?;
    }
    writeln!(stdout, "group: {}", territory.is_group(source)?)?;

    let tag = args.locale.as_deref().or_else(|| config.locale());
    if let Some(tag) = tag {
        let names = DisplayNames::new(source, Locale::from_string(source, tag)?);
        if let Some(name) = names.territory(&territory)? {
            writeln!(stdout, "name: {name}")?;
        }
    }
    Ok(())
}

fn parents(source: &DataSource, args: &HierarchyArgs, stdout: &mut dyn Write) -> Result<()> {
    let territory = resolve(source, &args.code, None)?;
    write_codes(stdout, &territory.parent_codes(source, args.expand)?)
}

fn children(source: &DataSource, args: &HierarchyArgs, stdout: &mut dyn Write) -> Result<()> {
    let territory = resolve(source, &args.code, None)?;
    write_codes(stdout, &territory.children_codes(source, args.expand)?)
}

fn locale(source: &DataSource, args: &LocaleArgs, stdout: &mut dyn Write) -> Result<()> {
    let locale = Locale::from_string(source, &args.tag)?;

    writeln!(stdout, "code: {}", locale.code())?;
    writeln!(stdout, "complete: {}", locale.is_complete())?;
    writeln!(stdout, "bcp47: {}", locale.to_language_identifier()?)?;
    writeln!(stdout, "fallback: {}", locale.fallback_chain().join(" "))?;
    Ok(())
}

fn write_codes(stdout: &mut dyn Write, codes: &[String]) -> Result<()> {
    for code in codes {
        writeln!(stdout, "{code}")?;
    }
    Ok(())
}

/// Map a run result to a process exit code, reporting failures on `stderr`.
pub fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            if writeln!(stderr, "mercator: {err}").is_err() {
                // Best-effort reporting; ignore write failures.
            }
            1
        }
    }
}
