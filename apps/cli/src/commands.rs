//! Subcommand implementations

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Format, Toml};
use formguard_validator::memory::MemoryForm;
use formguard_validator::{CollectingSink, FormResult, FormSchema, InputSurface, Validator};

use crate::cli::{AuditArgs, OutputFormat, ValidateArgs};
use crate::settings::Settings;

pub fn validate(args: &ValidateArgs, settings: &Settings) -> Result<ExitCode> {
    let form = load_form(&args.form)?;
    let schema = load_schema(&args.schema)?;
    let sink = CollectingSink::new();

    let mut validator = Validator::builder(&form)
        .sink(&sink)
        .options(settings.validator)
        .build();
    validator.register_schema(&schema)?;
    print_warnings(&form, &sink, |line| eprintln!("warning: {line}"));

    let result = validator.validate();
    match args.format.unwrap_or(settings.format) {
        OutputFormat::Text => print_text(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

pub fn audit(args: &AuditArgs, settings: &Settings) -> Result<ExitCode> {
    let form = load_form(&args.form)?;
    let sink = CollectingSink::new();

    let mut validator = Validator::builder(&form)
        .sink(&sink)
        .options(settings.validator)
        .build();
    if let Some(path) = &args.schema {
        validator.register_schema(&load_schema(path)?)?;
    }

    print_warnings(&form, &sink, |line| println!("{line}"));
    tracing::info!(warnings = sink.len(), "audit finished");
    Ok(ExitCode::SUCCESS)
}

fn load_form(path: &Path) -> Result<MemoryForm> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read form {}", path.display()))?;
    MemoryForm::from_json(&json).with_context(|| format!("invalid form fixture {}", path.display()))
}

fn load_schema(path: &Path) -> Result<FormSchema> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        Figment::from(Toml::string(&content))
            .extract::<FormSchema>()
            .with_context(|| format!("invalid schema {}", path.display()))
    } else {
        FormSchema::from_json(&content).with_context(|| format!("invalid schema {}", path.display()))
    }
}

fn print_warnings(form: &MemoryForm, sink: &CollectingSink, print: impl Fn(String)) {
    for warning in sink.take() {
        match warning.element {
            Some(element) => print(format!("{} ({})", warning.message, form.describe(element))),
            None => print(warning.message),
        }
    }
}

fn print_text(result: &FormResult) {
    if result.valid {
        println!("valid");
        return;
    }
    println!("invalid: {} field(s) failed", result.errors.len());
    for (field, messages) in &result.errors {
        for message in messages {
            println!("  {field}: {message}");
        }
    }
}
