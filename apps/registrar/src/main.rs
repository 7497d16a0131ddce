use std::{fs, path::Path, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{endpoint_url, HttpStudentClient};
use registration::{
    backend_bridge::runtime::BackendHandle,
    notify::TracingNotifier,
    sections::first_invalid_section,
    validate, FieldErrors, RegistrationController, RemoteResult, StudentDraft, SubmitOutcome,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "registrar", about = "Student registration client")]
struct Cli {
    /// Overrides the configured service base url.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Checks a draft file without contacting the server.
    Validate { draft: PathBuf },
    /// Validates a draft file and registers the student.
    Submit { draft: PathBuf },
    /// Prints an empty draft with today's registration date.
    Template,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { draft } => {
            let draft = read_draft(&draft)?;
            match validate(&draft) {
                Ok(record) => println!(
                    "valid: {} ({})",
                    record.student_name, record.admission_number
                ),
                Err(errors) => {
                    print_field_errors(&errors);
                    bail!("draft has {} invalid field(s)", errors.len());
                }
            }
        }
        Command::Submit { draft } => {
            let draft = read_draft(&draft)?;
            let mut settings = load_settings()?;
            if let Some(server_url) = cli.server_url {
                settings.server_url = config::normalize_server_url(&server_url)?;
            }
            submit(draft, &settings)?;
        }
        Command::Template => {
            let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
            print!("{}", render_template(&today)?);
        }
    }

    Ok(())
}

fn submit(draft: StudentDraft, settings: &config::Settings) -> Result<()> {
    let endpoint = endpoint_url(&settings.server_url, &settings.create_student_path)?;
    let client = HttpStudentClient::new(endpoint, settings.request_timeout())?;
    info!(endpoint = %client.endpoint(), "using student service");
    let backend = BackendHandle::start(client, settings.command_queue_capacity)
        .context("backend worker startup failure")?;

    let mut controller =
        RegistrationController::new(backend.dispatcher(), TracingNotifier).with_draft(draft);

    match controller.submit() {
        SubmitOutcome::Dispatched => {}
        SubmitOutcome::Invalid(errors) => {
            print_field_errors(&errors);
            bail!("draft has {} invalid field(s)", errors.len());
        }
        SubmitOutcome::DispatchFailed(reason) => bail!(reason),
        SubmitOutcome::AlreadyPending => bail!("a registration is already in flight"),
    }

    while controller.is_pending() {
        let event = backend
            .events()
            .recv()
            .context("backend worker stopped without replying")?;
        controller.handle_event(event);
    }

    let outcome = controller.mutation().cloned();
    backend.shutdown();
    match outcome {
        Some(RemoteResult::Ok(())) => {
            println!("Student registered successfully");
            Ok(())
        }
        Some(RemoteResult::Err(err)) => bail!("registration failed: {}", err.message()),
        _ => bail!("registration did not complete"),
    }
}

fn read_draft(path: &Path) -> Result<StudentDraft> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read draft '{}'", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON draft '{}'", path.display()))
    } else {
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML draft '{}'", path.display()))
    }
}

fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {} ({field}): {message}", field.label());
    }
    if let Some(section) = first_invalid_section(errors) {
        eprintln!("first invalid field is in \"{}\"", section.title());
    }
}

fn render_template(registration_date: &str) -> Result<String> {
    let draft = StudentDraft {
        registration_date: registration_date.to_string(),
        ..StudentDraft::default()
    };
    toml::to_string_pretty(&draft).context("failed to render draft template")
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
