use anyhow::Result;
use causemap::cli::{Cli, Commands, OutputFormat};
use causemap::io::input;
use causemap::io::output::create_writer;
use causemap::{methodology, score_event_batch, IncidentContext, Severity};
use clap::Parser;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            events,
            incident_at,
            service,
            environment,
            severity,
            description,
            window_hours,
            format,
            output,
        } => analyze(
            events,
            &incident_at,
            service,
            environment,
            severity,
            description,
            window_hours,
            format,
            output,
        ),
        Commands::Methodology { format, output } => {
            let mut writer = create_writer(format, output)?;
            writer.write_methodology(&methodology())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn analyze(
    events_path: PathBuf,
    incident_at: &str,
    service: Option<String>,
    environment: Option<String>,
    severity: Option<String>,
    description: Option<String>,
    window_hours: i64,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let incident_at = input::parse_incident_at(incident_at)?;

    let mut context = IncidentContext::new(incident_at);
    context.service = service;
    context.environment = environment;
    context.severity = severity.as_deref().map(str::parse::<Severity>).transpose()?;
    context.description = description;

    let events = input::read_events(&events_path)?;
    let events = input::filter_to_window(events, incident_at, window_hours);

    let assessment = score_event_batch(&events, &context);

    let mut writer = create_writer(format, output)?;
    writer.write_assessment(&assessment)
}
