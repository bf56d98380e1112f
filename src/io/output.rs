use crate::cli::OutputFormat;
use crate::risk::{IncidentAssessment, Methodology, RiskLevel};
use colored::*;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

pub trait OutputWriter {
    fn write_assessment(&mut self, assessment: &IncidentAssessment) -> anyhow::Result<()>;
    fn write_methodology(&mut self, methodology: &Methodology) -> anyhow::Result<()>;
}

pub fn create_writer(
    format: OutputFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    })
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_assessment(&mut self, assessment: &IncidentAssessment) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(assessment)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    fn write_methodology(&mut self, methodology: &Methodology) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(methodology)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_level_line(&mut self, level: RiskLevel, score: u32) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "Overall risk: {} ({}/100)",
            paint_level(level),
            score
        )?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_assessment(&mut self, assessment: &IncidentAssessment) -> anyhow::Result<()> {
        writeln!(self.writer, "INCIDENT RISK ASSESSMENT")?;
        writeln!(self.writer, "────────────────────────")?;
        self.write_level_line(assessment.overall.level, assessment.overall.score)?;
        writeln!(self.writer, "{}", assessment.overall.explanation)?;
        writeln!(self.writer)?;

        if !assessment.overall.factors.is_empty() {
            writeln!(self.writer, "TOP RISK FACTORS")?;
            for factor in &assessment.overall.factors {
                writeln!(
                    self.writer,
                    "  {} ({:.1} weighted): {}",
                    factor.name,
                    factor.weighted(),
                    factor.description
                )?;
            }
            writeln!(self.writer)?;
        }

        if !assessment.scored.is_empty() {
            writeln!(self.writer, "CHANGE EVENTS")?;
            for entry in &assessment.scored {
                writeln!(
                    self.writer,
                    "  [{:>3}/100 {}] {} to {} ({})",
                    entry.result.score,
                    paint_level(entry.result.level),
                    entry.event.kind,
                    entry.event.service,
                    entry.event.id
                )?;
            }
            writeln!(self.writer)?;
        }

        if !assessment.correlations.is_empty() {
            writeln!(self.writer, "CORRELATIONS")?;
            for correlation in &assessment.correlations {
                writeln!(
                    self.writer,
                    "  +{:.0} pts: {}",
                    correlation.risk_increase, correlation.description
                )?;
            }
            writeln!(self.writer)?;
        }

        if !assessment.overall.recommendations.is_empty() {
            writeln!(self.writer, "RECOMMENDATIONS")?;
            for recommendation in &assessment.overall.recommendations {
                writeln!(self.writer, "  - {recommendation}")?;
            }
        }

        Ok(())
    }

    fn write_methodology(&mut self, methodology: &Methodology) -> anyhow::Result<()> {
        writeln!(self.writer, "SCORING METHODOLOGY v{}", methodology.version)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "FACTORS")?;
        for factor in &methodology.factors {
            writeln!(
                self.writer,
                "  {} (weight {:.2})",
                factor.name, factor.weight
            )?;
            for bucket in &factor.buckets {
                writeln!(self.writer, "    {} -> {:.0}", bucket.label, bucket.score)?;
            }
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "EVENT TYPE BASE SCORES")?;
        for entry in &methodology.event_type_scores {
            writeln!(self.writer, "  {} -> {:.0}", entry.event_type, entry.score)?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "ENVIRONMENT MULTIPLIERS")?;
        for entry in &methodology.environment_multipliers {
            writeln!(
                self.writer,
                "  {} -> x{:.1}",
                entry.environment, entry.multiplier
            )?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "RISK LEVELS")?;
        for entry in &methodology.level_thresholds {
            writeln!(
                self.writer,
                "  {} -> score >= {}",
                entry.level, entry.minimum_score
            )?;
        }

        Ok(())
    }
}

fn paint_level(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Critical => "CRITICAL".red().bold(),
        RiskLevel::High => "HIGH".yellow().bold(),
        RiskLevel::Medium => "MEDIUM".cyan(),
        RiskLevel::Low => "LOW".green(),
    }
}
