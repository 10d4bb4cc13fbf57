use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Summary of one generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: usize,
    pub best_score: f64,
    pub best_length: usize,
    /// Best phenotype, present when this generation matches or beats the run's best
    pub phenotype: Option<String>,
    pub mean_score: Option<f64>,
    pub invalid_count: usize,
    pub population_size: usize,
    /// Genomes that were decoded and scored this generation (cache hits and elites excluded)
    pub evaluated: usize,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, report: &GenerationReport);
    fn on_individuals_evaluated(&mut self, evaluated: usize, total: usize);
}

/// Ignores all progress
impl ProgressCallback for () {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _report: &GenerationReport) {}
    fn on_individuals_evaluated(&mut self, _evaluated: usize, _total: usize) {}
}

/// Reports through the `log` facade
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        log::info!(
            "{}: L={}, SCORE={}",
            report.generation + 1,
            report.best_length,
            report.best_score
        );
        if let Some(phenotype) = &report.phenotype {
            log::info!("\t{}", phenotype);
        }
    }

    fn on_individuals_evaluated(&mut self, evaluated: usize, total: usize) {
        log::debug!("  Evaluated {}/{} genomes", evaluated, total);
    }
}

/// For handing progress to another thread
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete(GenerationReport),
    IndividualsEvaluated { evaluated: usize, total: usize },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        let _ = self
            .sender
            .send(ProgressMessage::GenerationComplete(report.clone()));
    }

    fn on_individuals_evaluated(&mut self, evaluated: usize, total: usize) {
        let _ = self
            .sender
            .send(ProgressMessage::IndividualsEvaluated { evaluated, total });
    }
}

/// Write the per-generation log as JSON lines
pub fn write_history<P: AsRef<Path>>(path: P, history: &[GenerationReport]) -> Result<()> {
    let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
    for report in history {
        serde_json::to_writer(&mut writer, report)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
