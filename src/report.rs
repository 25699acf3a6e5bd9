// wob-catalog/src/report.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, warn};

use crate::defect::{Defect, DefectKind};

/// Renders the output of one check. Called once per check, with an empty
/// slice when the check found nothing; rendering never feeds back into validation.
pub trait Reporter {
    fn report(&mut self, kind: DefectKind, defects: &[Defect<'_>]) -> Result<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    /// Emit defects as tracing events instead of writing a report.
    Log,
}

impl ReportFormat {
    pub fn reporter<'w, W: Write + 'w>(self, out: W) -> Box<dyn Reporter + 'w> {
        match self {
            Self::Text => Box::new(TextReporter::new(out)),
            Self::Json => Box::new(JsonReporter::new(out)),
            Self::Log => Box::new(TracingReporter),
        }
    }
}

/// Heading plus one `- ` line per defect; silent for empty lists.
pub struct TextReporter<W: Write> { out: W }

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self { Self { out } }
    pub fn into_inner(self) -> W { self.out }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, kind: DefectKind, defects: &[Defect<'_>]) -> Result<()> {
        if defects.is_empty() { return Ok(()); }
        writeln!(self.out, "{}", kind.heading())?;
        for d in defects {
            writeln!(self.out, "- {d}")?;
        }
        self.out.flush().context("flush text report")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonEntry<'r, 'a> {
    kind: DefectKind,
    defects: &'r [Defect<'a>],
}

/// One JSON object per check and line, written even when the check is clean.
pub struct JsonReporter<W: Write> { out: W }

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self { Self { out } }
    pub fn into_inner(self) -> W { self.out }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, kind: DefectKind, defects: &[Defect<'_>]) -> Result<()> {
        serde_json::to_writer(&mut self.out, &JsonEntry { kind, defects }).context("write json report")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, kind: DefectKind, defects: &[Defect<'_>]) -> Result<()> {
        if defects.is_empty() {
            debug!(kind = kind.key(), "no defects");
        }
        for d in defects {
            warn!(kind = kind.key(), index = d.index(), "{d}");
        }
        Ok(())
    }
}
