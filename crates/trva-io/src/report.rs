//! Report emitters for the duty analysis.
//!
//! Renders, per clearing side and per duty bucket, the winning run/phase
//! (or the explicit no-data outcome), the simulated peak voltage and rate
//! of rise, and the standard envelope values for the declared voltage
//! class, so withstand margin can be read off directly.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tabwriter::TabWriter;
use tracing::info;
use trva_core::{voltage_class, ClearingSide, DutyAnalysis, DutyPeaks, VoltageClass};

/// Concrete report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Tab-aligned text table
    Plain,
    /// Pretty-printed JSON of the full analysis result
    Json,
}

/// Render the report and write it to `out`, or to stdout when absent.
pub fn write_report(
    analysis: &DutyAnalysis,
    format: ReportFormat,
    out: Option<&Path>,
) -> Result<()> {
    let body = render_report(analysis, format)?;
    match out {
        Some(path) => {
            fs::write(path, &body)
                .with_context(|| format!("writing report to '{}'", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => print!("{body}"),
    }
    Ok(())
}

pub fn render_report(analysis: &DutyAnalysis, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Plain => render_plain(analysis),
        ReportFormat::Json => {
            let mut body = serde_json::to_string_pretty(analysis)
                .context("serializing duty analysis to JSON")?;
            body.push('\n');
            Ok(body)
        }
    }
}

fn render_plain(analysis: &DutyAnalysis) -> Result<String> {
    let config = &analysis.config;
    let class = voltage_class(&config.voltage_class)
        .ok_or_else(|| anyhow!("unknown TRV voltage class '{}'", config.voltage_class))?;

    let mut body = String::new();
    body.push_str("TRV test-duty analysis\n");
    body.push_str(&format!("Breaker(s)        : {}\n", config.breaker_names));
    body.push_str(&format!("Local station     : {}\n", config.local_station));
    body.push_str(&format!("Remote station    : {}\n", config.remote_station));
    body.push_str(&format!("Voltage class     : {} kV rms\n", class.label()));
    body.push_str(&format!(
        "Interrupting rating: {} kA\n",
        config.rating_ka
    ));

    for (side, peaks) in [
        (ClearingSide::Local, &analysis.local),
        (ClearingSide::Remote, &analysis.remote),
    ] {
        body.push_str(&format!("\n== {} terminal clears first ==\n", side.label()));
        body.push_str(&side_table(peaks, class)?);
    }

    Ok(body)
}

fn side_table(peaks: &DutyPeaks, class: &VoltageClass) -> Result<String> {
    let mut writer = TabWriter::new(Vec::new());
    writeln!(
        writer,
        "DUTY\tRUN\tPHASE\tPEAK (kV)\tRRRV (kV/µs)\tENVELOPE PEAK (kV)\tENVELOPE RRRV (kV/µs)"
    )?;
    for (duty, peak) in peaks.iter() {
        let envelope = class.envelope(duty);
        match peak {
            Some(peak) => writeln!(
                writer,
                "{}\t{}\t{}\t{:.3}\t{:.3}\t{:.0}\t{:.1}",
                duty,
                peak.run,
                peak.phase,
                peak.peak_kv,
                peak.rrrv_kv_per_us,
                envelope.peak_kv,
                envelope.rrrv_kv_per_us
            )?,
            None => writeln!(
                writer,
                "{}\tno qualifying run\t-\t-\t-\t{:.0}\t{:.1}",
                duty, envelope.peak_kv, envelope.rrrv_kv_per_us
            )?,
        }
    }
    writer.flush()?;
    let bytes = writer.into_inner().map_err(|err| anyhow!("{err}"))?;
    String::from_utf8(bytes).context("report table is not valid UTF-8")
}
