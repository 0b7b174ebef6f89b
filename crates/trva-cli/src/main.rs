use clap::Parser;
use clap_complete::{generate, Shell};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tabwriter::TabWriter;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

mod cli;

use cli::{build_cli_command, Cli, Commands, ReportFormatArg};
use trva_core::envelope::VOLTAGE_CLASSES;
use trva_core::{run_analysis, AnalysisConfig, TestDuty};
use trva_io::{read_brk_export, read_trv_export, write_report};

struct AnalyzeArgs<'a> {
    trv: &'a Path,
    brk: &'a Path,
    config: AnalysisConfig,
    out: Option<&'a PathBuf>,
    format: ReportFormatArg,
}

fn run_analyze(args: AnalyzeArgs<'_>) -> anyhow::Result<()> {
    // Preconditions checked before any file is opened.
    args.config.validate()?;

    info!(
        trv = %args.trv.display(),
        brk = %args.brk.display(),
        "reading simulator exports"
    );
    let trv = read_trv_export(args.trv)?;
    let brk = read_brk_export(args.brk)?;

    let analysis = run_analysis(&args.config, &trv, &brk)?;
    write_report(&analysis, args.format.into(), args.out.map(PathBuf::as_path))?;
    Ok(())
}

fn print_classes() -> anyhow::Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(
        writer,
        "CLASS (kV)\tDUTY\tENVELOPE PEAK (kV)\tENVELOPE RRRV (kV/µs)"
    )?;
    for class in VOLTAGE_CLASSES.iter() {
        for duty in TestDuty::ALL {
            let envelope = class.envelope(duty);
            writeln!(
                writer,
                "{}\t{}\t{:.0}\t{:.1}",
                class.label(),
                duty,
                envelope.peak_kv,
                envelope.rrrv_kv_per_us
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn generate_completions(shell: Shell, out: Option<&Path>) -> anyhow::Result<()> {
    let mut cmd = build_cli_command();
    if let Some(path) = out {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        generate(shell, &mut cmd, "trva", &mut file);
        println!("Wrote {shell:?} completion to {}", path.display());
    } else {
        let stdout = &mut io::stdout();
        generate(shell, &mut cmd, "trva", stdout);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match &cli.command {
        Some(Commands::Analyze {
            trv,
            brk,
            rating,
            voltage_class,
            local_station,
            remote_station,
            breaker_names,
            out,
            format,
        }) => {
            let args = AnalyzeArgs {
                trv,
                brk,
                config: AnalysisConfig {
                    local_station: local_station.clone(),
                    remote_station: remote_station.clone(),
                    breaker_names: breaker_names.clone(),
                    rating_ka: *rating,
                    voltage_class: voltage_class.clone(),
                },
                out: out.as_ref(),
                format: *format,
            };
            match run_analyze(args) {
                Ok(_) => info!("Analysis complete"),
                Err(e) => {
                    error!("Analysis failed: {e:#}");
                    process::exit(1);
                }
            }
        }
        Some(Commands::Classes) => match print_classes() {
            Ok(_) => info!("Voltage classes listed"),
            Err(e) => {
                error!("Listing voltage classes failed: {e:#}");
                process::exit(1);
            }
        },
        Some(Commands::Completions { shell, out }) => {
            match generate_completions(*shell, out.as_deref()) {
                Ok(_) => info!("Completions generated"),
                Err(e) => {
                    error!("Completions generation failed: {e:#}");
                    process::exit(1);
                }
            }
        }
        None => {
            info!("No subcommand provided. Use `trva --help` for more information.");
        }
    }
}
