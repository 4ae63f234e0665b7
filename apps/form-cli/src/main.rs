//! Office Forms CLI
//!
//! Renders the fuel card management form and the staff gate pass from JSON
//! data files, and checks rendered PDFs for the labels each form prints.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use form_engine::forms::samples;
use form_engine::templates::list_templates;
use form_engine::{
    EngineConfig, FormData, FormKind, FormRenderer, FormVerifier, OutputFormat, RenderOptions,
};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "office-forms")]
#[command(version, about = "Render fuel card and gate pass forms")]
struct Args {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory with logo and signature images (overrides the config file)
    #[arg(long, global = true)]
    assets_dir: Option<PathBuf>,

    /// Organisation name (overrides the config file)
    #[arg(long, global = true)]
    organization: Option<String>,

    /// Hide frame outlines
    #[arg(long, global = true)]
    no_frames: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available forms
    List,

    /// Print sample data for a form
    Sample {
        /// fuel_card or gate_pass
        form: FormKind,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a form from a JSON data file
    Render {
        /// fuel_card or gate_pass
        form: FormKind,

        /// JSON data file; the form's sample data when omitted
        data: Option<PathBuf>,

        /// Output file; the format follows its extension unless --format is given
        #[arg(short, long)]
        output: PathBuf,

        /// Output format: pdf, svg or png
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// PNG resolution
        #[arg(long)]
        ppi: Option<u32>,
    },

    /// Check a rendered PDF for every label of a form
    Verify {
        /// fuel_card or gate_pass
        form: FormKind,

        /// Rendered PDF
        pdf: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // Logs go to stderr so `sample` output can be piped
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&args)?;

    match args.command {
        Command::List => {
            for form in list_templates() {
                println!("{:<10} {:<13} {}", form.name, form.page, form.description);
            }
        }
        Command::Sample { form, output } => {
            let json = sample_json(form)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote {} sample to {}", form, path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Render {
            form,
            data,
            output,
            format,
            ppi,
        } => {
            render(config, form, data.as_deref(), &output, format, ppi)?;
        }
        Command::Verify { form, pdf } => {
            let complete = verify(form, &pdf)?;
            if !complete {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = &args.assets_dir {
        config.assets_dir = Some(dir.clone());
    }
    if let Some(org) = &args.organization {
        config.organization = org.clone();
    }
    if args.no_frames {
        config.show_frame_boundaries = false;
    }
    Ok(config)
}

fn sample_json(form: FormKind) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&samples::sample(form))?)
}

fn read_form(form: FormKind, data: Option<&Path>) -> anyhow::Result<FormData> {
    let value = match data {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read data file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?
        }
        None => samples::sample(form),
    };
    Ok(FormData::from_json(form, value)?)
}

fn render(
    config: EngineConfig,
    form: FormKind,
    data: Option<&Path>,
    output: &Path,
    format: Option<OutputFormat>,
    ppi: Option<u32>,
) -> anyhow::Result<()> {
    let data = read_form(form, data)?;
    let format = match format.or_else(|| OutputFormat::from_path(output)) {
        Some(format) => format,
        None => anyhow::bail!(
            "Cannot tell the output format from '{}'; pass --format",
            output.display()
        ),
    };

    let renderer = FormRenderer::new(config);
    let options = RenderOptions {
        format,
        ppi,
        ..RenderOptions::default()
    };
    let rendered = renderer
        .render_with(&data, &options)
        .with_context(|| format!("Failed to render {}", form))?;

    for warning in &rendered.warnings {
        tracing::warn!("{}", warning.message);
    }

    fs::write(output, &rendered.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Wrote {} ({}, {} page(s))",
        output.display(),
        rendered.mime_type,
        rendered.page_count
    );
    Ok(())
}

fn verify(form: FormKind, pdf: &Path) -> anyhow::Result<bool> {
    let bytes = fs::read(pdf).with_context(|| format!("Failed to read {}", pdf.display()))?;
    let report = FormVerifier::verify(form, &bytes)
        .with_context(|| format!("Failed to read text from {}", pdf.display()))?;
    print!("{}", report.to_text());
    Ok(report.is_complete())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_signatures(form: FormKind) -> serde_json::Value {
        let mut value = samples::sample(form);
        match form {
            FormKind::GatePass => {
                value["supervisor_signature"] = "".into();
                value["employee_approval"]["signature"] = "".into();
                value["feedback_approval"]["signature"] = "".into();
            }
            FormKind::FuelCard => {
                for party in ["prepared", "checked", "approved"] {
                    value["approval"][party]["signature"] = "".into();
                }
                value["receipt"]["signature"] = "".into();
                value["receipt"]["benefactor_signature"] = "".into();
                for party in ["checked", "verified"] {
                    value["accountability"][party]["signature"] = "".into();
                }
            }
        }
        value
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "office-forms",
            "render",
            "gate_pass",
            "pass.json",
            "-o",
            "pass.png",
            "--ppi",
            "72",
            "--no-frames",
        ])
        .unwrap();

        assert!(args.no_frames);
        match args.command {
            Command::Render {
                form, output, ppi, ..
            } => {
                assert_eq!(form, FormKind::GatePass);
                assert_eq!(output, PathBuf::from("pass.png"));
                assert_eq!(ppi, Some(72));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_form_rejected() {
        assert!(Args::try_parse_from(["office-forms", "sample", "payslip"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "office-forms",
            "--organization",
            "Acme",
            "--assets-dir",
            "/srv/forms",
            "list",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.organization, "Acme");
        assert_eq!(config.assets_dir, Some(PathBuf::from("/srv/forms")));
        assert!(config.show_frame_boundaries);
    }

    #[test]
    fn test_sample_json_parses_back() {
        for form in FormKind::ALL {
            let json = sample_json(form).unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert!(FormData::from_json(form, value).is_ok());
        }
    }

    #[test]
    fn test_render_then_verify() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("gate_pass.json");
        fs::write(&data, blank_signatures(FormKind::GatePass).to_string()).unwrap();
        let output = dir.path().join("gate_pass.pdf");

        render(
            EngineConfig::default(),
            FormKind::GatePass,
            Some(&data),
            &output,
            None,
            None,
        )
        .unwrap();

        assert!(fs::read(&output).unwrap().starts_with(b"%PDF"));
        assert!(verify(FormKind::GatePass, &output).unwrap());
    }

    #[test]
    fn test_render_explicit_format() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("fuel.json");
        fs::write(&data, blank_signatures(FormKind::FuelCard).to_string()).unwrap();
        let output = dir.path().join("fuel.out");

        render(
            EngineConfig::default(),
            FormKind::FuelCard,
            Some(&data),
            &output,
            Some(OutputFormat::Svg),
            None,
        )
        .unwrap();

        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_render_needs_a_format() {
        let dir = tempfile::tempdir().unwrap();
        let err = render(
            EngineConfig::default(),
            FormKind::GatePass,
            None,
            &dir.path().join("pass"),
            None,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("--format"));
    }
}
