//! SandPro command-line front end.
//!
//! Reads a TOML parameter file, validates it against the parameter registry
//! and prints the borehole-frame stress tensor.

use clap::{Parser, Subcommand, ValueEnum};
use sandpro_core::params::{self, keys};
use sandpro_core::report::{format_json, format_table, format_value, MAX_PRECISION};
use sandpro_core::{
    sweep_orientations, transform, Form, OrientationSample, OrientationSweep, OutputFormat,
    ParameterFile, PrincipalStresses,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Wellbore stress transformation for sand-production prediction
#[derive(Parser, Debug)]
#[command(name = "sandpro", version)]
#[command(about = "Compute borehole-frame stress components from in-situ stresses")]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform the stresses in a parameter file
    Compute {
        /// Parameter file (TOML)
        file: PathBuf,

        /// Decimal places (overrides [output] precision)
        #[arg(long, value_parser = parse_precision)]
        precision: Option<usize>,

        /// Output format (overrides [output] format)
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Skip registry range checks
        #[arg(long)]
        no_validate: bool,
    },

    /// Evaluate the stresses in a parameter file over a grid of orientations
    Sweep {
        /// Parameter file (TOML); alpha and i are ignored
        file: PathBuf,

        /// Azimuth spacing in degrees
        #[arg(long, default_value_t = 15.0)]
        azimuth_step: f64,

        /// Inclination spacing in degrees
        #[arg(long, default_value_t = 15.0)]
        inclination_step: f64,

        /// Largest inclination in degrees
        #[arg(long, default_value_t = 90.0)]
        max_inclination: f64,

        /// Decimal places (overrides [output] precision)
        #[arg(long, value_parser = parse_precision)]
        precision: Option<usize>,
    },

    /// List the parameter registry
    Params,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

fn parse_precision(s: &str) -> Result<usize, String> {
    let precision: usize = s.parse().map_err(|_| format!("not a whole number: '{s}'"))?;
    if precision > MAX_PRECISION {
        return Err(format!("at most {MAX_PRECISION} decimal places"));
    }
    Ok(precision)
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "sandpro=debug,sandpro_core=debug"
    } else {
        "sandpro=warn,sandpro_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> sandpro_core::Result<()> {
    match command {
        Command::Compute {
            file,
            precision,
            format,
            no_validate,
        } => {
            let params = ParameterFile::load(&file)?;
            let form = load_form(&params, !no_validate)?;
            let input = form.stress_input()?;
            let result = transform(&input)?;
            info!(?input, "transform complete");

            let precision = precision.unwrap_or(params.output.precision);
            match format.map(OutputFormat::from).unwrap_or(params.output.format) {
                OutputFormat::Text => print!("{}", format_table(&result, precision)),
                OutputFormat::Json => println!("{}", format_json(&result)?),
            }
        }
        Command::Sweep {
            file,
            azimuth_step,
            inclination_step,
            max_inclination,
            precision,
        } => {
            let params = ParameterFile::load(&file)?;
            let form = load_form(&params, true)?;
            let principal = PrincipalStresses::new(
                form.number(keys::SIGMA_H_MIN)?,
                form.number(keys::SIGMA_H_MAX)?,
                form.number(keys::SIGMA_V)?,
            );
            let sweep = OrientationSweep {
                azimuth_step_deg: azimuth_step,
                inclination_step_deg: inclination_step,
                max_inclination_deg: max_inclination,
            };
            let samples = sweep_orientations(&principal, &sweep)?;
            let p = precision.unwrap_or(params.output.precision);

            println!("azimuth,inclination,sigma_xx,sigma_yy,sigma_zz,tau_xy,tau_yz,tau_xz");
            for sample in &samples {
                println!("{}", csv_row(sample, p));
            }
        }
        Command::Params => {
            for (group, members) in params::groups() {
                println!("{group}");
                for spec in members {
                    println!("  {:<16} {:<32} {}", spec.key, spec.display_name, spec.unit);
                }
            }
        }
    }
    Ok(())
}

fn csv_row(sample: &OrientationSample, precision: usize) -> String {
    let values: Vec<String> = sample
        .stress
        .voigt()
        .iter()
        .map(|&v| format_value(v, precision))
        .collect();
    format!(
        "{},{},{}",
        sample.azimuth_deg,
        sample.inclination_deg,
        values.join(",")
    )
}

fn load_form(params: &ParameterFile, validate: bool) -> sandpro_core::Result<Form> {
    let form = params.to_form()?;
    if validate {
        form.validate()?;
    } else {
        debug!("range validation skipped");
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_compute_overrides() {
        let args = Args::parse_from([
            "sandpro", "compute", "well.toml", "--precision", "4", "--format", "json",
        ]);
        match args.command {
            Command::Compute {
                file,
                precision,
                format,
                no_validate,
            } => {
                assert_eq!(file, PathBuf::from("well.toml"));
                assert_eq!(precision, Some(4));
                assert!(matches!(format, Some(Format::Json)));
                assert!(!no_validate);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_sweep_defaults() {
        let args = Args::parse_from(["sandpro", "-v", "sweep", "well.toml"]);
        assert!(args.verbose);
        match args.command {
            Command::Sweep {
                azimuth_step,
                max_inclination,
                ..
            } => {
                assert_eq!(azimuth_step, 15.0);
                assert_eq!(max_inclination, 90.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_load_form_validation_switch() {
        let params = ParameterFile::from_toml_str(
            "[parameters]\nsigma_h = 4000\nsigma_H = 6000\nsigma_v = 7000\nalpha = 30\ni = 500\n",
        )
        .unwrap();
        assert!(load_form(&params, true).is_err());
        let form = load_form(&params, false).unwrap();
        assert_eq!(form.number("i").unwrap(), 500.0);
    }

    #[test]
    fn test_precision_bounded() {
        let args = Args::parse_from(["sandpro", "sweep", "well.toml", "--precision", "17"]);
        assert!(matches!(args.command, Command::Sweep { precision: Some(17), .. }));
        assert!(Args::try_parse_from(["sandpro", "compute", "well.toml", "--precision", "400"]).is_err());
        assert!(Args::try_parse_from(["sandpro", "sweep", "well.toml", "--precision", "-1"]).is_err());
    }

    #[test]
    fn test_csv_row_vertical_well() {
        let principal = PrincipalStresses::new(4000.0, 6000.0, 7000.0);
        let sweep = OrientationSweep {
            azimuth_step_deg: 90.0,
            inclination_step_deg: 90.0,
            max_inclination_deg: 0.0,
        };
        let samples = sweep_orientations(&principal, &sweep).unwrap();
        assert_eq!(csv_row(&samples[0], 2), "0,0,6000.00,4000.00,7000.00,0.00,0.00,0.00");
        assert!(samples.iter().all(|s| !csv_row(s, 2).contains("-0.00")));
    }
}
