//! Divcalc - resistor divider calculator for bq25570-class chargers
//!
//! # Usage
//!
//! ```bash
//! divcalc --vout 3.3 --vbat-ov 4.2 --never-exceed-ov --series E96
//! ```

use std::process::ExitCode;

use clap::{ArgAction, CommandFactory, Parser};
use divcalc_core::{
    divider::VBIAS_TYP, error::Result, DivcalcError, DividerSearch, Reference, Report,
    SearchConfig, Series, Targets, DEFAULT_DECADES, DEFAULT_LIMIT, DEFAULT_RSUM_MAX,
    DEFAULT_TOLERANCE, DEFAULT_VBAT_UV,
};
use env_logger::Env;
use log::debug;

const EXAMPLES: &str = "\
Examples:

  # Common rails
  divcalc --vout 3.0 3.3

  # LiPo 1-cell (VBAT_OV = 4.2 V)
  divcalc --vbat-ov 4.2 --never-exceed-ov

  # Battery-good window
  divcalc --vbat-ok-prog 3.5 --vbat-ok-hyst 3.7";

/// Resistor divider optimizer for bq25570 VOUT, VBAT_OV and VBAT_OK pins
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
struct Args {
    /// Target VOUT values (V)
    #[arg(long, value_name = "V", num_args = 1..)]
    vout: Vec<f64>,

    /// Target VBAT_OV (V)
    #[arg(long, value_name = "V")]
    vbat_ov: Option<f64>,

    /// Ensure the 1% worst case never exceeds VBAT_OV
    #[arg(long)]
    never_exceed_ov: bool,

    /// VBAT_OK falling threshold (V)
    #[arg(long, value_name = "V")]
    vbat_ok_prog: Option<f64>,

    /// VBAT_OK rising threshold (V)
    #[arg(long, value_name = "V")]
    vbat_ok_hyst: Option<f64>,

    /// Internal UV reference (V)
    #[arg(long, value_name = "V", default_value_t = DEFAULT_VBAT_UV)]
    vbat_uv: f64,

    /// Typical bandgap reference VBIAS (V); worst-case corners keep the datasheet spread
    #[arg(long, value_name = "V", default_value_t = VBIAS_TYP)]
    vbias: f64,

    /// Resistor series (E24 or E96)
    #[arg(long, default_value = "E24")]
    series: Series,

    /// Decade range, e.g. 6 7 for ~1-91 MΩ
    #[arg(
        long,
        num_args = 2,
        action = ArgAction::Set,
        value_names = ["MIN", "MAX"],
        default_values_t = [DEFAULT_DECADES.0, DEFAULT_DECADES.1],
        allow_negative_numbers = true
    )]
    decades: Vec<i32>,

    /// Max total resistance per network (Ω)
    #[arg(long, value_name = "OHMS", default_value_t = DEFAULT_RSUM_MAX)]
    rsum_max: f64,

    /// Max candidates per sub-problem
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Resistor tolerance for the worst-case band (0.01 = 1%)
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn config(&self) -> Result<SearchConfig> {
        let &[min, max] = self.decades.as_slice() else {
            return Err(DivcalcError::constraint(
                "decades",
                format!("expected MIN and MAX, got {} values", self.decades.len()),
            ));
        };
        Ok(SearchConfig::new()
            .with_series(self.series)
            .with_decades(min, max)
            .with_reference(Reference::with_typical(self.vbias)?)
            .with_rsum_max(Some(self.rsum_max))
            .with_never_exceed_ov(self.never_exceed_ov)
            .with_tolerance(self.tolerance)
            .with_limit(self.limit))
    }

    fn targets(&self) -> Targets {
        Targets {
            vout: self.vout.clone(),
            vbat_ov: self.vbat_ov,
            vbat_ok_prog: self.vbat_ok_prog,
            vbat_ok_hyst: self.vbat_ok_hyst,
            vbat_uv: self.vbat_uv,
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.config()?;
    debug!("{config:?}");

    let search = DividerSearch::new(config)?;
    let solution = search.solve(&args.targets())?;

    print!("{}", Report::new(&solution));
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let env = if args.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    // Nothing requested: show usage like a bare invocation
    if args.targets().is_empty() && !args.never_exceed_ov {
        return match Args::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["divcalc", "--vout", "3.3"]);
        assert_eq!(args.series, Series::E24);
        assert_eq!(args.decades, vec![6, 7]);
        assert_eq!(args.limit, DEFAULT_LIMIT);
        assert!(!args.never_exceed_ov);
        assert!(args.config().unwrap().validate().is_ok());
        assert_eq!(args.targets().vout, vec![3.3]);
    }

    #[test]
    fn test_full_invocation() {
        let args = Args::parse_from([
            "divcalc",
            "--vout",
            "3.0",
            "3.3",
            "--vbat-ov",
            "4.2",
            "--never-exceed-ov",
            "--vbat-ok-prog",
            "3.5",
            "--vbat-ok-hyst",
            "3.7",
            "--series",
            "e96",
            "--decades",
            "5",
            "6",
            "--rsum-max",
            "10e6",
            "--tolerance",
            "0.05",
        ]);
        assert_eq!(args.series, Series::E96);
        assert_eq!(args.decades, vec![5, 6]);

        let config = args.config().unwrap();
        assert_eq!(config.constraints.rsum_max, Some(10e6));
        assert!(config.constraints.never_exceed_ov);

        let targets = args.targets();
        assert_eq!(targets.vout, vec![3.0, 3.3]);
        assert_eq!(targets.vbat_ok_prog, Some(3.5));
    }

    #[test]
    fn test_unknown_series_rejected() {
        assert!(Args::try_parse_from(["divcalc", "--series", "E12"]).is_err());
    }

    #[test]
    fn test_repeated_decades_not_merged() {
        let parsed = Args::try_parse_from([
            "divcalc",
            "--vout",
            "3.3",
            "--decades",
            "6",
            "7",
            "--decades",
            "3",
            "4",
        ]);
        match parsed {
            Err(_) => {}
            Ok(args) => {
                assert_eq!(args.decades.len(), 2);
                assert_eq!(args.config().unwrap().decades, (3, 4));
            }
        }
    }

    #[test]
    fn test_decades_need_exactly_two_values() {
        let mut args = Args::parse_from(["divcalc", "--vout", "3.3"]);
        args.decades = vec![6, 7, 3, 4];
        assert!(matches!(
            args.config().unwrap_err(),
            DivcalcError::InvalidConstraint { .. }
        ));
    }

    #[test]
    fn test_reversed_decades_fail_before_search() {
        let args = Args::parse_from(["divcalc", "--vout", "3.3", "--decades", "7", "6"]);
        assert!(run(&args).is_err());
    }
}
