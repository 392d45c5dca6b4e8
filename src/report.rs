//! Plain-text rendering of search results.
//!
//! ```text
//! # VOUT = 3.300 V
//! # R1(bottom), R2(top), RSUM, V(nom), 1%[min..max], 5%[min..max]
//! 1.00 MΩ  1.74 MΩ  2.74 MΩ  3.315 V  1% [3.260..3.377]  5% [3.102..3.558]
//! ```

use std::fmt;

use crate::divider::Threshold;
use crate::search::{OkCandidate, PairCandidate, Section, Solution, SubProblem};

/// Format a resistance with a metric suffix and three significant digits.
pub fn format_ohms(ohms: f64) -> String {
    let (value, prefix) = if ohms >= 1e9 {
        (ohms / 1e9, "G")
    } else if ohms >= 1e6 {
        (ohms / 1e6, "M")
    } else if ohms >= 1e3 {
        (ohms / 1e3, "k")
    } else if ohms >= 1.0 {
        (ohms, "")
    } else {
        (ohms * 1e3, "m")
    };
    let decimals = if value < 10.0 {
        2
    } else if value < 100.0 {
        1
    } else {
        0
    };
    format!("{value:.decimals$} {prefix}Ω")
}

/// Format a tolerance fraction as a percentage, e.g. `0.01` as `1%`.
pub fn format_percent(fraction: f64) -> String {
    let text = format!("{:.3}", fraction * 100.0);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}%")
}

impl fmt::Display for SubProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubProblem::Vout(target) => write!(f, "VOUT = {target:.3} V"),
            SubProblem::Overvoltage {
                target,
                never_exceed,
            } => {
                write!(f, "VBAT_OV = {target:.3} V")?;
                if *never_exceed {
                    write!(f, " (NEVER-EXCEED@1%)")?;
                }
                Ok(())
            }
            SubProblem::BatteryOk { prog, hyst } => {
                write!(f, "VBAT_OK PROG={prog:.3} V HYST={hyst:.3} V")
            }
        }
    }
}

/// Displayable report of a whole [`Solution`].
pub struct Report<'a> {
    solution: &'a Solution,
}

impl<'a> Report<'a> {
    pub fn new(solution: &'a Solution) -> Self {
        Self { solution }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tol = format_percent(self.solution.tolerance);
        for section in &self.solution.vout {
            write_pair_section(f, section, &tol)?;
        }
        if let Some(section) = &self.solution.overvoltage {
            write_pair_section(f, section, &tol)?;
        }
        if let Some(section) = &self.solution.battery_ok {
            write_ok_section(f, section, &tol)?;
        }
        Ok(())
    }
}

fn write_band(f: &mut fmt::Formatter<'_>, th: &Threshold, tol: &str) -> fmt::Result {
    write!(
        f,
        "1% [{:.3}..{:.3}]  {tol} [{:.3}..{:.3}]",
        th.one_percent.min, th.one_percent.max, th.at_tolerance.min, th.at_tolerance.max
    )
}

fn write_pair_section(
    f: &mut fmt::Formatter<'_>,
    section: &Section<PairCandidate>,
    tol: &str,
) -> fmt::Result {
    writeln!(f, "\n# {}", section.problem)?;
    writeln!(f, "# R1(bottom), R2(top), RSUM, V(nom), 1%[min..max], {tol}[min..max]")?;
    if section.candidates.is_empty() {
        return writeln!(f, "# no candidates");
    }
    for c in &section.candidates {
        write!(
            f,
            "{}  {}  {}  {:.3} V  ",
            format_ohms(c.bottom),
            format_ohms(c.top),
            format_ohms(c.rsum),
            c.output.nominal
        )?;
        write_band(f, &c.output, tol)?;
        writeln!(f)?;
    }
    Ok(())
}

fn write_ok_section(
    f: &mut fmt::Formatter<'_>,
    section: &Section<OkCandidate>,
    tol: &str,
) -> fmt::Result {
    writeln!(f, "\n# {}", section.problem)?;
    writeln!(
        f,
        "# R_OK1(bottom), R_OK2(mid), R_OK3(top), RSUM, VBAT_OK_PROG(nom)[1%/{tol}], VBAT_OK_HYST(nom)[1%/{tol}]"
    )?;
    if section.candidates.is_empty() {
        return writeln!(f, "# no candidates");
    }
    for c in &section.candidates {
        write!(
            f,
            "{}  {}  {}  {}  ",
            format_ohms(c.bottom),
            format_ohms(c.mid),
            format_ohms(c.top),
            format_ohms(c.rsum)
        )?;
        write!(f, "VBAT_OK_PROG={:.3} V [", c.prog.nominal)?;
        write_band(f, &c.prog, tol)?;
        write!(f, "]  VBAT_OK_HYST={:.3} V [", c.hyst.nominal)?;
        write_band(f, &c.hyst, tol)?;
        writeln!(f, "]")?;
    }
    Ok(())
}
