//! Text and CSV renderings of an [`ExtractionResult`].

use std::io::{self, Write};

use crate::math::{RMatrix, Scalar};
use crate::simulation::ExtractionResult;

/// Formats `value` like C's `%+0.4e`: explicit sign, four decimals and an
/// exponent of at least two digits.
fn sci(value: Scalar) -> String {
    let formatted = format!("{value:+.4e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

fn write_table<W: Write>(w: &mut W, title: &str, m: &RMatrix) -> io::Result<()> {
    writeln!(w, "\n*** {title} ***\n")?;
    write!(w, "    ")?;
    for j in 1..=m.ncols() {
        write!(w, "{j:>12}")?;
    }
    writeln!(w, "\n")?;
    for i in 0..m.nrows() {
        write!(w, "{:>3} ", i + 1)?;
        for j in 0..m.ncols() {
            write!(w, "{} ", sci(m[(i, j)]))?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Writes the resistance, inductance and impedance-magnitude tables with
/// 1-based conductor labels.
pub fn write_report<W: Write>(mut w: W, result: &ExtractionResult) -> io::Result<()> {
    let mhz = result.frequency / 1.0e6;
    writeln!(w, "========================================")?;
    writeln!(w, "RESULTS")?;
    writeln!(w, "========================================")?;
    writeln!(w, "\nFREQUENCY: {:e} Hz ({mhz:.2} MHz)", result.frequency)?;
    write_table(&mut w, "RESISTANCE MATRIX (Ohm/m)", &result.resistance())?;
    write_table(&mut w, "INDUCTANCE MATRIX (H/m)", &result.inductance())?;
    write_table(
        &mut w,
        &format!("IMPEDANCE MAGNITUDE (Ohm) at {mhz:.2} MHz"),
        &result.impedance_magnitude(),
    )?;
    Ok(())
}

/// Writes one CSV row per conductor pair: `i,j,resistance,inductance,magnitude`.
pub fn write_csv<W: Write>(mut w: W, result: &ExtractionResult) -> io::Result<()> {
    let (r, l, z) = (result.resistance(), result.inductance(), result.impedance_magnitude());
    writeln!(w, "i,j,resistance,inductance,magnitude")?;
    for i in 0..r.nrows() {
        for j in 0..r.ncols() {
            writeln!(w, "{},{},{:.16e},{:.16e},{:.16e}", i + 1, j + 1, r[(i, j)], l[(i, j)], z[(i, j)])?;
        }
    }
    Ok(())
}

/// Writes run sizes and timings, one `key: value` per line.
pub fn write_stats<W: Write>(mut w: W, result: &ExtractionResult) -> io::Result<()> {
    let stats = &result.stats;
    writeln!(w, "filaments:            {}", stats.filaments)?;
    writeln!(w, "return filaments:     {}", stats.return_offset)?;
    writeln!(w, "signal conductors:    {}", result.conductor_count())?;
    writeln!(w, "assembly:             {:.3} s", stats.assembly_time.as_secs_f64())?;
    for (label, report) in [("filament", &stats.filament_inversion), ("conductor", &stats.conductor_inversion)] {
        writeln!(
            w,
            "{label} inversion: order {}, {} row swaps, pivot ratio {:.3e}, {:.3} s",
            report.dimension,
            report.row_swaps,
            report.pivot_ratio,
            report.elapsed.as_secs_f64()
        )?;
    }
    writeln!(w, "total:                {:.3} s", stats.total_time.as_secs_f64())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{CMatrix, CScalar};
    use crate::simulation::ExtractionStats;

    fn result() -> ExtractionResult {
        let omega = 2.0e8;
        ExtractionResult {
            frequency: 30.0e6,
            omega,
            impedance: CMatrix::from_row_slice(
                2,
                2,
                &[
                    CScalar::new(3.0, 4.0),
                    CScalar::new(0.5, 0.2),
                    CScalar::new(0.5, 0.2),
                    CScalar::new(-1.25e-3, 0.0),
                ],
            ),
            stats: ExtractionStats::default(),
        }
    }

    #[test]
    fn scientific_format_matches_printf() {
        assert_eq!(sci(3.0), "+3.0000e+00");
        assert_eq!(sci(-1.25e-3), "-1.2500e-03");
        assert_eq!(sci(4.0e-7), "+4.0000e-07");
        assert_eq!(sci(1.5e120), "+1.5000e+120");
        assert_eq!(sci(0.0), "+0.0000e+00");
    }

    #[test]
    fn report_has_three_labelled_tables() {
        let mut out = Vec::new();
        write_report(&mut out, &result()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("*** RESISTANCE MATRIX (Ohm/m) ***"));
        assert!(text.contains("*** INDUCTANCE MATRIX (H/m) ***"));
        assert!(text.contains("*** IMPEDANCE MAGNITUDE (Ohm) at 30.00 MHz ***"));
        assert!(text.contains("  1 +3.0000e+00 +5.0000e-01 "));
        assert!(text.contains("  1 +2.0000e-08 +1.0000e-09 "));
        assert!(text.contains("  1 +5.0000e+00 "));
        assert!(text.contains("  2 +5.0000e-01 -1.2500e-03 "));
    }

    #[test]
    fn csv_has_one_row_per_pair() {
        let mut out = Vec::new();
        write_csv(&mut out, &result()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "i,j,resistance,inductance,magnitude");
        assert!(lines[2].starts_with("1,2,5.0000000000000000e-1,"));
    }

    #[test]
    fn stats_list_both_inversions() {
        let mut out = Vec::new();
        write_stats(&mut out, &result()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("signal conductors:    2"));
        assert!(text.contains("filament inversion: order 0"));
        assert!(text.contains("conductor inversion: order 0"));
    }
}
