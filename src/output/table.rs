//! Comma-separated persistence of observation tables
//!
//! No header row; one observation per record. Values use the `%.18e`
//! layout of numpy's `savetxt`: 18 fractional digits and a signed exponent
//! of at least two digits (`1.000000000000000000e+00`).

use csv::{Writer, WriterBuilder};
use ndarray::Array2;
use std::io::Write;
use std::path::Path;

use crate::error::SynthResult;

/// One value in `%.18e` notation
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{:.18e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

fn write_rows<W: Write>(wtr: &mut Writer<W>, series: &Array2<f64>) -> SynthResult<()> {
    for row in series.rows() {
        wtr.write_record(row.iter().map(|&v| format_value(v)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write one record per row, no header
pub fn write_csv<W: Write>(series: &Array2<f64>, writer: W) -> SynthResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    write_rows(&mut wtr, series)
}

/// Create (or truncate) `path` and write the series into it
pub fn save_csv<P: AsRef<Path>>(series: &Array2<f64>, path: P) -> SynthResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;
    write_rows(&mut wtr, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;
    use csv::ReaderBuilder;
    use ndarray::array;

    #[test]
    fn test_format_value_exponent() {
        assert_eq!(format_value(1.0), "1.000000000000000000e+00");
        assert_eq!(format_value(-0.5), "-5.000000000000000000e-01");
        assert_eq!(format_value(1e-3), "1.000000000000000000e-03");
        assert_eq!(format_value(0.0), "0.000000000000000000e+00");
        assert_eq!(format_value(2.5e100), "2.500000000000000000e+100");
        assert_eq!(format_value(f64::NAN), "nan");
        assert_eq!(format_value(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_write_csv_layout() {
        let series = array![[1.0, -0.5], [0.25, 1e-3]];
        let mut buf = Vec::new();
        write_csv(&series, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "1.000000000000000000e+00,-5.000000000000000000e-01");

        let parsed: Vec<Vec<f64>> = lines
            .iter()
            .map(|l| l.split(',').map(|v| v.parse().unwrap()).collect())
            .collect();
        assert_eq!(parsed, vec![vec![1.0, -0.5], vec![0.25, 1e-3]]);
    }

    #[test]
    fn test_write_csv_empty() {
        let series = Array2::<f64>::zeros((0, 4));
        let mut buf = Vec::new();
        write_csv(&series, &mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_save_csv_reads_back() {
        let path = std::env::temp_dir().join(format!("lti_cycle_synth_{}.csv", std::process::id()));
        let series = array![[0.1, 2.0, -3.5], [4.0, -0.0, 1e-7]];
        save_csv(&series, &path).unwrap();

        let mut reader = ReaderBuilder::new().has_headers(false).from_path(&path).unwrap();
        let rows: Vec<Vec<f64>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|v| v.parse().unwrap()).collect())
            .collect();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(rows, vec![vec![0.1, 2.0, -3.5], vec![4.0, -0.0, 1e-7]]);
    }

    #[test]
    fn test_save_csv_missing_directory() {
        let path = std::env::temp_dir()
            .join("lti_cycle_synth_no_such_dir")
            .join("series.csv");
        let series = array![[1.0]];
        assert!(matches!(save_csv(&series, &path), Err(SynthError::Csv(_))));
    }
}
