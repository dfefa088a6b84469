use anyhow::{anyhow, bail, Context};
use nalgebra::DMatrix;
use std::collections::BTreeSet;
use std::io::{BufRead, BufReader, BufWriter, Write};

/// ```
/// use std::io::BufRead;
/// let reader = scanchip::reader("tests/scanchip/blocks.tsv").unwrap();
/// assert_eq!(reader.lines().count(), 12);
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

/// Reads a contact matrix: tab-separated, no header, one row per line.
///
/// Blank lines are skipped. The matrix must be square.
pub fn read_matrix(input: &str) -> anyhow::Result<DMatrix<f64>> {
    parse_matrix(reader(input)?).with_context(|| format!("reading matrix {}", input))
}

pub fn parse_matrix<R: BufRead>(reader: R) -> anyhow::Result<DMatrix<f64>> {
    let mut values: Vec<f64> = vec![];
    let mut n_cols: Option<usize> = None;
    let mut n_rows = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let row: Vec<f64> = line
            .split('\t')
            .map(|field| {
                field
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| anyhow!("line {}: invalid value '{}': {}", idx + 1, field, e))
            })
            .collect::<anyhow::Result<_>>()?;

        match n_cols {
            None => n_cols = Some(row.len()),
            Some(n) if n != row.len() => {
                bail!("line {}: expected {} columns, found {}", idx + 1, n, row.len())
            }
            _ => {}
        }

        values.extend(row);
        n_rows += 1;
    }

    let n_cols = n_cols.unwrap_or(0);
    if n_rows == 0 {
        bail!("empty contact matrix");
    }
    if n_rows != n_cols {
        bail!("contact matrix is not square: {} rows, {} columns", n_rows, n_cols);
    }

    Ok(DMatrix::from_row_slice(n_rows, n_cols, &values))
}

/// Reads TADs, one per line, bin indices separated by tabs or spaces.
///
/// Lines starting with `#` and blank lines are skipped.
pub fn read_tads(input: &str) -> anyhow::Result<Vec<Vec<usize>>> {
    let mut tads = vec![];

    for (idx, line) in reader(input)?.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let tad = line
            .split_whitespace()
            .map(|field| {
                field.parse::<usize>().map_err(|e| {
                    anyhow!("{} line {}: invalid bin '{}': {}", input, idx + 1, field, e)
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        tads.push(tad);
    }

    Ok(tads)
}

/// Reads boundary positions separated by any whitespace.
///
/// Lines starting with `#` are skipped. Duplicates collapse.
pub fn read_boundaries(input: &str) -> anyhow::Result<BTreeSet<i64>> {
    let mut boundaries = BTreeSet::new();

    for (idx, line) in reader(input)?.lines().enumerate() {
        let line = line?;
        if line.starts_with('#') {
            continue;
        }

        for field in line.split_whitespace() {
            let b = field.parse::<i64>().map_err(|e| {
                anyhow!("{} line {}: invalid boundary '{}': {}", input, idx + 1, field, e)
            })?;
            boundaries.insert(b);
        }
    }

    Ok(boundaries)
}
