use crate::errors::OutputError;

/// Column layouts for the `fort.N` summary files the wrapper reads.
///
/// fort.18 tracks the reference particle and is keyed on `dist`; fort.24/25/26
/// carry the x/y/z beam moments and are keyed on `z`. Every other fort number
/// parses with positional columns only.
fn column_names(fort: u32) -> Option<&'static [&'static str]> {
    match fort {
        18 => Some(&[
            "t",
            "dist",
            "gamma",
            "kinetic_energy",
            "beta",
            "r_max",
            "delta_gamma",
        ]),
        24 => Some(&[
            "t", "z", "avg_x", "rms_x", "avg_px", "rms_px", "alpha_x", "emit_x",
        ]),
        25 => Some(&[
            "t", "z", "avg_y", "rms_y", "avg_py", "rms_py", "alpha_y", "emit_y",
        ]),
        26 => Some(&[
            "t", "z", "avg_z", "rms_z", "avg_pz", "rms_pz", "alpha_z", "emit_z",
        ]),
        _ => None,
    }
}

/// Numeric table read from a `fort.N` file: whitespace-separated floats, one
/// row per line. Plain vectors; tables are a few thousand rows at most.
#[derive(Clone, Debug)]
pub struct FortTable {
    fort: u32,
    names: Option<&'static [&'static str]>,
    rows: Vec<Vec<f64>>,
}

impl FortTable {
    /// Parse the text of `fort.{fort}`. Fortran `D` exponents are accepted.
    pub fn parse(fort: u32, text: &str) -> Result<Self, OutputError> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut expected = 0usize;
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut row = Vec::with_capacity(expected);
            for token in line.split_whitespace() {
                let value = parse_fortran_float(token).ok_or_else(|| OutputError::BadNumber {
                    line: idx + 1,
                    token: token.to_string(),
                })?;
                row.push(value);
            }
            if rows.is_empty() {
                expected = row.len();
            } else if row.len() != expected {
                return Err(OutputError::RaggedRow {
                    line: idx + 1,
                    expected,
                    found: row.len(),
                });
            }
            rows.push(row);
        }
        if rows.is_empty() {
            return Err(OutputError::Empty);
        }
        Ok(Self {
            fort,
            names: column_names(fort),
            rows,
        })
    }

    pub fn fort(&self) -> u32 {
        self.fort
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.rows[0].len()
    }

    /// Named layout, when this fort number has one.
    pub fn names(&self) -> Option<&'static [&'static str]> {
        self.names
    }

    /// Longitudinal key column for nearest-row lookups: `dist` for fort.18,
    /// `z` for the moment files.
    pub fn axis(&self) -> Option<&'static str> {
        match self.fort {
            18 => Some("dist"),
            24 | 25 | 26 => Some("z"),
            _ => None,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names?.iter().position(|n| *n == name)
    }

    /// Values of a named column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, OutputError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| OutputError::NoSuchColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|r| r[idx]).collect())
    }

    /// For each target, the row whose `key` column is closest to it.
    pub fn rows_nearest(&self, key: &str, targets: &[f64]) -> Result<Vec<&[f64]>, OutputError> {
        let idx = self
            .column_index(key)
            .ok_or_else(|| OutputError::NoSuchColumn(key.to_string()))?;
        let mut picked = Vec::with_capacity(targets.len());
        for target in targets {
            let mut best = self.rows[0].as_slice();
            let mut best_dist = f64::INFINITY;
            for row in &self.rows {
                let dist = (row[idx] - target).abs();
                if dist < best_dist {
                    best_dist = dist;
                    best = row.as_slice();
                }
            }
            picked.push(best);
        }
        Ok(picked)
    }
}

// IMPACT-T is Fortran; some builds write exponents as 1.23D+04.
fn parse_fortran_float(token: &str) -> Option<f64> {
    match token.parse() {
        Ok(v) => Some(v),
        Err(_) if token.contains(['D', 'd']) => token.replace(['D', 'd'], "E").parse().ok(),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fortran_d_exponents_parse() {
        assert_eq!(parse_fortran_float("1.5D+01"), Some(15.0));
        assert_eq!(parse_fortran_float("2.0d-1"), Some(0.2));
        assert_eq!(parse_fortran_float("banana"), None);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = FortTable::parse(99, "1.0 2.0\n3.0\n").unwrap_err();
        assert!(matches!(
            err,
            OutputError::RaggedRow {
                line: 2,
                expected: 2,
                found: 1
            }
        ));
    }
}
