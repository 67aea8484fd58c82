//! Descriptor-driven schema validation for integration inputs
//!
//! Each named input carries an explicit list of required columns.
//! Validation checks every input before failing, so a single error
//! reports all offending inputs and their missing columns at once.

use crate::error::{FiscalError, Result};
use polars::prelude::DataFrame;
use std::fmt;

/// Required columns for one named integration input
#[derive(Debug, Clone)]
pub struct SchemaRequirement {
    /// Name of the input, used in error messages
    pub input: &'static str,
    /// Columns the input must expose
    pub columns: &'static [&'static str],
}

/// A single input that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Name of the offending input
    pub input: String,
    /// Columns absent from the input
    pub missing: Vec<String>,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input '{}' is missing required columns [{}]",
            self.input,
            self.missing.join(", ")
        )
    }
}

/// Validate every input against its requirement, accumulating all
/// violations before failing.
pub fn validate_schemas(inputs: &[(&DataFrame, &SchemaRequirement)]) -> Result<()> {
    let mut violations = Vec::new();

    for (df, requirement) in inputs {
        let present = df.get_column_names();
        let missing: Vec<String> = requirement
            .columns
            .iter()
            .filter(|col| !present.contains(*col))
            .map(|col| col.to_string())
            .collect();

        if !missing.is_empty() {
            violations.push(SchemaViolation {
                input: requirement.input.to_string(),
                missing,
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(FiscalError::Schema(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame(columns: &[&str]) -> DataFrame {
        let series: Vec<Series> = columns
            .iter()
            .map(|name| Series::new(name, vec![1.0_f64]))
            .collect();
        DataFrame::new(series).unwrap()
    }

    #[test]
    fn passes_when_all_columns_present() {
        let df = frame(&["year", "revenue"]);
        let requirement = SchemaRequirement {
            input: "revenue",
            columns: &["year", "revenue"],
        };
        assert!(validate_schemas(&[(&df, &requirement)]).is_ok());
    }

    #[test]
    fn accumulates_violations_across_inputs() {
        let first = frame(&["year"]);
        let second = frame(&["value"]);
        let requirements = [
            SchemaRequirement {
                input: "revenue",
                columns: &["year", "revenue"],
            },
            SchemaRequirement {
                input: "expenditure",
                columns: &["year", "expenditure"],
            },
        ];

        let result = validate_schemas(&[(&first, &requirements[0]), (&second, &requirements[1])]);
        match result {
            Err(FiscalError::Schema(violations)) => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].input, "revenue");
                assert_eq!(violations[0].missing, vec!["revenue".to_string()]);
                assert_eq!(violations[1].input, "expenditure");
                assert_eq!(
                    violations[1].missing,
                    vec!["year".to_string(), "expenditure".to_string()]
                );
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }
}
