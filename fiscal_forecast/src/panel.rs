//! Yearly panel integration of economic indicator series
//!
//! Four input series (revenue, expenditure, debt, GDP) are aligned on
//! the `year` key into one panel. Only years carrying both a revenue and
//! an expenditure signal are kept; the fiscal gap is derived from those
//! two columns; debt and GDP attach by left join, with an optional
//! forward fill applied to debt only.

use crate::error::Result;
use crate::schema::{validate_schemas, SchemaRequirement};
use polars::prelude::*;

/// Join key column
pub const YEAR: &str = "year";
/// Government revenue column
pub const REVENUE: &str = "revenue";
/// Government expenditure column
pub const EXPENDITURE: &str = "expenditure";
/// Derived expenditure-minus-revenue column
pub const FISCAL_GAP: &str = "fiscal_gap";
/// Public debt column
pub const DEBT: &str = "debt";
/// Gross domestic product column
pub const GDP: &str = "gdp";

const REVENUE_SCHEMA: SchemaRequirement = SchemaRequirement {
    input: "revenue",
    columns: &[YEAR, REVENUE],
};
const EXPENDITURE_SCHEMA: SchemaRequirement = SchemaRequirement {
    input: "expenditure",
    columns: &[YEAR, EXPENDITURE],
};
const DEBT_SCHEMA: SchemaRequirement = SchemaRequirement {
    input: "debt",
    columns: &[YEAR, DEBT],
};
const GDP_SCHEMA: SchemaRequirement = SchemaRequirement {
    input: "gdp",
    columns: &[YEAR, GDP],
};

/// Yearly panel of aligned economic series
///
/// Constructed once per run by [`integrate`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Panel {
    df: DataFrame,
}

/// Merge the four indicator series into a yearly panel.
///
/// Steps, in order: validate all input schemas (accumulating every
/// missing column before failing), inner join revenue and expenditure on
/// year and sort ascending, derive the fiscal gap, left join debt,
/// forward fill debt if requested, and left join GDP (never filled).
/// The left joins preserve the sorted row order.
///
/// Years present in only one of revenue/expenditure are dropped
/// silently: a year without both signals carries no fiscal meaning.
/// Debt years before the first observation stay absent even when the
/// forward fill is on.
pub fn integrate(
    revenue: &DataFrame,
    expenditure: &DataFrame,
    debt: &DataFrame,
    gdp: &DataFrame,
    fill_forward_debt: bool,
) -> Result<Panel> {
    validate_schemas(&[
        (revenue, &REVENUE_SCHEMA),
        (expenditure, &EXPENDITURE_SCHEMA),
        (debt, &DEBT_SCHEMA),
        (gdp, &GDP_SCHEMA),
    ])?;

    // Sort ascending by year before the debt join: the forward fill
    // below is only meaningful in ascending-year order.
    let mut panel = revenue
        .inner_join(expenditure, [YEAR], [YEAR])?
        .lazy()
        .sort(YEAR, Default::default())
        .collect()?;

    let mut gap = panel.column(EXPENDITURE)? - panel.column(REVENUE)?;
    gap.rename(FISCAL_GAP);
    panel.with_column(gap)?;

    let mut panel = panel.left_join(debt, [YEAR], [YEAR])?;
    if fill_forward_debt {
        let filled = panel
            .column(DEBT)?
            .fill_null(FillNullStrategy::Forward(None))?;
        panel.with_column(filled)?;
    }

    let panel = panel.left_join(gdp, [YEAR], [YEAR])?;

    Ok(Panel { df: panel })
}

/// [`integrate`] with the debt forward fill enabled, the common case.
pub fn integrate_with_fill(
    revenue: &DataFrame,
    expenditure: &DataFrame,
    debt: &DataFrame,
    gdp: &DataFrame,
) -> Result<Panel> {
    integrate(revenue, expenditure, debt, gdp, true)
}

impl Panel {
    /// Underlying dataframe
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of panel rows
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Whether the panel has no rows
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Panel years, ascending
    pub fn years(&self) -> Result<Vec<i64>> {
        let years = self
            .df
            .column(YEAR)?
            .cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .flatten()
            .collect();
        Ok(years)
    }

    /// Last observed year, if the panel is non-empty
    pub fn last_year(&self) -> Result<Option<i64>> {
        Ok(self.years()?.last().copied())
    }

    /// Year labels for a forecast horizon starting after the last
    /// observed year
    pub fn forecast_years(&self, horizon: usize) -> Result<Vec<i64>> {
        match self.last_year()? {
            Some(last) => Ok((1..=horizon as i64).map(|offset| last + offset).collect()),
            None => Ok(Vec::new()),
        }
    }

    /// A column as nullable values, preserving absent entries
    pub fn column_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let values = self
            .df
            .column(name)?
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .collect();
        Ok(values)
    }

    /// A column that must be fully observed; fails with
    /// [`FiscalError::IncompleteSeries`](crate::error::FiscalError) when
    /// any value is absent.
    pub fn complete_column(&self, name: &str) -> Result<Vec<f64>> {
        let column = self.df.column(name)?.cast(&DataType::Float64)?;
        if column.null_count() > 0 {
            return Err(crate::error::FiscalError::IncompleteSeries {
                series: name.to_string(),
            });
        }
        Ok(column.f64()?.into_iter().flatten().collect())
    }
}
