use fiscal_forecast::data::{read_series_csv, series_from_pairs, DateGranularity};
use fiscal_forecast::error::FiscalError;
use fiscal_forecast::models::auto::forecast_column;
use fiscal_forecast::panel::{self, DEBT, EXPENDITURE, FISCAL_GAP, GDP, REVENUE};
use fiscal_forecast::ratio::{breaches, project_ratio, DEFAULT_SUSTAINABILITY_THRESHOLD};
use std::io::Write;
use tempfile::NamedTempFile;

// Twenty years of synthetic indicators: revenue and GDP grow linearly,
// expenditure grows faster, debt is reported every third year.
fn build_inputs() -> (
    polars::prelude::DataFrame,
    polars::prelude::DataFrame,
    polars::prelude::DataFrame,
    polars::prelude::DataFrame,
) {
    let years: Vec<i64> = (2004..=2023).collect();

    let revenue: Vec<(i64, f64)> = years
        .iter()
        .map(|&y| (y, 2000.0 + 60.0 * (y - 2004) as f64))
        .collect();
    let expenditure: Vec<(i64, f64)> = years
        .iter()
        .map(|&y| (y, 2100.0 + 90.0 * (y - 2004) as f64))
        .collect();
    let gdp: Vec<(i64, f64)> = years
        .iter()
        .map(|&y| (y, 10_000.0 + 400.0 * (y - 2004) as f64))
        .collect();
    let debt: Vec<(i64, f64)> = years
        .iter()
        .filter(|&&y| (y - 2004) % 3 == 0)
        .map(|&y| (y, 5500.0 + 500.0 * (y - 2004) as f64))
        .collect();

    (
        series_from_pairs(REVENUE, &revenue).unwrap(),
        series_from_pairs(EXPENDITURE, &expenditure).unwrap(),
        series_from_pairs(DEBT, &debt).unwrap(),
        series_from_pairs(GDP, &gdp).unwrap(),
    )
}

#[test]
fn test_full_pipeline_workflow() {
    let (revenue, expenditure, debt, gdp) = build_inputs();

    // 1. Integrate the four sources into a yearly panel.
    let panel = panel::integrate(&revenue, &expenditure, &debt, &gdp, true).unwrap();
    assert_eq!(panel.len(), 20);
    assert_eq!(panel.last_year().unwrap(), Some(2023));

    // 2. The fiscal gap identity holds on every row.
    let rev = panel.column_values(REVENUE).unwrap();
    let exp = panel.column_values(EXPENDITURE).unwrap();
    let gap = panel.column_values(FISCAL_GAP).unwrap();
    for i in 0..panel.len() {
        assert_eq!(gap[i].unwrap(), exp[i].unwrap() - rev[i].unwrap());
    }

    // 3. Debt is fully observed after the forward fill: it starts in the
    // panel's first year and every later gap is bridged.
    let debt_column = panel.complete_column(DEBT).unwrap();
    assert_eq!(debt_column.len(), 20);
    assert_eq!(debt_column[0], 5500.0);
    assert_eq!(debt_column[1], 5500.0);

    // 4. Forecast the three target columns independently.
    let horizon = 10;
    let fiscal_gap_forecast = forecast_column(&panel, FISCAL_GAP, horizon).unwrap();
    let debt_forecast = forecast_column(&panel, DEBT, horizon).unwrap();
    let gdp_forecast = forecast_column(&panel, GDP, horizon).unwrap();

    for forecast in [&fiscal_gap_forecast, &debt_forecast, &gdp_forecast] {
        assert_eq!(forecast.horizon(), horizon);
        for i in 0..horizon {
            assert!(forecast.lower()[i] <= forecast.point()[i]);
            assert!(forecast.point()[i] <= forecast.upper()[i]);
        }
    }

    // The GDP series is exactly linear, so its forecast continues the
    // 400-per-year trend.
    assert!((gdp_forecast.point()[0] - 18_000.0).abs() < 1.0);

    // 5. Combine debt and GDP into the ratio forecast.
    let ratio = project_ratio(&debt_forecast, &gdp_forecast).unwrap();
    assert_eq!(ratio.horizon(), horizon);
    for i in 0..horizon {
        assert!(ratio.lower()[i] <= ratio.point()[i]);
        assert!(ratio.point()[i] <= ratio.upper()[i]);
    }

    // 6. Check sustainability and produce the horizon's year labels.
    let flags = breaches(&ratio, DEFAULT_SUSTAINABILITY_THRESHOLD);
    assert_eq!(flags.len(), horizon);
    assert_eq!(
        panel.forecast_years(horizon).unwrap(),
        (2024..=2033).collect::<Vec<i64>>()
    );
}

#[test]
fn test_pipeline_from_csv_sources() {
    let mut revenue_file = NamedTempFile::new().unwrap();
    writeln!(revenue_file, "date,value").unwrap();
    for y in 2015..=2022 {
        writeln!(revenue_file, "{},{}", y, 2.0 + 0.1 * (y - 2015) as f64).unwrap();
    }

    let mut expenditure_file = NamedTempFile::new().unwrap();
    writeln!(expenditure_file, "date,value").unwrap();
    for y in 2015..=2022 {
        for q in 1..=4 {
            writeln!(
                expenditure_file,
                "Q{} '{},{}",
                q,
                y - 2000,
                0.6 + 0.05 * (y - 2015) as f64
            )
            .unwrap();
        }
    }

    let revenue = read_series_csv(revenue_file.path(), DateGranularity::Year, 1e12, REVENUE).unwrap();
    let expenditure = read_series_csv(
        expenditure_file.path(),
        DateGranularity::Quarter,
        1e12,
        EXPENDITURE,
    )
    .unwrap();
    let debt = series_from_pairs(DEBT, &[(2015, 18.0e12), (2020, 27.0e12)]).unwrap();
    let gdp = series_from_pairs(
        GDP,
        &(2015..=2022)
            .map(|y| (y, 18.0e12 + 0.5e12 * (y - 2015) as f64))
            .collect::<Vec<_>>(),
    )
    .unwrap();

    let panel = panel::integrate(&revenue, &expenditure, &debt, &gdp, true).unwrap();
    assert_eq!(panel.len(), 8);

    // Quarterly expenditure was summed: 4 quarters of 0.6e12 in 2015.
    let exp = panel.column_values(EXPENDITURE).unwrap();
    assert!((exp[0].unwrap() - 2.4e12).abs() < 1e6);

    let gdp_forecast = forecast_column(&panel, GDP, 5).unwrap();
    let debt_forecast = forecast_column(&panel, DEBT, 5).unwrap();
    let ratio = project_ratio(&debt_forecast, &gdp_forecast).unwrap();
    assert_eq!(ratio.horizon(), 5);
}

#[test]
fn test_pipeline_rejects_bad_schema() {
    let (revenue, _expenditure, debt, gdp) = build_inputs();
    let mislabeled = series_from_pairs("spending", &[(2020, 1.0)]).unwrap();

    let result = panel::integrate(&revenue, &mislabeled, &debt, &gdp, true);
    match result {
        Err(FiscalError::Schema(violations)) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].input, "expenditure");
        }
        other => panic!("expected schema error, got {:?}", other),
    }
}
