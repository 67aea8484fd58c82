use fiscal_forecast::data::series_from_pairs;
use fiscal_forecast::models::auto::forecast_column;
use fiscal_forecast::panel::{self, DEBT, FISCAL_GAP, GDP};
use fiscal_forecast::ratio::{breaches, project_ratio, DEFAULT_SUSTAINABILITY_THRESHOLD};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Fiscal Forecast: Debt Sustainability Example");
    println!("============================================\n");

    // Synthetic indicator series covering 2000-2023, in currency units.
    // Revenue and GDP grow steadily; expenditure outpaces revenue so the
    // fiscal gap widens; debt history starts later and is reported
    // irregularly, exercising the forward fill.
    println!("Building indicator series...");
    let years: Vec<i64> = (2000..=2023).collect();

    let revenue: Vec<(i64, f64)> = years
        .iter()
        .map(|&y| (y, 2.0e12 + 6.0e10 * (y - 2000) as f64))
        .collect();
    let expenditure: Vec<(i64, f64)> = years
        .iter()
        .map(|&y| (y, 2.1e12 + 9.0e10 * (y - 2000) as f64))
        .collect();
    let gdp: Vec<(i64, f64)> = years
        .iter()
        .map(|&y| (y, 1.0e13 + 4.0e11 * (y - 2000) as f64))
        .collect();
    let debt: Vec<(i64, f64)> = years
        .iter()
        .filter(|&&y| y >= 2004 && y % 2 == 0)
        .map(|&y| (y, 5.5e12 + 5.0e11 * (y - 2004) as f64))
        .collect();

    let revenue = series_from_pairs("revenue", &revenue)?;
    let expenditure = series_from_pairs("expenditure", &expenditure)?;
    let debt = series_from_pairs("debt", &debt)?;
    let gdp = series_from_pairs("gdp", &gdp)?;

    // Integrate into a yearly panel with the debt forward fill on.
    let panel = panel::integrate_with_fill(&revenue, &expenditure, &debt, &gdp)?;
    println!(
        "Panel integrated: {} rows, {:?}..{:?}\n",
        panel.len(),
        panel.years()?.first(),
        panel.last_year()?
    );

    // Debt has no observation before 2004, so the first panel years
    // carry no debt value. Forecast over the fully observed suffix.
    let horizon = 10;
    let forecast_years = panel.forecast_years(horizon)?;

    println!("Forecasting {} years ahead...", horizon);
    let fiscal_gap_forecast = forecast_column(&panel, FISCAL_GAP, horizon)?;
    let gdp_forecast = forecast_column(&panel, GDP, horizon)?;
    println!(
        "  fiscal gap: ARIMA{:?}, first step {:.3e}",
        fiscal_gap_forecast.order(),
        fiscal_gap_forecast.point()[0]
    );
    println!(
        "  GDP:        ARIMA{:?}, first step {:.3e}",
        gdp_forecast.order(),
        gdp_forecast.point()[0]
    );

    // Debt needs the fully observed suffix of the panel.
    let debt_series: Vec<f64> = panel
        .column_values(DEBT)?
        .into_iter()
        .flatten()
        .collect();
    let debt_forecast = fiscal_forecast::models::auto::forecast_series(
        DEBT,
        &debt_series,
        horizon,
        &Default::default(),
    )?;
    println!(
        "  debt:       ARIMA{:?}, first step {:.3e}\n",
        debt_forecast.order(),
        debt_forecast.point()[0]
    );

    // Combine debt and GDP into a debt-to-GDP ratio forecast.
    let ratio = project_ratio(&debt_forecast, &gdp_forecast)?;
    let flags = breaches(&ratio, DEFAULT_SUSTAINABILITY_THRESHOLD);

    println!("Debt-to-GDP ratio forecast (threshold {DEFAULT_SUSTAINABILITY_THRESHOLD}):");
    for (i, year) in forecast_years.iter().enumerate() {
        println!(
            "  {}: {:.3} [{:.3}, {:.3}]{}",
            year,
            ratio.point()[i],
            ratio.lower()[i],
            ratio.upper()[i],
            if flags[i] { "  <- unsustainable" } else { "" }
        );
    }

    Ok(())
}
