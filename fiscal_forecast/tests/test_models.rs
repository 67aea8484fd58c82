use assert_approx_eq::assert_approx_eq;
use fiscal_forecast::data::series_from_pairs;
use fiscal_forecast::error::FiscalError;
use fiscal_forecast::models::arima::ArimaModel;
use fiscal_forecast::models::auto::{auto_fit, forecast_column, forecast_series, AutoArimaConfig};
use fiscal_forecast::models::{FittedForecastModel, ForecastModel};
use fiscal_forecast::panel::{self, DEBT, EXPENDITURE, FISCAL_GAP, GDP, REVENUE};
use rstest::rstest;

// Deterministic series with a trend and a mild wiggle.
fn sample_series(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + 1.5 * i as f64 + (i as f64 * 0.7).sin())
        .collect()
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(10)]
fn test_forecast_shape(#[case] horizon: usize) {
    let series = sample_series(24);
    let forecast = forecast_series("gdp", &series, horizon, &AutoArimaConfig::default()).unwrap();

    assert_eq!(forecast.horizon(), horizon);
    assert_eq!(forecast.point().len(), horizon);
    assert_eq!(forecast.lower().len(), horizon);
    assert_eq!(forecast.upper().len(), horizon);
}

#[test]
fn test_interval_containment() {
    let series = sample_series(24);
    let forecast = forecast_series("gdp", &series, 8, &AutoArimaConfig::default()).unwrap();

    for i in 0..forecast.horizon() {
        assert!(forecast.lower()[i] <= forecast.point()[i]);
        assert!(forecast.point()[i] <= forecast.upper()[i]);
    }
}

#[test]
fn test_forecast_is_deterministic() {
    let series = sample_series(30);
    let config = AutoArimaConfig::default();

    let first = forecast_series("debt", &series, 6, &config).unwrap();
    let second = forecast_series("debt", &series, 6, &config).unwrap();

    assert_eq!(first, second);
    for i in 0..first.horizon() {
        assert_eq!(first.point()[i].to_bits(), second.point()[i].to_bits());
        assert_eq!(first.lower()[i].to_bits(), second.lower()[i].to_bits());
        assert_eq!(first.upper()[i].to_bits(), second.upper()[i].to_bits());
    }
}

#[test]
fn test_linear_trend_is_continued() {
    let series: Vec<f64> = (0..15).map(|i| 10.0 + 2.0 * i as f64).collect();
    let forecast = forecast_series("revenue", &series, 3, &AutoArimaConfig::default()).unwrap();

    // A first-differenced linear trend is constant, so the search finds
    // an exact fit and continues the trend.
    assert_approx_eq!(forecast.point()[0], 40.0, 1e-6);
    assert_approx_eq!(forecast.point()[1], 42.0, 1e-6);
    assert_approx_eq!(forecast.point()[2], 44.0, 1e-6);
}

#[test]
fn test_zero_horizon_is_rejected() {
    let series = sample_series(20);
    let result = forecast_series("gdp", &series, 0, &AutoArimaConfig::default());
    assert!(matches!(result, Err(FiscalError::InvalidParameter(_))));
}

#[test]
fn test_model_fit_error_when_no_order_converges() {
    // Two observations are too few for any order in the grid.
    let result = forecast_series("debt", &[1.0, 2.0], 5, &AutoArimaConfig::default());
    match result {
        Err(FiscalError::ModelFit { series }) => assert_eq!(series, "debt"),
        other => panic!("expected model fit error, got {:?}", other),
    }
}

#[test]
fn test_incomplete_series_is_rejected() {
    let years: Vec<(i64, f64)> = (2015..=2022).map(|y| (y, 100.0 + y as f64)).collect();
    let revenue = series_from_pairs(REVENUE, &years).unwrap();
    let expenditure = series_from_pairs(EXPENDITURE, &years).unwrap();
    // Debt starts later, so the column has a leading gap even after the
    // forward fill.
    let debt = series_from_pairs(DEBT, &[(2018, 500.0), (2022, 700.0)]).unwrap();
    let gdp = series_from_pairs(GDP, &years).unwrap();

    let panel = panel::integrate(&revenue, &expenditure, &debt, &gdp, true).unwrap();

    let result = forecast_column(&panel, DEBT, 5);
    match result {
        Err(FiscalError::IncompleteSeries { series }) => assert_eq!(series, DEBT),
        other => panic!("expected incomplete series error, got {:?}", other),
    }
}

#[test]
fn test_forecast_column_over_complete_panel() {
    let years: Vec<(i64, f64)> = (2010..=2023)
        .map(|y| (y, 1000.0 + 12.0 * (y - 2010) as f64))
        .collect();
    let expenditure_values: Vec<(i64, f64)> = (2010..=2023)
        .map(|y| (y, 1100.0 + 15.0 * (y - 2010) as f64))
        .collect();
    let revenue = series_from_pairs(REVENUE, &years).unwrap();
    let expenditure = series_from_pairs(EXPENDITURE, &expenditure_values).unwrap();
    let debt = series_from_pairs(DEBT, &[(2010, 5000.0)]).unwrap();
    let gdp = series_from_pairs(GDP, &years).unwrap();

    let panel = panel::integrate(&revenue, &expenditure, &debt, &gdp, true).unwrap();

    for column in [FISCAL_GAP, DEBT, GDP] {
        let forecast = forecast_column(&panel, column, 4).unwrap();
        assert_eq!(forecast.horizon(), 4);
        for i in 0..4 {
            assert!(forecast.lower()[i] <= forecast.point()[i]);
            assert!(forecast.point()[i] <= forecast.upper()[i]);
        }
    }
}

#[test]
fn test_auto_fit_selects_an_order_within_bounds() {
    let series = sample_series(28);
    let config = AutoArimaConfig::default();
    let fitted = auto_fit("gdp", &series, &config).unwrap();

    let (p, d, q) = fitted.order();
    assert!(p <= config.max_p);
    assert!(d <= config.max_d);
    assert!(q <= config.max_q);
    assert!(fitted.aicc().is_finite());
}

#[test]
fn test_single_order_fit_reports_coefficient_shapes() {
    let series = sample_series(30);
    let fitted = ArimaModel::new(2, 1, 1).fit(&series).unwrap();

    assert_eq!(fitted.ar_coefficients().len(), 2);
    assert_eq!(fitted.ma_coefficients().len(), 1);
    assert!(fitted.residual_variance() >= 0.0);

    let forecast = fitted.forecast(5).unwrap();
    assert_eq!(forecast.horizon(), 5);
    assert_eq!(forecast.order(), (2, 1, 1));
}

#[test]
fn test_insufficient_data_for_single_order() {
    let result = ArimaModel::new(3, 2, 3).fit(&[1.0, 2.0, 3.0]);
    assert!(matches!(
        result,
        Err(FiscalError::InsufficientData { .. })
    ));
}

#[test]
fn test_invalid_confidence_level_is_rejected() {
    let series = sample_series(20);
    let fitted = ArimaModel::new(1, 0, 0).fit(&series).unwrap();
    assert!(fitted.forecast_with_level(3, 0.0).is_err());
    assert!(fitted.forecast_with_level(3, 1.0).is_err());
}
