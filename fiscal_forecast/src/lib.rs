//! # Fiscal Forecast
//!
//! A Rust library for integrating economic indicator series and
//! forecasting debt sustainability.
//!
//! ## Features
//!
//! - Series readers for yearly and quarterly indicator CSV exports
//! - Yearly panel integration with fiscal-gap derivation and a
//!   forward-fill policy for debt
//! - Non-seasonal ARIMA forecasting with an automatic order search
//! - Debt-to-GDP ratio projection with propagated uncertainty bounds
//!
//! ## Quick Start
//!
//! ```no_run
//! use fiscal_forecast::data::series_from_pairs;
//! use fiscal_forecast::models::auto::forecast_column;
//! use fiscal_forecast::panel::{self, DEBT, GDP};
//! use fiscal_forecast::ratio::{breaches, project_ratio, DEFAULT_SUSTAINABILITY_THRESHOLD};
//!
//! # fn main() -> fiscal_forecast::error::Result<()> {
//! let revenue = series_from_pairs("revenue", &[(2020, 100.0), (2021, 110.0)])?;
//! let expenditure = series_from_pairs("expenditure", &[(2020, 120.0), (2021, 115.0)])?;
//! let debt = series_from_pairs("debt", &[(2020, 500.0)])?;
//! let gdp = series_from_pairs("gdp", &[(2020, 1000.0), (2021, 1050.0)])?;
//!
//! let panel = panel::integrate_with_fill(&revenue, &expenditure, &debt, &gdp)?;
//!
//! let debt_forecast = forecast_column(&panel, DEBT, 10)?;
//! let gdp_forecast = forecast_column(&panel, GDP, 10)?;
//! let ratio = project_ratio(&debt_forecast, &gdp_forecast)?;
//!
//! let unsustainable = breaches(&ratio, DEFAULT_SUSTAINABILITY_THRESHOLD);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod models;
pub mod panel;
pub mod ratio;
pub mod schema;

// Re-export commonly used types
pub use crate::data::{DateGranularity, YearValue};
pub use crate::error::FiscalError;
pub use crate::models::{FittedForecastModel, ForecastModel, ForecastResult};
pub use crate::panel::Panel;
pub use crate::schema::{SchemaRequirement, SchemaViolation};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
