//! Option pricing engine, Greeks and implied volatility.
//!
//! This module prices a single European option per call using the
//! Black-Scholes-Merton model with continuous dividend yield and derives the
//! full set of first-order Greeks. An iterative Newton-Raphson solver inverts
//! the model to recover implied volatility from an observed market price.
//!
//! # Overview
//!
//! The engine and the solver are pure and stateless: they may be invoked
//! concurrently without coordination and perform no blocking I/O. The only
//! caller-visible failure is [`GreeksError::InvalidParameter`] for
//! non-positive underlying, strike, expiry or volatility; the solver absorbs
//! numeric instability internally and always returns its best estimate.
//!
//! # Example
//!
//! ```ignore
//! use deltawatch_rs::greeks::{GreeksEngine, OptionParameters, SolverConfig, solve_implied_volatility};
//!
//! let params = OptionParameters::call(152.50, 150.0, 0.0548, 0.05, 0.25, 0.02);
//! let greeks = GreeksEngine::compute(&params)?;
//!
//! let iv = solve_implied_volatility(&params, greeks.price, &SolverConfig::default())?;
//! assert!((iv - 0.25).abs() < 1e-3);
//! ```

mod engine;
mod error;
mod solver;
mod types;

pub use engine::GreeksEngine;
pub use error::GreeksError;
pub use solver::{SolverConfig, solve_implied_volatility};
pub use types::{
    GreeksResult, OptionParameters, OptionType, PortfolioGreeks, PositionGreeks,
    aggregate_portfolio, delta_hedge_ratio, years_to_expiry,
};
