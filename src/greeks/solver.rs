//! Newton-Raphson solver for implied volatility.
//!
//! Finds the volatility that makes the Black-Scholes-Merton price equal an
//! observed market price. The iteration is pure CPU work with a bounded
//! iteration count; it has no suspension points and needs no cancellation
//! support beyond the iteration cap.

use super::engine::GreeksEngine;
use super::error::GreeksError;
use super::types::OptionParameters;
use crate::utils::round_significant;
use tracing::{debug, trace};

/// Configuration for the Newton-Raphson solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
    /// Convergence tolerance for the absolute price difference.
    pub tolerance: f64,
    /// Initial volatility guess (default: 0.20 = 20%).
    pub initial_guess: f64,
    /// Minimum volatility bound (default: 0.01 = 1%).
    pub min_volatility: f64,
    /// Maximum volatility bound (default: 5.0 = 500%).
    pub max_volatility: f64,
    /// Minimum derivative magnitude before the iteration stops early to
    /// avoid division by near-zero.
    pub min_derivative: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-4,
            initial_guess: 0.20,
            min_volatility: 0.01,
            max_volatility: 5.0,
            min_derivative: 1e-10,
        }
    }
}

/// Solves for implied volatility using the Newton-Raphson method.
///
/// The volatility field of `params` is ignored; each iteration reprices the
/// option at the current estimate and refines it using
/// σ_{n+1} = σ_n - (price(σ_n) - market_price) / (∂price/∂σ), where the
/// derivative is the reported vega multiplied back by 100 to undo its
/// per-percentage-point scaling.
///
/// The solver does not fail on numeric grounds: if the derivative collapses
/// below `min_derivative` or the iteration budget is exhausted without
/// convergence, the last estimate is returned as a best effort rather than a
/// guaranteed root. The only error is parameter validation, which is shared
/// with [`GreeksEngine::compute`].
///
/// # Arguments
/// - `params`: Option parameters (volatility ignored)
/// - `market_price`: Observed market price to match
/// - `config`: Solver configuration
///
/// # Returns
/// - `Ok(volatility)`: Estimate rounded to 10 significant digits
/// - `Err(GreeksError::InvalidParameter)`: If underlying, strike or time to
///   expiry fails validation
pub fn solve_implied_volatility(
    params: &OptionParameters,
    market_price: f64,
    config: &SolverConfig,
) -> Result<f64, GreeksError> {
    let mut vol = config
        .initial_guess
        .clamp(config.min_volatility, config.max_volatility);

    for iteration in 0..config.max_iterations {
        let trial = OptionParameters {
            volatility: vol,
            ..params.clone()
        };
        let greeks = GreeksEngine::compute(&trial)?;

        let price_diff = greeks.price - market_price;
        if price_diff.abs() < config.tolerance {
            debug!(
                "Implied volatility converged to {} after {} iterations",
                vol,
                iteration + 1
            );
            return Ok(round_significant(vol, 10));
        }

        // Undo the per-percentage-point vega scaling to get dprice/dsigma
        let derivative = greeks.vega * 100.0;
        if derivative.abs() < config.min_derivative {
            debug!(
                "Vega collapsed at sigma={}, returning best-effort estimate",
                vol
            );
            break;
        }

        vol = (vol - price_diff / derivative).clamp(config.min_volatility, config.max_volatility);
        trace!("Iteration {}: diff={}, next sigma={}", iteration, price_diff, vol);
    }

    // Best effort, not a guaranteed root
    Ok(round_significant(vol, 10))
}
