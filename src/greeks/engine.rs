//! Black-Scholes-Merton pricing engine and Greeks calculation.
//!
//! Prices a single European option with continuous dividend yield and returns
//! the full set of first-order sensitivities in one pass. The computation is
//! deterministic and side-effect-free, so it may be invoked concurrently
//! without coordination.

use super::error::GreeksError;
use super::types::{GreeksResult, OptionParameters, OptionType};
use crate::utils::{current_time_millis, round_significant};
use std::f64::consts::PI;
use tracing::trace;

/// Square root of 2, precomputed for efficiency.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Significant digits kept in reported Greeks, for reproducibility across
/// implementations.
const OUTPUT_PRECISION: i32 = 10;

/// Black-Scholes-Merton pricing engine.
///
/// Provides methods for calculating option prices and Greeks using the
/// Black-Scholes-Merton formula with continuous dividend yield.
pub struct GreeksEngine;

impl GreeksEngine {
    /// Approximation of the error function (erf).
    ///
    /// Uses Abramowitz and Stegun approximation (formula 7.1.26)
    /// with maximum error of 1.5×10⁻⁷.
    ///
    /// # Arguments
    /// - `x`: Input value
    ///
    /// # Returns
    /// Approximation of erf(x)
    #[must_use]
    pub fn erf(x: f64) -> f64 {
        // Constants for the approximation
        const A1: f64 = 0.254829592;
        const A2: f64 = -0.284496736;
        const A3: f64 = 1.421413741;
        const A4: f64 = -1.453152027;
        const A5: f64 = 1.061405429;
        const P: f64 = 0.3275911;

        let sign = if x < 0.0 { -1.0 } else { 1.0 };
        let x = x.abs();

        let t = 1.0 / (1.0 + P * x);
        let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

        sign * y
    }

    /// Standard normal cumulative distribution function (CDF).
    ///
    /// Calculates P(Z ≤ x) where Z is a standard normal random variable.
    #[must_use]
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * (1.0 + Self::erf(x / SQRT_2))
    }

    /// Standard normal probability density function (PDF).
    #[must_use]
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r - q + σ²/2)T] / (σ√T)
    ///
    /// # Arguments
    /// - `params`: Option parameters (spot, strike, time, rate, vol, yield)
    ///
    /// # Returns
    /// The d1 parameter value
    #[must_use]
    pub fn d1(params: &OptionParameters) -> f64 {
        let sqrt_time = params.time_to_expiry.sqrt();
        ((params.underlying_price / params.strike_price).ln()
            + (params.risk_free_rate - params.dividend_yield
                + 0.5 * params.volatility * params.volatility)
                * params.time_to_expiry)
            / (params.volatility * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Computes the theoretical price and all first-order Greeks.
    ///
    /// Scaling follows trading-desk conventions: theta is converted to a
    /// per-day figure (÷365), vega and rho are reported per
    /// one-percentage-point move (÷100), while delta and gamma stay per unit
    /// move of the underlying. Outputs are rounded to 10 significant digits,
    /// half up.
    ///
    /// As time to expiry approaches zero, the σ√T denominator of d1/d2 drives
    /// the formulas toward numeric blow-up; callers must guard against
    /// near-zero expiry.
    ///
    /// # Arguments
    /// - `params`: Option parameters to price
    ///
    /// # Returns
    /// - `Ok(GreeksResult)`: Price and Greeks, with the inputs echoed back
    /// - `Err(GreeksError::InvalidParameter)`: If underlying, strike, time to
    ///   expiry or volatility is non-positive
    pub fn compute(params: &OptionParameters) -> Result<GreeksResult, GreeksError> {
        Self::validate(params)?;

        let s = params.underlying_price;
        let k = params.strike_price;
        let t = params.time_to_expiry;
        let r = params.risk_free_rate;
        let sigma = params.volatility;
        let q = params.dividend_yield;

        let d1 = Self::d1(params);
        let d2 = Self::d2(d1, sigma, t);

        let nd1 = Self::norm_cdf(d1);
        let nd2 = Self::norm_cdf(d2);
        let pdf_d1 = Self::norm_pdf(d1);

        let yield_discount = (-q * t).exp();
        let rate_discount = (-r * t).exp();
        let sqrt_time = t.sqrt();

        let price = match params.option_type {
            OptionType::Call => s * yield_discount * nd1 - k * rate_discount * nd2,
            OptionType::Put => k * rate_discount * (1.0 - nd2) - s * yield_discount * (1.0 - nd1),
        };

        let delta = match params.option_type {
            OptionType::Call => yield_discount * nd1,
            OptionType::Put => yield_discount * (nd1 - 1.0),
        };

        // Same for calls and puts
        let gamma = yield_discount * pdf_d1 / (s * sigma * sqrt_time);

        let decay_term = -s * pdf_d1 * sigma * yield_discount / (2.0 * sqrt_time);
        let theta_annual = match params.option_type {
            OptionType::Call => {
                decay_term - q * s * nd1 * yield_discount - r * k * rate_discount * nd2
            }
            OptionType::Put => {
                decay_term
                    + q * s * (1.0 - nd1) * yield_discount
                    + r * k * rate_discount * (1.0 - nd2)
            }
        };
        let theta = theta_annual / 365.0;

        let vega = s * yield_discount * pdf_d1 * sqrt_time / 100.0;

        let rho = match params.option_type {
            OptionType::Call => k * t * rate_discount * nd2 / 100.0,
            OptionType::Put => -k * t * rate_discount * (1.0 - nd2) / 100.0,
        };

        trace!(
            "Computed Greeks: S={}, K={}, T={}, price={}, delta={}",
            s, k, t, price, delta
        );

        Ok(GreeksResult {
            price: round_significant(price, OUTPUT_PRECISION),
            delta: round_significant(delta, OUTPUT_PRECISION),
            gamma: round_significant(gamma, OUTPUT_PRECISION),
            theta: round_significant(theta, OUTPUT_PRECISION),
            vega: round_significant(vega, OUTPUT_PRECISION),
            rho: round_significant(rho, OUTPUT_PRECISION),
            parameters: params.clone(),
            calculated_at: current_time_millis(),
        })
    }

    fn validate(params: &OptionParameters) -> Result<(), GreeksError> {
        if params.underlying_price <= 0.0 {
            return Err(GreeksError::InvalidParameter {
                message: format!(
                    "underlying price must be positive, got {}",
                    params.underlying_price
                ),
            });
        }

        if params.strike_price <= 0.0 {
            return Err(GreeksError::InvalidParameter {
                message: format!(
                    "strike price must be positive, got {}",
                    params.strike_price
                ),
            });
        }

        if params.time_to_expiry <= 0.0 {
            return Err(GreeksError::InvalidParameter {
                message: format!(
                    "time to expiry must be positive, got {}",
                    params.time_to_expiry
                ),
            });
        }

        if params.volatility <= 0.0 {
            return Err(GreeksError::InvalidParameter {
                message: format!("volatility must be positive, got {}", params.volatility),
            });
        }

        Ok(())
    }
}
