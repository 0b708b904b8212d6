//! Value types for option pricing and Greeks calculation.

use serde::{Deserialize, Serialize};

/// Option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

/// Parameters of a single European option pricing request.
///
/// Immutable; created per request and echoed back in the [`GreeksResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionParameters {
    /// Underlying spot price in price units.
    pub underlying_price: f64,
    /// Option strike price in price units.
    pub strike_price: f64,
    /// Time to expiration in years (e.g., 20 days = 20.0 / 365.0).
    pub time_to_expiry: f64,
    /// Risk-free interest rate (annualized, e.g., 0.05 for 5%).
    pub risk_free_rate: f64,
    /// Volatility (annualized, e.g., 0.25 for 25%).
    pub volatility: f64,
    /// Continuous dividend yield (annualized, e.g., 0.02 for 2%).
    pub dividend_yield: f64,
    /// Option type (Call or Put).
    pub option_type: OptionType,
}

impl OptionParameters {
    /// Creates new option parameters.
    ///
    /// # Arguments
    /// - `underlying_price`: Underlying spot price in price units
    /// - `strike_price`: Option strike price in price units
    /// - `time_to_expiry`: Time to expiration in years
    /// - `risk_free_rate`: Risk-free interest rate (annualized)
    /// - `volatility`: Volatility (annualized)
    /// - `dividend_yield`: Continuous dividend yield (annualized)
    /// - `option_type`: Call or Put
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        dividend_yield: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            underlying_price,
            strike_price,
            time_to_expiry,
            risk_free_rate,
            volatility,
            dividend_yield,
            option_type,
        }
    }

    /// Creates parameters for a call option.
    #[must_use]
    pub fn call(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        dividend_yield: f64,
    ) -> Self {
        Self::new(
            underlying_price,
            strike_price,
            time_to_expiry,
            risk_free_rate,
            volatility,
            dividend_yield,
            OptionType::Call,
        )
    }

    /// Creates parameters for a put option.
    #[must_use]
    pub fn put(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        dividend_yield: f64,
    ) -> Self {
        Self::new(
            underlying_price,
            strike_price,
            time_to_expiry,
            risk_free_rate,
            volatility,
            dividend_yield,
            OptionType::Put,
        )
    }

    /// Calculates the intrinsic value of the option.
    ///
    /// For calls: max(0, spot - strike)
    /// For puts: max(0, strike - spot)
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.underlying_price - self.strike_price).max(0.0),
            OptionType::Put => (self.strike_price - self.underlying_price).max(0.0),
        }
    }

    /// Returns true if the option is in-the-money.
    #[must_use]
    pub fn is_itm(&self) -> bool {
        self.intrinsic_value() > 0.0
    }

    /// Returns true if the option is at-the-money (within 0.1% of strike).
    #[must_use]
    pub fn is_atm(&self) -> bool {
        (self.underlying_price - self.strike_price).abs() / self.strike_price < 0.001
    }

    /// Returns true if the option is out-of-the-money.
    #[must_use]
    pub fn is_otm(&self) -> bool {
        !self.is_itm() && !self.is_atm()
    }
}

/// Result of a Greeks calculation.
///
/// Produced by [`GreeksEngine::compute`](crate::greeks::GreeksEngine::compute)
/// and owned by the caller; there is no shared mutable state behind it.
///
/// Scaling follows trading-desk conventions: delta and gamma are per unit
/// move of the underlying, theta is per calendar day, vega is per one
/// volatility point (1%) and rho is per one rate point (1%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreeksResult {
    /// Theoretical option price.
    pub price: f64,
    /// Sensitivity to the underlying price (per unit move).
    pub delta: f64,
    /// Rate of change of delta (per unit move).
    pub gamma: f64,
    /// Time decay per calendar day.
    pub theta: f64,
    /// Sensitivity to a one-percentage-point volatility move.
    pub vega: f64,
    /// Sensitivity to a one-percentage-point rate move.
    pub rho: f64,
    /// Input parameters the result was computed from.
    pub parameters: OptionParameters,
    /// Calculation timestamp in milliseconds since the Unix epoch.
    pub calculated_at: u64,
}

impl GreeksResult {
    /// Estimated change in delta for a given underlying price move.
    #[must_use]
    pub fn delta_change_for_move(&self, underlying_move: f64) -> f64 {
        self.gamma * underlying_move
    }

    /// Theoretical price decay over the given number of calendar days.
    #[must_use]
    pub fn decay_over_days(&self, days: u32) -> f64 {
        self.theta * f64::from(days)
    }
}

/// A position together with its per-contract Greeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionGreeks {
    /// Symbol the position is held in.
    pub symbol: String,
    /// Signed position size (negative for short).
    pub quantity: f64,
    /// Greeks of a single contract.
    pub greeks: GreeksResult,
}

/// Quantity-weighted Greeks of a whole book of positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioGreeks {
    /// Net delta across all positions.
    pub delta: f64,
    /// Net gamma across all positions.
    pub gamma: f64,
    /// Net theta across all positions.
    pub theta: f64,
    /// Net vega across all positions.
    pub vega: f64,
    /// Net rho across all positions.
    pub rho: f64,
}

/// Aggregates per-position Greeks into portfolio-level Greeks.
///
/// Each position contributes its per-contract Greeks multiplied by its signed
/// quantity, so long and short positions offset.
#[must_use]
pub fn aggregate_portfolio(positions: &[PositionGreeks]) -> PortfolioGreeks {
    let mut totals = PortfolioGreeks::default();

    for position in positions {
        totals.delta += position.greeks.delta * position.quantity;
        totals.gamma += position.greeks.gamma * position.quantity;
        totals.theta += position.greeks.theta * position.quantity;
        totals.vega += position.greeks.vega * position.quantity;
        totals.rho += position.greeks.rho * position.quantity;
    }

    totals
}

/// Size of the underlying position that offsets an option position's delta.
///
/// Hedge ratio = -(option delta × option quantity).
#[must_use]
pub fn delta_hedge_ratio(greeks: &GreeksResult, option_quantity: f64) -> f64 {
    -(greeks.delta * option_quantity)
}

/// Converts a whole number of calendar days to expiry into year fractions.
///
/// Non-positive day counts map to zero.
#[must_use]
pub fn years_to_expiry(days: i64) -> f64 {
    if days <= 0 { 0.0 } else { days as f64 / 365.0 }
}
