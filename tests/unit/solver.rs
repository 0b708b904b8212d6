//! Implied volatility round trips across the volatility and maturity grid.

use deltawatch_rs::prelude::*;

const IV_TOLERANCE: f64 = 1e-3;

#[test]
fn round_trip_across_vol_and_maturity_grid() {
    let config = SolverConfig::default();

    for vol in [0.05, 0.1, 0.25, 0.5, 1.0, 2.0] {
        for time in [0.01, 0.1, 0.25, 1.0, 2.0] {
            for params in [
                OptionParameters::call(100.0, 100.0, time, 0.05, vol, 0.01),
                OptionParameters::put(100.0, 100.0, time, 0.05, vol, 0.01),
            ] {
                let market_price = GreeksEngine::compute(&params).unwrap().price;
                let iv = solve_implied_volatility(&params, market_price, &config).unwrap();
                assert!(
                    (iv - vol).abs() < IV_TOLERANCE,
                    "round trip failed for vol={vol}, time={time}, {:?}: got {iv}",
                    params.option_type
                );
            }
        }
    }
}

#[test]
fn round_trip_price_reconstruction() {
    // The recovered volatility must reprice to the observed market price
    // within the solver's own price tolerance.
    let config = SolverConfig::default();
    let params = OptionParameters::call(152.50, 150.0, 0.0548, 0.05, 0.25, 0.02);
    let market_price = GreeksEngine::compute(&params).unwrap().price;

    let iv = solve_implied_volatility(&params, market_price, &config).unwrap();
    let repriced = GreeksEngine::compute(&OptionParameters {
        volatility: iv,
        ..params
    })
    .unwrap()
    .price;

    assert!((repriced - market_price).abs() < config.tolerance);
}

#[test]
fn solver_respects_custom_bounds() {
    let config = SolverConfig {
        min_volatility: 0.5,
        max_volatility: 1.0,
        ..SolverConfig::default()
    };

    // True volatility sits below the lower bound; the estimate must be
    // pinned inside [0.5, 1.0] rather than escaping it.
    let params = OptionParameters::call(100.0, 100.0, 0.25, 0.05, 0.2, 0.0);
    let market_price = GreeksEngine::compute(&params).unwrap().price;
    let iv = solve_implied_volatility(&params, market_price, &config).unwrap();
    assert!((0.5..=1.0).contains(&iv));
}

#[test]
fn deep_otm_low_price_is_best_effort_not_error() {
    // Far out of the money with a near-zero market price: convergence is not
    // guaranteed but the call must still return an in-bounds estimate.
    let params = OptionParameters::call(100.0, 300.0, 0.01, 0.05, 0.25, 0.0);
    let iv = solve_implied_volatility(&params, 1e-9, &SolverConfig::default()).unwrap();
    assert!((0.01..=5.0).contains(&iv));
}
