//! Convenience re-exports of the most commonly used types.

pub use crate::greeks::{
    GreeksEngine, GreeksError, GreeksResult, OptionParameters, OptionType, PortfolioGreeks,
    PositionGreeks, SolverConfig, aggregate_portfolio, solve_implied_volatility,
};
pub use crate::monitor::{
    AlertEvent, AlertListener, AlertPriority, DeltaThresholdMonitor, InMemoryThresholdStore,
    MarketDataUpdate, MonitorConfig, MonitorManager, ThresholdStore, ThresholdStoreError,
    classify_priority,
};
