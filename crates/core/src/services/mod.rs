pub mod chart_service;
pub mod cost_basis;
pub mod holdings_watcher;
pub mod portfolio_service;
