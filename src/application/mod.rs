// Application layer - Dashboard use cases
pub mod dashboard_builder;
