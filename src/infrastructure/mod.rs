// Infrastructure layer - Configuration and output formats
pub mod config;
pub mod grafana_json;
