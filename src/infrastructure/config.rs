use anyhow::Context;
use serde::Deserialize;

/// Generator settings, read from `config/generator` and `DASHBOARD_*` env vars
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GeneratorSettings {
    /// External naming/namespace identifier, copied into the dashboard as-is
    #[serde(default)]
    pub uid: Option<String>,
    /// Build from this definition file instead of the built-in dashboard
    #[serde(default)]
    pub definition_path: Option<String>,
    /// Write here instead of stdout
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardDefinition {
    pub title: String,
    #[serde(default)]
    pub templating: Vec<TemplateDefinition>,
    #[serde(default)]
    pub rows: Vec<RowDefinition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplateDefinition {
    pub name: String,
    pub data_source: String,
    pub query: String,
    #[serde(default)]
    pub regex: Option<String>,
    #[serde(default)]
    pub default: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RowDefinition {
    #[serde(default)]
    pub panels: Vec<PanelDefinition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelDefinition {
    pub title: String,
    pub data_source: String,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default)]
    pub targets: Vec<TargetDefinition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TargetDefinition {
    pub expr: String,
    #[serde(default)]
    pub legend_format: String,
}

pub fn load_generator_settings() -> anyhow::Result<GeneratorSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/generator").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_definition(path: &str) -> anyhow::Result<DashboardDefinition> {
    let toml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dashboard definition {}", path))?;

    parse_dashboard_definition(&toml)
        .with_context(|| format!("Invalid dashboard definition {}", path))
}

/// Parse a TOML dashboard definition held in memory
pub fn parse_dashboard_definition(toml: &str) -> anyhow::Result<DashboardDefinition> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const SETTINGS_VARS: [&str; 4] = [
        "DASHBOARD_UID",
        "DASHBOARD_DEFINITION_PATH",
        "DASHBOARD_OUTPUT_PATH",
        "DASHBOARD_PRETTY",
    ];

    // Tests touching DASHBOARD_* run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_settings_env() {
        for var in SETTINGS_VARS {
            // SAFETY: callers hold ENV_LOCK, no other test reads these vars
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    fn test_generator_settings_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_settings_env();

        let settings = load_generator_settings().unwrap();
        assert_eq!(
            settings,
            GeneratorSettings {
                uid: None,
                definition_path: None,
                output_path: None,
                pretty: true,
            }
        );
    }

    #[test]
    fn test_generator_settings_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_settings_env();
        // SAFETY: ENV_LOCK is held
        unsafe {
            std::env::set_var("DASHBOARD_UID", "Mesh-Prod.007");
            std::env::set_var("DASHBOARD_OUTPUT_PATH", "/tmp/out.json");
            std::env::set_var("DASHBOARD_PRETTY", "false");
        }

        let settings = load_generator_settings();
        clear_settings_env();

        let settings = settings.unwrap();
        assert_eq!(settings.uid.as_deref(), Some("Mesh-Prod.007"));
        assert_eq!(settings.output_path.as_deref(), Some("/tmp/out.json"));
        assert_eq!(settings.definition_path, None);
        assert!(!settings.pretty);
    }

    #[test]
    fn test_parse_dashboard_definition() {
        let toml = r#"
title = "Edge"

[[templating]]
name = "source"
data_source = "prometheus"
query = "metrics(.*_cluster_.*_upstream_rq_2xx)"

[[rows]]
[[rows.panels]]
title = "2XX"
data_source = "prometheus"

[[rows.panels.targets]]
expr = "[[source]]_upstream_rq_2xx"
legend_format = "2xx"
"#;

        let definition = parse_dashboard_definition(toml).unwrap();
        assert_eq!(definition.title, "Edge");
        assert_eq!(definition.templating.len(), 1);
        assert_eq!(definition.templating[0].regex, None);
        assert_eq!(definition.rows.len(), 1);

        let panel = &definition.rows[0].panels[0];
        assert_eq!(panel.title, "2XX");
        assert!(!panel.transparent);
        assert_eq!(panel.targets[0].legend_format, "2xx");
    }

    #[test]
    fn test_load_dashboard_definition() {
        let definition = load_dashboard_definition("config/services.toml").unwrap();
        assert_eq!(definition.title, "Services Dashboard");
        assert_eq!(definition.rows[0].panels.len(), 3);

        let err = load_dashboard_definition("config/missing.toml").unwrap_err();
        assert!(err.to_string().contains("config/missing.toml"));
    }

    #[test]
    fn test_parse_rejects_missing_title() {
        let toml = r#"
[[rows]]
panels = []
"#;
        assert!(parse_dashboard_definition(toml).is_err());
    }
}
