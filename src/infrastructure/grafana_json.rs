// Mapper to convert domain models to the Grafana dashboard JSON model
use crate::domain::dashboard::Dashboard;
use crate::domain::panel::{Panel, Row, Target};
use crate::domain::templating::TemplateVariable;
use anyhow::Context;
use serde::Serialize;

// Legacy rows layout, as written by grafanalib
const SCHEMA_VERSION: u32 = 12;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaDashboard {
    pub title: String,
    pub uid: Option<String>,
    pub editable: bool,
    pub schema_version: u32,
    pub style: &'static str,
    pub timezone: &'static str,
    pub refresh: &'static str,
    pub time: TimeRange,
    pub tags: Vec<String>,
    pub links: Vec<serde_json::Value>,
    pub annotations: List<serde_json::Value>,
    pub templating: List<GrafanaTemplate>,
    pub rows: Vec<GrafanaRow>,
}

#[derive(Debug, Serialize)]
pub struct List<T> {
    pub list: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct TimeRange {
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaTemplate {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub datasource: String,
    pub query: String,
    pub regex: Option<String>,
    pub current: CurrentValue,
    pub refresh: u8,
    pub hide: u8,
    pub include_all: bool,
    pub multi: bool,
    pub options: Vec<serde_json::Value>,
    pub sort: u8,
}

#[derive(Debug, Serialize)]
pub struct CurrentValue {
    pub text: String,
    pub value: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaRow {
    pub title: &'static str,
    pub show_title: bool,
    pub collapse: bool,
    pub height: &'static str,
    pub panels: Vec<GrafanaPanel>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaPanel {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: Option<u32>,
    pub title: String,
    pub datasource: String,
    pub transparent: bool,
    pub editable: bool,
    pub lines: bool,
    pub linewidth: u8,
    pub fill: u8,
    pub null_point_mode: &'static str,
    pub targets: Vec<GrafanaTarget>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaTarget {
    pub expr: String,
    pub legend_format: String,
    pub ref_id: String,
    pub format: &'static str,
    pub interval_factor: u8,
    pub step: u32,
}

pub fn dashboard_to_json(dashboard: &Dashboard) -> GrafanaDashboard {
    GrafanaDashboard {
        title: dashboard.title.clone(),
        uid: dashboard.uid.clone(),
        editable: true,
        schema_version: SCHEMA_VERSION,
        style: "dark",
        timezone: "utc",
        refresh: "10s",
        time: TimeRange {
            from: "now-1h",
            to: "now",
        },
        tags: Vec::new(),
        links: Vec::new(),
        annotations: List { list: Vec::new() },
        templating: List {
            list: dashboard.templating.iter().map(template_to_json).collect(),
        },
        rows: dashboard.rows.iter().map(row_to_json).collect(),
    }
}

/// Serialize a dashboard to Grafana JSON
pub fn render(dashboard: &Dashboard, pretty: bool) -> anyhow::Result<String> {
    let json = dashboard_to_json(dashboard);
    let rendered = if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    };
    rendered.context("Failed to serialize dashboard")
}

fn template_to_json(template: &TemplateVariable) -> GrafanaTemplate {
    GrafanaTemplate {
        kind: "query",
        name: template.name.clone(),
        datasource: template.data_source.clone(),
        query: template.query.clone(),
        regex: template.regex.clone(),
        current: CurrentValue {
            text: template.default.clone(),
            value: template.default.clone(),
            tags: Vec::new(),
        },
        refresh: 1,
        hide: 0,
        include_all: false,
        multi: false,
        options: Vec::new(),
        sort: 0,
    }
}

fn row_to_json(row: &Row) -> GrafanaRow {
    GrafanaRow {
        title: "New row",
        show_title: false,
        collapse: false,
        height: "250px",
        panels: row.panels.iter().map(panel_to_json).collect(),
    }
}

fn panel_to_json(panel: &Panel) -> GrafanaPanel {
    let targets = panel
        .targets
        .iter()
        .enumerate()
        .map(|(index, target)| target_to_json(target, ref_id(index)))
        .collect();

    GrafanaPanel {
        kind: "graph",
        id: panel.id,
        title: panel.title.clone(),
        datasource: panel.data_source.clone(),
        transparent: panel.transparent,
        editable: true,
        lines: true,
        linewidth: 2,
        fill: 1,
        null_point_mode: "connected",
        targets,
    }
}

fn target_to_json(target: &Target, ref_id: String) -> GrafanaTarget {
    GrafanaTarget {
        expr: target.expr.clone(),
        legend_format: target.legend_format.clone(),
        ref_id,
        format: "time_series",
        interval_factor: 2,
        step: 10,
    }
}

/// "A".."Z", then "AA", "AB", ... like spreadsheet columns
fn ref_id(index: usize) -> String {
    let mut id = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        id.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    id.iter().rev().map(|&b| b as char).collect()
}
