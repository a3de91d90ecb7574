// Dashboard builder - Use case for assembling dashboard documents
use crate::domain::dashboard::Dashboard;
use crate::domain::panel::{Panel, Row, Target};
use crate::domain::templating::TemplateVariable;
use crate::infrastructure::config::DashboardDefinition;

/// First identifier handed out by `assign_panel_ids`
pub const PANEL_ID_BASE: u32 = 1;

const DATA_SOURCE: &str = "prometheus";

/// Number every panel in rows-then-panels order, starting at `PANEL_ID_BASE`.
/// Existing identifiers are overwritten.
pub fn assign_panel_ids(mut dashboard: Dashboard) -> Dashboard {
    let mut next_id = PANEL_ID_BASE;

    for row in &mut dashboard.rows {
        for panel in &mut row.panels {
            panel.id = Some(next_id);
            next_id += 1;
        }
    }

    dashboard
}

/// Build the services dashboard: 2xx/5xx rates and latency between a source
/// and a destination service, both chosen through template variables.
pub fn build() -> Dashboard {
    let templating = vec![
        TemplateVariable::new(
            "source".to_string(),
            DATA_SOURCE.to_string(),
            "metrics(.*_cluster_.*_upstream_rq_2xx)".to_string(),
            Some("/(.*)_cluster_.*_upstream_rq_2xx/".to_string()),
            "service_a".to_string(),
        ),
        TemplateVariable::new(
            "destination".to_string(),
            DATA_SOURCE.to_string(),
            "metrics(.*_cluster_.*_upstream_rq_2xx)".to_string(),
            Some("/.*_cluster_(.*)_upstream_rq_2xx/".to_string()),
            "service_b".to_string(),
        ),
    ];

    let panels = vec![
        graph(
            "2XX",
            "[[source]]_cluster_[[destination]]_upstream_rq_2xx - [[source]]_cluster_[[destination]]_upstream_rq_2xx offset $__interval",
            "2xx",
        ),
        graph(
            "5XX",
            "[[source]]_cluster_[[destination]]_upstream_rq_5xx - [[source]]_cluster_[[destination]]_upstream_rq_5xx offset $__interval",
            "5xx",
        ),
        graph(
            "Latency",
            "[[source]]_cluster_[[destination]]_upstream_rq_time",
            "{{quantile}}",
        ),
    ];

    let dashboard = Dashboard::new(
        "Services Dashboard".to_string(),
        templating,
        vec![Row::new(panels)],
    );

    assign_panel_ids(dashboard)
}

/// Build a dashboard from a loaded definition file
pub fn build_from_definition(definition: &DashboardDefinition) -> Dashboard {
    let templating = definition
        .templating
        .iter()
        .map(|t| {
            TemplateVariable::new(
                t.name.clone(),
                t.data_source.clone(),
                t.query.clone(),
                t.regex.clone(),
                t.default.clone(),
            )
        })
        .collect();

    let rows = definition
        .rows
        .iter()
        .map(|row| {
            let panels = row
                .panels
                .iter()
                .map(|p| {
                    let targets = p
                        .targets
                        .iter()
                        .map(|t| Target::new(t.expr.clone(), t.legend_format.clone()))
                        .collect();
                    Panel::new(p.title.clone(), p.data_source.clone(), p.transparent, targets)
                })
                .collect();
            Row::new(panels)
        })
        .collect();

    let dashboard = Dashboard::new(definition.title.clone(), templating, rows);

    tracing::debug!(
        "Built dashboard {} from definition: {} rows, {} panels",
        dashboard.title,
        dashboard.rows.len(),
        dashboard.panel_count()
    );

    assign_panel_ids(dashboard)
}

fn graph(title: &str, expr: &str, legend_format: &str) -> Panel {
    Panel::new(
        title.to_string(),
        DATA_SOURCE.to_string(),
        true,
        vec![Target::new(expr.to_string(), legend_format.to_string())],
    )
}
