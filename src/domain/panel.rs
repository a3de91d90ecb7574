// Row, panel and query target domain models

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub expr: String,
    pub legend_format: String,
}

impl Target {
    pub fn new(expr: String, legend_format: String) -> Self {
        Self {
            expr,
            legend_format,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Assigned by `assign_panel_ids`, `None` until then
    pub id: Option<u32>,
    pub title: String,
    pub data_source: String,
    pub transparent: bool,
    pub targets: Vec<Target>,
}

impl Panel {
    pub fn new(title: String, data_source: String, transparent: bool, targets: Vec<Target>) -> Self {
        Self {
            id: None,
            title,
            data_source,
            transparent,
            targets,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub panels: Vec<Panel>,
}

impl Row {
    pub fn new(panels: Vec<Panel>) -> Self {
        Self { panels }
    }
}
