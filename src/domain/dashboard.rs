// Dashboard domain model
use super::error::DashboardError;
use super::panel::{Panel, Row};
use super::templating::{referenced_variables, TemplateVariable};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    /// Passed through from the environment, never generated here
    pub uid: Option<String>,
    pub templating: Vec<TemplateVariable>,
    pub rows: Vec<Row>,
}

impl Dashboard {
    pub fn new(title: String, templating: Vec<TemplateVariable>, rows: Vec<Row>) -> Self {
        Self {
            title,
            uid: None,
            templating,
            rows,
        }
    }

    pub fn with_uid(mut self, uid: Option<String>) -> Self {
        self.uid = uid;
        self
    }

    /// Panels in display order: rows top to bottom, then panels within a row
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.rows.iter().flat_map(|row| row.panels.iter())
    }

    pub fn panel_count(&self) -> usize {
        self.rows.iter().map(|row| row.panels.len()).sum()
    }

    /// Check that template names are unique and that every placeholder used
    /// by a target names a declared template variable.
    pub fn validate(&self) -> Result<(), DashboardError> {
        let mut declared = HashSet::new();
        for template in &self.templating {
            if !declared.insert(template.name.as_str()) {
                return Err(DashboardError::DuplicateTemplate(template.name.clone()));
            }
        }

        for panel in self.panels() {
            for target in &panel.targets {
                for variable in referenced_variables(&target.expr) {
                    if !declared.contains(variable.as_str()) {
                        return Err(DashboardError::UndefinedVariable {
                            panel: panel.title.clone(),
                            variable,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
