// Dashboard validation errors
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("template variable `{0}` is declared more than once")]
    DuplicateTemplate(String),

    #[error("panel `{panel}` references undefined template variable `{variable}`")]
    UndefinedVariable { panel: String, variable: String },
}
