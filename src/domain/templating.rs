// Template variable domain model

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateVariable {
    pub name: String,
    pub data_source: String,
    pub query: String,
    /// Extracts the display label from each query result
    pub regex: Option<String>,
    pub default: String,
}

impl TemplateVariable {
    pub fn new(
        name: String,
        data_source: String,
        query: String,
        regex: Option<String>,
        default: String,
    ) -> Self {
        Self {
            name,
            data_source,
            query,
            regex,
            default,
        }
    }
}

/// Collect the template variables a query expression refers to, in order of
/// first appearance.
///
/// Understands `[[name]]`, `${name}` (optionally `${name:format}`) and `$name`.
/// Grafana built-ins such as `$__interval` are skipped.
pub fn referenced_variables(expr: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = expr;

    while let Some(pos) = rest.find(['[', '$']) {
        let tail = &rest[pos..];

        let (candidate, consumed) = if let Some(inner) = tail.strip_prefix("[[") {
            match inner.find("]]") {
                Some(end) => (Some(&inner[..end]), end + 4),
                None => (None, 2),
            }
        } else if let Some(inner) = tail.strip_prefix("${") {
            match inner.find('}') {
                Some(end) => {
                    let body = &inner[..end];
                    let name = body.split_once(':').map_or(body, |(name, _)| name);
                    (Some(name), end + 3)
                }
                None => (None, 2),
            }
        } else if let Some(inner) = tail.strip_prefix('$') {
            let len = inner
                .find(|c: char| !is_name_char(c))
                .unwrap_or(inner.len());
            (Some(&inner[..len]), len + 1)
        } else {
            (None, 1)
        };

        if let Some(name) = candidate.filter(|n| is_variable_name(n)) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }

        rest = &tail[consumed..];
    }

    names
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_variable_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with("__") && name.chars().all(is_name_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_placeholders() {
        let expr = "[[source]]_cluster_[[destination]]_upstream_rq_2xx - [[source]]_cluster_[[destination]]_upstream_rq_2xx offset $__interval";
        assert_eq!(referenced_variables(expr), vec!["source", "destination"]);
    }

    #[test]
    fn test_dollar_placeholders() {
        let expr = "rate(http_requests{job=\"$job\", instance=~\"${instance:regex}\"}[5m])";
        assert_eq!(referenced_variables(expr), vec!["job", "instance"]);
    }

    #[test]
    fn test_ignores_non_placeholders() {
        assert!(referenced_variables("up[5m]").is_empty());
        assert!(referenced_variables("sum(rate(x[1m])) / $__rate_interval").is_empty());
        assert!(referenced_variables("cost in $ and [[ unterminated").is_empty());
        assert!(referenced_variables("[[with space]]").is_empty());
    }
}
