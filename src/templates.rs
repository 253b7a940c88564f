//! Reusable query templates with `{variable}` placeholders.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DorkError, Result};

lazy_static! {
    static ref VARIABLE: Regex = Regex::new(r"\{([a-zA-Z0-9_]+)\}").unwrap();
}

/// One query a template expands to, with its target engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateQuery {
    pub query: String,
    pub engine: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TemplateQuery {
    pub fn new(query: impl Into<String>, engine: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            engine: engine.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A named bundle of parameterized queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub category: String,
    pub variables: Vec<String>,
    pub queries: Vec<TemplateQuery>,
}

impl Template {
    /// Substitutes `{variable}` placeholders in every query.
    ///
    /// Fails with [`DorkError::MissingVariables`] when any declared variable
    /// has no value.
    pub fn fill(&self, values: &HashMap<String, String>) -> Result<Vec<TemplateQuery>> {
        let missing = self.missing_variables(values);
        if !missing.is_empty() {
            return Err(DorkError::MissingVariables(
                self.name.clone(),
                missing.join(", "),
            ));
        }
        Ok(self
            .queries
            .iter()
            .map(|q| {
                let mut filled = q.clone();
                filled.query = substitute(&q.query, values);
                filled
            })
            .collect())
    }

    /// Declared variables absent from `values`.
    pub fn missing_variables(&self, values: &HashMap<String, String>) -> Vec<String> {
        self.variables
            .iter()
            .filter(|v| !values.contains_key(v.as_str()))
            .cloned()
            .collect()
    }
}

fn substitute(query: &str, values: &HashMap<String, String>) -> String {
    VARIABLE
        .replace_all(query, |caps: &regex::Captures<'_>| {
            values
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// The built-in template set.
pub fn default_templates() -> Vec<Template> {
    vec![
        Template {
            name: "Basic OSINT Profile".to_string(),
            description: "Profile a person across social platforms and documents".to_string(),
            category: "intelligence".to_string(),
            variables: vec!["name".to_string()],
            queries: vec![
                TemplateQuery::new(
                    r#""{name}" site:linkedin.com | site:twitter.com | site:facebook.com"#,
                    "google",
                )
                .with_description("Social media profiles"),
                TemplateQuery::new(r#""{name}" filetype:pdf | filetype:doc"#, "google")
                    .with_description("Documents mentioning the name"),
                TemplateQuery::new(r#""{name}""#, "duckduckgo"),
            ],
        },
        Template {
            name: "Document Search".to_string(),
            description: "Find public documents on a domain".to_string(),
            category: "file_search".to_string(),
            variables: vec!["domain".to_string()],
            queries: vec![
                TemplateQuery::new(
                    "site:{domain} filetype:pdf | filetype:doc | filetype:docx",
                    "google",
                )
                .with_description("Office documents"),
                TemplateQuery::new("site:{domain} filetype:xls | filetype:xlsx", "google")
                    .with_description("Spreadsheets"),
            ],
        },
        Template {
            name: "Tech Stack Analysis".to_string(),
            description: "Identify technologies and code a company exposes".to_string(),
            category: "code".to_string(),
            variables: vec!["company".to_string()],
            queries: vec![
                TemplateQuery::new(r#""{company}" site:github.com"#, "google")
                    .with_description("Public repositories"),
                TemplateQuery::new(r#""{company}" site:stackoverflow.com"#, "google")
                    .with_description("Developer questions"),
                TemplateQuery::new(r#""{company}" job "tech stack""#, "google"),
            ],
        },
        Template {
            name: "Security Assessment".to_string(),
            description: "Surface exposed endpoints and files for an authorized target".to_string(),
            category: "intelligence".to_string(),
            variables: vec!["domain".to_string()],
            queries: vec![
                TemplateQuery::new("site:*.{domain}", "google").with_description("Subdomains"),
                TemplateQuery::new("site:{domain} inurl:login | inurl:admin", "google")
                    .with_description("Login and admin pages"),
                TemplateQuery::new(r#"site:{domain} intitle:"index of""#, "google")
                    .with_description("Open directory listings"),
            ],
        },
        Template {
            name: "Company Research".to_string(),
            description: "Background on a company from news and filings".to_string(),
            category: "intelligence".to_string(),
            variables: vec!["company".to_string()],
            queries: vec![
                TemplateQuery::new(r#""{company}""#, "news").with_description("Recent coverage"),
                TemplateQuery::new(r#""{company}" filetype:pdf annual report"#, "google"),
                TemplateQuery::new(r#""{company}" funding | acquisition"#, "google"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fill_substitutes_all_placeholders() {
        let template = default_templates()
            .into_iter()
            .find(|t| t.name == "Document Search")
            .unwrap();
        let filled = template.fill(&values(&[("domain", "example.com")])).unwrap();
        assert_eq!(
            filled[0].query,
            "site:example.com filetype:pdf | filetype:doc | filetype:docx"
        );
        assert!(filled.iter().all(|q| !q.query.contains('{')));
    }

    #[test]
    fn test_fill_missing_variable_errors() {
        let template = default_templates()
            .into_iter()
            .find(|t| t.name == "Basic OSINT Profile")
            .unwrap();
        let err = template.fill(&HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_fill_repeated_placeholder() {
        let template = Template {
            name: "t".to_string(),
            description: String::new(),
            category: "code".to_string(),
            variables: vec!["x".to_string()],
            queries: vec![TemplateQuery::new("{x} and {x}", "google")],
        };
        let filled = template.fill(&values(&[("x", "rust")])).unwrap();
        assert_eq!(filled[0].query, "rust and rust");
    }

    #[test]
    fn test_missing_variables_lists_only_absent() {
        let template = Template {
            name: "t".to_string(),
            description: String::new(),
            category: "code".to_string(),
            variables: vec!["a".to_string(), "b".to_string()],
            queries: vec![],
        };
        assert_eq!(
            template.missing_variables(&values(&[("a", "1")])),
            vec!["b".to_string()]
        );
    }

    #[test]
    fn test_default_templates_declare_their_variables() {
        for template in default_templates() {
            for query in &template.queries {
                for caps in VARIABLE.captures_iter(&query.query) {
                    assert!(
                        template.variables.contains(&caps[1].to_string()),
                        "{} uses undeclared {{{}}}",
                        template.name,
                        &caps[1]
                    );
                }
            }
        }
    }
}
