//! End-to-end tests across composition, adaptation, URL finalization and
//! dispatch planning.

use chrono::NaiveDate;
use dorkhub::{
    adapt, build_query, default_templates, finalize_url, lint_query, plan, Catalog, DispatchPlan,
    Engine, SearchRequest, Severity, WEB_PAGE_EXCLUSIONS,
};

fn catalog() -> Catalog {
    Catalog::builtin()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod composer_tests {
    use super::*;

    #[test]
    fn test_music_search_composes_full_dork() {
        let request = SearchRequest::new("file_search")
            .with_option("Music")
            .with_text("daft punk discovery");
        let query = build_query(&request, &catalog());
        assert!(query.starts_with(r#"intitle:"index of""#));
        assert!(query.contains("daft punk discovery"));
        assert!(query.contains("(.mp3 | .flac)"));
        assert!(query.ends_with(WEB_PAGE_EXCLUSIONS));
    }

    #[test]
    fn test_includes_excludes_and_dates_layer_over_core() {
        let request = SearchRequest::new("code")
            .with_text("jwt verification")
            .with_includes(vec!["rust".to_string()])
            .with_excludes(vec!["--deprecated".to_string()])
            .with_exact_phrase(true)
            .with_after(date(2023, 1, 1));
        assert_eq!(
            build_query(&request, &catalog()),
            r#"jwt verification "rust" -deprecated after:2023-01-01"#
        );
    }

    #[test]
    fn test_empty_request_yields_empty_query() {
        let request = SearchRequest::new("code");
        assert_eq!(build_query(&request, &catalog()), "");
    }
}

mod adaptation_tests {
    use super::*;

    #[test]
    fn test_music_dork_for_yandex_keeps_extension_group() {
        let request = SearchRequest::new("file_search")
            .with_option("Music")
            .with_text("daft punk");
        let query = build_query(&request, &catalog());
        let adapted = adapt(&query, Engine::Yandex);
        assert!(adapted.starts_with(r#"title:"index of""#));
        assert!(adapted.contains("(.mp3 | .flac)"));
        assert!(adapted.contains("-inurl:html"));
    }

    #[test]
    fn test_adaptation_is_stable_under_reapplication() {
        let query = "site:example.com filetype:pdf intitle:login a OR b";
        for engine in Engine::all() {
            let once = adapt(query, *engine);
            assert_eq!(adapt(&once, *engine), once);
        }
    }
}

mod url_tests {
    use super::*;

    #[test]
    fn test_google_url_uses_plus_separators_and_date_params() {
        let url = finalize_url(
            Engine::Google,
            r#"intitle:"index of" report"#,
            Some(date(2024, 1, 5)),
            Some(date(2024, 12, 31)),
        );
        assert!(url.starts_with("https://www.google.com/search?q="));
        assert!(url.contains(r#"intitle:"index+of"+report"#));
        assert!(url.ends_with("&tbs=cdr:1,cd_min:1/5/2024,cd_max:12/31/2024"));
    }

    #[test]
    fn test_bing_url_is_percent_encoded() {
        let url = finalize_url(Engine::Bing, r#"site:example.com "api key""#, None, None);
        assert!(url.starts_with("https://www.bing.com/search?q="));
        assert!(url.contains("site%3Aexample.com"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_scholar_url_uses_year_bounds() {
        let url = finalize_url(
            Engine::Scholar,
            "transformer models",
            Some(date(2019, 6, 1)),
            Some(date(2023, 1, 1)),
        );
        assert!(url.contains("&as_ylo=2019"));
        assert!(url.contains("&as_yhi=2023"));
    }
}

mod dispatch_tests {
    use super::*;

    #[test]
    fn test_plan_builds_one_target_per_unique_engine() {
        let request = SearchRequest::new("code").with_text("tokio").with_engines(vec![
            "google".to_string(),
            "duckduckgo".to_string(),
            "google".to_string(),
        ]);
        let plan = plan(&request, &catalog()).unwrap();
        match plan {
            DispatchPlan::Engines { targets, .. } => {
                assert_eq!(targets.len(), 2);
                assert_eq!(targets[0].engine, Engine::Google);
                assert_eq!(targets[1].engine, Engine::DuckDuckGo);
            }
            DispatchPlan::Wayback { .. } => panic!("expected engine plan"),
        }
    }

    #[test]
    fn test_plan_adapts_query_per_target() {
        let request = SearchRequest::new("file_search")
            .with_option("Music")
            .with_text("daft punk")
            .with_engines(vec!["yandex".to_string()]);
        let plan = plan(&request, &catalog()).unwrap();
        match plan {
            DispatchPlan::Engines { targets, .. } => {
                assert!(targets[0].query.starts_with(r#"title:"index of""#));
                assert!(targets[0].url.starts_with("https://yandex.com/search/?text="));
            }
            DispatchPlan::Wayback { .. } => panic!("expected engine plan"),
        }
    }

    #[test]
    fn test_plan_routes_wayback_option_to_archive() {
        let request = SearchRequest::new("intelligence")
            .with_option("Wayback Machine")
            .with_text("https://example.com/about");
        let plan = plan(&request, &catalog()).unwrap();
        match plan {
            DispatchPlan::Wayback { domain, url } => {
                assert_eq!(domain, "example.com");
                assert!(url.starts_with("https://web.archive.org/web/*/"));
            }
            DispatchPlan::Engines { .. } => panic!("expected wayback plan"),
        }
    }

    #[test]
    fn test_plan_empty_query_is_none() {
        let request = SearchRequest::new("code");
        assert!(plan(&request, &catalog()).is_none());
    }
}

mod history_tests {
    use dorkhub::{HistoryEntry, HistoryStore, HISTORY_LIMIT};
    use tempfile::tempdir;

    #[test]
    fn test_history_survives_reopen_and_dedupes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        {
            let mut store = HistoryStore::open(&path);
            let entry = HistoryEntry::new(
                "site:*.example.com",
                vec!["https://www.google.com/search?q=site:*.example.com".to_string()],
                vec!["google".to_string()],
            );
            store.add(entry.clone()).unwrap();
            store.add(entry).unwrap();
        }
        let store = HistoryStore::open(&path);
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn test_history_never_exceeds_limit() {
        let dir = tempdir().unwrap();
        let mut store = HistoryStore::open(dir.path().join("history.json"));
        for i in 0..(HISTORY_LIMIT + 10) {
            store
                .add(HistoryEntry::new(
                    format!("query {}", i),
                    vec![format!("https://example.com/{}", i)],
                    vec!["google".to_string()],
                ))
                .unwrap();
        }
        assert_eq!(store.entries().len(), HISTORY_LIMIT);
    }
}

mod template_tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_security_assessment_expands_and_finalizes() {
        let template = default_templates()
            .into_iter()
            .find(|t| t.name == "Security Assessment")
            .unwrap();
        let mut values = HashMap::new();
        values.insert("domain".to_string(), "example.com".to_string());
        let filled = template.fill(&values).unwrap();

        assert_eq!(filled[0].query, "site:*.example.com");
        let engine = Engine::from_id(&filled[0].engine).unwrap();
        let url = finalize_url(engine, &adapt(&filled[0].query, engine), None, None);
        assert_eq!(
            url,
            "https://www.google.com/search?q=site:*.example.com"
        );
    }

    #[test]
    fn test_template_with_missing_variable_fails() {
        let template = default_templates()
            .into_iter()
            .find(|t| t.name == "Company Research")
            .unwrap();
        assert!(template.fill(&HashMap::new()).is_err());
    }
}

mod lint_tests {
    use super::*;

    #[test]
    fn test_composed_queries_pass_lint() {
        let request = SearchRequest::new("file_search")
            .with_option("Books")
            .with_text("distributed systems");
        let query = build_query(&request, &catalog());
        assert!(lint_query(&query).is_empty(), "query: {}", query);
    }

    #[test]
    fn test_lint_flags_quoted_site_operator() {
        let findings = lint_query(r#""site:example.com" secrets"#);
        assert!(findings.iter().any(|f| f.severity == Severity::Warning));
    }
}
