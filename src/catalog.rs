//! Search category and option catalog.
//!
//! The catalog is read-only configuration data: each [`Category`] describes a
//! curated search intent (file search, OSINT, exposed services, ...) with a
//! base query fragment and selectable options. [`Catalog::builtin`] carries
//! the full built-in data set; callers may also construct their own.

use serde::{Deserialize, Serialize};

/// How many options of a category may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Exactly one effective option (falls back to the default, then first).
    #[default]
    Single,
    /// Any number of options.
    Multi,
}

/// Behavior of a category option when composed into a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// A literal query fragment injected verbatim (e.g. `site:reddit.com`).
    Literal(String),
    /// The option value is derived from user text: strip scheme and path,
    /// then search `site:*.<domain>`.
    DomainTarget,
    /// The raw user text is the query; dispatch applies special handling
    /// downstream (e.g. a Wayback Machine lookup).
    CustomHandler,
}

/// A file-extension refinement under a file-search option.
///
/// Selected sub-options form a logical OR group; several may be active at
/// the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubOption {
    pub label: String,
    /// Extension token injected into the alternation group (e.g. `.mp3`).
    pub value: String,
    #[serde(default)]
    pub default_selected: bool,
}

/// A selectable refinement within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub label: String,
    pub kind: OptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub default_selected: bool,
    /// Only meaningful for the file-search category.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_options: Vec<SubOption>,
}

impl CategoryOption {
    /// Resolves the effective sub-option extension tokens.
    ///
    /// Labels in `wanted` are matched case-insensitively against both the
    /// label and the value; when `wanted` is empty the default selection
    /// applies.
    pub fn selected_sub_values(&self, wanted: &[String]) -> Vec<String> {
        if wanted.is_empty() {
            return self
                .sub_options
                .iter()
                .filter(|s| s.default_selected)
                .map(|s| s.value.clone())
                .collect();
        }
        self.sub_options
            .iter()
            .filter(|s| {
                wanted.iter().any(|w| {
                    w.eq_ignore_ascii_case(&s.label) || w.eq_ignore_ascii_case(&s.value)
                })
            })
            .map(|s| s.value.clone())
            .collect()
    }
}

/// A curated search intent with a base query fragment and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier (e.g. `file_search`).
    pub id: String,
    pub name: String,
    pub description: String,
    pub placeholder: String,
    /// Query fragment prepended by the composer (may be empty).
    pub base_query: String,
    #[serde(default)]
    pub selection: SelectionMode,
    /// Categories with `safe == false` are hidden in safe mode.
    #[serde(default = "default_safe")]
    pub safe: bool,
    #[serde(default)]
    pub options: Vec<CategoryOption>,
}

fn default_safe() -> bool {
    true
}

impl Category {
    /// Resolves the single effective option for a single-select category.
    ///
    /// `wanted` is matched case-insensitively against option labels; with no
    /// match the default-selected option applies, then the first option.
    /// Returns `None` only when the category has no options at all.
    pub fn effective_option(&self, wanted: Option<&str>) -> Option<&CategoryOption> {
        if let Some(wanted) = wanted {
            if let Some(opt) = self
                .options
                .iter()
                .find(|o| o.label.eq_ignore_ascii_case(wanted))
            {
                return Some(opt);
            }
        }
        self.options
            .iter()
            .find(|o| o.default_selected)
            .or_else(|| self.options.first())
    }
}

/// Read-only lookup of categories by identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Creates a catalog from explicit category data.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Looks up a category by identifier.
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// All categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Categories visible under the given safe-mode setting.
    pub fn visible(&self, safe_mode: bool) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |c| !safe_mode || c.safe)
    }

    /// The full built-in category data set.
    pub fn builtin() -> Self {
        Self::new(vec![
            file_search(),
            social(),
            code(),
            snippets(),
            intelligence(),
            network_devices(),
            vulnerabilities(),
            config_files(),
            exposed_services(),
            sensitive_files(),
        ])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Identifier of the file-search category, which gets the directory-listing
/// treatment in the composer.
pub const FILE_SEARCH: &str = "file_search";

fn sub(label: &str, selected: bool) -> SubOption {
    SubOption {
        label: label.to_string(),
        value: label.to_string(),
        default_selected: selected,
    }
}

fn literal(label: &str, value: &str, description: &str, placeholder: &str) -> CategoryOption {
    CategoryOption {
        label: label.to_string(),
        kind: OptionKind::Literal(value.to_string()),
        description: Some(description.to_string()),
        placeholder: Some(placeholder.to_string()),
        default_selected: false,
        sub_options: Vec::new(),
    }
}

fn file_group(label: &str, placeholder: &str, subs: Vec<SubOption>) -> CategoryOption {
    CategoryOption {
        label: label.to_string(),
        kind: OptionKind::Literal(String::new()),
        description: None,
        placeholder: Some(placeholder.to_string()),
        default_selected: false,
        sub_options: subs,
    }
}

fn first_default(mut options: Vec<CategoryOption>) -> Vec<CategoryOption> {
    if let Some(first) = options.first_mut() {
        first.default_selected = true;
    }
    options
}

fn file_search() -> Category {
    Category {
        id: FILE_SEARCH.to_string(),
        name: "File Search".to_string(),
        description: "Find specific filetypes in open directories.".to_string(),
        placeholder: "e.g., daft punk".to_string(),
        base_query: r#"intitle:"index of" "last modified" "parent directory""#.to_string(),
        selection: SelectionMode::Single,
        safe: true,
        options: first_default(vec![
            file_group(
                "Music",
                "e.g., daft punk",
                vec![
                    sub(".mp3", true),
                    sub(".flac", true),
                    sub(".m4a", false),
                    sub(".wav", false),
                    sub(".opus", false),
                ],
            ),
            file_group(
                "Books",
                "e.g., nineteen eighty-four",
                vec![
                    sub(".pdf", true),
                    sub(".epub", true),
                    sub(".doc", false),
                    sub(".djvu", false),
                    sub(".mobi", false),
                ],
            ),
            file_group(
                "Video",
                "e.g., the matrix",
                vec![
                    sub(".mkv", true),
                    sub(".mp4", true),
                    sub(".avi", false),
                    sub(".mov", false),
                    sub(".webm", false),
                ],
            ),
            file_group(
                "Apps",
                "e.g., photoshop",
                vec![sub(".exe", true), sub(".apk", false), sub(".dmg", false)],
            ),
            file_group(
                "Archives",
                "e.g., project files",
                vec![
                    sub(".zip", true),
                    sub(".rar", true),
                    sub(".7z", false),
                    sub(".tar.gz", false),
                    sub(".iso", false),
                    sub(".bin", false),
                    sub(".cue", false),
                ],
            ),
        ]),
    }
}

fn social() -> Category {
    Category {
        id: "social".to_string(),
        name: "Social".to_string(),
        description: "Search for profiles and content on social media.".to_string(),
        placeholder: "e.g., john doe".to_string(),
        base_query: String::new(),
        selection: SelectionMode::Single,
        safe: true,
        options: first_default(vec![
            literal(
                "Reddit",
                "site:reddit.com",
                "Find discussions, communities, and user comments.",
                "e.g., elon musk",
            ),
            literal(
                "LinkedIn",
                "site:linkedin.com/in/",
                "Search for professional profiles.",
                "e.g., software engineer",
            ),
            literal(
                "Facebook",
                "site:facebook.com",
                "Find public profiles, pages, and groups.",
                "e.g., jane smith photographer",
            ),
            literal(
                "Instagram",
                "site:instagram.com",
                "Search for public profiles and posts.",
                "e.g., national geographic",
            ),
            literal(
                "TikTok",
                "site:tiktok.com",
                "Find user profiles and video content.",
                "e.g., gordon ramsay",
            ),
            literal(
                "Telegram",
                "site:t.me",
                "Discover public channels and groups.",
                "e.g., tech news",
            ),
        ]),
    }
}

fn code() -> Category {
    Category {
        id: "code".to_string(),
        name: "Code Repos".to_string(),
        description: "Search for code across major repositories.".to_string(),
        placeholder: "e.g., user authentication".to_string(),
        base_query: "site:github.com | site:gitlab.com | site:bitbucket.org".to_string(),
        selection: SelectionMode::Single,
        safe: true,
        options: Vec::new(),
    }
}

fn snippets() -> Category {
    Category {
        id: "snippets".to_string(),
        name: "Code Snippets".to_string(),
        description: "Search for code snippets, notes, and leaked credentials.".to_string(),
        placeholder: "e.g., database password".to_string(),
        base_query: String::new(),
        selection: SelectionMode::Single,
        safe: true,
        options: first_default(vec![
            literal(
                "GitHub Gists",
                "site:gist.github.com",
                "Find public code snippets and notes on GitHub Gist.",
                "e.g., aws secret key",
            ),
            literal(
                "Pastebin",
                "site:pastebin.com",
                "Search for leaked credentials and other sensitive text.",
                "e.g., password dump",
            ),
        ]),
    }
}

fn intelligence() -> Category {
    let options = vec![
        CategoryOption {
            label: "Find Subdomains".to_string(),
            kind: OptionKind::DomainTarget,
            description: Some(
                "Enter a domain (e.g., example.com) to find its subdomains.".to_string(),
            ),
            placeholder: Some("e.g., google.com".to_string()),
            default_selected: true,
            sub_options: Vec::new(),
        },
        CategoryOption {
            label: "Wayback Machine".to_string(),
            kind: OptionKind::CustomHandler,
            description: Some("View historical snapshots of a website.".to_string()),
            placeholder: Some("e.g., example.com".to_string()),
            default_selected: false,
            sub_options: Vec::new(),
        },
        literal(
            "Gov Docs",
            "site:.gov filetype:pdf",
            "Finds PDF documents on government websites.",
            "e.g., nasa budget",
        ),
        literal(
            "Edu Docs",
            "site:.edu filetype:pdf",
            "Finds PDF documents on educational websites.",
            "e.g., harvard ai research",
        ),
    ];
    Category {
        id: "intelligence".to_string(),
        name: "Intelligence".to_string(),
        description: "Perform advanced OSINT and reconnaissance searches.".to_string(),
        placeholder: "e.g., example.com".to_string(),
        base_query: String::new(),
        selection: SelectionMode::Single,
        safe: true,
        options,
    }
}

fn network_devices() -> Category {
    Category {
        id: "network_devices".to_string(),
        name: "Network Devices".to_string(),
        description:
            "Find publicly accessible network devices like cameras, routers, and printers."
                .to_string(),
        placeholder: "e.g., city name".to_string(),
        base_query: String::new(),
        selection: SelectionMode::Single,
        safe: false,
        options: first_default(vec![
            literal(
                "Webcams",
                r#"inurl:view/view.shtml | intitle:"Live View / - AXIS""#,
                "Searches for publicly accessible security camera feeds.",
                "e.g., new york",
            ),
            literal(
                "Routers",
                r#"intitle:"router configuration""#,
                "Finds web interfaces for routers.",
                "e.g., Linksys",
            ),
            literal(
                "Printers",
                r#"intitle:"printer status" inurl:hp/device/"#,
                "Finds web interfaces for network printers.",
                "e.g., HP LaserJet",
            ),
        ]),
    }
}

fn vulnerabilities() -> Category {
    Category {
        id: "vulnerabilities".to_string(),
        name: "Vulnerabilities".to_string(),
        description: "Find common software vulnerabilities and error messages. Use responsibly."
            .to_string(),
        placeholder: "e.g., site:example.com".to_string(),
        base_query: String::new(),
        selection: SelectionMode::Single,
        safe: false,
        options: first_default(vec![
            literal(
                "SQL Errors",
                r#""SQL syntax near" | "ORA-00921""#,
                "Finds pages that are displaying raw SQL error messages.",
                r#"e.g., "ORA-00921""#,
            ),
            literal(
                "Exposed API Docs",
                "inurl:/swagger/index.html",
                "Finds publicly exposed Swagger/OpenAPI documentation for APIs.",
                "e.g., internal api",
            ),
            literal(
                "Public Trello Boards",
                r#"site:trello.com "API Key" | "Password""#,
                "Searches public Trello boards for leaked credentials.",
                r#"e.g., "Project Credentials" site:trello.com"#,
            ),
            literal(
                "Nessus Reports",
                r#""This file was generated by Nessus""#,
                "Finds publicly accessible vulnerability scan reports.",
                "e.g., company name",
            ),
        ]),
    }
}

fn config_files() -> Category {
    Category {
        id: "config_files".to_string(),
        name: "Config Files".to_string(),
        description: "Find exposed configuration files and credentials. Use responsibly."
            .to_string(),
        placeholder: "e.g., site:github.com".to_string(),
        base_query: String::new(),
        selection: SelectionMode::Single,
        safe: false,
        options: first_default(vec![
            literal(
                "Exposed .env Files",
                r#"filename:.env "DB_PASSWORD" | "API_KEY""#,
                "Finds environment configuration files which often contain credentials.",
                r#"e.g., filename:.env "MAIL_PASSWORD""#,
            ),
            literal(
                "Exposed AWS Credentials",
                r#"inurl:".aws/credentials""#,
                "Searches for publicly exposed Amazon Web Services credential files.",
                r#"e.g., "aws_access_key_id""#,
            ),
            literal(
                "Exposed SSH Keys",
                "inurl:id_rsa -intext:pub",
                "Finds private SSH keys, which should never be public.",
                r#"e.g., "BEGIN RSA PRIVATE KEY" filetype:key"#,
            ),
            literal(
                "cPanel Configs",
                r#"inurl:"/idx_config" "cpanel""#,
                "Finds exposed cPanel configuration files.",
                "e.g., site:example.com",
            ),
            literal(
                "Bash History",
                r#"intitle:"Index of" .bash_history"#,
                "Finds publicly accessible bash command history files.",
                r#"e.g., filetype:bash_history "pass""#,
            ),
        ]),
    }
}

fn exposed_services() -> Category {
    Category {
        id: "exposed_services".to_string(),
        name: "Exposed Services".to_string(),
        description: "Find publicly accessible services and admin panels. Use responsibly."
            .to_string(),
        placeholder: "e.g., company name".to_string(),
        base_query: String::new(),
        selection: SelectionMode::Single,
        safe: false,
        options: first_default(vec![
            literal(
                "Jenkins Panels",
                r#"intitle:"Dashboard [Jenkins]""#,
                "Finds unsecured Jenkins CI/CD dashboards.",
                "e.g., jenkins",
            ),
            literal(
                "phpMyAdmin",
                "inurl:/phpmyadmin/",
                "Finds phpMyAdmin database administration panels.",
                "e.g., inurl:/phpmyadmin/setup/",
            ),
            literal(
                "Remote Desktop",
                r#"intitle:"Remote Desktop Web Connection""#,
                "Finds exposed RDP web connection portals.",
                "e.g., company name",
            ),
            literal(
                "Apache Test Pages",
                r#"intitle:"Test Page for Apache""#,
                "Finds default Apache server installation pages.",
                r#"e.g., intitle:"Apache HTTP Server Test Page""#,
            ),
            literal(
                "Server Stats",
                r#"intitle:"Usage Statistics for""#,
                "Finds exposed server statistics pages (e.g., AWStats).",
                r#"e.g., intitle:"Usage Statistics for" "Generated by Webalizer""#,
            ),
        ]),
    }
}

fn sensitive_files() -> Category {
    Category {
        id: "sensitive_files".to_string(),
        name: "Sensitive Files".to_string(),
        description:
            "Find backups, logs, and other potentially sensitive documents. Use responsibly."
                .to_string(),
        placeholder: "e.g., site:example.com".to_string(),
        base_query: String::new(),
        selection: SelectionMode::Single,
        safe: false,
        options: first_default(vec![
            literal(
                "Backup Dumps",
                r#""Index of /backup" | "Index of /backups""#,
                "Finds directories that may contain sensitive backup files.",
                r#"e.g., "Index of /backup" "db.sql""#,
            ),
            literal(
                "Access Logs",
                r#"intitle:"Index of" access_log"#,
                "Finds access logs which may store sensitive information.",
                r#"e.g., filetype:log "access.log""#,
            ),
            literal(
                "Confidential Docs",
                r#""not for distribution" confidential filetype:pdf"#,
                "Finds PDF documents marked as confidential.",
                r#"e.g., "top secret" filetype:pdf"#,
            ),
            literal(
                "Financial Spreadsheets",
                r#"intitle:"Index of" finance.xls"#,
                "Finds spreadsheets that may contain financial data.",
                r#"e.g., "finance" filetype:xls inurl:private"#,
            ),
            literal(
                "Password Lists",
                "inurl:passlist.txt | filetype:xls username password",
                "Finds files that may contain lists of user credentials.",
                r#"e.g., filetype:sql "pass" "user""#,
            ),
            literal(
                "Source Code Backups",
                r#"intitle:"Index of" *.php.bak | *.html.bak"#,
                "Finds backup copies of source code files.",
                r#"e.g., "index.php.bak""#,
            ),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_all_categories() {
        let catalog = Catalog::builtin();
        for id in [
            "file_search",
            "social",
            "code",
            "snippets",
            "intelligence",
            "network_devices",
            "vulnerabilities",
            "config_files",
            "exposed_services",
            "sensitive_files",
        ] {
            assert!(catalog.get(id).is_some(), "missing category {}", id);
        }
        assert_eq!(catalog.categories().len(), 10);
    }

    #[test]
    fn test_unknown_category_lookup() {
        let catalog = Catalog::builtin();
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn test_safe_mode_hides_unsafe_categories() {
        let catalog = Catalog::builtin();
        let visible: Vec<_> = catalog.visible(true).map(|c| c.id.as_str()).collect();
        assert!(visible.contains(&"file_search"));
        assert!(visible.contains(&"intelligence"));
        assert!(!visible.contains(&"vulnerabilities"));
        assert!(!visible.contains(&"network_devices"));

        let all: Vec<_> = catalog.visible(false).collect();
        assert_eq!(all.len(), 10);
    }

    #[test]
    fn test_effective_option_defaults_to_first_checked() {
        let catalog = Catalog::builtin();
        let social = catalog.get("social").unwrap();
        let opt = social.effective_option(None).unwrap();
        assert_eq!(opt.label, "Reddit");
    }

    #[test]
    fn test_effective_option_by_label_case_insensitive() {
        let catalog = Catalog::builtin();
        let social = catalog.get("social").unwrap();
        let opt = social.effective_option(Some("linkedin")).unwrap();
        assert_eq!(opt.label, "LinkedIn");
    }

    #[test]
    fn test_effective_option_unknown_label_falls_back() {
        let catalog = Catalog::builtin();
        let social = catalog.get("social").unwrap();
        let opt = social.effective_option(Some("myspace")).unwrap();
        assert_eq!(opt.label, "Reddit");
    }

    #[test]
    fn test_effective_option_none_for_optionless_category() {
        let catalog = Catalog::builtin();
        let code = catalog.get("code").unwrap();
        assert!(code.effective_option(None).is_none());
    }

    #[test]
    fn test_default_sub_options_for_music() {
        let catalog = Catalog::builtin();
        let files = catalog.get(FILE_SEARCH).unwrap();
        let music = files.effective_option(None).unwrap();
        assert_eq!(music.label, "Music");
        assert_eq!(music.selected_sub_values(&[]), vec![".mp3", ".flac"]);
    }

    #[test]
    fn test_explicit_sub_options_override_defaults() {
        let catalog = Catalog::builtin();
        let files = catalog.get(FILE_SEARCH).unwrap();
        let music = files.effective_option(Some("Music")).unwrap();
        let picked = music.selected_sub_values(&[".wav".to_string(), ".opus".to_string()]);
        assert_eq!(picked, vec![".wav", ".opus"]);
    }

    #[test]
    fn test_intelligence_option_kinds() {
        let catalog = Catalog::builtin();
        let intel = catalog.get("intelligence").unwrap();
        assert_eq!(
            intel.effective_option(None).unwrap().kind,
            OptionKind::DomainTarget
        );
        assert_eq!(
            intel.effective_option(Some("Wayback Machine")).unwrap().kind,
            OptionKind::CustomHandler
        );
    }

    #[test]
    fn test_catalog_serialization_round_trip() {
        let catalog = Catalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.categories().len(), catalog.categories().len());
        assert_eq!(
            back.get(FILE_SEARCH).unwrap().base_query,
            catalog.get(FILE_SEARCH).unwrap().base_query
        );
    }
}
