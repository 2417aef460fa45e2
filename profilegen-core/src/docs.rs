//! Documentation generator settings.
//!
//! [`DocsConfig`] is the static configuration handed to the external API
//! documentation builder. The only behaviour here is [`skip_member`], the
//! member filter the builder calls for every documented symbol.

use crate::{Result, error::ProfileError};
use serde::Serialize;

/// Symbols whose name contains this substring are left out of the API docs.
pub const SKIPPED_MEMBER_SUBSTRING: &str = "logger";

/// Builder event the member filter is attached to.
pub const SKIP_MEMBER_EVENT: &str = "autoapi-skip-member";

/// Static documentation build settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocsConfig {
    /// Project name shown in page titles
    pub project: String,
    /// Copyright line
    pub copyright: String,
    /// Author name
    pub author: String,
    /// Builder extensions to load
    pub extensions: Vec<String>,
    /// Prefix documented names with their module path
    pub add_module_names: bool,
    /// Imports replaced by mocks while documenting
    pub autodoc_mock_imports: Vec<String>,
    /// Source directories scanned for API docs
    pub autoapi_dirs: Vec<String>,
    /// Patterns excluded from API scanning
    pub autoapi_ignore: Vec<String>,
    /// Template directories
    pub templates_path: Vec<String>,
    /// Patterns excluded from the documentation sources
    pub exclude_patterns: Vec<String>,
    /// HTML theme name
    pub html_theme: String,
    /// Static asset directories
    pub html_static_path: Vec<String>,
    /// Extra stylesheets
    pub html_css_files: Vec<String>,
    /// Theme options
    pub html_theme_options: ThemeOptions,
    /// Member filters wired to builder events
    pub member_filters: Vec<MemberFilter>,
}

/// HTML theme options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeOptions {
    /// Logo images
    pub logo: LogoOptions,
    /// Footer components
    pub footer_items: Vec<String>,
}

/// Logo images for light and dark mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoOptions {
    /// Image used with the light theme
    pub image_light: String,
    /// Image used with the dark theme
    pub image_dark: String,
}

/// Description of a member filter for the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberFilter {
    /// Event the filter is connected to
    pub event: String,
    /// Members whose name contains this substring are skipped
    pub exclude_substring: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            project: "profilegen".to_string(),
            copyright: "2023, profilegen contributors".to_string(),
            author: "profilegen contributors".to_string(),
            extensions: strings(&[
                "autoapi.extension",
                "sphinx.ext.autodoc",
                "sphinx.ext.autosummary",
                "sphinx.ext.autosectionlabel",
                "sphinx_tabs.tabs",
            ]),
            add_module_names: false,
            autodoc_mock_imports: strings(&["airflow"]),
            autoapi_dirs: strings(&["../profilegen-core"]),
            autoapi_ignore: strings(&["*/tests/*"]),
            templates_path: strings(&["_templates"]),
            exclude_patterns: strings(&["_build", "Thumbs.db", ".DS_Store", "**/tests/*"]),
            html_theme: "pydata_sphinx_theme".to_string(),
            html_static_path: strings(&["_static"]),
            html_css_files: strings(&["css/custom.css"]),
            html_theme_options: ThemeOptions {
                logo: LogoOptions {
                    image_light: "profilegen-icon.svg".to_string(),
                    image_dark: "profilegen-icon.svg".to_string(),
                },
                footer_items: strings(&["copyright"]),
            },
            member_filters: vec![MemberFilter {
                event: SKIP_MEMBER_EVENT.to_string(),
                exclude_substring: SKIPPED_MEMBER_SUBSTRING.to_string(),
            }],
        }
    }
}

impl DocsConfig {
    /// Serializes the settings as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ProfileError::serialization("documentation settings", e))
    }
}

/// Member filter: skips any symbol whose name contains `logger`, otherwise
/// keeps the builder's own decision.
///
/// ```rust
/// use profilegen_core::docs::skip_member;
///
/// assert!(skip_member("cosmos.providers.logger", false));
/// assert!(!skip_member("cosmos.providers.get_profile", false));
/// assert!(skip_member("cosmos.providers.private", true));
/// ```
pub fn skip_member(name: &str, skip: bool) -> bool {
    skip || name.contains(SKIPPED_MEMBER_SUBSTRING)
}

/// Keeps the names the member filter does not skip.
pub fn filter_members<'a, I>(names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter(|name| !skip_member(name, false))
        .collect()
}
