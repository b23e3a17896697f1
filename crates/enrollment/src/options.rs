//! Remote Option Loader.
//!
//! Fetches the region list once, parses the `<option>` fragment and hands the
//! records to the selection control. Any failure collapses to a single
//! disabled placeholder; partial lists are never shown.

use std::borrow::Cow;
use std::future::Future;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use rust_embed::RustEmbed;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

/// Label of the placeholder shown when the list could not be loaded.
pub const LOAD_ERROR_LABEL: &str = "ERROR: States Failed to Load";

/// Resource name of the bundled region list.
pub const STATES_RESOURCE: &str = "states.html";

#[derive(RustEmbed)]
#[folder = "assets/"]
struct OptionAssets;

/// One selectable entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionRecord {
    pub value: String,
    pub label: String,
    pub disabled: bool,
    pub selected: bool,
}

impl OptionRecord {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
            selected: false,
        }
    }

    /// Disabled, preselected entry with an empty value.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            disabled: true,
            selected: true,
            ..Self::new("", label)
        }
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn to_markup(&self) -> String {
        let mut attrs = format!(r#"value="{}""#, escape(&self.value));
        if self.disabled {
            attrs.push_str(" disabled");
        }
        if self.selected {
            attrs.push_str(" selected");
        }
        format!("<option {attrs}>{}</option>", escape(&self.label))
    }
}

/// Render a list back into an option fragment, one element per line.
pub fn render_options(options: &[OptionRecord]) -> String {
    options
        .iter()
        .map(OptionRecord::to_markup)
        .collect::<Vec<_>>()
        .join("\n")
}

lazy_static! {
    static ref OPTION: Regex = Regex::new(r"(?is)<option\b([^>]*)>(.*?)</option\s*>").unwrap();
    static ref VALUE_ATTR: Regex =
        Regex::new(r#"(?i)\bvalue\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap();
    static ref DISABLED_ATTR: Regex = Regex::new(r"(?i)\bdisabled\b").unwrap();
    static ref SELECTED_ATTR: Regex = Regex::new(r"(?i)\bselected\b").unwrap();
}

/// Parse an `<option>` fragment. Text outside option elements is ignored and
/// an option without a `value` attribute submits its label.
pub fn parse_options(markup: &str) -> Vec<OptionRecord> {
    OPTION
        .captures_iter(markup)
        .map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let label = unescape(caps.get(2).map_or("", |m| m.as_str()).trim());

            // Strip the attribute values first so a label like "selected" in a
            // value does not count as the boolean attribute.
            let bare = VALUE_ATTR.replace_all(attrs, "");
            let value = VALUE_ATTR
                .captures(attrs)
                .and_then(|v| v.get(1).or_else(|| v.get(2)).or_else(|| v.get(3)))
                .map(|m| unescape(m.as_str()))
                .unwrap_or_else(|| label.clone());

            OptionRecord {
                value,
                label,
                disabled: DISABLED_ATTR.is_match(&bare),
                selected: SELECTED_ATTR.is_match(&bare),
            }
        })
        .collect()
}

fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;"),
    )
}

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[derive(Debug, Error)]
pub enum OptionLoadError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("resource not found: {0}")]
    Missing(String),
}

/// Where the option fragment comes from.
pub trait OptionSource {
    fn fetch(&self) -> impl Future<Output = Result<String, OptionLoadError>> + Send;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// GET against a URL; anything but a 2xx status is a failure.
pub struct HttpOptionSource {
    client: Client,
    url: String,
}

impl HttpOptionSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl OptionSource for HttpOptionSource {
    async fn fetch(&self) -> Result<String, OptionLoadError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OptionLoadError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Fragment read from a local file.
pub struct FileOptionSource {
    path: PathBuf,
}

impl FileOptionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OptionSource for FileOptionSource {
    async fn fetch(&self) -> Result<String, OptionLoadError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fragment bundled into the binary.
///
/// With an override directory, a file of the same name there wins over the
/// bundled copy.
pub struct EmbeddedOptionSource {
    resource: &'static str,
    override_dir: Option<PathBuf>,
}

impl EmbeddedOptionSource {
    pub fn states() -> Self {
        Self {
            resource: STATES_RESOURCE,
            override_dir: None,
        }
    }

    pub fn with_override_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.override_dir = Some(dir.into());
        self
    }

    fn override_path(&self) -> Option<PathBuf> {
        self.override_dir
            .as_ref()
            .map(|dir| dir.join(self.resource))
            .filter(|path| path.is_file())
    }
}

impl Default for EmbeddedOptionSource {
    fn default() -> Self {
        Self::states()
    }
}

impl OptionSource for EmbeddedOptionSource {
    async fn fetch(&self) -> Result<String, OptionLoadError> {
        if let Some(path) = self.override_path() {
            debug!(path = %path.display(), "using resource override");
            return Ok(tokio::fs::read_to_string(&path).await?);
        }
        let markup = paths::asset_str::<OptionAssets>(self.resource);
        if markup.is_empty() {
            return Err(OptionLoadError::Missing(self.resource.to_string()));
        }
        Ok(markup.into_owned())
    }

    fn describe(&self) -> String {
        match self.override_path() {
            Some(path) => path.display().to_string(),
            None => format!("embedded:{}", self.resource),
        }
    }
}

/// What the selection control ends up holding after the single attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OptionsOutcome {
    Loaded(Vec<OptionRecord>),
    Unavailable(OptionRecord),
}

impl OptionsOutcome {
    pub fn into_records(self) -> Vec<OptionRecord> {
        match self {
            OptionsOutcome::Loaded(records) => records,
            OptionsOutcome::Unavailable(placeholder) => vec![placeholder],
        }
    }
}

/// Fetch once and parse. Errors are logged and turned into the placeholder.
pub async fn load_options<S: OptionSource + ?Sized>(source: &S) -> OptionsOutcome {
    match source.fetch().await {
        Ok(markup) => {
            let records = parse_options(&markup);
            info!(source = %source.describe(), count = records.len(), "options loaded");
            OptionsOutcome::Loaded(records)
        }
        Err(err) => {
            error!(source = %source.describe(), error = %err, "failed to load options");
            OptionsOutcome::Unavailable(OptionRecord::placeholder(LOAD_ERROR_LABEL))
        }
    }
}
