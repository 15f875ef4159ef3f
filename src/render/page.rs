//! Page composition model
//!
//! A page is a flat list of blocks for the main column plus a sidebar.
//! Pipelines append blocks top-to-bottom; sections that fail leave an inline
//! error banner behind and the pipeline carries on.

use serde_json::Value;

use super::chart::LineChart;
use super::choropleth::MapView;

/// Severity of an inline banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Info,
    Success,
}

impl Level {
    pub fn css_class(&self) -> &'static str {
        match self {
            Level::Error => "banner-error",
            Level::Warning => "banner-warning",
            Level::Info => "banner-info",
            Level::Success => "banner-success",
        }
    }
}

/// One cell of a metrics row
#[derive(Debug, Clone, PartialEq)]
pub enum MetricCell {
    Value { label: String, value: String },
    Error(String),
}

/// Plain table with string cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One tab of a tab strip
#[derive(Debug, Clone)]
pub struct Tab {
    pub label: String,
    pub blocks: Vec<Block>,
}

/// A renderable unit of a page
#[derive(Debug, Clone)]
pub enum Block {
    Title(String),
    Subheader(String),
    Text(String),
    Rule,
    Banner { level: Level, message: String },
    /// Preformatted text, used for error chains
    Code(String),
    Json(Value),
    Metrics(Vec<MetricCell>),
    Chart(LineChart),
    Map(MapView),
    Table(Table),
    Tabs(Vec<Tab>),
    /// Sidebar checkbox that toggles diagnostics
    DebugToggle { checked: bool },
}

impl Block {
    /// Blocks that survive when a page halts on a fatal error
    fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            Block::Banner { .. } | Block::Code(_) | Block::Text(_) | Block::Json(_)
        )
    }
}

/// A page under construction
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub debug: bool,
    pub sidebar: Vec<Block>,
    pub body: Vec<Block>,
}

impl Page {
    pub fn new(title: impl Into<String>, debug: bool) -> Self {
        Self {
            title: title.into(),
            debug,
            sidebar: Vec::new(),
            body: Vec::new(),
        }
    }

    /// An empty container sharing this page's settings, for tab contents
    pub fn child(&self) -> Page {
        Page::new(self.title.clone(), self.debug)
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.body
    }

    pub fn push(&mut self, block: Block) {
        self.body.push(block);
    }

    pub fn push_sidebar(&mut self, block: Block) {
        self.sidebar.push(block);
    }

    pub fn title(&mut self, text: impl Into<String>) {
        self.push(Block::Title(text.into()));
    }

    pub fn subheader(&mut self, text: impl Into<String>) {
        self.push(Block::Subheader(text.into()));
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.push(Block::Text(text.into()));
    }

    pub fn rule(&mut self) {
        self.push(Block::Rule);
    }

    pub fn banner(&mut self, level: Level, message: impl Into<String>) {
        self.push(Block::Banner {
            level,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.banner(Level::Error, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.banner(Level::Warning, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.banner(Level::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.banner(Level::Success, message);
    }

    /// Show an error chain when diagnostics are enabled
    pub fn trace(&mut self, err: &anyhow::Error) {
        if self.debug {
            self.push(Block::Code(format!("{:?}", err)));
        }
    }

    /// Run one page section, turning its failure into an inline banner.
    ///
    /// The banner reads `❌ Error <what>: <message>`; with diagnostics on the
    /// full error chain follows it. Returns `None` if the section failed.
    pub fn section<T, F>(&mut self, what: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Page) -> anyhow::Result<T>,
    {
        match f(self) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(section = what, error = %err, "Page section failed");
                self.error(format!("❌ Error {}: {}", what, err));
                self.trace(&err);
                None
            }
        }
    }

    /// Strip everything but messages, for a page that cannot continue
    pub fn halt(mut self) -> Page {
        self.body.retain(Block::is_diagnostic);
        self.sidebar
            .retain(|b| matches!(b, Block::DebugToggle { .. }) || b.is_diagnostic());
        self
    }

    /// Banner messages at one level, in page order (tabs included)
    pub fn messages(&self, level: Level) -> Vec<&str> {
        fn collect<'a>(blocks: &'a [Block], level: Level, out: &mut Vec<&'a str>) {
            for block in blocks {
                match block {
                    Block::Banner { level: l, message } if *l == level => out.push(message),
                    Block::Tabs(tabs) => {
                        for tab in tabs {
                            collect(&tab.blocks, level, out);
                        }
                    }
                    _ => {}
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.sidebar, level, &mut out);
        collect(&self.body, level, &mut out);
        out
    }
}

/// Why a pipeline stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fatal {
    /// The synthetic series could not be generated or validated
    Series,
    /// The boundary file is missing, empty or unusable
    RegionsUnavailable,
    /// The map could not be assembled from the loaded regions
    MapSetup,
}

/// Result of running a page pipeline
#[derive(Debug, Clone)]
pub enum Rendered {
    Complete(Page),
    Halted { page: Page, cause: Fatal },
}

impl Rendered {
    pub fn page(&self) -> &Page {
        match self {
            Rendered::Complete(page) => page,
            Rendered::Halted { page, .. } => page,
        }
    }

    pub fn fatal(&self) -> Option<Fatal> {
        match self {
            Rendered::Complete(_) => None,
            Rendered::Halted { cause, .. } => Some(*cause),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Rendered::Complete(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_section_success_passes_value() {
        let mut page = Page::new("Test", false);
        let value = page.section("computing", |p| {
            p.text("inside");
            Ok(7)
        });

        assert_eq!(value, Some(7));
        assert_eq!(page.body.len(), 1);
        assert!(page.messages(Level::Error).is_empty());
    }

    #[test]
    fn test_section_failure_becomes_banner() {
        let mut page = Page::new("Test", false);
        let value: Option<()> = page.section("displaying chart", |_| anyhow::bail!("no points"));

        assert!(value.is_none());
        assert_eq!(page.messages(Level::Error), vec!["❌ Error displaying chart: no points"]);
        assert!(!page.body.iter().any(|b| matches!(b, Block::Code(_))));
    }

    #[test]
    fn test_section_failure_with_debug_shows_chain() {
        let mut page = Page::new("Test", true);
        page.section("loading", |_| -> anyhow::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone")).context("reading input")
        });

        let code = page.body.iter().find_map(|b| match b {
            Block::Code(text) => Some(text.clone()),
            _ => None,
        });
        let code = code.expect("trace block");
        assert!(code.contains("reading input"));
        assert!(code.contains("disk gone"));
    }

    #[test]
    fn test_halt_keeps_only_messages() {
        let mut page = Page::new("Test", false);
        page.push_sidebar(Block::DebugToggle { checked: false });
        page.title("Dashboard");
        page.push(Block::Metrics(vec![]));
        page.error("❌ boom");
        page.rule();

        let halted = page.halt();
        assert_eq!(halted.body.len(), 1);
        assert_eq!(halted.sidebar.len(), 1);
        assert_eq!(halted.messages(Level::Error), vec!["❌ boom"]);
    }

    #[test]
    fn test_messages_descend_into_tabs() {
        let mut page = Page::new("Test", false);
        let mut tab = page.child();
        tab.success("tab ok");
        page.push(Block::Tabs(vec![Tab {
            label: "One".to_string(),
            blocks: tab.into_blocks(),
        }]));
        page.success("page ok");

        assert_eq!(page.messages(Level::Success), vec!["tab ok", "page ok"]);
    }
}
