//! Diagnostics output
//!
//! When the debug toggle is on, pipelines narrate what they do directly on
//! the page (and in the log). When it is off these calls do nothing.

use serde::Serialize;

use super::page::{Block, Page, Table};

impl Page {
    /// Emit a `🔍 DEBUG:` line
    pub fn debug_print(&mut self, message: impl AsRef<str>) {
        if !self.debug {
            return;
        }
        let message = message.as_ref();
        tracing::info!("DEBUG: {}", message);
        self.text(format!("🔍 DEBUG: {}", message));
    }

    /// Emit a `🔍 DEBUG:` line followed by a JSON payload
    pub fn debug_data<T: Serialize>(&mut self, message: impl AsRef<str>, data: &T) {
        if !self.debug {
            return;
        }
        self.debug_print(message);
        match serde_json::to_value(data) {
            Ok(value) => self.push(Block::Json(value)),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize debug payload"),
        }
    }
}

/// Build and host details shown in debug panels
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SystemInfo {
    pub package: &'static str,
    pub version: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
    pub family: &'static str,
    pub debug_build: bool,
}

impl SystemInfo {
    pub fn current() -> Self {
        Self {
            package: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            family: std::env::consts::FAMILY,
            debug_build: cfg!(debug_assertions),
        }
    }

    /// Label / value pairs for a two-column listing
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Package", format!("{} {}", self.package, self.version)),
            ("Target", format!("{}-{} ({})", self.arch, self.os, self.family)),
            (
                "Build",
                if self.debug_build { "debug" } else { "release" }.to_string(),
            ),
        ]
    }

    pub fn table(&self) -> Table {
        Table {
            headers: vec!["Item".to_string(), "Value".to_string()],
            rows: self
                .entries()
                .into_iter()
                .map(|(k, v)| vec![k.to_string(), v])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_print_disabled_is_noop() {
        let mut page = Page::new("Test", false);
        page.debug_print("hidden");
        page.debug_data("hidden", &vec![1, 2, 3]);
        assert!(page.body.is_empty());
    }

    #[test]
    fn test_debug_print_enabled() {
        let mut page = Page::new("Test", true);
        page.debug_data("Weather data generated", &serde_json::json!({"shape": [100, 4]}));

        assert_eq!(page.body.len(), 2);
        assert!(matches!(&page.body[0], Block::Text(t) if t == "🔍 DEBUG: Weather data generated"));
        assert!(matches!(&page.body[1], Block::Json(v) if v["shape"][0] == 100));
    }

    #[test]
    fn test_system_info() {
        let info = SystemInfo::current();
        assert_eq!(info.package, "weather-tracker");
        assert_eq!(info.table().rows.len(), 3);
    }
}
