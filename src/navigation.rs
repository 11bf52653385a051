// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation targets and the sink that performs them.

use std::sync::Mutex;

/// A navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Originally requested location, kept for a post-login return.
    pub from: Option<String>,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl Location {
    pub fn push(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            from: None,
            replace: false,
        }
    }

    pub fn replace(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            from: None,
            replace: true,
        }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Render as a link, carrying `from` in the query string.
    pub fn href(&self) -> String {
        match &self.from {
            Some(from) => format!("{}?from={}", self.path, urlencoding::encode(from)),
            None => self.path.clone(),
        }
    }
}

/// Performs navigations requested by the session controller.
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: Location);
}

/// Records every navigation in order.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<Location>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Location> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Location> {
        self.entries.lock().ok().and_then(|e| e.last().cloned())
    }

    /// Number of navigations whose target path is `path`.
    pub fn count_to(&self, path: &str) -> usize {
        self.entries
            .lock()
            .map(|e| e.iter().filter(|l| l.path == path).count())
            .unwrap_or(0)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, location: Location) {
        tracing::debug!(to = %location.href(), replace = location.replace, "Navigate");
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(location);
        }
    }
}
