//! Change-detecting poller for the remote environment.
//!
//! Fetching every variable is comparatively expensive on a cellular link,
//! so the poller first asks for the environment's modification time and
//! only fetches the full set when that differs from the last one seen.

use std::collections::HashMap;

use log::debug;

use crate::app::ports::EnvironmentPort;

#[derive(Debug, Default)]
pub struct EnvironmentPoll {
    /// Modification time of the last fetched snapshot; 0 before the first.
    modified: i64,
}

impl EnvironmentPoll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch unconditionally (startup).
    pub fn begin(&mut self, port: &mut impl EnvironmentPort) -> Option<HashMap<String, String>> {
        self.fetch(port)
    }

    /// Fetch only if the environment changed since the last fetch.
    pub fn poll(&mut self, port: &mut impl EnvironmentPort) -> Option<HashMap<String, String>> {
        if self.has_changed(port) {
            self.fetch(port)
        } else {
            None
        }
    }

    pub fn has_changed(&self, port: &mut impl EnvironmentPort) -> bool {
        port.modified().is_some_and(|t| t != self.modified)
    }

    pub fn last_modified(&self) -> i64 {
        self.modified
    }

    fn fetch(&mut self, port: &mut impl EnvironmentPort) -> Option<HashMap<String, String>> {
        let (modified, vars) = port.fetch()?;
        debug!("environment fetched: {} variables, modified={}", vars.len(), modified);
        self.modified = modified;
        Some(vars)
    }
}
