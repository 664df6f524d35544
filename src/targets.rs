//! Named version targets for `getbody latest`.

use crate::tools::extract::fetch_capture;
use crate::types::FetchOptions;
use regex::Regex;

/// A page that announces a version, and the pattern whose group 1 is that version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub name: &'static str,
    pub url: &'static str,
    pub pattern: &'static str,
}

pub const TARGETS: [Target; 3] = [
    Target {
        name: "angular",
        url: "https://www.npmjs.com/package/@angular/core",
        pattern: r"<strong>([0-9.]+)</strong>\s*\r?\n\s*is the latest",
    },
    Target {
        name: "node",
        url: "https://nodejs.org/en/",
        pattern: r"Download v{0,1}(\S+)\s+Current",
    },
    Target {
        name: "ruby",
        url: "https://www.ruby-lang.org/en/downloads/",
        pattern: r"The current stable version is (\S+)\.\s+Please",
    },
];

pub fn find(name: &str) -> Option<&'static Target> {
    TARGETS.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

pub fn usage() -> String {
    let names: Vec<&str> = TARGETS.iter().map(|t| t.name).collect();
    format!("Usage: getbody latest [ {} ]", names.join(" | "))
}

impl Target {
    pub fn regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(self.pattern)
    }

    /// Fetch the target page and capture its current version.
    pub async fn latest_version(&self, options: &FetchOptions) -> anyhow::Result<String> {
        let pattern = self.regex()?;
        Ok(fetch_capture(self.url, &pattern, options).await?)
    }
}
