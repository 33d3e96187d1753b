use crate::DemoConfig;
use clap::Parser;
use hashsync::FragmentTracking;
use serde::Deserialize;
use std::ffi::OsString;

/// Demo settings, from the command line natively or the page query string on
/// the web (`?section=drawer&text=Hello`).
#[derive(Parser, Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[clap(
    name = "hashsync_demo",
    rename_all = "kebab-case",
    rename_all_env = "screaming-snake"
)]
pub struct Args {
    /// Fragment the section opens at
    #[clap(long, default_value = "test")]
    pub section: String,

    /// Text shown while the section is open
    #[clap(long, default_value = "Welcome to the test Section")]
    pub text: String,

    /// How hashes set by someone else are tracked: verbatim or normalized
    #[clap(long, default_value = "verbatim")]
    pub tracking: FragmentTracking,

    /// Url the in-memory history starts at
    #[clap(long, default_value = hashsync::DEFAULT_BASE_URL)]
    pub base_url: String,
}

impl Default for Args {
    fn default() -> Self {
        let args = Vec::<OsString>::new();
        Args::parse_from(args)
    }
}

impl Args {
    /// Reads the page query string.
    #[cfg(target_arch = "wasm32")]
    pub fn get() -> Result<Self, crate::DemoError> {
        let window = web_sys::window().ok_or(hashsync::Error::NoWindow)?;
        let search = window
            .location()
            .search()
            .map_err(|err| crate::DemoError::Dom(format!("{err:?}")))?;
        Self::from_query(search.trim_start_matches('?'))
    }

    #[cfg(target_arch = "wasm32")]
    fn from_query(query: &str) -> Result<Self, crate::DemoError> {
        Ok(serde_qs::from_str(query)?)
    }

    /// The settings relevant to [`SectionDemo`](crate::SectionDemo).
    pub fn config(&self) -> DemoConfig {
        DemoConfig {
            section: self.section.clone(),
            text: self.text.clone(),
            tracking: self.tracking,
        }
    }
}
