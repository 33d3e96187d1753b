use crate::Error;
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// How a [`HashSync`](crate::HashSync) records a hash it did not navigate to itself.
///
/// [`HashSync::navigate_to_section`](crate::HashSync::navigate_to_section) always
/// records the bare fragment (`"test"`). When some other party changes the hash,
/// the new hash is recorded according to this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentTracking {
    /// Record the hash as-is, leading `#` included (`"#other"`).
    ///
    /// A later hash change is compared against `"#" + tracked`, i.e. `"##other"`,
    /// so a foreign hash can never be reported as visible.
    #[default]
    Verbatim,
    /// Record the hash without its leading `#` (`"other"`), the same form
    /// `navigate_to_section` uses.
    Normalized,
}

impl FragmentTracking {
    pub(crate) fn record(self, hash: &str) -> String {
        match self {
            FragmentTracking::Verbatim => hash.to_owned(),
            FragmentTracking::Normalized => hash.strip_prefix('#').unwrap_or(hash).to_owned(),
        }
    }
}

impl FromStr for FragmentTracking {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verbatim" => Ok(FragmentTracking::Verbatim),
            "normalized" => Ok(FragmentTracking::Normalized),
            other => Err(Error::UnknownTracking(other.to_owned())),
        }
    }
}

impl fmt::Display for FragmentTracking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentTracking::Verbatim => write!(f, "verbatim"),
            FragmentTracking::Normalized => write!(f, "normalized"),
        }
    }
}
