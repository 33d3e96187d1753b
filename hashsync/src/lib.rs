#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod callbacks;
mod config;
mod context;
mod error;
mod memory;
mod sync;
mod visibility;

pub use callbacks::Callback;
pub use config::FragmentTracking;
pub use context::{HashChange, NavigationContext, Subscription};
pub use error::Error;
pub use memory::{MemoryNavigation, DEFAULT_BASE_URL};
pub use sync::{next_visibility, HashSync, HashSyncBuilder};
pub use visibility::VisibilityCell;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        mod web;
        pub use web::WebNavigation;
    }
}
