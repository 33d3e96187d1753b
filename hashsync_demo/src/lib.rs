#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod args;
mod error;
mod section;
pub mod walkthrough;

pub use args::Args;
pub use error::DemoError;
pub use section::{Button, DemoConfig, SectionDemo, SectionText, SectionView};

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        pub mod dom;
    }
}
