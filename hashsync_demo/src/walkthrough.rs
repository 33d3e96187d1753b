//! Scripted run of the demo against an in-memory history.

use crate::{Button, DemoConfig, DemoError, SectionDemo};
use hashsync::MemoryNavigation;
use log::info;

/// One observed state of a walkthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// What was done before observing
    pub action: &'static str,
    /// Url after the host delivered all hash changes
    pub url: String,
    /// Rendered html at that point
    pub html: String,
}

/// Mounts the demo on `nav`, opens the section and closes it again, delivering
/// hash changes after every click.
pub fn run(nav: &MemoryNavigation, config: DemoConfig) -> Result<Vec<Step>, DemoError> {
    let demo = SectionDemo::new(nav.clone(), config);
    let mut steps = vec![observe(nav, &demo, "mount")];

    for (button, action) in [(Button::Navigate, "navigate"), (Button::GoBack, "go back")] {
        demo.click(button)?;
        nav.dispatch_pending();
        steps.push(observe(nav, &demo, action));
    }
    Ok(steps)
}

fn observe(
    nav: &MemoryNavigation,
    demo: &SectionDemo<MemoryNavigation>,
    action: &'static str,
) -> Step {
    let step = Step {
        action,
        url: nav.url(),
        html: demo.render_html(),
    };
    info!("{action}: {} {}", step.url, step.html);
    step
}
