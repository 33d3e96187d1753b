use crate::DemoError;
use hashsync::{Callback, FragmentTracking, HashSync, NavigationContext, VisibilityCell};
use log::info;
use std::{fmt, str::FromStr};

/// What the demo shows and which fragment it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Fragment the section lives at, without `#`
    pub section: String,
    /// Text shown while the section is open
    pub text: String,
    /// How foreign hashes are tracked
    pub tracking: FragmentTracking,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            section: "test".to_string(),
            text: "Welcome to the test Section".to_string(),
            tracking: FragmentTracking::default(),
        }
    }
}

/// The demo's buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Opens the section
    Navigate,
    /// Closes the section through history
    GoBack,
}

impl Button {
    /// The caption shown on the button.
    pub fn label(self) -> &'static str {
        match self {
            Button::Navigate => "Navigate",
            Button::GoBack => "Go back",
        }
    }

    /// The `data-button` attribute value identifying the button in html.
    pub fn id(self) -> &'static str {
        match self {
            Button::Navigate => "navigate",
            Button::GoBack => "go-back",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Button {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Button::Navigate, Button::GoBack]
            .into_iter()
            .find(|button| button.id() == s)
            .ok_or_else(|| DemoError::UnknownButton(s.to_owned()))
    }
}

/// The text element of an open section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionText {
    /// Element id, the section name
    pub id: String,
    /// Shown text
    pub content: String,
}

/// Everything the demo renders for one visibility state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    /// Present while the section is open
    pub text: Option<SectionText>,
    /// Buttons in render order
    pub buttons: Vec<Button>,
}

impl SectionView {
    /// The view for `visible`.
    pub fn new(config: &DemoConfig, visible: bool) -> Self {
        if visible {
            Self {
                text: Some(SectionText {
                    id: config.section.clone(),
                    content: config.text.clone(),
                }),
                buttons: vec![Button::GoBack],
            }
        } else {
            Self {
                text: None,
                buttons: vec![Button::Navigate],
            }
        }
    }

    /// Whether `button` is part of the view.
    pub fn shows(&self, button: Button) -> bool {
        self.buttons.contains(&button)
    }

    /// Whether the rendered text contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text
            .as_ref()
            .map(|text| text.content.contains(needle))
            .unwrap_or(false)
    }

    /// Renders the view as an html fragment.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div>");
        if let Some(text) = &self.text {
            html.push_str(&format!(
                "<div id=\"{}\">{}</div>",
                escape(&text.id),
                escape(&text.content)
            ));
        }
        for button in &self.buttons {
            html.push_str(&format!(
                "<button data-button=\"{}\">{}</button>",
                button.id(),
                button.label()
            ));
        }
        html.push_str("</div>");
        html
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// A section opened with a "Navigate" button and closed with "Go back", its
/// visibility driven by the url fragment.
pub struct SectionDemo<C: NavigationContext> {
    config: DemoConfig,
    visible: VisibilityCell,
    sync: HashSync<C>,
}

impl<C: NavigationContext + 'static> SectionDemo<C> {
    /// Mounts the demo on `context`, hidden.
    pub fn new(context: C, config: DemoConfig) -> Self {
        Self::with_observer(context, config, Callback::noop())
    }

    /// Like [`SectionDemo::new`], calling `on_change` after every visibility
    /// signal, e.g. to re-render.
    pub fn with_observer(
        context: C,
        config: DemoConfig,
        on_change: impl Into<Callback<bool>>,
    ) -> Self {
        let visible = VisibilityCell::new(false);
        let sync = HashSync::builder(context)
            .tracking(config.tracking)
            .on_visibility_change(visible.observer_then(on_change))
            .build();
        Self {
            config,
            visible,
            sync,
        }
    }
}

impl<C: NavigationContext> SectionDemo<C> {
    /// Whether the section is open.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// The current view.
    pub fn view(&self) -> SectionView {
        SectionView::new(&self.config, self.is_visible())
    }

    /// The current view as html.
    pub fn render_html(&self) -> String {
        self.view().to_html()
    }

    /// Clicks a rendered button.
    pub fn click(&self, button: Button) -> Result<(), DemoError> {
        if !self.view().shows(button) {
            return Err(DemoError::NotRendered(button));
        }
        info!("clicked {button}");
        match button {
            Button::Navigate => self.sync.navigate_to_section(&self.config.section),
            Button::GoBack => self.sync.clear_section(),
        }
        Ok(())
    }

    /// The settings the demo was mounted with.
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// The underlying [`HashSync`].
    pub fn sync(&self) -> &HashSync<C> {
        &self.sync
    }
}
