//! Mounting a [`SectionDemo`] into a page.

use crate::{DemoConfig, DemoError, SectionDemo, SectionView};
use hashsync::WebNavigation;
use log::{debug, warn};
use std::rc::Rc;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Element, Event};

/// A demo rendered into a DOM element.
///
/// Dropping it removes the click listener and empties the element. Use
/// [`MountedDemo::forget`] to keep it for the lifetime of the page.
pub struct MountedDemo {
    demo: Rc<SectionDemo<WebNavigation>>,
    root: Element,
    on_click: Closure<dyn FnMut(Event)>,
}

impl MountedDemo {
    /// The mounted demo.
    pub fn demo(&self) -> &SectionDemo<WebNavigation> {
        &self.demo
    }

    /// Leaks the demo so it keeps running after this handle is gone.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for MountedDemo {
    fn drop(&mut self) {
        let function: &js_sys::Function = self.on_click.as_ref().unchecked_ref();
        if let Err(err) = self
            .root
            .remove_event_listener_with_callback("click", function)
        {
            warn!("failed to remove click listener: {err:?}");
        }
        self.root.set_inner_html("");
    }
}

/// Renders the demo into `root` and re-renders it on every visibility change.
pub fn mount(root: Element, config: DemoConfig) -> Result<MountedDemo, DemoError> {
    let navigation = WebNavigation::new()?;
    let demo = Rc::new(SectionDemo::with_observer(navigation, config.clone(), {
        let root = root.clone();
        move |visible: bool| render(&root, &SectionView::new(&config, visible))
    }));
    render(&root, &demo.view());

    let handler: Box<dyn FnMut(Event)> = Box::new({
        let demo = demo.clone();
        move |event: Event| {
            if let Err(err) = handle_click(&demo, &event) {
                warn!("ignoring click: {err}");
            }
        }
    });
    let on_click = Closure::wrap(handler);
    root.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(dom_error)?;

    debug!("demo mounted");
    Ok(MountedDemo {
        demo,
        root,
        on_click,
    })
}

/// Appends a fresh element to `<body>` and mounts the demo into it.
pub fn mount_in_body(config: DemoConfig) -> Result<MountedDemo, DemoError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(hashsync::Error::NoWindow)?;
    let body = document
        .body()
        .ok_or_else(|| DemoError::Dom("document has no body".to_string()))?;
    let root = document.create_element("div").map_err(dom_error)?;
    body.append_child(&root).map_err(dom_error)?;
    mount(root, config)
}

fn handle_click(demo: &SectionDemo<WebNavigation>, event: &Event) -> Result<(), DemoError> {
    let Some(target) = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
    else {
        return Ok(());
    };
    match target.get_attribute("data-button") {
        Some(button) => demo.click(button.parse()?),
        // a click on the text or padding
        None => Ok(()),
    }
}

fn render(root: &Element, view: &SectionView) {
    root.set_inner_html(&view.to_html());
}

fn dom_error(err: JsValue) -> DemoError {
    DemoError::Dom(format!("{err:?}"))
}
