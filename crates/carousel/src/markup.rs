//! Generated DOM structure.
//!
//! ```text
//! <container class="… streamrotate-container">
//!   <div class="streamrotate-main-items" style="height: Npx">
//!     <item class="… streamrotate-item active">
//!     <item class="… streamrotate-item">
//!   </div>
//!   <div class="streamrotate-dots-nav">
//!     <span class="streamrotate-dot active">
//!     <span class="streamrotate-dot">
//!   </div>
//!   <span class="streamrotate-nav streamrotate-nav-left">
//!   <span class="streamrotate-nav streamrotate-nav-right">
//! </container>
//! ```

use html::{DomError, Document, Id};

pub const CONTAINER_CLASS: &str = "streamrotate-container";
pub const TRACK_CLASS: &str = "streamrotate-main-items";
pub const ITEM_CLASS: &str = "streamrotate-item";
pub const DOTS_NAV_CLASS: &str = "streamrotate-dots-nav";
pub const DOT_CLASS: &str = "streamrotate-dot";
pub const NAV_CLASS: &str = "streamrotate-nav";
pub const NAV_LEFT_CLASS: &str = "streamrotate-nav-left";
pub const NAV_RIGHT_CLASS: &str = "streamrotate-nav-right";
pub const ACTIVE_CLASS: &str = "active";

/// Node ids of everything the widget created or adopted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarouselParts {
    pub container: Id,
    pub track: Id,
    pub items: Vec<Id>,
    pub dots_nav: Id,
    pub dots: Vec<Id>,
    pub nav_left: Id,
    pub nav_right: Id,
}

/// Height as an inline style value: `240` -> `"240px"`, `12.5` -> `"12.5px"`.
pub fn height_px(height: f32) -> String {
    format!("{height}px")
}

/// Build the carousel markup around already-matched `items`.
pub fn build_view(
    doc: &mut Document,
    container: Id,
    items: Vec<Id>,
    height: f32,
) -> Result<CarouselParts, DomError> {
    for &item in &items {
        doc.add_class(item, ITEM_CLASS)?;
        doc.remove_class(item, ACTIVE_CLASS)?;
    }
    if let Some(&first) = items.first() {
        doc.add_class(first, ACTIVE_CLASS)?;
    }
    doc.add_class(container, CONTAINER_CLASS)?;

    let track = doc.create_element("div", Some(TRACK_CLASS));
    doc.append_child(container, track)?;
    for &item in &items {
        doc.append_child(track, item)?;
    }
    doc.set_style(track, "height", &height_px(height))?;

    let dots_nav = doc.create_element("div", Some(DOTS_NAV_CLASS));
    doc.insert_after(track, dots_nav)?;
    let mut dots = Vec::with_capacity(items.len());
    for i in 0..items.len() {
        let class = if i == 0 {
            format!("{DOT_CLASS} {ACTIVE_CLASS}")
        } else {
            DOT_CLASS.to_string()
        };
        let dot = doc.create_element("span", Some(class.as_str()));
        doc.append_child(dots_nav, dot)?;
        dots.push(dot);
    }

    let left_class = format!("{NAV_CLASS} {NAV_LEFT_CLASS}");
    let nav_left = doc.create_element("span", Some(left_class.as_str()));
    doc.append_child(container, nav_left)?;
    let right_class = format!("{NAV_CLASS} {NAV_RIGHT_CLASS}");
    let nav_right = doc.create_element("span", Some(right_class.as_str()));
    doc.append_child(container, nav_right)?;

    Ok(CarouselParts {
        container,
        track,
        items,
        dots_nav,
        dots,
        nav_left,
        nav_right,
    })
}

/// Move the `active` marker to item and dot `pos`.
///
/// Clears every active item and dot first, so a marker added from outside
/// the widget cannot leave two entries active.
pub fn mark_active(doc: &mut Document, parts: &CarouselParts, pos: usize) -> Result<(), DomError> {
    for &node in parts.items.iter().chain(parts.dots.iter()) {
        doc.remove_class(node, ACTIVE_CLASS)?;
    }
    if let Some(&item) = parts.items.get(pos) {
        doc.add_class(item, ACTIVE_CLASS)?;
    }
    if let Some(&dot) = parts.dots.get(pos) {
        doc.add_class(dot, ACTIVE_CLASS)?;
    }
    Ok(())
}
