//! Admin bar entry and the notifications page.

use htmlize::{escape_attribute, escape_text};

use crate::filters::Filters;
use crate::models::{ExtractionResult, Viewer};

pub const MANAGE_OPTIONS: &str = "manage_options";
pub const PAGE_SLUG: &str = "unagi-notifications";
pub const MENU_ID: &str = "notifications";

const TITLE: &str = "Notifications";
const EMPTY_MESSAGE: &str = "Woohoo! There aren't any notifications for you.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminBarMenu {
    pub id: String,
    /// html, may carry the count badge
    pub title: String,
    pub href: String,
    /// shown on hover
    pub meta_title: String,
}

/// Gate applied before anything is read or rendered.
pub fn authorize(viewer: &Viewer) -> bool {
    viewer.can(MANAGE_OPTIONS)
}

pub fn page_href() -> String {
    format!("admin.php?page={PAGE_SLUG}")
}

/// `info` is `None` when nice display is off, no count is shown then.
pub fn admin_bar_title(info: Option<&ExtractionResult>) -> String {
    let mut title = escape_text(TITLE).into_owned();
    if let Some(info) = info.filter(|info| info.count > 0) {
        title.push_str(&format!(
            r#"<span class="unagi-notifications"><span class="unagi-notifications-count">{}</span></span>"#,
            info.count
        ));
    }
    title
}

pub fn admin_bar_menu(info: Option<&ExtractionResult>) -> AdminBarMenu {
    AdminBarMenu {
        id: MENU_ID.to_owned(),
        title: admin_bar_title(info),
        href: escape_attribute(page_href()).into_owned(),
        meta_title: escape_attribute(TITLE).into_owned(),
    }
}

/// What goes in the page body: extracted notices in nice mode, the raw fallback otherwise.
pub fn screen_output(nice: bool, fallback: &str, info: Option<&ExtractionResult>) -> String {
    match info {
        Some(info) if nice => info.content.clone(),
        _ => fallback.to_owned(),
    }
}

pub fn empty_notice() -> String {
    format!(
        r#"<div class="notice notice-success"><p>{}</p></div>"#,
        escape_text(EMPTY_MESSAGE)
    )
}

pub fn notification_screen(output: &str, filters: &Filters) -> String {
    let output = if output.is_empty() {
        empty_notice()
    } else {
        output.to_owned()
    };
    let output = filters.apply_output(output);

    format!(
        "<h2>{}</h2>\n<div id=\"unagi-notification-center\">\n{}\n</div>\n",
        escape_text(TITLE),
        output
    )
}
