#![allow(missing_docs)]
//! The fixed structural contract between the behavior layer and the
//! page markup. Everything here is an identity the HTML must provide;
//! nothing is configurable at runtime.

/// Root layout container present on every dashboard page.
pub const LAYOUT_SELECTOR: &str = ".dashboard-layout";

/// The one direct child of the layout preserved across partial swaps.
pub const STICKY_REGION_ID: &str = "chat-sidebar-container";

/// Document name assumed when the location path is empty or root.
pub const HOME_DOCUMENT: &str = "chat.html";

/// Custom event requesting an in-app navigation; detail is the URL.
pub const NAVIGATE_EVENT: &str = "tessera:navigate";

/// Custom event fired after every completed swap; detail is the URL.
pub const CONTENT_REPLACED_EVENT: &str = "tessera:content-replaced";

pub const CHAT_NAV_SELECTOR: &str = ".chat-sidebar-nav";
pub const STATIC_NAV_SELECTOR: &str = ".sidebar-nav";
pub const NAV_REGION_SELECTOR: &str = ".chat-sidebar-nav, .sidebar-nav";
pub const HIGHLIGHT_SELECTOR: &str = ".nav-highlight";

pub const NAV_ITEM_SELECTOR: &str = ".nav-item";
pub const SUB_NAV_ITEM_SELECTOR: &str = ".sub-nav-item";

pub const ACTIVE_CLASS: &str = "active";
pub const EXPANDED_CLASS: &str = "expanded";
pub const HAS_ACTIVE_CHILD_CLASS: &str = "has-active-child";
pub const HAS_SUBMENU_CLASS: &str = "has-submenu";
pub const NAV_ARROW_CLASS: &str = "nav-arrow";
