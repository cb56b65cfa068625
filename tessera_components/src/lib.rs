//! Widget controllers for the dashboard shell: the collapsible
//! sidebar, dropdown selectors, range sliders, and the editor toolbar.
//!
//! Controllers bind to markup by structural class, degrade silently
//! when their parts are missing, and expose `bind`/`bind_all` entry
//! points the composition root re-invokes after each partial swap.

pub mod dropdown;
pub mod editor;
pub mod sidebar;
pub mod slider;
pub mod transition;

pub use sidebar::SidebarState;
pub use transition::Transition;
