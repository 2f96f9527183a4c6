//! Pages, sidebar and the per-page tables

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::config::StoreConfig;
use crate::store::TableStore;

/// A page of the application. Every page shows its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Task,
    Task1,
    Task2,
    Task3,
}

impl Route {
    /// All routes in menu order.
    pub const ALL: [Route; 4] = [Route::Task, Route::Task1, Route::Task2, Route::Task3];

    pub fn path(self) -> &'static str {
        match self {
            Route::Task => "/",
            Route::Task1 => "/task1",
            Route::Task2 => "/task2",
            Route::Task3 => "/task3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Task => "Task",
            Route::Task1 => "Task1",
            Route::Task2 => "Task2",
            Route::Task3 => "Task3",
        }
    }

    /// Counter shown next to the menu entry, if any.
    pub fn badge(self) -> Option<u32> {
        match self {
            Route::Task3 => Some(3),
            _ => None,
        }
    }

    /// Looks a route up by its exact path.
    pub fn from_path(path: &str) -> Option<Route> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    /// Accepts a path (`/task1`) or a label (`task1`, case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::from_path(s)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|route| route.label().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarPosition {
    #[default]
    Left,
    Right,
}

impl SidebarPosition {
    pub fn flipped(self) -> Self {
        match self {
            SidebarPosition::Left => SidebarPosition::Right,
            SidebarPosition::Right => SidebarPosition::Left,
        }
    }
}

/// Sidebar layout. Lives only for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidebar {
    pub is_open: bool,
    pub position: SidebarPosition,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            is_open: true,
            position: SidebarPosition::Left,
        }
    }
}

impl Sidebar {
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn set_position(&mut self, position: SidebarPosition) {
        self.position = position;
    }
}

/// Everything a running session holds: the sidebar, the page being shown
/// and one table per page.
#[derive(Debug)]
pub struct Workspace {
    sidebar: Sidebar,
    active: Route,
    pages: [TableStore; 4],
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Workspace {
    /// Creates a workspace whose tables all use `config`.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            sidebar: Sidebar::default(),
            active: Route::default(),
            pages: std::array::from_fn(|_| TableStore::with_config(config.clone())),
        }
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn sidebar_mut(&mut self) -> &mut Sidebar {
        &mut self.sidebar
    }

    pub fn active_route(&self) -> Route {
        self.active
    }

    pub fn navigate(&mut self, route: Route) {
        if route != self.active {
            debug!("Navigating {} -> {}", self.active.path(), route.path());
        }
        self.active = route;
    }

    pub fn page(&self, route: Route) -> &TableStore {
        &self.pages[route.index()]
    }

    pub fn page_mut(&mut self, route: Route) -> &mut TableStore {
        &mut self.pages[route.index()]
    }

    /// Table of the page currently shown.
    pub fn current(&self) -> &TableStore {
        self.page(self.active)
    }

    pub fn current_mut(&mut self) -> &mut TableStore {
        self.page_mut(self.active)
    }

    /// Iterates routes with their tables, in menu order.
    pub fn pages(&self) -> impl Iterator<Item = (Route, &TableStore)> {
        Route::ALL.into_iter().zip(self.pages.iter())
    }

    /// Resets the sidebar and every table, and goes back to the first page.
    pub fn reset(&mut self) {
        self.sidebar = Sidebar::default();
        self.active = Route::default();
        for page in &mut self.pages {
            page.reset();
        }
    }
}
