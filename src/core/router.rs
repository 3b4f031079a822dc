//! # Navigation
//!
//! A fixed table of three routes, matched by exact path. Every
//! navigation computes the page title and hands it to the callback
//! installed at construction; the host owns the actual mutation
//! (terminal title here, but nothing in this module assumes that).
//!
//! Routing failures are non-fatal: an unknown path still completes
//! the transition, with the bare suffix as the title, so navigation
//! is never blocked by a missing table entry.

use log::{debug, warn};

/// Suffix appended to every page title.
pub const TITLE_SUFFIX: &str = "车辆信息记录系统";

/// Identifies which page a route lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    CarForm,
    CarList,
}

/// One entry in the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub page: Page,
    /// Display title; a route without one falls back to the bare suffix.
    pub title: Option<&'static str>,
}

/// The route table. Built once at startup, never mutated afterwards.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route {
            path: "/",
            name: "home",
            page: Page::Home,
            title: Some("首页"),
        },
        Route {
            path: "/add",
            name: "add",
            page: Page::CarForm,
            title: Some("添加车辆"),
        },
        Route {
            path: "/list",
            name: "list",
            page: Page::CarList,
            title: Some("车辆列表"),
        },
    ]
}

/// Where the router is within one navigation attempt. Each attempt
/// runs Idle → Resolving → Committed and back to Idle before
/// `navigate` returns; the intermediate states never outlive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavState {
    Idle,
    Resolving,
    Committed,
}

/// One completed navigation: the destination (if any route matched),
/// the origin (the previously committed route), and the title that
/// was handed to the callback.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationEvent {
    pub to: Option<Route>,
    pub from: Option<Route>,
    pub title: String,
}

pub struct Router {
    routes: Vec<Route>,
    state: NavState,
    /// Index of the last matched route; origin of the next event.
    current: Option<usize>,
    title_sink: Box<dyn FnMut(&str)>,
}

impl Router {
    /// Creates a router over the default table. `title_sink` receives
    /// the computed title on every navigation, matched or not.
    pub fn new(title_sink: Box<dyn FnMut(&str)>) -> Self {
        Router::with_routes(default_routes(), title_sink)
    }

    fn with_routes(routes: Vec<Route>, title_sink: Box<dyn FnMut(&str)>) -> Self {
        assert!(
            routes.iter().all(|r| !r.path.is_empty()),
            "route paths must be non-empty"
        );
        for (i, route) in routes.iter().enumerate() {
            assert!(
                routes[..i].iter().all(|r| r.name != route.name),
                "route names must be unique"
            );
        }
        Router {
            routes,
            state: NavState::Idle,
            current: None,
            title_sink,
        }
    }

    /// Runs one navigation attempt to completion.
    ///
    /// The title callback fires while the transition is committed and
    /// before this returns, so the host's title is already updated by
    /// the time the caller acts on the event.
    pub fn navigate(&mut self, path: &str) -> NavigationEvent {
        self.state = NavState::Resolving;
        let matched = self.routes.iter().position(|r| r.path == path);

        let title = match matched.and_then(|i| self.routes[i].title) {
            Some(t) => format!("{t} - {TITLE_SUFFIX}"),
            None => TITLE_SUFFIX.to_string(),
        };

        match matched {
            Some(i) => debug!("navigate {path:?} -> {}", self.routes[i].name),
            None => warn!("no route matches {path:?}, completing untitled"),
        }

        self.state = NavState::Committed;
        (self.title_sink)(&title);

        let event = NavigationEvent {
            to: matched.map(|i| self.routes[i].clone()),
            from: self.current.map(|i| self.routes[i].clone()),
            title,
        };
        // An unmatched navigation leaves no route to record, so the
        // origin of the next event stays at the last match.
        self.current = matched.or(self.current);
        self.state = NavState::Idle;
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Router whose applied titles are captured for inspection.
    fn recording_router() -> (Router, Rc<RefCell<Vec<String>>>) {
        let titles = Rc::new(RefCell::new(Vec::new()));
        let sink = titles.clone();
        let router = Router::new(Box::new(move |t: &str| sink.borrow_mut().push(t.to_string())));
        (router, titles)
    }

    #[test]
    fn test_registered_paths_set_exact_titles() {
        let (mut router, titles) = recording_router();
        router.navigate("/");
        router.navigate("/add");
        router.navigate("/list");
        assert_eq!(
            *titles.borrow(),
            vec![
                "首页 - 车辆信息记录系统",
                "添加车辆 - 车辆信息记录系统",
                "车辆列表 - 车辆信息记录系统",
            ]
        );
    }

    #[test]
    fn test_unknown_path_still_completes_with_bare_suffix() {
        let (mut router, titles) = recording_router();
        let event = router.navigate("/missing");
        assert!(event.to.is_none());
        assert_eq!(event.title, TITLE_SUFFIX);
        assert_eq!(*titles.borrow(), vec![TITLE_SUFFIX.to_string()]);
        // The machine is back at rest, not wedged in a failed transition
        assert_eq!(router.state, NavState::Idle);
    }

    #[test]
    fn test_route_without_title_falls_back_to_suffix() {
        let routes = vec![Route {
            path: "/bare",
            name: "bare",
            page: Page::Home,
            title: None,
        }];
        let titles = Rc::new(RefCell::new(Vec::new()));
        let sink = titles.clone();
        let mut router = Router::with_routes(
            routes,
            Box::new(move |t: &str| sink.borrow_mut().push(t.to_string())),
        );
        let event = router.navigate("/bare");
        assert!(event.to.is_some());
        assert_eq!(*titles.borrow(), vec![TITLE_SUFFIX.to_string()]);
    }

    #[test]
    fn test_origin_tracks_last_match_across_navigations() {
        let (mut router, _titles) = recording_router();
        let first = router.navigate("/");
        assert!(first.from.is_none());

        let second = router.navigate("/list");
        assert_eq!(second.from.map(|r| r.name), Some("home"));

        // An unmatched hop does not clobber the committed origin
        router.navigate("/nope");
        let third = router.navigate("/add");
        assert_eq!(third.from.map(|r| r.name), Some("list"));
    }

    #[test]
    fn test_state_returns_to_idle_after_each_navigation() {
        let (mut router, _titles) = recording_router();
        assert_eq!(router.state, NavState::Idle);
        router.navigate("/");
        assert_eq!(router.state, NavState::Idle);
        router.navigate("/unknown");
        assert_eq!(router.state, NavState::Idle);
    }

    #[test]
    fn test_default_table_invariants() {
        let routes = default_routes();
        assert_eq!(routes.len(), 3);
        assert!(routes.iter().all(|r| !r.path.is_empty()));
        for (i, route) in routes.iter().enumerate() {
            assert!(routes[..i].iter().all(|r| r.name != route.name));
        }
    }
}
