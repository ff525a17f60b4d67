use super::*;

fn id(raw: &str) -> WorkflowId {
    WorkflowId::new(raw).expect("id")
}

#[test]
fn parses_known_paths() {
    assert_eq!(Route::parse("/"), Route::Home);
    assert_eq!(Route::parse(""), Route::Home);
    assert_eq!(Route::parse("/workflows"), Route::Catalog);
    assert_eq!(Route::parse("/workflows/"), Route::Catalog);
    assert_eq!(Route::parse("/explore"), Route::Catalog);
    assert_eq!(Route::parse("/steps/42"), Route::Detail { id: id("42") });
    assert_eq!(
        Route::parse("/steps/9b2f0c1e?tab=raw"),
        Route::Detail { id: id("9b2f0c1e") }
    );
}

#[test]
fn unmatched_paths_resolve_to_not_found() {
    for path in ["/create", "/steps/", "/steps", "/steps/1/edit", "/workflows/1"] {
        assert_eq!(
            Route::parse(path),
            Route::NotFound {
                path: path.to_string()
            },
            "path {path}"
        );
    }
}

#[test]
fn detail_route_exposes_id_param() {
    let route = Route::parse("/steps/42");
    let state = RouteState::from_route(&route);

    assert_eq!(state.path, "/steps/42");
    assert_eq!(state.param(ID_PARAM), Some("42"));
    assert_eq!(Route::detail_path(&id("42")), "/steps/42");
    assert!(RouteState::from_route(&Route::Catalog).params.is_empty());
}

#[test]
fn navigation_is_queued_until_flush() {
    let mut router = Router::new("/");

    router.navigate_to("/workflows");

    assert_eq!(router.current(), &Route::Home);
    assert!(router.has_pending());
    assert_eq!(router.flush(), Some(&Route::Catalog));
    assert_eq!(router.state().path, "/workflows");
    assert!(!router.has_pending());
}

#[test]
fn last_queued_path_wins() {
    let mut router = Router::new("/");

    router.navigate_to("/workflows");
    router.navigate_to("/steps/7");

    assert_eq!(router.flush(), Some(&Route::Detail { id: id("7") }));
    assert_eq!(router.state().param(ID_PARAM), Some("7"));
}

#[test]
fn navigating_to_the_active_path_is_a_no_op() {
    let mut router = Router::new("/explore");

    router.navigate_to("/workflows");

    assert_eq!(router.flush(), None);
    assert!(!router.can_go_back());
}

#[test]
fn back_returns_to_previous_route() {
    let mut router = Router::new("/");
    router.navigate_to("/workflows");
    router.flush();
    router.navigate_to("/steps/3");
    router.flush();

    router.back();
    assert_eq!(router.flush(), Some(&Route::Catalog));
    router.back();
    assert_eq!(router.flush(), Some(&Route::Home));
    assert!(!router.can_go_back());

    router.back();
    assert_eq!(router.flush(), None);
}

#[test]
fn flush_without_requests_reports_no_change() {
    let mut router = Router::new("/steps/1");
    assert_eq!(router.flush(), None);
    assert_eq!(router.current(), &Route::Detail { id: id("1") });
}

#[test]
fn round_trip_within_one_flush_leaves_history_untouched() {
    let mut router = Router::new("/");
    router.navigate_to("/workflows");
    router.navigate_to("/");

    assert!(router.flush().is_none());
    assert!(!router.can_go_back());

    router.back();
    assert!(router.flush().is_none());
    assert_eq!(router.current(), &Route::Home);
}

#[test]
fn push_then_back_in_one_flush_restores_history() {
    let mut router = Router::new("/");
    router.navigate_to("/workflows");
    router.flush();

    router.navigate_to("/steps/1");
    router.back();
    assert!(router.flush().is_none());

    router.back();
    assert_eq!(router.flush(), Some(&Route::Home));
    assert!(!router.can_go_back());
}
