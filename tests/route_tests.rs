use speeches::errors::AppError;
use speeches::routes::{ResolvedRoute, RouteName, RouteTable};

fn table() -> RouteTable {
    RouteTable::speeches("/speech").unwrap()
}

#[test]
fn test_resolve_each_route() {
    let urls = table();

    assert_eq!(
        urls.resolve("/speech"),
        Some(ResolvedRoute {
            name: RouteName::SpeechList,
            pk: None
        })
    );
    assert_eq!(
        urls.resolve("/speech/add"),
        Some(ResolvedRoute {
            name: RouteName::SpeechAdd,
            pk: None
        })
    );
    assert_eq!(
        urls.resolve("/speech/42"),
        Some(ResolvedRoute {
            name: RouteName::SpeechView,
            pk: Some(42)
        })
    );
    assert_eq!(
        urls.resolve("/speech/42/edit"),
        Some(ResolvedRoute {
            name: RouteName::SpeechEdit,
            pk: Some(42)
        })
    );
}

#[test]
fn test_unmatched_paths() {
    let urls = table();

    for path in [
        "/speech/",
        "/speech/abc",
        "/speech/-1",
        "/speech/4/edit/",
        "/speech/4/delete",
        "/speech/add/",
        "/speeches",
        "/other/1",
        "",
    ] {
        assert_eq!(urls.resolve(path), None, "path {:?} should not resolve", path);
    }
}

#[test]
fn test_pk_overflow_does_not_resolve() {
    let urls = table();
    assert_eq!(urls.resolve("/speech/99999999999999999999"), None);
    assert_eq!(urls.resolve("/speech/007").map(|r| r.pk), Some(Some(7)));
}

#[test]
fn test_route_order_and_names() {
    let urls = table();
    let names: Vec<_> = urls.routes().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["speech-list", "speech-add", "speech-view", "speech-edit"]
    );

    let views: Vec<_> = urls.routes().iter().map(|r| r.view.name()).collect();
    assert_eq!(
        views,
        vec!["SpeechList", "SpeechCreate", "SpeechView", "SpeechUpdate"]
    );
}

#[test]
fn test_reverse() {
    let urls = table();

    assert_eq!(urls.reverse(RouteName::SpeechList, None).unwrap(), "/speech");
    assert_eq!(urls.reverse(RouteName::SpeechAdd, None).unwrap(), "/speech/add");
    assert_eq!(urls.reverse(RouteName::SpeechView, Some(3)).unwrap(), "/speech/3");
    assert_eq!(
        urls.reverse(RouteName::SpeechEdit, Some(3)).unwrap(),
        "/speech/3/edit"
    );

    assert!(matches!(
        urls.reverse(RouteName::SpeechView, None),
        Err(AppError::InvalidRoute(_))
    ));
    assert!(matches!(
        urls.reverse(RouteName::SpeechList, Some(1)),
        Err(AppError::InvalidRoute(_))
    ));
}

#[test]
fn test_reverse_then_resolve_names_agree() {
    let urls = table();
    for (name, pk) in [
        (RouteName::SpeechList, None),
        (RouteName::SpeechAdd, None),
        (RouteName::SpeechView, Some(12)),
        (RouteName::SpeechEdit, Some(12)),
    ] {
        let path = urls.reverse(name, pk).unwrap();
        assert_eq!(urls.resolve(&path), Some(ResolvedRoute { name, pk }));
    }
}

#[test]
fn test_prefix_normalisation_and_root_mount() {
    let urls = RouteTable::speeches("/speech/").unwrap();
    assert_eq!(urls.prefix(), "/speech");
    assert!(urls.resolve("/speech/1").is_some());

    let root = RouteTable::speeches("").unwrap();
    assert_eq!(
        root.resolve("").map(|r| r.name),
        Some(RouteName::SpeechList)
    );
    assert_eq!(root.resolve("/5").and_then(|r| r.pk), Some(5));
    assert_eq!(root.reverse(RouteName::SpeechEdit, Some(5)).unwrap(), "/5/edit");
}

#[test]
fn test_route_name_parsing() {
    assert_eq!("speech-edit".parse::<RouteName>().unwrap(), RouteName::SpeechEdit);
    assert!(RouteName::SpeechView.takes_pk());
    assert!(!RouteName::SpeechAdd.takes_pk());
    assert!("speech-delete".parse::<RouteName>().is_err());
}

#[test]
fn test_pk_accepts_ascii_digits_only() {
    let urls = table();
    assert_eq!(urls.resolve("/speech/\u{0661}\u{0662}"), None);
    assert_eq!(urls.resolve("/speech/\u{0661}\u{0662}/edit"), None);
    assert_eq!(urls.resolve("/speech/12").and_then(|r| r.pk), Some(12));
}
