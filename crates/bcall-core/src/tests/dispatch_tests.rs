//! Tests for open dispatch
//!
//! Covers the per-type routing table, capability absence, open-all ordering
//! and the placeholder pane bracket.

use super::fixtures::{Call, Recorder, make_mixed_tree};
use crate::{Capabilities, OpenAllOptions, OpenOutcome, OpenService};
use bcall_types::{BookmarkItem, BookmarkKind};

fn service(recorder: &Recorder) -> OpenService {
    OpenService::new(recorder.capabilities())
}

#[tokio::test]
async fn test_file_opens_with_subpath() {
    let rec = Recorder::new();
    let item = BookmarkItem::file(1, "notes/a.md").with_subpath("#^blk");

    let outcome = service(&rec).open_bookmark(&item).await;

    assert_eq!(outcome, OpenOutcome::Close);
    assert_eq!(
        rec.calls(),
        vec![Call::OpenFile {
            path: "notes/a.md".into(),
            subpath: Some("#^blk".into()),
        }]
    );
}

#[tokio::test]
async fn test_each_type_routes_to_its_capability() {
    let rec = Recorder::new();
    let svc = service(&rec);

    svc.open_bookmark(&BookmarkItem::folder(1, "archive")).await;
    svc.open_bookmark(&BookmarkItem::search(2, "tag:#todo")).await;
    svc.open_bookmark(&BookmarkItem::new(3, Some("Map"), BookmarkKind::Graph))
        .await;
    svc.open_bookmark(&BookmarkItem::url(4, None, "https://example.com"))
        .await;

    assert_eq!(
        rec.calls(),
        vec![
            Call::RevealFolder("archive".into()),
            Call::RunSearch("tag:#todo".into()),
            Call::ActivateGraph("Map_3".into()),
            Call::OpenUrl {
                url: "https://example.com".into(),
                in_app: false,
            },
        ]
    );
}

#[tokio::test]
async fn test_group_enters_without_host_calls() {
    let rec = Recorder::new();
    let group = BookmarkItem::group(1, "G", vec![BookmarkItem::file(2, "a.md")]);

    assert_eq!(
        service(&rec).open_bookmark(&group).await,
        OpenOutcome::EnterGroup
    );
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn test_url_prefers_in_app_when_configured() {
    let rec = Recorder::new();
    let svc = OpenService::new(rec.capabilities().prefer_in_app_urls(true));

    svc.open_bookmark(&BookmarkItem::url(1, None, "https://example.com"))
        .await;

    assert_eq!(
        rec.calls(),
        vec![Call::OpenUrl {
            url: "https://example.com".into(),
            in_app: true,
        }]
    );
}

#[tokio::test]
async fn test_graph_needs_registry() {
    let rec = Recorder::new();
    let mut caps = rec.capabilities();
    caps.registry = None;
    let svc = OpenService::new(caps);
    let graph = BookmarkItem::new(1, Some("Map"), BookmarkKind::Graph);

    assert!(!svc.is_activatable(&graph));
    assert_eq!(svc.open_bookmark(&graph).await, OpenOutcome::Rejected);
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_type_is_rejected() {
    let rec = Recorder::new();
    let item = BookmarkItem::new(1, Some("?"), BookmarkKind::Unknown);

    assert_eq!(
        service(&rec).open_bookmark(&item).await,
        OpenOutcome::Rejected
    );
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn test_unresolved_file_closes_without_opening() {
    let rec = Recorder::new().with_missing(&["gone.md"]);

    let outcome = service(&rec)
        .open_bookmark(&BookmarkItem::file(1, "gone.md"))
        .await;

    assert_eq!(outcome, OpenOutcome::Close);
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn test_failed_open_still_closes() {
    let rec = Recorder::new().with_failing(&["locked.md"]);

    let outcome = service(&rec)
        .open_bookmark(&BookmarkItem::file(1, "locked.md"))
        .await;

    assert_eq!(outcome, OpenOutcome::Close);
}

#[tokio::test]
async fn test_open_all_recursive_order() {
    let rec = Recorder::new();
    let items = vec![
        BookmarkItem::file(1, "a.md"),
        BookmarkItem::group(
            2,
            "g",
            vec![BookmarkItem::file(3, "b.md"), BookmarkItem::file(4, "c.md")],
        ),
    ];

    service(&rec)
        .open_all(&items, OpenAllOptions::top_level(true))
        .await;

    assert_eq!(rec.opened_files(), vec!["a.md", "b.md", "c.md"]);
}

#[tokio::test]
async fn test_open_all_non_recursive_only_direct_files() {
    let rec = Recorder::new();
    let items = vec![
        BookmarkItem::file(1, "a.md"),
        BookmarkItem::group(
            2,
            "g",
            vec![BookmarkItem::file(3, "b.md"), BookmarkItem::file(4, "c.md")],
        ),
    ];

    service(&rec)
        .open_all(&items, OpenAllOptions::top_level(false))
        .await;

    assert_eq!(rec.opened_files(), vec!["a.md"]);
}

#[tokio::test]
async fn test_open_all_brackets_with_placeholder() {
    let rec = Recorder::new();

    let report = service(&rec)
        .open_all(&make_mixed_tree(), OpenAllOptions::top_level(true))
        .await;

    let calls = rec.calls();
    assert_eq!(calls.first(), Some(&Call::ShowPlaceholder));
    assert_eq!(calls.last(), Some(&Call::DismissPlaceholder));
    assert_eq!(report.files, 4);
    assert_eq!(report.urls, 2);
    assert_eq!(report.skipped, 0);

    // Folder, search and graph are never part of open-all.
    assert!(!calls.iter().any(|c| matches!(
        c,
        Call::RevealFolder(_) | Call::RunSearch(_) | Call::ActivateGraph(_)
    )));
}

#[tokio::test]
async fn test_open_all_nested_call_skips_placeholder() {
    let rec = Recorder::new();
    let options = OpenAllOptions {
        recursive: true,
        top_level: false,
    };

    service(&rec).open_all(&make_mixed_tree(), options).await;

    assert!(!rec.calls().contains(&Call::ShowPlaceholder));
    assert!(!rec.calls().contains(&Call::DismissPlaceholder));
}

#[tokio::test]
async fn test_open_all_skips_unresolved_and_continues() {
    let rec = Recorder::new()
        .with_missing(&["b.md"])
        .with_failing(&["c.md"]);

    let report = service(&rec)
        .open_all(&make_mixed_tree(), OpenAllOptions::top_level(true))
        .await;

    assert_eq!(rec.opened_files(), vec!["a.md", "d.md"]);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn test_open_all_without_placeholder_capability() {
    let rec = Recorder::new();
    let mut caps = rec.capabilities();
    caps.placeholder = None;

    OpenService::new(caps)
        .open_all(&make_mixed_tree(), OpenAllOptions::top_level(false))
        .await;

    assert_eq!(rec.opened_files(), vec!["a.md", "d.md"]);
}

#[tokio::test]
async fn test_empty_capabilities_never_panic() {
    let svc = OpenService::new(Capabilities::new());
    for item in make_mixed_tree() {
        let outcome = svc.open_bookmark(&item).await;
        if item.is_group() {
            assert_eq!(outcome, OpenOutcome::EnterGroup);
        } else {
            assert_eq!(outcome, OpenOutcome::Rejected);
        }
    }
}
