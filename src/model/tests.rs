use super::*;
use crate::error::EngineError;
use crate::types::TrustBoundaryType;

fn asset(id: &str) -> TechnicalAsset {
    TechnicalAsset {
        id: id.to_string(),
        title: id.to_string(),
        ..Default::default()
    }
}

fn data(id: &str) -> DataAsset {
    DataAsset {
        id: id.to_string(),
        ..Default::default()
    }
}

fn link(id: &str, source: &str, target: &str) -> CommunicationLink {
    CommunicationLink {
        id: id.to_string(),
        source_id: source.to_string(),
        target_id: target.to_string(),
        ..Default::default()
    }
}

fn boundary(id: &str, kind: TrustBoundaryType, inside: &[&str], nested: &[&str]) -> TrustBoundary {
    TrustBoundary {
        id: id.to_string(),
        boundary_type: kind,
        technical_assets_inside: inside.iter().map(|s| s.to_string()).collect(),
        trust_boundaries_nested: nested.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn sample() -> ModelGraph {
    let mut web = asset("web");
    web.data_assets_processed = vec!["orders".into()];
    let mut db = asset("db");
    db.data_assets_stored = vec!["orders".into(), "audit".into()];
    let mut sent = link("web-db", "web", "db");
    sent.data_assets_sent = vec!["orders".into()];
    sent.data_assets_received = vec!["orders".into(), "audit".into()];

    ModelGraph::builder("sample")
        .data_asset(data("orders"))
        .data_asset(data("audit"))
        .technical_asset(web)
        .technical_asset(db)
        .technical_asset(asset("user"))
        .communication_link(sent)
        .communication_link(link("user-web", "user", "web"))
        .communication_link(link("web-cache", "web", "web"))
        .trust_boundary(boundary(
            "vpc",
            TrustBoundaryType::NetworkCloudProvider,
            &["db"],
            &["pod"],
        ))
        .trust_boundary(boundary(
            "pod",
            TrustBoundaryType::ExecutionEnvironment,
            &["web"],
            &[],
        ))
        .shared_runtime(SharedRuntime {
            id: "k8s".into(),
            technical_assets_running: vec!["web".into(), "db".into()],
            ..Default::default()
        })
        .build()
        .unwrap()
}

#[test]
fn test_lookups() {
    let graph = sample();
    assert_eq!(graph.title(), "sample");
    assert!(graph.technical_asset("web").is_some());
    assert!(graph.technical_asset("nope").is_none());
    assert_eq!(graph.trust_boundary_of("web").unwrap().id, "pod");
    assert!(graph.trust_boundary_of("user").is_none());
    assert_eq!(graph.shared_runtime_of("db").unwrap().id, "k8s");
    assert_eq!(graph.parent_trust_boundary("pod").unwrap().id, "vpc");
}

#[test]
fn test_traversals_are_sorted() {
    let graph = sample();
    let ids = |links: Vec<&CommunicationLink>| -> Vec<String> {
        links.into_iter().map(|l| l.id.clone()).collect()
    };
    assert_eq!(ids(graph.outgoing_links("web")), vec!["web-cache", "web-db"]);
    assert_eq!(ids(graph.incoming_links("web")), vec!["user-web", "web-cache"]);
    assert_eq!(
        ids(graph.links_touching("web")),
        vec!["user-web", "web-cache", "web-db"]
    );
}

#[test]
fn test_data_assets_of_link_deduplicates() {
    let graph = sample();
    let names: Vec<_> = graph
        .data_assets_of_link("web-db")
        .into_iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(names, vec!["audit", "orders"]);
    assert_eq!(graph.data_assets_processed_or_stored("db").len(), 2);
    assert_eq!(graph.data_assets_processed_or_stored("user").len(), 0);
}

#[test]
fn test_assets_in_trust_boundary_include_nested() {
    let graph = sample();
    let ids: Vec<_> = graph
        .assets_in_trust_boundary("vpc")
        .into_iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(ids, vec!["db", "web"]);
}

#[test]
fn test_boundary_crossing() {
    let graph = sample();
    // web sits in the execution environment nested in the vpc
    assert!(graph.is_across_trust_boundary("web-db"));
    assert!(!graph.is_across_network_trust_boundary("web-db"));
    assert!(graph.is_across_trust_boundary("user-web"));
    assert!(graph.is_across_network_trust_boundary("user-web"));
    assert!(!graph.is_across_trust_boundary("web-cache"));
}

#[test]
fn test_duplicate_ids_rejected() {
    let err = ModelGraph::builder("dup")
        .technical_asset(asset("a"))
        .technical_asset(asset("a"))
        .build()
        .unwrap_err();
    assert_eq!(err, EngineError::model("duplicate technical asset id a"));
}

#[test]
fn test_dangling_link_rejected() {
    let result = ModelGraph::builder("m")
        .technical_asset(asset("a"))
        .communication_link(link("l", "a", "ghost"))
        .build();
    assert!(matches!(result, Err(EngineError::Model(_))));
}

#[test]
fn test_dangling_data_asset_rejected() {
    let mut a = asset("a");
    a.data_assets_stored = vec!["ghost".into()];
    let result = ModelGraph::builder("m").technical_asset(a).build();
    assert!(matches!(result, Err(EngineError::Model(_))));
}

#[test]
fn test_asset_in_two_boundaries_rejected() {
    let result = ModelGraph::builder("m")
        .technical_asset(asset("a"))
        .trust_boundary(boundary("b1", TrustBoundaryType::NetworkOnPrem, &["a"], &[]))
        .trust_boundary(boundary("b2", TrustBoundaryType::NetworkOnPrem, &["a"], &[]))
        .build();
    assert!(matches!(result, Err(EngineError::Model(_))));
}

#[test]
fn test_asset_on_two_runtimes_rejected() {
    let runtime = |id: &str| SharedRuntime {
        id: id.to_string(),
        technical_assets_running: vec!["a".into()],
        ..Default::default()
    };
    let result = ModelGraph::builder("m")
        .technical_asset(asset("a"))
        .shared_runtime(runtime("r1"))
        .shared_runtime(runtime("r2"))
        .build();
    assert!(matches!(result, Err(EngineError::Model(_))));
}

#[test]
fn test_cyclic_nesting_rejected() {
    let result = ModelGraph::builder("m")
        .trust_boundary(boundary("b1", TrustBoundaryType::NetworkOnPrem, &[], &["b2"]))
        .trust_boundary(boundary("b2", TrustBoundaryType::NetworkOnPrem, &[], &["b1"]))
        .build();
    assert!(matches!(result, Err(EngineError::Model(_))));
}
