use narwhal::{Acyclicer, Error, LayoutOptions, Ranker};
use serde_json::json;

#[test]
fn empty_document_yields_defaults() {
    let options = LayoutOptions::from_json_str("{}").unwrap();
    assert_eq!(options, LayoutOptions::default());
    assert_eq!(options.node_sep, 20.0);
    assert_eq!(options.rank_sep, 40.0);
    assert_eq!(options.acyclicer, Acyclicer::Dfs);
    assert_eq!(options.ranker, Ranker::LongestPath);
    assert_eq!(options.order_iterations, 4);
    assert_eq!(options.position_iterations, 8);
}

#[test]
fn camel_case_fields_are_read() {
    let options = LayoutOptions::from_value(json!({
        "nodeSep": 35,
        "rankSep": 12.5,
        "acyclicer": "none",
        "ranker": "none",
        "orderIterations": 0,
    }))
    .unwrap();
    assert_eq!(options.node_sep, 35.0);
    assert_eq!(options.rank_sep, 12.5);
    assert_eq!(options.acyclicer, Acyclicer::Disabled);
    assert_eq!(options.ranker, Ranker::Fixed);
    assert_eq!(options.order_iterations, 0);
    assert_eq!(options.position_iterations, 8);
}

#[test]
fn fixed_is_accepted_as_ranker_alias() {
    let options = LayoutOptions::from_value(json!({ "ranker": "fixed" })).unwrap();
    assert_eq!(options.ranker, Ranker::Fixed);
}

#[test]
fn options_serialize_back_to_camel_case() {
    let value = serde_json::to_value(LayoutOptions::default()).unwrap();
    assert_eq!(
        value,
        json!({
            "nodeSep": 20.0,
            "rankSep": 40.0,
            "acyclicer": "dfs",
            "ranker": "longest-path",
            "orderIterations": 4,
            "positionIterations": 8,
        })
    );
}

#[test]
fn negative_separation_is_rejected() {
    let err = LayoutOptions::from_value(json!({ "nodeSep": -3 })).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidOptions {
            message: "nodeSep must be a finite, non-negative number (got -3)".to_string(),
        }
    );
}

#[test]
fn malformed_document_is_rejected() {
    assert!(matches!(
        LayoutOptions::from_json_str(r#"{ "ranker": "network-simplex" }"#),
        Err(Error::InvalidOptions { .. })
    ));
    assert!(matches!(
        LayoutOptions::from_json_str("not json"),
        Err(Error::InvalidOptions { .. })
    ));
}
