//! Query answers against a small Cornetto-style network.

mod common;

use lexnet_common::utils::error::{Error, QueryErrorKind};
use lexnet_engine::{Answer, QueryOptions, RelationShape, RelationTree, Truncation};

use common::taal;

// --- Lookup ---

#[test]
fn lookup_lists_senses_in_synset_order() {
    let net = taal();
    let answer = net.ask("taal").unwrap();
    assert_eq!(
        answer.as_lookup().unwrap().units,
        vec!["taal:noun:3", "taal:noun:1", "taal:noun:2"]
    );
}

#[test]
fn lookup_narrows_by_category_and_sense() {
    let net = taal();
    assert_eq!(net.ask("taal:noun:2").unwrap().as_lookup().unwrap().units, vec!["taal:noun:2"]);
    assert_eq!(net.ask("spraak::3").unwrap().as_lookup().unwrap().units, vec!["spraak:noun:3"]);
    assert!(net.ask("taal:verb").unwrap().as_lookup().unwrap().units.is_empty());
}

#[test]
fn unknown_lemma_is_empty_not_error() {
    let net = taal();
    assert!(net.ask("onbekend").unwrap().as_lookup().unwrap().units.is_empty());
    let related = net.ask("onbekend has_hyperonym").unwrap();
    assert!(related.as_relation().unwrap().is_empty());
    let path = net.ask("onbekend + taal").unwrap();
    assert!(!path.as_path().unwrap().is_found());
}

// --- Relations ---

#[test]
fn synonym_is_a_single_hop() {
    let net = taal();
    let answer = net.ask("taal synonym").unwrap();
    let result = answer.as_relation().unwrap();
    assert_eq!(result.shape, RelationShape::SingleHop);
    assert_eq!(result.depth, 1);
    assert_eq!(result.units("synonym"), vec!["taaluiting:noun:1"]);
    assert_eq!(result.truncation, None);
}

#[test]
fn hyperonym_follows_the_closure() {
    let net = taal();
    let answer = net.ask("taal has_hyperonym").unwrap();
    let result = answer.as_relation().unwrap();
    assert_eq!(result.shape, RelationShape::Closure);
    assert_eq!(result.depth, net.max_depth());
    assert_eq!(
        result.units("HAS_HYPERONYM"),
        vec!["medium:noun:1", "communicatiemiddel:noun:1"]
    );
    assert_eq!(result.truncation, None);

    let first = &result.tree.get("HAS_HYPERONYM").unwrap()["medium:noun:1"];
    assert!(first.get("HAS_HYPERONYM").unwrap().contains_key("communicatiemiddel:noun:1"));
}

#[test]
fn relation_names_are_case_insensitive() {
    let net = taal();
    let upper = net.ask("taal HAS_HYPERONYM").unwrap();
    let lower = net.ask("taal has_hyperonym").unwrap();
    assert_eq!(upper, lower);
}

#[test]
fn explicit_depth_is_not_truncation() {
    let net = taal();
    let answer = net.ask("taal has_hyperonym1").unwrap();
    let result = answer.as_relation().unwrap();
    assert_eq!(result.shape, RelationShape::Closure);
    assert_eq!(result.depth, 1);
    assert_eq!(result.units("has_hyperonym"), vec!["medium:noun:1"]);
    assert_eq!(result.truncation, None);
}

#[test]
fn ceiling_reports_depth_limit() {
    let net = taal();
    let answer = net
        .ask_with("taal has_hyperonym", QueryOptions::new().with_max_depth(1))
        .unwrap();
    let result = answer.as_relation().unwrap();
    assert_eq!(result.units("has_hyperonym"), vec!["medium:noun:1"]);
    assert_eq!(result.truncation, Some(Truncation::DepthLimit { depth: 1 }));
}

#[test]
fn set_max_depth_changes_the_default_ceiling() {
    let net = taal();
    net.set_max_depth(1).unwrap();
    let answer = net.ask("taal has_hyperonym").unwrap();
    assert_eq!(answer.truncation(), Some(Truncation::DepthLimit { depth: 1 }));
    assert!(matches!(net.set_max_depth(0), Err(Error::InvalidValue(_))));
    assert_eq!(net.max_depth(), 1);
}

#[test]
fn any_relation_collects_every_relation() {
    let net = taal();
    let answer = net.ask("taal:noun:1 +").unwrap();
    let result = answer.as_relation().unwrap();
    assert_eq!(result.shape, RelationShape::Unrestricted);
    let flat = result.flatten();
    assert_eq!(flat["SYNONYM"], vec!["taaluiting:noun:1"]);
    assert_eq!(
        flat["HAS_HYPERONYM"],
        vec!["medium:noun:1", "communicatiemiddel:noun:1"]
    );
}

fn tree_depth(tree: &RelationTree) -> usize {
    tree.relations()
        .filter_map(|relation| tree.get(relation))
        .flat_map(|units| units.values())
        .map(|subtree| 1 + tree_depth(subtree))
        .max()
        .unwrap_or(0)
}

#[test]
fn no_answer_nests_deeper_than_its_ceiling() {
    let net = taal();
    for query in ["taal:noun:1 +", "taal has_hyperonym", "taaluiting +"] {
        for depth in 1..=4 {
            let answer = net
                .ask_with(query, QueryOptions::new().with_max_depth(depth))
                .unwrap();
            let result = answer.as_relation().unwrap();
            assert!(result.depth <= depth, "{query} at {depth}");
            assert!(tree_depth(&result.tree) <= depth, "{query} at {depth}");
        }
    }
    let shallow = net
        .ask_with("taal:noun:1 +", QueryOptions::new().with_max_depth(1))
        .unwrap();
    assert_eq!(tree_depth(&shallow.as_relation().unwrap().tree), 1);
}

#[test]
fn step_budget_truncates() {
    let net = taal();
    let answer = net
        .ask_with("taal has_hyperonym", QueryOptions::new().with_max_steps(1))
        .unwrap();
    assert!(matches!(answer.truncation(), Some(Truncation::StepBudget { .. })));
}

#[test]
fn cancelled_query_returns_nothing() {
    let net = taal();
    let token = lexnet_engine::CancellationToken::new();
    token.cancel();
    let answer = net
        .ask_with("taal +", QueryOptions::new().with_cancellation(token))
        .unwrap();
    assert_eq!(answer.truncation(), Some(Truncation::Cancelled));
    assert!(answer.as_relation().unwrap().is_empty());
}

// --- Paths ---

#[test]
fn path_over_any_relation() {
    let net = taal();
    let answer = net.ask("taal + spraak").unwrap();
    let path = answer.as_path().unwrap();
    assert_eq!(path.path, vec!["taal:noun:2", "ROLE_INSTRUMENT", "spraak:noun:3"]);
    assert_eq!(path.hops(), 1);
    assert_eq!(path.truncation, None);
}

#[test]
fn path_along_one_relation() {
    let net = taal();
    let answer = net.ask("taal has_hyperonym communicatiemiddel").unwrap();
    assert_eq!(
        answer.as_path().unwrap().path,
        vec![
            "taal:noun:1",
            "HAS_HYPERONYM",
            "medium:noun:1",
            "HAS_HYPERONYM",
            "communicatiemiddel:noun:1",
        ]
    );
}

#[test]
fn path_beyond_explicit_depth_is_empty_without_truncation() {
    let net = taal();
    let answer = net.ask("taal has_hyperonym1 communicatiemiddel").unwrap();
    let path = answer.as_path().unwrap();
    assert!(!path.is_found());
    assert_eq!(path.truncation, None);
}

#[test]
fn path_beyond_ceiling_is_truncated() {
    let net = taal();
    let answer = net
        .ask_with(
            "taal has_hyperonym communicatiemiddel",
            QueryOptions::new().with_max_depth(1),
        )
        .unwrap();
    let path = answer.as_path().unwrap();
    assert!(!path.is_found());
    assert_eq!(path.truncation, Some(Truncation::DepthLimit { depth: 1 }));
}

// --- Errors ---

#[test]
fn unknown_relation_suggests_a_name() {
    let net = taal();
    let Err(Error::Query(err)) = net.ask("taal has_hyperoniem") else {
        panic!("expected a query error");
    };
    assert_eq!(err.kind, QueryErrorKind::UnknownRelation);
    assert!(err.suggestion.unwrap().contains("HAS_HYPERONYM"));
}

#[test]
fn syntax_errors_surface() {
    let net = taal();
    let Err(Error::Query(err)) = net.ask("taal:noun:0") else {
        panic!("expected a query error");
    };
    assert_eq!(err.kind, QueryErrorKind::Syntax);
}

#[test]
fn zero_ceiling_is_rejected() {
    let net = taal();
    let result = net.ask_with("taal +", QueryOptions::new().with_max_depth(0));
    assert!(matches!(result, Err(Error::InvalidValue(_))));
}

// --- Serialization ---

#[test]
fn single_hop_serializes_flat() {
    let net = taal();
    let json = serde_json::to_value(net.ask("taal synonym").unwrap()).unwrap();
    assert_eq!(json["kind"], "relation");
    assert_eq!(json["shape"], "single_hop");
    assert_eq!(json["relations"]["SYNONYM"][0], "taaluiting:noun:1");
    assert!(json["truncation"].is_null());
}

#[test]
fn truncation_serializes_with_reason() {
    let net = taal();
    let answer = net
        .ask_with("taal has_hyperonym", QueryOptions::new().with_max_depth(1))
        .unwrap();
    let json = serde_json::to_value(&answer).unwrap();
    assert_eq!(json["truncation"]["reason"], "depth_limit");
    assert_eq!(json["truncation"]["depth"], 1);
    assert!(matches!(answer, Answer::Relation(_)));
}
