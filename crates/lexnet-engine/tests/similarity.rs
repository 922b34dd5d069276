//! Information-content similarity and the inspection helpers around it.

mod common;

use lexnet_common::utils::error::Error;
use lexnet_engine::{Config, LexNet, Metric, SensePolicy, SimilarityConfig};

use common::{ZOO_COUNTS, taal, zoo, zoo_sources_counting, zoo_with};

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("score should be defined");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn ic(subcount: f64) -> f64 {
    -(subcount / 32.0).log2()
}

#[test]
fn resnik_is_the_lcs_information() {
    let net = zoo();
    approx(net.similarity(Metric::Resnik, "hond", "kat").unwrap(), ic(14.0));
    approx(net.similarity(Metric::Resnik, "hond", "plant").unwrap(), ic(20.0));
    approx(net.similarity(Metric::Resnik, "hond", "hond").unwrap(), 2.0);
}

#[test]
fn lin_and_jiang_conrath() {
    let net = zoo();
    approx(
        net.similarity(Metric::Lin, "hond", "kat").unwrap(),
        2.0 * ic(14.0) / 5.0,
    );
    approx(
        net.similarity(Metric::JiangConrath, "hond", "kat").unwrap(),
        1.0 / (5.0 - 2.0 * ic(14.0)),
    );
}

#[test]
fn identical_units() {
    let net = zoo();
    approx(net.similarity(Metric::Lin, "hond:noun:1", "u-hond").unwrap(), 1.0);
    assert_eq!(
        net.similarity(Metric::JiangConrath, "hond", "hond").unwrap(),
        Some(f64::INFINITY)
    );
}

#[test]
fn unrelated_units_share_nothing() {
    let net = zoo();
    approx(net.similarity(Metric::Resnik, "hond", "steen").unwrap(), 0.0);
    approx(net.similarity(Metric::Lin, "hond", "steen").unwrap(), 0.0);
    approx(
        net.similarity(Metric::JiangConrath, "hond", "steen").unwrap(),
        1.0 / (2.0 + ic(12.0)),
    );
}

#[test]
fn unknown_selector_scores_none() {
    let net = zoo();
    assert_eq!(net.similarity(Metric::Lin, "hond", "eenhoorn").unwrap(), None);
}

#[test]
fn strict_policy_rejects_ambiguous_lemmas() {
    let net = zoo();
    let Err(Error::AmbiguousLemma { selector, candidates }) =
        net.similarity(Metric::Resnik, "bank", "hond")
    else {
        panic!("expected an ambiguity error");
    };
    assert_eq!(selector, "bank");
    assert_eq!(candidates, vec!["bank:noun:1", "bank:noun:2"]);

    // a sense number settles it
    assert!(net.similarity(Metric::Resnik, "bank:noun:1", "hond").is_ok());
}

#[test]
fn best_pair_takes_the_maximum() {
    let config = Config::default().with_similarity(
        SimilarityConfig::default().with_sense_policy(SensePolicy::BestPair),
    );
    let net = zoo_with(config);
    approx(net.similarity(Metric::Resnik, "bank", "hond").unwrap(), ic(20.0));
    // neither sense of bank has a count, so Lin is undefined for both
    assert_eq!(net.similarity(Metric::Lin, "bank", "hond").unwrap(), None);
}

#[test]
fn smoothing_defines_zero_counts() {
    let config = Config::default().with_similarity(
        SimilarityConfig::default()
            .with_sense_policy(SensePolicy::BestPair)
            .with_smoothing(),
    );
    let net = zoo_with(config);
    approx(
        net.similarity(Metric::Lin, "bank:noun:1", "hond").unwrap(),
        2.0 * ic(20.0) / (ic(1.0) + 2.0),
    );
}

#[test]
fn similarity_needs_counts() {
    let net = taal();
    assert!(matches!(
        net.similarity(Metric::Lin, "taal", "spraak"),
        Err(Error::MissingCounts)
    ));
    assert!(matches!(net.counts("taal", false), Err(Error::MissingCounts)));
}

// --- Counts and information content ---

#[test]
fn counts_and_subcounts() {
    let net = zoo();
    assert_eq!(net.counts("hond", false).unwrap()["hond:noun:1"], 8);
    assert_eq!(net.counts("dier", true).unwrap()["dier:noun:1"], 14);
    assert_eq!(net.counts("entiteit", true).unwrap()["entiteit:noun:1"], 20);

    let bank = net.counts("bank", false).unwrap();
    assert_eq!(bank.len(), 2);
    assert!(bank.values().all(|&c| c == 0));
}

#[test]
fn probabilities_and_information_content() {
    let net = zoo();
    assert_eq!(net.probabilities("hond").unwrap()["hond:noun:1"], Some(0.25));
    assert_eq!(net.information_content("kat").unwrap()["kat:noun:1"], Some(3.0));
    assert_eq!(net.information_content("bank:noun:2").unwrap()["bank:noun:2"], None);
}

// --- Subsumers ---

#[test]
fn common_subsumers_nearest_first() {
    let net = zoo();
    let found = net.common_subsumers("hond", "kat").unwrap();
    let ids: Vec<&str> = found.iter().map(|s| s.synset.id.as_str()).collect();
    assert_eq!(ids, vec!["s-dier", "s-entiteit"]);
    assert_eq!(found[0].distance, 2);
    assert_eq!(found[1].distance, 4);
    approx(found[0].information_content, ic(14.0));
}

#[test]
fn a_synset_subsumes_itself() {
    let net = zoo();
    let found = net.nearest_common_subsumers("hond", "dier").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].synset.id, "s-dier");
    assert_eq!(found[0].distance, 1);
}

#[test]
fn least_common_subsumer_has_the_most_information() {
    let net = zoo();
    let found = net.least_common_subsumers("hond", "plant").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].synset.id, "s-entiteit");
    assert!(net.least_common_subsumers("hond", "steen").unwrap().is_empty());
}

#[test]
fn subsumers_are_chosen_over_every_sense_pair() {
    let net = zoo();
    // vos:noun:1 shares dier with hond, vos:noun:2 only entiteit
    let least = net.least_common_subsumers("hond", "vos").unwrap();
    let ids: Vec<&str> = least.iter().map(|s| s.synset.id.as_str()).collect();
    assert_eq!(ids, vec!["s-dier"]);
    approx(least[0].information_content, ic(14.0));

    let nearest = net.nearest_common_subsumers("hond", "vos").unwrap();
    assert_eq!(nearest.len(), 1);
    assert_eq!(nearest[0].synset.id, "s-dier");
    assert_eq!(nearest[0].distance, 2);

    let all = net.common_subsumers("hond", "vos").unwrap();
    let ids: Vec<&str> = all.iter().map(|s| s.synset.id.as_str()).collect();
    assert_eq!(ids, vec!["s-dier", "s-entiteit"]);
}

#[test]
fn least_common_subsumer_is_a_single_synset() {
    let net = zoo();
    let lcs = net.least_common_subsumer("hond", "vos").unwrap().unwrap();
    assert_eq!(lcs.synset.id, "s-dier");
    assert_eq!(
        net.least_common_subsumer("kat", "plant").unwrap().map(|s| s.synset.id),
        Some("s-entiteit".to_string())
    );
    assert_eq!(net.least_common_subsumer("hond", "steen").unwrap(), None);
    assert!(matches!(
        taal().least_common_subsumer("taal", "medium"),
        Err(Error::MissingCounts)
    ));
}

#[test]
fn least_common_subsumer_is_never_more_informative_than_either_side() {
    let net = zoo();
    let units = ["entiteit", "dier", "hond", "kat", "plant", "steen"];
    let own = |unit: &str| {
        net.information_content(unit).unwrap()[&format!("{unit}:noun:1")]
            .expect("every counted unit has an information content")
    };
    for a in units {
        for b in units {
            let resnik = net.similarity(Metric::Resnik, a, b).unwrap().unwrap();
            assert!(resnik <= own(a).min(own(b)) + 1e-12, "{a} / {b}");
            if let Some(lcs) = net.least_common_subsumer(a, b).unwrap() {
                approx(lcs.information_content, resnik);
            }
        }
    }
}

#[test]
fn subcount_sums_the_counts_below() {
    let net = zoo();
    let lemmas = ["entiteit", "dier", "hond", "kat", "plant", "steen", "bank", "vos"];
    let own: Vec<(String, u64)> = lemmas
        .iter()
        .flat_map(|lemma| net.counts(lemma, false).unwrap())
        .collect();

    for (above, _) in &own {
        let synset = synset_of(&net, above);
        let below: u64 = own
            .iter()
            .filter(|(unit, _)| {
                let shared = net.common_subsumers(unit, above).unwrap();
                shared.iter().any(|s| s.synset.id == synset)
            })
            .map(|(_, count)| count)
            .sum();
        assert_eq!(net.counts(above, true).unwrap()[above.as_str()], below, "{above}");
    }
    assert_eq!(net.counts("entiteit", true).unwrap()["entiteit:noun:1"], 2 + 2 + 8 + 4 + 4);
}

fn synset_of(net: &LexNet, unit: &str) -> String {
    net.common_subsumers(unit, unit).unwrap()[0].synset.id.clone()
}

#[test]
fn total_counts_per_category() {
    let net = zoo();
    let totals = net.total_counts().unwrap();
    assert_eq!(totals["noun"], 32);
    assert_eq!(totals["verb"], 0);
    assert_eq!(totals["all"], 32);
    assert_eq!(totals.keys().collect::<Vec<_>>(), vec!["noun", "verb", "adj", "other", "all"]);
    assert!(matches!(taal().total_counts(), Err(Error::MissingCounts)));
}

#[test]
fn category_totals_measure_against_the_bucket() {
    let counts = format!("{ZOO_COUNTS}32 spook N\n100 lopen WW\n");

    let plain = LexNet::new(Config::default()).unwrap();
    plain.load(zoo_sources_counting(&counts)).unwrap();
    assert_eq!(plain.probabilities("hond").unwrap()["hond:noun:1"], Some(0.25));

    let config =
        Config::default().with_similarity(SimilarityConfig::default().with_category_totals());
    let net = LexNet::new(config).unwrap();
    net.load(zoo_sources_counting(&counts)).unwrap();
    let totals = net.total_counts().unwrap();
    assert_eq!((totals["noun"], totals["verb"], totals["all"]), (64, 100, 164));
    assert_eq!(net.probabilities("hond").unwrap()["hond:noun:1"], Some(0.125));
    assert_eq!(net.information_content("hond").unwrap()["hond:noun:1"], Some(3.0));
}

#[test]
fn least_common_subsumers_need_counts() {
    let net = taal();
    assert!(matches!(
        net.least_common_subsumers("taal", "spraak"),
        Err(Error::MissingCounts)
    ));
    // the structural variants work without counts
    assert!(net.common_subsumers("taal", "medium").unwrap().iter().all(|s| s.information_content.is_none()));
}

#[test]
fn metric_names() {
    assert_eq!("jcn".parse::<Metric>().unwrap(), Metric::JiangConrath);
    let err = "lim".parse::<Metric>().unwrap_err();
    assert!(err.to_string().contains("lin"));
}
