//! Filter engine integration harness.
//!
//! # What this covers
//!
//! - **Identity law**: an all-absent criteria set returns the input sequence
//!   unchanged in order and content (also checked as a property over random
//!   corpora).
//! - **Per-predicate contracts**: state code exact/case-insensitive, the four
//!   substring fields, exact year, and the compound free-text search.
//! - **Conjunction**: a record must pass every active criterion; no predicate
//!   reads a field outside its own contract.
//! - **Missing fields**: a missing field value behaves as the empty string —
//!   it never matches a non-empty term and never raises.
//! - **Order preservation**: survivors keep their original relative order.
//!
//! # Running
//!
//! ```sh
//! cargo test --test filter_harness
//! ```

mod common;
use common::*;

use licita_core::filter::{filter, FilterCriteria};
use licita_core::Record;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn criteria(mutate: impl FnOnce(&mut FilterCriteria)) -> FilterCriteria {
    let mut criteria = FilterCriteria::default();
    mutate(&mut criteria);
    criteria
}

// ---------------------------------------------------------------------------
// Identity law
// ---------------------------------------------------------------------------

#[test]
fn inactive_criteria_is_identity() {
    let records = sample_corpus();
    let filtered = filter(records.clone(), &FilterCriteria::default());
    assert_eq!(filtered, records);
}

#[test]
fn empty_string_criteria_count_as_absent() {
    let records = envelope_records();
    let all_empty = criteria(|c| {
        c.uf = Some(String::new());
        c.municipio = Some(String::new());
        c.ano = Some(String::new());
        c.search = Some(String::new());
    });
    assert_eq!(filter(records.clone(), &all_empty), records);
}

proptest! {
    #[test]
    fn identity_holds_for_random_corpora(
        titles in proptest::collection::vec("[a-zA-Z0-9 ]{0,12}", 0..16),
    ) {
        let records: Vec<Record> = titles
            .iter()
            .map(|title| RecordBuilder::new(title).build())
            .collect();
        let filtered = filter(records.clone(), &FilterCriteria::default());
        prop_assert_eq!(filtered, records);
    }
}

// ---------------------------------------------------------------------------
// State code
// ---------------------------------------------------------------------------

/// The envelope fixture filtered to `uf=PR` keeps only "Edital A".
#[test]
fn uf_exact_match_keeps_matching_state() {
    let filtered = filter(envelope_records(), &criteria(|c| c.uf = Some("PR".into())));
    assert_titles!(filtered, ["Edital A"]);
}

#[test]
fn uf_match_is_case_insensitive() {
    let filtered = filter(envelope_records(), &criteria(|c| c.uf = Some("pr".into())));
    assert_titles!(filtered, ["Edital A"]);
}

/// "P" is not a prefix match — the state code compares whole.
#[test]
fn uf_is_exact_not_substring() {
    let filtered = filter(envelope_records(), &criteria(|c| c.uf = Some("P".into())));
    assert_titles!(filtered, [] as [&str; 0]);
}

// ---------------------------------------------------------------------------
// Substring fields
// ---------------------------------------------------------------------------

#[test]
fn municipio_matches_substring_case_insensitively() {
    let records = vec![
        RecordBuilder::new("A").municipio("Mandirituba").build(),
        RecordBuilder::new("B").municipio("Curitiba").build(),
    ];
    let filtered = filter(records, &criteria(|c| c.municipio = Some("MANDI".into())));
    assert_titles!(filtered, ["A"]);
}

#[test]
fn modalidade_and_situacao_match_contains() {
    let records = vec![
        RecordBuilder::new("A")
            .modalidade("Pregão - Eletrônico")
            .situacao("Divulgada no PNCP")
            .build(),
        RecordBuilder::new("B")
            .modalidade("Credenciamento")
            .situacao("Cancelada")
            .build(),
    ];
    let by_modalidade = filter(
        records.clone(),
        &criteria(|c| c.modalidade = Some("pregão".into())),
    );
    assert_titles!(by_modalidade, ["A"]);

    let by_situacao = filter(records, &criteria(|c| c.situacao = Some("cancel".into())));
    assert_titles!(by_situacao, ["B"]);
}

#[test]
fn orgao_matches_contains() {
    let records = vec![
        RecordBuilder::new("A").orgao("MUNICIPIO DE MANDIRITUBA").build(),
        RecordBuilder::new("B").orgao("CAMARA MUNICIPAL").build(),
    ];
    let filtered = filter(records, &criteria(|c| c.orgao = Some("camara".into())));
    assert_titles!(filtered, ["B"]);
}

/// A record without the field behaves as an empty string: it can never
/// match a non-empty term, but it passes when the criterion is absent.
#[test]
fn missing_field_never_matches_active_term() {
    let records = vec![
        RecordBuilder::new("has-field").municipio("Mandirituba").build(),
        RecordBuilder::new("no-field").build(),
    ];
    let filtered = filter(records.clone(), &criteria(|c| c.municipio = Some("mandi".into())));
    assert_titles!(filtered, ["has-field"]);

    let unfiltered = filter(records.clone(), &FilterCriteria::default());
    assert_eq!(unfiltered, records);
}

// ---------------------------------------------------------------------------
// Year
// ---------------------------------------------------------------------------

#[test]
fn ano_is_exact_string_equality() {
    let filtered = filter(envelope_records(), &criteria(|c| c.ano = Some("2025".into())));
    assert_titles!(filtered, ["Edital A"]);

    let prefix = filter(envelope_records(), &criteria(|c| c.ano = Some("202".into())));
    assert_titles!(prefix, [] as [&str; 0]);
}

// ---------------------------------------------------------------------------
// Compound search
// ---------------------------------------------------------------------------

#[test]
fn search_spans_title_description_orgao_municipio() {
    let records = vec![
        RecordBuilder::new("Edital 1").descricao("aquisição de eletrodomésticos").build(),
        RecordBuilder::new("Edital 2").orgao("HOSPITAL MUNICIPAL").build(),
        RecordBuilder::new("Edital 3").municipio("Mandirituba").build(),
        RecordBuilder::new("Edital 4").build(),
    ];

    let by_description = filter(records.clone(), &criteria(|c| c.search = Some("ELETRO".into())));
    assert_titles!(by_description, ["Edital 1"]);

    let by_orgao = filter(records.clone(), &criteria(|c| c.search = Some("hospital".into())));
    assert_titles!(by_orgao, ["Edital 2"]);

    let by_municipio = filter(records.clone(), &criteria(|c| c.search = Some("mandiri".into())));
    assert_titles!(by_municipio, ["Edital 3"]);

    let by_title = filter(records, &criteria(|c| c.search = Some("edital".into())));
    assert_eq!(by_title.len(), 4);
}

#[test]
fn search_misses_fields_outside_its_contract() {
    // `uf` is not part of the compound search text.
    let records = vec![RecordBuilder::new("Edital 1").uf("PR").build()];
    let filtered = filter(records, &criteria(|c| c.search = Some("pr".into())));
    assert_titles!(filtered, [] as [&str; 0]);
}

// ---------------------------------------------------------------------------
// Conjunction and order
// ---------------------------------------------------------------------------

#[test]
fn all_active_criteria_must_hold() {
    let records = envelope_records();
    let both = criteria(|c| {
        c.uf = Some("PR".into());
        c.ano = Some("2024".into());
    });
    // "Edital A" is PR/2025, "Edital B" is SP/2024 — neither passes both.
    assert_titles!(filter(records, &both), [] as [&str; 0]);
}

#[test]
fn survivors_keep_original_relative_order() {
    let records = vec![
        notice("first", "PR", "2025"),
        notice("skip", "SP", "2025"),
        notice("second", "PR", "2024"),
        notice("third", "PR", "2023"),
    ];
    let filtered = filter(records, &criteria(|c| c.uf = Some("PR".into())));
    assert_titles!(filtered, ["first", "second", "third"]);
}

#[test]
fn empty_input_yields_empty_output() {
    let filtered = filter(Vec::new(), &criteria(|c| c.uf = Some("PR".into())));
    assert!(filtered.is_empty());
}
