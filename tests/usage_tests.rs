use select_star_analyzer::{
    engine::{BindingMap, Corpus, DynamicAccesses, TargetKind, candidate_names, harvest_usage},
    lexer::mask_comments
};

fn fields(corpus: &Corpus, kind: TargetKind, name: &str) -> Vec<String> {
    corpus
        .usage(kind, name)
        .sorted_fields()
        .into_iter()
        .map(|f| f.to_string())
        .collect()
}

#[test]
fn test_work_area_fields_sorted_and_lower_cased() {
    let corpus = Corpus::from_text("WRITE WA-Matnr. WRITE wa-ersda. IF wa-matnr IS INITIAL. ENDIF.");
    assert_eq!(fields(&corpus, TargetKind::WorkArea, "wa"), vec!["ersda", "matnr"]);
}

#[test]
fn test_prefix_of_longer_name_not_counted() {
    let corpus = Corpus::from_text("WRITE lwa-x. WRITE wa_2-y. WRITE wa-z.");
    assert_eq!(fields(&corpus, TargetKind::WorkArea, "wa"), vec!["z"]);
}

#[test]
fn test_commented_access_not_counted() {
    let corpus = Corpus::from_text("* WRITE wa-old.\nWRITE wa-new. \" wa-gone");
    assert_eq!(fields(&corpus, TargetKind::WorkArea, "wa"), vec!["new"]);
}

#[test]
fn test_work_area_not_expanded_through_aliases() {
    let corpus = Corpus::from_text("LOOP AT wa INTO ls. WRITE ls-x. ENDLOOP.");
    assert!(fields(&corpus, TargetKind::WorkArea, "wa").is_empty());
    assert_eq!(fields(&corpus, TargetKind::InternalTable, "wa"), vec!["x"]);
}

#[test]
fn test_table_fields_through_every_alias() {
    let corpus = Corpus::from_text(
        "LOOP AT lt INTO ls. WRITE ls-a. ENDLOOP.\nLOOP AT lt ASSIGNING <f>. <f>-b = 1. ENDLOOP.\nREAD TABLE lt INTO lr INDEX 1. WRITE lr-c.\nASSIGN lt[ 1 ] TO <g>. WRITE <g>-d.\nLOOP AT lt. WRITE lt-e. ENDLOOP."
    );
    assert_eq!(
        fields(&corpus, TargetKind::InternalTable, "lt"),
        vec!["a", "b", "c", "d", "e"]
    );
}

#[test]
fn test_table_expression_access_through_alias_name() {
    let corpus = Corpus::from_text("READ TABLE lt INTO ls INDEX 1. DATA(x) = ls-matnr.");
    let usage = corpus.usage(TargetKind::InternalTable, "LT");
    assert!(!usage.ambiguous);
    assert!(usage.fields.contains("matnr"));
}

#[test]
fn test_dynamic_accesses_mark_ambiguous() {
    for text in [
        "ASSIGN COMPONENT 'MATNR' OF STRUCTURE wa TO <f>. WRITE wa-x.",
        "ASSIGN wa-(lv_name) TO <f>. WRITE wa-x.",
        "MOVE-CORRESPONDING wa TO ls_out. WRITE wa-x.",
        "ls_out = CORRESPONDING #( wa ). WRITE wa-x.",
        "ls_out = CORRESPONDING ty_out( BASE ( ls_out ) wa ). WRITE wa-x."
    ] {
        let corpus = Corpus::from_text(text);
        let usage = corpus.usage(TargetKind::WorkArea, "wa");
        assert!(usage.ambiguous, "expected ambiguity for: {}", text);
        assert!(usage.fields.contains("x"));
        assert!(!usage.is_remediable());
    }
}

#[test]
fn test_dynamic_access_on_other_structure_is_ignored() {
    let corpus = Corpus::from_text("ASSIGN COMPONENT 1 OF STRUCTURE other TO <f>. WRITE wa-x.");
    let usage = corpus.usage(TargetKind::WorkArea, "wa");
    assert!(!usage.ambiguous);
    assert!(usage.is_remediable());
}

#[test]
fn test_harvest_with_explicit_indexes() {
    let text = "LOOP AT lt INTO ls. WRITE ls-k. ENDLOOP.";
    let masked = mask_comments(text);
    let bindings = BindingMap::from_source(text);
    let dynamic = DynamicAccesses::scan(&masked);

    let names = candidate_names(TargetKind::InternalTable, "lt", &bindings);
    assert_eq!(names.as_slice(), &["lt", "ls"]);

    let usage = harvest_usage(TargetKind::InternalTable, "lt", &masked, &bindings, &dynamic);
    assert_eq!(usage.sorted_fields(), vec!["k"]);
}

#[test]
fn test_empty_corpus() {
    let corpus = Corpus::from_text("");
    let usage = corpus.usage(TargetKind::Implicit, "mara");
    assert!(usage.fields.is_empty());
    assert!(!usage.ambiguous);
    assert!(!usage.is_remediable());
}
