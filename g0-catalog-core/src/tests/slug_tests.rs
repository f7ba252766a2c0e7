use super::*;

#[test]
fn slugify_strips_diacritics_and_collapses_separators() {
    assert_eq!(slugify("Übersicht: Leasing & Kauf"), "ubersicht_leasing_kauf");
    assert_eq!(slugify("Café--Crème"), "cafe_creme");
}

#[test]
fn slugify_trims_separators() {
    assert_eq!(slugify("  __Leasing__  "), "leasing");
    assert_eq!(slugify("databases/Teil01 Grundlagen/_g0_quiz"), "databases_teil01_grundlagen_g0_quiz");
}

#[test]
fn slugify_of_punctuation_only_is_empty() {
    assert_eq!(slugify("!!! ---"), "");
    assert_eq!(slugify(""), "");
}

#[test]
fn slugify_is_idempotent() {
    let once = slugify("Änderungs-Management (Teil 2)");
    assert_eq!(slugify(&once), once);
}

#[test]
fn fold_for_sort_matches_accented_and_plain() {
    assert_eq!(fold_for_sort("Übung"), fold_for_sort("ubung"));
    assert_eq!(fold_for_sort("ABC"), "abc");
}

#[test]
fn source_suffix_removes_prefix_and_extension() {
    assert_eq!(source_suffix("_g0_lease_calc.json"), "lease_calc");
    assert_eq!(source_suffix("_G01_quiz.JSON"), "quiz");
    assert_eq!(source_suffix("_g0quiz.json"), "quiz");
    assert_eq!(source_suffix("other.json"), "other");
}

#[test]
fn title_from_file_name_capitalizes_words() {
    assert_eq!(title_from_file_name("_g0_lease_calc.json"), "Lease Calc");
    assert_eq!(title_from_file_name("_g0_zins-rechner.json"), "Zins Rechner");
    assert_eq!(title_from_file_name("_g0_übung.json"), "Übung");
}

#[test]
fn title_from_bare_prefix_is_untitled() {
    assert_eq!(title_from_file_name("_g0.json"), UNTITLED);
    assert_eq!(title_from_file_name("_g0_.json"), UNTITLED);
}
