use super::*;

#[test]
fn source_file_convention() {
    assert!(is_source_file("_g0_leasing.json"));
    assert!(is_source_file("_G01_Quiz.JSON"));
    assert!(!is_source_file("_g0.json"));
    assert!(!is_source_file("_g1_leasing.json"));
    assert!(!is_source_file("g0_leasing.json"));
    assert!(!is_source_file("_g0_leasing.json.bak"));
}

#[test]
fn classify_bundle_files() {
    assert_eq!(BundleFile::classify("game_quiz.html"), Some(BundleFile::Markup));
    assert_eq!(BundleFile::classify("_game_quiz.html"), Some(BundleFile::Markup));
    assert_eq!(BundleFile::classify("_ghtml_quiz.html"), Some(BundleFile::Markup));
    assert_eq!(BundleFile::classify("_gjs_quiz.js"), Some(BundleFile::Script));
    assert_eq!(BundleFile::classify("game_quiz.js"), Some(BundleFile::Script));
    assert_eq!(BundleFile::classify("_g0_quiz.json"), Some(BundleFile::Data));
    assert_eq!(BundleFile::classify("_gg12_quiz.json"), Some(BundleFile::Data));
    assert_eq!(BundleFile::classify("_gjs_quiz.json"), Some(BundleFile::Data));
    assert_eq!(BundleFile::classify("index.html"), None);
    assert_eq!(BundleFile::classify("styles.css"), None);
    assert_eq!(BundleFile::classify("_g0quiz.json"), None);
}

#[test]
fn drift_file_patterns() {
    assert!(is_gjson_file("_gjson_leasing.json"));
    assert!(!is_gjson_file("_gjson_.json"));
    assert!(is_numbered_g_file("_g0_leasing.json"));
    assert!(is_numbered_g_file("_g12_leasing.json"));
    assert!(!is_numbered_g_file("_gjson_leasing.json"));
}

#[test]
fn paired_script_for_ghtml_prefix() {
    assert_eq!(paired_script_names("_ghtml_Quiz.html"), vec!["_gjs_quiz.js"]);
    assert!(is_behavior_script("_gjs_quiz.js"));
}

#[test]
fn paired_script_for_game_prefix() {
    assert_eq!(
        paired_script_names("game_quiz.html"),
        vec!["game_quiz.js", "_game_quiz.js"]
    );
    assert_eq!(
        paired_script_names("_game_quiz.html"),
        vec!["_game_quiz.js", "game_quiz.js"]
    );
}
