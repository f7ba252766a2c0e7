use super::*;
use std::fs;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

const PAGE: &str = r#"<html><head><link href="../style.css"></head>
<body><script src="game_quiz.js"></script></body></html>"#;

fn rules(violations: &[BundleViolation]) -> Vec<Rule> {
    violations.iter().map(|v| v.rule).collect()
}

#[test]
fn script_sources_skip_remote() {
    let html = r#"<script src="https://cdn.example/x.js"></script>
        <script type="module" src='./local.js'></script>
        <script src="//cdn/x.js"></script>"#;
    assert_eq!(local_script_sources(html), vec!["./local.js"]);
}

#[test]
fn local_links_skip_fragments_and_data() {
    let html = r##"<a href="#top"></a><img src="data:image/png;base64,AA">
        <a href="mailto:x@y"></a><a href="../other/page.html">x</a>"##;
    assert_eq!(local_links(html), vec!["../other/page.html"]);
}

#[test]
fn prefixed_attributes_are_not_links() {
    let html = r#"<script data-src="a.js"></script><div data-href="../../x"></div>
        <script
            src="b.js"></script>"#;
    assert_eq!(local_script_sources(html), vec!["b.js"]);
    assert_eq!(local_links(html), vec!["b.js"]);
}

#[test]
fn link_targets_by_scheme() {
    assert_eq!(link_target("game.js"), LinkTarget::Local);
    assert_eq!(link_target("/abs/page.html"), LinkTarget::Local);
    assert_eq!(link_target("HTTPS://cdn/x.js"), LinkTarget::External);
    assert_eq!(link_target("tel:+49"), LinkTarget::External);
    assert_eq!(link_target("#top"), LinkTarget::External);
    assert_eq!(link_target("File:///etc/passwd"), LinkTarget::FileUrl);
    assert_eq!(file_url_links(r#"<a href="file:///x">"#), vec!["file:///x"]);
}

#[test]
fn content_shape() {
    assert!(has_content_shape(&serde_json::json!([1])));
    assert!(has_content_shape(&serde_json::json!({"a": 1})));
    assert!(!has_content_shape(&serde_json::json!([])));
    assert!(!has_content_shape(&serde_json::json!({})));
    assert!(!has_content_shape(&serde_json::json!("text")));
    assert!(!has_content_shape(&Value::Null));
}

#[test]
fn well_formed_playable_bundle_passes() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("databases");
    write(&content, "T1/__02_doing_quiz/game_quiz.html", PAGE);
    write(&content, "T1/__02_doing_quiz/game_quiz.js", "start();");
    write(&content, "T1/__02_doing_quiz/game_quiz.json", r#"{"q":[1]}"#);

    let result = check_bundle(tmp.path(), &content, &content.join("T1/__02_doing_quiz"));
    assert_eq!(result.kind, BundleKind::Playable);
    assert!(result.violations.is_empty(), "{:?}", result.violations);
}

#[test]
fn data_only_bundle_passes() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("databases");
    write(&content, "T1/__02_doing_cards/_g01_cards.json", "[1, 2]");

    let result = check_bundle(tmp.path(), &content, &content.join("T1/__02_doing_cards"));
    assert_eq!(result.kind, BundleKind::DataOnly);
    assert!(result.violations.is_empty());
}

#[test]
fn script_without_markup_is_not_data_only() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("databases");
    write(&content, "T1/__02_doing_x/game_x.js", "x();");
    write(&content, "T1/__02_doing_x/game_x.json", "[1]");

    let result = check_bundle(tmp.path(), &content, &content.join("T1/__02_doing_x"));
    assert_eq!(result.kind, BundleKind::Unrecognized);
    assert_eq!(rules(&result.violations), vec![Rule::Shape]);
    assert_eq!(result.violations[0].bundle, "databases/T1/__02_doing_x");
}

#[test]
fn all_rules_are_reported_together() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("databases");
    let dir = "T1/__02_doing_broken";
    write(&content, &format!("{dir}/_ghtml_broken.html"), r#"<a href="../../../etc/passwd">x</a>"#);
    write(&content, &format!("{dir}/game_broken.json"), "{ nope");

    let result = check_bundle(tmp.path(), &content, &content.join(dir));
    assert_eq!(
        rules(&result.violations),
        vec![
            Rule::Shape,
            Rule::LinkSafety,
            Rule::LinkSafety,
            Rule::DataIntegrity,
            Rule::Pairing
        ]
    );
    assert!(result.violations[4].message.contains("_gjs_broken.js"));
}

#[test]
fn underscore_game_pairing_accepts_either_form() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("databases");
    let page = r#"<script src="_game_a.js"></script>"#;
    write(&content, "T/__02_doing_a/_game_a.html", page);
    write(&content, "T/__02_doing_a/game_a.js", "");
    write(&content, "T/__02_doing_a/game_a.json", "[0]");

    let result = check_bundle(tmp.path(), &content, &content.join("T/__02_doing_a"));
    assert!(result.violations.is_empty(), "{:?}", result.violations);
}

#[test]
fn zero_bundles_is_not_a_violation() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("databases/T1")).unwrap();
    let report = validate_bundles(
        tmp.path(),
        &BundleOptions::from_settings(&Settings::default()),
    )
    .unwrap();
    assert_eq!(report.bundle_count, 0);
    assert!(report.passed());
}

#[test]
fn report_counts_by_rule() {
    let report = ArchetypeReport {
        bundle_count: 2,
        playable_count: 1,
        data_only_count: 0,
        violations: vec![
            BundleViolation {
                bundle: "a".into(),
                rule: Rule::Pairing,
                message: String::new(),
            },
            BundleViolation {
                bundle: "b".into(),
                rule: Rule::Shape,
                message: String::new(),
            },
            BundleViolation {
                bundle: "b".into(),
                rule: Rule::Pairing,
                message: String::new(),
            },
        ],
    };
    let counts: Vec<(Rule, usize)> = report.count_by_rule().into_iter().collect();
    assert_eq!(counts, vec![(Rule::Shape, 1), (Rule::Pairing, 2)]);
    assert!(!report.passed());
}

#[test]
fn unlistable_bundle_is_a_shape_violation() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("databases");
    fs::create_dir_all(&content).unwrap();

    let result = check_bundle(tmp.path(), &content, &content.join("T/__02_doing_gone"));
    assert_eq!(result.kind, BundleKind::Unrecognized);
    assert_eq!(rules(&result.violations), vec![Rule::Shape]);
    assert!(result.violations[0].message.starts_with("cannot list bundle"));
}
