//! End-to-end tests over the classifier, aggregator, and report
//! assembler, driven by raw repository nodes as the API would return
//! them.

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use techaudit::classify::classify_all;
use techaudit::report::assemble_report;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn node(name: &str, archived: bool, visibility: &str, committed: Option<DateTime<Utc>>) -> Value {
    json!({
        "name": name,
        "url": format!("https://example.test/org/{name}"),
        "visibility": visibility,
        "isArchived": archived,
        "defaultBranchRef": committed.map(|date| json!({
            "target": {
                "committedDate": date.to_rfc3339(),
                "history": {"nodes": [{"author": {"name": "dev", "email": "dev@example.com"}}]}
            }
        })),
        "languages": {
            "edges": [
                {"size": 800, "node": {"name": "Python"}},
                {"size": 200, "node": {"name": "HTML"}}
            ],
            "totalSize": 1000
        }
    })
}

#[test]
fn percentages_sum_to_one_hundred() {
    let records = classify_all(&[node("a", false, "PUBLIC", None)]);
    let total: f64 = records[0]
        .technologies
        .languages
        .iter()
        .map(|l| l.percentage)
        .sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn archival_and_visibility_partitions_sum_to_the_record_count() {
    let now = fixed_now();
    let nodes = vec![
        node("a", false, "PUBLIC", None),
        node("b", false, "PRIVATE", None),
        node("c", true, "INTERNAL", None),
        node("d", true, "PRIVATE", None),
        node("e", false, "INTERNAL", None),
    ];
    let records = classify_all(&nodes);
    let report = assemble_report(records, now);

    let u = &report.stats_unarchived;
    let a = &report.stats_archived;
    assert_eq!(u.total + a.total, report.repositories.len() as u64);
    assert_eq!(u.private + u.public + u.internal, u.total);
    assert_eq!(a.private + a.public + a.internal, a.total);
}

#[test]
fn report_is_idempotent_for_a_fixed_now() {
    let now = fixed_now();
    let nodes = vec![
        node("a", false, "PUBLIC", Some(now - Duration::days(10))),
        node("b", true, "PRIVATE", Some(now - Duration::days(200))),
    ];

    let first = assemble_report(classify_all(&nodes), now);
    let second = assemble_report(classify_all(&nodes), now);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn forty_five_day_old_commit_is_in_the_longer_windows_only() {
    let now = fixed_now();
    let nodes = vec![node(
        "recent",
        false,
        "PUBLIC",
        Some(now - Duration::days(45)),
    )];
    let report = assemble_report(classify_all(&nodes), now);

    let stats = &report.stats_unarchived;
    assert_eq!(stats.active_last_month, 0);
    assert_eq!(stats.active_last_3months, 1);
    assert_eq!(stats.active_last_6months, 1);
}

#[test]
fn no_iac_signals_means_empty_infrastructure_set() {
    let mut plain = node("plain", false, "PUBLIC", None);
    plain["object"] = json!({"entries": [
        {"name": "main.py", "type": "blob", "object": {"text": "print('hi')"}}
    ]});
    let records = classify_all(&[plain]);
    assert!(records[0].technologies.infrastructure_as_code.is_empty());
}

#[test]
fn python_repo_with_requirements_scenario() {
    let mut repo = node("svc", false, "PUBLIC", None);
    repo["object"] = json!({"entries": [
        {"name": "requirements.txt", "type": "blob", "object": {"text": "flask==2.0.1\n"}}
    ]});

    let records = classify_all(&[repo]);
    let langs = &records[0].technologies.languages;
    assert_eq!(langs[0].name, "Python");
    assert_eq!(langs[0].size, 800);
    assert_eq!(langs[0].percentage, 80.0);
    assert_eq!(langs[1].name, "HTML");
    assert_eq!(langs[1].percentage, 20.0);

    let python = records[0].technologies.python_dependencies.as_ref().unwrap();
    assert_eq!(python.requirements, vec!["flask"]);
    assert!(python.package_manager.contains("pip"));
}

#[test]
fn github_actions_requires_the_workflows_child() {
    let mut with = node("ci", false, "PUBLIC", None);
    with["object"] = json!({"entries": [
        {"name": ".github", "type": "tree", "object": {"entries": [
            {"name": "workflows", "type": "tree", "object": {"entries": []}}
        ]}}
    ]});
    let records = classify_all(&[with]);
    assert!(records[0].technologies.ci_cd.contains("GitHub Actions"));

    let mut without = node("noci", false, "PUBLIC", None);
    without["object"] = json!({"entries": [
        {"name": ".github", "type": "tree", "object": {"entries": [
            {"name": "CODEOWNERS", "type": "blob", "object": {"text": ""}}
        ]}}
    ]});
    let records = classify_all(&[without]);
    assert!(records[0].technologies.ci_cd.is_empty());
}

#[test]
fn malformed_package_json_does_not_abort_the_run() {
    let mut broken = json!({
        "name": "broken-manifest",
        "url": "https://example.test/org/broken-manifest",
        "visibility": "PUBLIC",
        "isArchived": false,
        "languages": {
            "edges": [{"size": 100, "node": {"name": "JavaScript"}}],
            "totalSize": 100
        }
    });
    broken["object"] = json!({"entries": [
        {"name": "package.json", "type": "blob", "object": {"text": "{ definitely not json"}}
    ]});
    let healthy = node("healthy", false, "PUBLIC", None);

    let records = classify_all(&[broken, healthy]);
    assert_eq!(records.len(), 2);
    let js = records[0].technologies.javascript_dependencies.as_ref().unwrap();
    assert!(js.dependencies.is_empty());
    assert!(js.dev_dependencies.is_empty());
}

#[test]
fn undecodable_repository_is_dropped_and_the_rest_survive() {
    let bad = json!({"name": "bad", "url": ["not", "a", "string"]});
    let good = node("good", false, "PUBLIC", None);

    let records = classify_all(&[bad, good]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "good");
}

#[test]
fn noreply_author_emails_are_redacted_in_records() {
    let mut repo = node("private-ish", false, "PUBLIC", None);
    repo["defaultBranchRef"] = json!({
        "target": {
            "committedDate": fixed_now().to_rfc3339(),
            "history": {"nodes": [{"author": {
                "name": "dev",
                "email": "123+dev@users.noreply.github.com"
            }}]}
        }
    });
    let records = classify_all(&[repo]);
    let author = records[0].last_commit_author.as_ref().unwrap();
    assert_eq!(author.email.as_deref(), Some("[redacted]"));
}

#[test]
fn output_document_has_the_compatibility_keys() {
    let report = assemble_report(classify_all(&[node("a", false, "PUBLIC", None)]), fixed_now());
    let doc = serde_json::to_value(&report).unwrap();

    for key in [
        "repositories",
        "stats_unarchived",
        "stats_archived",
        "language_statistics_unarchived",
        "language_statistics_archived",
        "technology_statistics",
        "metadata",
    ] {
        assert!(doc.get(key).is_some(), "missing top-level key {key}");
    }
    assert_eq!(
        doc["metadata"]["last_updated"].as_str().unwrap(),
        "2025-06-15"
    );
}

#[test]
fn language_statistics_average_over_containing_repositories() {
    let now = fixed_now();
    let mut a = node("a", false, "PUBLIC", None);
    a["languages"] = json!({
        "edges": [{"size": 600, "node": {"name": "Python"}},
                   {"size": 400, "node": {"name": "Rust"}}],
        "totalSize": 1000
    });
    let mut b = node("b", false, "PUBLIC", None);
    b["languages"] = json!({
        "edges": [{"size": 100, "node": {"name": "Python"}}],
        "totalSize": 100
    });

    let report = assemble_report(classify_all(&[a, b]), now);
    let python = &report.language_statistics_unarchived["Python"];
    assert_eq!(python.repo_count, 2);
    // (60 + 100) / 2
    assert_eq!(python.average_percentage, 80.0);
    assert_eq!(python.total_size, 700);

    let rust = &report.language_statistics_unarchived["Rust"];
    assert_eq!(rust.repo_count, 1);
    assert_eq!(rust.average_percentage, 40.0);
}
