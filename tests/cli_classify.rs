//! `cachet classify` output

mod common;

use common::TestEnv;

#[test]
fn classify_prints_aligned_tiers() {
    let env = TestEnv::new();
    let result = env.run(&[
        "classify",
        "index.html",
        "about.html",
        "assets/app.3f9a2c1b.js",
        "img/logo.png",
        "robots.txt",
    ]);

    assert!(result.success, "stderr: {}", result.stderr);
    insta::assert_snapshot!(result.stdout, @r"
    entry-point     index.html
    secondary-html  about.html
    immutable       assets/app.3f9a2c1b.js
    media           img/logo.png
    generic-static  robots.txt
    ");
}

#[test]
fn classify_json_includes_directive() {
    let env = TestEnv::new();
    let result = env.run(&["classify", "--json", "/index.html", "vendor/jquery.min.js"]);

    assert!(result.success, "stderr: {}", result.stderr);
    let classified: Vec<_> = result
        .events()
        .into_iter()
        .filter(|e| e["event"] == "classified")
        .collect();
    assert_eq!(classified.len(), 2);
    assert_eq!(classified[0]["tier"], "entry-point");
    assert_eq!(classified[0]["cache_control"], "no-cache, no-store, must-revalidate");
    assert_eq!(classified[1]["tier"], "generic-static");
    assert_eq!(result.events().last().unwrap()["event"], "complete");
}

#[test]
fn classify_uses_configured_entry_filename() {
    let env = TestEnv::new();
    env.write_config("[classifier]\nentry_filename = \"home.html\"\n");

    let result = env.run(&["classify", "home.html", "index.html"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("entry-point     home.html"));
    assert!(result.stdout.contains("secondary-html  index.html"));
}

#[test]
fn classify_rejects_traversal() {
    let env = TestEnv::new();
    let result = env.run(&["classify", "--json", "../secret.txt"]);

    assert_eq!(result.exit_code, 1);
    assert_eq!(result.event("error")["code"], "invalid_path");
}

#[test]
fn ambiguous_entry_is_rejected_when_configured() {
    let env = TestEnv::new();
    env.write_config(
        "[classifier]\n\
         entry_filename = \"index.4f9a2c11.html\"\n\
         hash_patterns = [\"*.*.html\"]\n\
         precedence = \"reject\"\n",
    );

    let result = env.run(&["classify", "index.4f9a2c11.html"]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("[ERROR]"), "stderr: {}", result.stderr);
    assert!(result.stderr.contains("help:"));
}
