//! Configuration loading as seen from the CLI

mod common;

use common::TestEnv;

#[test]
fn unknown_key_warns_with_suggestion() {
    let env = TestEnv::new();
    env.write_config("[classifier]\nentry_filname = \"index.html\"\n");

    let result = env.run(&["classify", "index.html"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stderr.contains("Unknown config key 'entry_filname'"), "{}", result.stderr);
    assert!(result.stderr.contains("cachet.toml:2"));
}

#[test]
fn malformed_config_is_an_error() {
    let env = TestEnv::new();
    env.write_config("[classifier\n");

    let result = env.run(&["classify", "--json", "index.html"]);
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.event("error")["code"], "config");
}

#[test]
fn explicit_config_path_is_used() {
    let env = TestEnv::new();
    env.write("conf/site.toml", "[classifier]\nentry_filename = \"home.html\"\n");

    let result = env.run(&["--config", "conf/site.toml", "classify", "home.html"]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.starts_with("entry-point"));
}

#[test]
fn environment_overrides_file() {
    let env = TestEnv::new();
    env.write_config("[classifier]\nentry_filename = \"home.html\"\n");

    let result = env.run_with_env(
        &["classify", "main.html"],
        &[("CACHET_ENTRY_FILENAME", "main.html")],
    );
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.starts_with("entry-point"));
}

#[test]
fn json_logs_go_to_stderr_only() {
    let env = TestEnv::with_site();
    let result = env.run_with_env(
        &["plan", "--json"],
        &[("CACHET_LOG_LEVEL", "info"), ("CACHET_LOG_FORMAT", "json")],
    );

    assert!(result.success, "stderr: {}", result.stderr);
    for event in result.events() {
        assert!(event.get("event").is_some(), "unexpected stdout line: {event}");
    }
    assert!(result.stderr.contains("\"level\":\"INFO\""), "{}", result.stderr);
}
