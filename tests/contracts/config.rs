//! Configuration contracts
//!
//! Priority: CLI flags > environment variables > config file > defaults

use crate::common::*;

/// CONTRACT: an explicit config file that does not parse stops the CLI
#[test]
fn contract_invalid_config_fails_fast() {
    let env = TestEnv::new();
    let config = env.write_file("bad.toml", "[watcher]\nevents = [\"bogus\"]\n");

    let result = env.run(&["--config", path_str(&config), "tree", "."]);

    assert!(!result.success);
    assert!(result.stderr.contains("invalid config"), "stderr: {}", result.stderr);
}

/// CONTRACT: unknown keys warn but do not fail
#[test]
fn contract_unknown_key_only_warns() {
    let env = TestEnv::new();
    env.write_user_config("[watcher]\nevnts = [\"create\"]\n");

    let result = env.run(&["tree", "."]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stderr.contains("evnts"), "stderr: {}", result.stderr);
    assert!(result.stderr.contains("events"), "stderr: {}", result.stderr);
}

/// CONTRACT: a missing explicit config file is an error, a missing user
/// config is not
#[test]
fn contract_missing_config_files() {
    let env = TestEnv::new();

    assert!(env.run(&["tree", "."]).success);
    assert!(!env.run(&["--config", "nope.toml", "tree", "."]).success);
}
