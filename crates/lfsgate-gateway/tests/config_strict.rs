#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use lfsgate_core::protocol::PermissionLevel;
use lfsgate_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
github:
  owner: "acme"
  repo: "assets"
  tokn: "typo should fail"
large_file_store:
  bucket_name: "acme-lfs"
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.fault_code().as_str(), "INTERNAL");
    assert!(err.to_string().contains("tokn"));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
github:
  owner: "acme"
  repo: "assets"
large_file_store:
  bucket_name: "acme-lfs"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8080");
    assert_eq!(cfg.github.api_url, "https://api.github.com/graphql");
    assert_eq!(cfg.github.timeout_ms, 10000);
    assert_eq!(cfg.access.minimum, PermissionLevel::Admin);

    let p = cfg.pipeline_config();
    assert_eq!(p.owner, "acme");
    assert_eq!(p.repo, "assets");
    assert_eq!(p.bucket, "acme-lfs");
    assert_eq!(p.policy.minimum, PermissionLevel::Admin);
}

#[test]
fn minimum_access_is_configurable() {
    let s = r#"
version: 1
github: { owner: "acme", repo: "assets" }
large_file_store: { bucket_name: "acme-lfs" }
access: { minimum: WRITE }
"#;
    let cfg = config::load_from_str(s).expect("must parse");
    assert_eq!(cfg.pipeline_config().policy.minimum, PermissionLevel::Write);
}

#[test]
fn unknown_permission_in_config_fails() {
    let s = r#"
version: 1
github: { owner: "acme", repo: "assets" }
large_file_store: { bucket_name: "acme-lfs" }
access: { minimum: OWNER }
"#;
    assert!(config::load_from_str(s).is_err());
}

#[test]
fn range_and_presence_checks() {
    let cases = [
        // wrong version
        "version: 2\ngithub: { owner: a, repo: b }\nlarge_file_store: { bucket_name: c }\n",
        // empty owner
        "version: 1\ngithub: { owner: '', repo: b }\nlarge_file_store: { bucket_name: c }\n",
        // empty bucket
        "version: 1\ngithub: { owner: a, repo: b }\nlarge_file_store: { bucket_name: ' ' }\n",
        // timeout out of range
        "version: 1\ngithub: { owner: a, repo: b, timeout_ms: 5 }\nlarge_file_store: { bucket_name: c }\n",
        // body limit out of range
        "version: 1\ngateway: { max_body_bytes: 10 }\ngithub: { owner: a, repo: b }\nlarge_file_store: { bucket_name: c }\n",
        // missing store section
        "version: 1\ngithub: { owner: a, repo: b }\n",
    ];
    for s in cases {
        assert!(config::load_from_str(s).is_err(), "should reject:\n{s}");
    }
}
