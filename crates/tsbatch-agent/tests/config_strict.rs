#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tsbatch_agent::config::{self, SinkKind};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
flush:
  interval_sec: 60 # typo should fail
resource:
  cluster_name: "vdc"
  namespace_name: "default"
  location: "us-central1-a"
  container_name: "ci"
  pod_name: "ci"
sink:
  kind: log
  project_id: "hail-vdc"
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
resource:
  cluster_name: "vdc"
  namespace_name: "default"
  location: "us-central1-a"
  container_name: "ci"
  pod_name: "ci"
sink:
  kind: log
  project_id: "hail-vdc"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.flush.interval_secs, 60);
    assert_eq!(cfg.flush.metric_prefix, "custom.googleapis.com");
    assert!(cfg.flush.final_flush);
    assert_eq!(cfg.resource.resource_type, "k8s_container");
    assert_eq!(cfg.sink.kind, SinkKind::Log);

    let tag = cfg.resource.resource_tag().expect("identity");
    assert_eq!(tag.namespace_name(), "default");
}

#[test]
fn unsupported_version() {
    let bad = r#"
version: 2
resource: { cluster_name: a, namespace_name: b, location: c, container_name: d, pod_name: e }
sink: { kind: log, project_id: p }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn empty_identity_is_fatal() {
    let bad = r#"
version: 1
resource: { cluster_name: "", namespace_name: b, location: c, container_name: d, pod_name: e }
sink: { kind: log, project_id: p }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "MISCONFIGURED");
    assert!(err.to_string().contains("cluster_name"));
}

#[test]
fn interval_out_of_range() {
    let bad = r#"
version: 1
flush: { interval_secs: 0 }
resource: { cluster_name: a, namespace_name: b, location: c, container_name: d, pod_name: e }
sink: { kind: log, project_id: p }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "MISCONFIGURED");
}

#[test]
fn json_file_requires_path() {
    let bad = r#"
version: 1
resource: { cluster_name: a, namespace_name: b, location: c, container_name: d, pod_name: e }
sink: { kind: json_file, project_id: p }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "MISCONFIGURED");
}

#[test]
fn missing_file_is_config_error() {
    let err = config::load_from_file("/nonexistent/tsbatch.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}
