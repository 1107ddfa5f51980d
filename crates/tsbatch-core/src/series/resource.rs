use serde::Serialize;

use crate::error::{Result, TsBatchError};

/// Identity of the reporting source, attached verbatim to every record.
/// Construct once at startup; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceTag {
    resource_type: String,
    cluster_name: String,
    namespace_name: String,
    location: String,
    container_name: String,
    pod_name: String,
}

impl ResourceTag {
    /// Build a tag, rejecting any empty field.
    pub fn new(
        resource_type: impl Into<String>,
        cluster_name: impl Into<String>,
        namespace_name: impl Into<String>,
        location: impl Into<String>,
        container_name: impl Into<String>,
        pod_name: impl Into<String>,
    ) -> Result<Self> {
        let tag = Self {
            resource_type: resource_type.into(),
            cluster_name: cluster_name.into(),
            namespace_name: namespace_name.into(),
            location: location.into(),
            container_name: container_name.into(),
            pod_name: pod_name.into(),
        };

        if tag.resource_type.trim().is_empty() {
            return Err(TsBatchError::Misconfigured(
                "resource.resource_type must not be empty".into(),
            ));
        }
        for (key, value) in tag.labels() {
            if value.trim().is_empty() {
                return Err(TsBatchError::Misconfigured(format!(
                    "resource.{key} must not be empty"
                )));
            }
        }
        Ok(tag)
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn namespace_name(&self) -> &str {
        &self.namespace_name
    }

    /// Resource labels in a fixed order.
    pub fn labels(&self) -> [(&'static str, &str); 5] {
        [
            ("cluster_name", self.cluster_name.as_str()),
            ("namespace_name", self.namespace_name.as_str()),
            ("location", self.location.as_str()),
            ("container_name", self.container_name.as_str()),
            ("pod_name", self.pod_name.as_str()),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn tag(namespace: &str) -> Result<ResourceTag> {
        ResourceTag::new("k8s_container", "vdc", namespace, "us-central1-a", "ci", "ci")
    }

    #[test]
    fn labels_are_ordered() {
        let t = tag("default").unwrap();
        let keys: Vec<&str> = t.labels().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            ["cluster_name", "namespace_name", "location", "container_name", "pod_name"]
        );
        assert_eq!(t.namespace_name(), "default");
        assert_eq!(t.resource_type(), "k8s_container");
    }

    #[test]
    fn empty_label_is_misconfiguration() {
        let err = tag("  ").unwrap_err();
        assert_eq!(err.code(), ErrorCode::Misconfigured);
        assert!(err.to_string().contains("namespace_name"));
    }
}
