use serde::{Deserialize, Serialize};
use std::collections::HashMap;

///scales the service to the requested replcia count.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct ScaleServiceRequest<'s> {
    #[serde(rename = "serviceName")]
    pub service_name: &'s str, // `json:"serviceName"`
    pub replicas: u64, //`json:"replicas"`
}

// FunctionStatus as returned by the provider for system/function/{name}
#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct FunctionStatus {
    // Name is the name of the function deployment
    #[serde(default)]
    pub name: String, //`json:"name"`

    // Image is a fully-qualified container image
    #[serde(default)]
    pub image: String, //`json:"image"`

    // Namespace for the function, if supported by the faas_provider
    #[serde(default)]
    pub namespace: String, //`json:"namespace,omitempty"`

    // Labels are metadata for functions which may be used by the
    // faas_provider or the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>, //`json:"labels,omitempty"`

    // Annotations are metadata for functions which may be used by the
    // faas_provider or the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<HashMap<String, String>>, //`json:"annotations,omitempty"`

    // Replicas desired within the cluster
    #[serde(default)]
    pub replicas: u64, //`json:"replicas,omitempty"`

    // AvailableReplicas is the count of replicas ready to receive
    // invocations as reported by the faas_provider
    #[serde(rename = "availableReplicas")]
    #[serde(default)]
    pub available_replicas: u64, //`json:"availableReplicas,omitempty"`
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_status_ignores_unknown_fields() {
        let body = r#"{
            "name": "echo",
            "image": "ghcr.io/openfaas/echo:latest",
            "replicas": 3,
            "availableReplicas": 2,
            "invocationCount": 12,
            "usage": {"cpu": 0.1, "totalMemoryBytes": 1024},
            "labels": {"com.openfaas.scale.min": "2"}
        }"#;
        let status: FunctionStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.name, "echo");
        assert_eq!(status.replicas, 3);
        assert_eq!(status.available_replicas, 2);
        assert!(status.annotations.is_none());
        assert_eq!(
            status.labels.unwrap().get("com.openfaas.scale.min"),
            Some(&"2".to_string())
        );
    }

    #[test]
    fn test_scale_request_wire_names() {
        let req = ScaleServiceRequest {
            service_name: "echo",
            replicas: 5,
        };
        let body = serde_json::to_string(&req).unwrap();
        assert_eq!(body, r#"{"serviceName":"echo","replicas":5}"#);
    }
}
