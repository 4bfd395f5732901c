use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

///MIN_SCALE_LABEL label indicating min scale for a function
pub const MIN_SCALE_LABEL: &str = "com.openfaas.scale.min";
///MAX_SCALE_LABEL label indicating max scale for a function
pub const MAX_SCALE_LABEL: &str = "com.openfaas.scale.max";
///SCALING_FACTOR_LABEL label indicating the scaling factor (percentage) for a function
pub const SCALING_FACTOR_LABEL: &str = "com.openfaas.scale.factor";

///DEFAULT_MIN_REPLICAS is the minimal amount of replicas for a service.
pub const DEFAULT_MIN_REPLICAS: u64 = 1;
///DEFAULT_MAX_REPLICAS is the amount of replicas a service will auto-scale up to.
pub const DEFAULT_MAX_REPLICAS: u64 = 5;
///DEFAULT_SCALING_FACTOR is the defining proportion for the scaling increments.
pub const DEFAULT_SCALING_FACTOR: u64 = 10;

/// scaling factor is a percentage, zero would never scale
pub fn is_valid_scaling_factor(value: u64) -> bool {
    value > 0 && value <= 100
}

/// ScalingDefaults are applied when a function carries no scaling labels
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(default)]
pub struct ScalingDefaults {
    pub min_replicas: u64,
    pub max_replicas: u64,
    pub scaling_factor: u64,
}

impl Default for ScalingDefaults {
    fn default() -> Self {
        ScalingDefaults {
            min_replicas: DEFAULT_MIN_REPLICAS,
            max_replicas: DEFAULT_MAX_REPLICAS,
            scaling_factor: DEFAULT_SCALING_FACTOR,
        }
    }
}

impl ScalingDefaults {
    /// the default scaling factor has to satisfy the same bound as a label would
    pub fn validate(&self) -> Result<()> {
        if is_valid_scaling_factor(self.scaling_factor) {
            Ok(())
        } else {
            Err(Error::BadScalingFactor(self.scaling_factor))
        }
    }
}

/// ServiceQueryResponse response from querying a function status
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Default, Clone)]
pub struct ServiceQueryResponse {
    pub replicas: u64, //`json:"replicas"`
    #[serde(rename = "maxReplicas")]
    pub max_replicas: u64, //`json:"maxReplicas"`
    #[serde(rename = "minReplicas")]
    pub min_replicas: u64, //`json:"minReplicas"`
    #[serde(rename = "scalingFactor")]
    pub scaling_factor: u64, //`json:"scalingFactor"`
    #[serde(rename = "availableReplicas")]
    pub available_replicas: u64, //`json:"availableReplicas"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<HashMap<String, String>>, //`json:"annotations,omitempty"`
}
