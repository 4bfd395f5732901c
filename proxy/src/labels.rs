use std::collections::HashMap;
use tracing::warn;
use utility::scaling::{
    is_valid_scaling_factor, ScalingDefaults, MAX_SCALE_LABEL, MIN_SCALE_LABEL,
    SCALING_FACTOR_LABEL,
};
use utility::{Error, Result};

/// extract_label_value parses the raw label value, falling back when it is
/// missing, empty, or not an unsigned integer. Bounds are the caller's concern.
pub fn extract_label_value(raw_label_value: Option<&str>, fallback: u64) -> u64 {
    let raw = match raw_label_value {
        Some(raw) if !raw.is_empty() => raw,
        _ => return fallback,
    };

    match raw.parse::<u64>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                label_value = raw,
                fallback, "provided label value should be of type uint"
            );
            fallback
        }
    }
}

/// resolve_scaling applies label overrides on top of the defaults and checks
/// the resulting scaling factor
pub(crate) fn resolve_scaling(
    labels: Option<&HashMap<String, String>>,
    defaults: &ScalingDefaults,
) -> Result<ScalingDefaults> {
    let mut scaling = *defaults;

    if let Some(labels) = labels {
        let label = |key: &str| labels.get(key).map(String::as_str);
        scaling.min_replicas = extract_label_value(label(MIN_SCALE_LABEL), scaling.min_replicas);
        scaling.max_replicas = extract_label_value(label(MAX_SCALE_LABEL), scaling.max_replicas);
        scaling.scaling_factor =
            extract_label_value(label(SCALING_FACTOR_LABEL), scaling.scaling_factor);
    }

    if !is_valid_scaling_factor(scaling.scaling_factor) {
        return Err(Error::BadScalingFactor(scaling.scaling_factor));
    }
    Ok(scaling)
}
