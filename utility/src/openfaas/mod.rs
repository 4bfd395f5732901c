pub mod faas_provider;
pub mod scaling;
