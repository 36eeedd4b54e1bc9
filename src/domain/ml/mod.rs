pub mod feature_registry;
pub mod linear_model;
