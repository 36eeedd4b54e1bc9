// Dataset synthesis, regression backends and training
pub mod ml;

// Price suggestions on top of a trained model
pub mod pricing;
