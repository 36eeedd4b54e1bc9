pub mod data_synthesizer;
pub mod dataset_export;
pub mod regressor;
pub mod smartcore_regressor;
pub mod trainer;
