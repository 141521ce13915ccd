pub mod config_models;
pub mod vote_record_models;
