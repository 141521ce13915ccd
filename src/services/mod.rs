pub mod events;
pub mod ingest;
pub mod query;
pub mod validator;
