pub mod client_wrapper;
pub mod clients;
pub mod config;
pub mod context;
pub mod event_stream;
pub mod orchestrator;
pub mod provider;
pub mod question_log;
pub mod search;
pub mod server;
pub mod transcript;
