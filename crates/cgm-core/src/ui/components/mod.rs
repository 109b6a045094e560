pub mod connection_status;
pub mod graph;
