pub mod access_list;
pub mod aggregator_client;
pub mod initial_set;
pub mod justification_resolver;
pub mod message_extractor;
pub mod orchestrator;
pub mod ownership_resolver;
