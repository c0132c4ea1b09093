//! Ports (interfaces) implemented by the infrastructure layer

pub mod llm_gateway;
