//! Generation invokers - transports plugged into the chain executor

mod http_invoker;

pub use http_invoker::{EndpointBase, GenerationRequest, HttpEndpoint, HttpGenerationInvoker};
