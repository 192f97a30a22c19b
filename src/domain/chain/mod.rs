//! Provider chain execution - retrying, fallback and failure aggregation

mod attempt;
mod executor;
mod invoker;
mod retry;
mod shutdown;

pub use attempt::{AttemptRecord, ChainExecutionResult};
pub use executor::{ChainExecutor, ProviderStatus};
pub use invoker::{invoker_fn, FnInvoker, GenerationInvoker};
pub use retry::{retry, RetryOutcome, RetryPolicy};
pub use shutdown::{ShutdownController, ShutdownSignal};
