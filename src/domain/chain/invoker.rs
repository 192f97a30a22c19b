//! Generation invoker seam - the vendor-specific call supplied by the caller

use std::fmt;
use std::future::Future;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Performs one attempt against one provider.
///
/// The chain engine treats implementations as opaque: only success or
/// failure of each call matters.
#[async_trait]
pub trait GenerationInvoker<Req, T>: Send + Sync
where
    Req: Send + Sync,
    T: Send,
{
    async fn invoke(&self, provider: &str, request: &Req) -> Result<T, DomainError>;
}

/// Invoker backed by a closure taking the provider name and an owned request
pub struct FnInvoker<F> {
    f: F,
}

/// Wrap a closure as a [`GenerationInvoker`]
pub fn invoker_fn<F>(f: F) -> FnInvoker<F> {
    FnInvoker { f }
}

impl<F> fmt::Debug for FnInvoker<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnInvoker").finish_non_exhaustive()
    }
}

#[async_trait]
impl<Req, T, F, Fut> GenerationInvoker<Req, T> for FnInvoker<F>
where
    Req: Clone + Send + Sync,
    T: Send,
    F: Fn(String, Req) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, DomainError>> + Send + 'static,
{
    async fn invoke(&self, provider: &str, request: &Req) -> Result<T, DomainError> {
        (self.f)(provider.to_string(), request.clone()).await
    }
}
