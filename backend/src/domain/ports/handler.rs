//! Driving port shared by every use case: the command/query dispatch contract.
//!
//! A [`Handler<Req, Res>`] accepts one request value and yields either a
//! result or a domain [`Error`]. Registration, login and the expense use cases
//! all implement this one shape, so inbound adapters hold
//! `Arc<dyn Handler<Req, Res>>` and never name a concrete service type.
//!
//! Implementations must be reentrant: any shared mutable state belongs to the
//! injected collaborators, not to the handler.

use async_trait::async_trait;

use crate::domain::Error;

/// Use-case port parameterised by its request and result types.
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use finance_backend::domain::Error;
/// use finance_backend::domain::ports::Handler;
///
/// struct Echo;
///
/// #[async_trait]
/// impl Handler<String, String> for Echo {
///     async fn handle(&self, request: String) -> Result<String, Error> {
///         Ok(request)
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let handler: &dyn Handler<String, String> = &Echo;
/// assert_eq!(handler.handle("hi".to_owned()).await.unwrap(), "hi");
/// # });
/// ```
#[async_trait]
pub trait Handler<Req, Res>: Send + Sync
where
    Req: Send + 'static,
{
    /// Execute the use case for one request.
    async fn handle(&self, request: Req) -> Result<Res, Error>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ErrorCode;

    struct Reject;

    #[async_trait]
    impl Handler<u32, u32> for Reject {
        async fn handle(&self, request: u32) -> Result<u32, Error> {
            Err(Error::not_found(format!("nothing for {request}")))
        }
    }

    #[tokio::test]
    async fn trait_objects_dispatch_to_implementation() {
        let handler: Arc<dyn Handler<u32, u32>> = Arc::new(Reject);
        let err = handler.handle(7).await.expect_err("handler rejects");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "nothing for 7");
    }
}
