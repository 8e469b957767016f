//! MessagePusher trait.
//!
//! Delivery of payloads to connections. The use cases only hand payloads to
//! this trait; how they reach the socket is up to the infrastructure layer.

use async_trait::async_trait;

use super::{ConnectionHandle, MessagePushError, Payload};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Deliver a payload to a single connection
    async fn push_to(
        &self,
        target: &ConnectionHandle,
        payload: &Payload,
    ) -> Result<(), MessagePushError>;

    /// Deliver a payload to every target.
    ///
    /// A failure for one target must not stop delivery to the others.
    /// Returns the number of targets the payload was handed to.
    async fn broadcast(&self, targets: &[ConnectionHandle], payload: &Payload) -> usize;
}
