//! The remote property fetch seam.
//!
//! The inspector does not speak any wire protocol itself. Hosts implement
//! [`PropertyFetcher`] on top of their debugging client; the property cache
//! calls it at most once per actor and runs the returned future on the
//! inspector's async runtime.
//!
//! # Example
//!
//! ```
//! use futures_util::future::{BoxFuture, FutureExt};
//! use horizon_inspector::client::PropertyFetcher;
//! use horizon_inspector::model::{ActorId, ObjectProperties, PropertiesPacket};
//! use horizon_inspector::FetchError;
//!
//! struct EmptyObjects;
//!
//! impl PropertyFetcher for EmptyObjects {
//!     fn fetch_properties(
//!         &self,
//!         actor: &ActorId,
//!     ) -> BoxFuture<'static, Result<PropertiesPacket, FetchError>> {
//!         let actor = actor.clone();
//!         async move { Ok(PropertiesPacket::new(actor, ObjectProperties::default())) }.boxed()
//!     }
//! }
//! ```

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::error::FetchError;
use crate::model::{ActorId, PropertiesPacket};

/// Fetches the properties of a remote object.
pub trait PropertyFetcher: Send + Sync {
    /// Request the properties of `actor`.
    ///
    /// The reply's `from` field must name `actor`; replies that do not are
    /// discarded by the cache.
    fn fetch_properties(
        &self,
        actor: &ActorId,
    ) -> BoxFuture<'static, Result<PropertiesPacket, FetchError>>;
}

impl<T: PropertyFetcher + ?Sized> PropertyFetcher for Arc<T> {
    fn fetch_properties(
        &self,
        actor: &ActorId,
    ) -> BoxFuture<'static, Result<PropertiesPacket, FetchError>> {
        (**self).fetch_properties(actor)
    }
}
