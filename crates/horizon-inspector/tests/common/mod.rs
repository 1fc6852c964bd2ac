//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{self, BoxFuture, FutureExt};
use parking_lot::Mutex;
use serde_json::json;

use horizon_inspector::prelude::*;

/// A fetcher backed by a table of canned server replies.
#[derive(Default)]
pub struct CannedServer {
    replies: Mutex<HashMap<ActorId, PropertiesPacket>>,
    calls: Mutex<Vec<ActorId>>,
}

impl CannedServer {
    pub fn answer(&self, actor: &str, properties: ObjectProperties) {
        self.answer_packet(actor, PropertiesPacket::new(actor, properties));
    }

    pub fn answer_packet(&self, actor: &str, packet: PropertiesPacket) {
        self.replies.lock().insert(actor.into(), packet);
    }

    pub fn calls_for(&self, actor: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|called| called.as_str() == actor)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }
}

impl PropertyFetcher for CannedServer {
    fn fetch_properties(
        &self,
        actor: &ActorId,
    ) -> BoxFuture<'static, Result<PropertiesPacket, FetchError>> {
        self.calls.lock().push(actor.clone());
        let reply = self
            .replies
            .lock()
            .get(actor)
            .cloned()
            .ok_or_else(|| FetchError::NoSuchActor(actor.clone()));
        future::ready(reply).boxed()
    }
}

/// A cache on a single-threaded runtime, talking to a [`CannedServer`].
pub struct Session {
    pub queue: InvocationQueue,
    pub server: Arc<CannedServer>,
    pub cache: PropertyCache,
}

impl Session {
    pub fn new() -> Self {
        let runtime = Arc::new(
            AsyncRuntime::new(AsyncRuntimeConfig::single_threaded()).expect("create runtime"),
        );
        let queue = InvocationQueue::new();
        let server = Arc::new(CannedServer::default());
        let cache = PropertyCache::new(server.clone(), runtime, queue.poster());
        Self {
            queue,
            server,
            cache,
        }
    }

    /// Apply `count` delivered fetch results.
    pub fn deliver(&self, count: usize) -> usize {
        self.queue.process_blocking(count, Duration::from_secs(5))
    }
}

/// Own data properties in the given order.
pub fn object(entries: &[(&str, Grip)]) -> ObjectProperties {
    ObjectProperties::with_own(
        entries
            .iter()
            .map(|(name, grip)| (name.to_string(), PropertyDescriptor::value(grip.clone())))
            .collect(),
    )
}

/// A lazily loaded object grip.
pub fn remote(actor: &str, class: &str) -> Grip {
    ObjectGrip::object(actor, class).into()
}

pub fn number(value: i64) -> Grip {
    json!(value).into()
}

pub fn string(value: &str) -> Grip {
    json!(value).into()
}
