//! The actor-keyed property cache.
//!
//! [`PropertyCache`] maps a remote object's [`ActorId`] to the properties the
//! server reported for it. It issues at most one fetch per actor: a second
//! `load` while the first is in flight (or after it finished) never reaches
//! the [`PropertyFetcher`] again.
//!
//! Fetches run on the [`AsyncRuntime`]; their results are posted back through
//! an [`InvocationPoster`] and applied when the UI thread drains its
//! invocation queue. Until then, lookups simply report the actor as absent.
//!
//! The cache is a cheap, cloneable handle. An engine and its host can hold the
//! same cache, so a fetch completing after the engine is gone still lands in
//! the cache the host kept.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use horizon_inspector_core::logging::{span_names, targets};
use horizon_inspector_core::{AsyncRuntime, InvocationPoster, Signal};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use super::grip::{ActorId, Grip, ObjectProperties, PropertiesPacket};
use super::node::{create_node, Node, NodeContents, PROTO_NAME};
use crate::client::PropertyFetcher;
use crate::error::FetchError;

/// Result of a [`PropertyCache::load`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Properties were already cached. Nothing was fetched.
    Cached,
    /// A fetch for this actor was issued earlier. Nothing was fetched.
    Pending,
    /// A new fetch was issued.
    Requested,
    /// The value has no actor, so there is nothing to fetch.
    NotLoadable,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<ActorId, Arc<ObjectProperties>>,
    /// Every actor a fetch was ever issued for, including failed ones.
    requested: HashSet<ActorId>,
}

/// Serializable copy of a cache's contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheSnapshot {
    entries: BTreeMap<ActorId, ObjectProperties>,
}

impl CacheSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, actor: &ActorId) -> Option<&ObjectProperties> {
        self.entries.get(actor)
    }
}

/// Shared, de-duplicating cache of fetched object properties.
#[derive(Clone)]
pub struct PropertyCache {
    state: Arc<RwLock<CacheState>>,
    loaded: Arc<Signal<ActorId>>,
    fetcher: Arc<dyn PropertyFetcher>,
    runtime: Arc<AsyncRuntime>,
    poster: InvocationPoster,
    fetch_timeout: Option<Duration>,
}

impl PropertyCache {
    /// Create an empty cache.
    ///
    /// Fetches run on `runtime` and their results are delivered through
    /// `poster`, whose queue must be drained by the thread that owns the
    /// inspector.
    pub fn new(
        fetcher: Arc<dyn PropertyFetcher>,
        runtime: Arc<AsyncRuntime>,
        poster: InvocationPoster,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            loaded: Arc::new(Signal::new()),
            fetcher,
            runtime,
            poster,
            fetch_timeout: None,
        }
    }

    /// Fail fetches that take longer than `timeout`.
    ///
    /// Requires a runtime with its time driver enabled.
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Emitted on the UI thread after properties for an actor are stored.
    pub fn loaded(&self) -> &Signal<ActorId> {
        &self.loaded
    }

    /// Look up cached properties. Never fetches.
    pub fn get(&self, actor: &ActorId) -> Option<Arc<ObjectProperties>> {
        self.state.read().entries.get(actor).cloned()
    }

    /// Whether a fetch was ever issued for `actor` (and not invalidated).
    pub fn is_requested(&self, actor: &ActorId) -> bool {
        self.state.read().requested.contains(actor)
    }

    /// Whether a fetch was issued for `actor` and has not stored anything yet.
    ///
    /// Stays true after a failed fetch until [`PropertyCache::invalidate`].
    pub fn is_pending(&self, actor: &ActorId) -> bool {
        let state = self.state.read();
        state.requested.contains(actor) && !state.entries.contains_key(actor)
    }

    /// Number of cached actors.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Fetch the properties of `grip`'s actor unless that already happened.
    pub fn load(&self, grip: &Grip) -> LoadOutcome {
        let Some(actor) = grip.actor().cloned() else {
            return LoadOutcome::NotLoadable;
        };

        {
            let mut state = self.state.write();
            if state.entries.contains_key(&actor) {
                return LoadOutcome::Cached;
            }
            if !state.requested.insert(actor.clone()) {
                tracing::trace!(target: targets::CACHE, actor = %actor, "fetch already in flight");
                return LoadOutcome::Pending;
            }
        }

        tracing::debug!(target: targets::CACHE, actor = %actor, "fetching properties");
        let span = tracing::debug_span!(target: targets::CACHE, span_names::FETCH, actor = %actor);
        let fetch = self.fetcher.fetch_properties(&actor);
        let fetch = match self.fetch_timeout {
            Some(limit) => async move {
                tokio::time::timeout(limit, fetch)
                    .await
                    .unwrap_or(Err(FetchError::Timeout(limit)))
            }
            .boxed(),
            None => fetch,
        };

        let state = self.state.clone();
        let loaded = self.loaded.clone();
        self.runtime
            .spawn_with_callback(fetch.instrument(span), &self.poster, move |result| {
                apply_fetch_result(&state, &loaded, &actor, result);
            });

        LoadOutcome::Requested
    }

    /// Store properties for `actor` directly, without fetching.
    ///
    /// Does not emit [`PropertyCache::loaded`].
    pub fn insert(&self, actor: ActorId, properties: ObjectProperties) {
        let mut state = self.state.write();
        state.requested.insert(actor.clone());
        state.entries.insert(actor, Arc::new(properties));
    }

    /// Drop the entry (or failed request marker) for `actor`, so that a later
    /// `load` fetches again. Returns true if anything was removed.
    pub fn invalidate(&self, actor: &ActorId) -> bool {
        let mut state = self.state.write();
        let had_entry = state.entries.remove(actor).is_some();
        let had_request = state.requested.remove(actor);
        if had_entry || had_request {
            tracing::debug!(target: targets::CACHE, actor = %actor, "invalidated cache entry");
        }
        had_entry || had_request
    }

    /// Derive the children of `node`.
    ///
    /// Containers return their known children verbatim. Object nodes return
    /// one child per own property, then safe getter values not shadowed by an
    /// own property, then a `__proto__` child for an object prototype. Nodes
    /// whose properties are not cached yet have no children.
    pub fn children(&self, node: &Node) -> Vec<Node> {
        match node.contents() {
            NodeContents::Children(children) => children.clone(),
            NodeContents::Value(grip) => match grip.actor().and_then(|actor| self.get(actor)) {
                Some(properties) => build_children(node, &properties),
                None => Vec::new(),
            },
        }
    }

    /// Copy the cached entries out for persistence.
    pub fn snapshot(&self) -> CacheSnapshot {
        let state = self.state.read();
        CacheSnapshot {
            entries: state
                .entries
                .iter()
                .map(|(actor, properties)| (actor.clone(), (**properties).clone()))
                .collect(),
        }
    }

    /// Load entries from a snapshot. Existing entries for the same actors are
    /// replaced. Returns the number of entries restored.
    pub fn restore(&self, snapshot: CacheSnapshot) -> usize {
        let count = snapshot.entries.len();
        let mut state = self.state.write();
        for (actor, properties) in snapshot.entries {
            state.requested.insert(actor.clone());
            state.entries.insert(actor, Arc::new(properties));
        }
        tracing::debug!(target: targets::CACHE, count, "restored cache snapshot");
        count
    }
}

impl std::fmt::Debug for PropertyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("PropertyCache")
            .field("entries", &state.entries.len())
            .field("requested", &state.requested.len())
            .field("fetch_timeout", &self.fetch_timeout)
            .finish_non_exhaustive()
    }
}

fn apply_fetch_result(
    state: &RwLock<CacheState>,
    loaded: &Signal<ActorId>,
    requested: &ActorId,
    result: Result<PropertiesPacket, FetchError>,
) {
    let packet = match result {
        Ok(packet) => packet,
        Err(err) => {
            tracing::warn!(target: targets::CACHE, actor = %requested, error = %err, "property fetch failed");
            return;
        }
    };

    match packet.from {
        None => {
            tracing::warn!(
                target: targets::CACHE,
                actor = %requested,
                "properties loaded without a reporting actor, dropping result"
            );
        }
        Some(ref from) if from != requested => {
            tracing::warn!(
                target: targets::CACHE,
                actor = %requested,
                from = %from,
                "properties reported by a different actor, dropping result"
            );
        }
        Some(from) => {
            let count = packet.properties.own_properties.len();
            state
                .write()
                .entries
                .insert(from.clone(), Arc::new(packet.properties));
            tracing::debug!(target: targets::CACHE, actor = %from, count, "properties loaded");
            loaded.emit(from);
        }
    }
}

fn build_children(parent: &Node, properties: &ObjectProperties) -> Vec<Node> {
    let mut children: Vec<Node> = properties
        .own_properties
        .iter()
        .map(|(name, descriptor)| {
            create_node(Some(name.to_string()), parent.child_path(name), Some(descriptor))
        })
        .collect();

    for (name, getter) in properties.safe_getter_values.iter() {
        if properties.own_properties.contains_key(name) {
            continue;
        }
        children.push(
            Node::value(
                Some(name.to_string()),
                parent.child_path(name),
                getter.getter_value.clone(),
            )
            .with_enumerable(getter.enumerable),
        );
    }

    if let Some(prototype) = &properties.prototype {
        if prototype.as_object().is_some_and(|object| object.kind == "object") {
            children.push(
                Node::value(
                    Some(PROTO_NAME.to_string()),
                    parent.child_path(PROTO_NAME),
                    prototype.clone(),
                )
                .with_enumerable(Some(false)),
            );
        }
    }

    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grip::{GetterSet, ObjectGrip, PropertyDescriptor, SafeGetterValue};
    use crate::testing::{props, Harness};
    use parking_lot::Mutex;
    use serde_json::json;

    fn object(actor: &str, length: u64) -> Grip {
        ObjectGrip::object(actor, "Object")
            .with_own_property_length(length)
            .into()
    }

    #[test]
    fn test_get_before_load_is_absent() {
        let harness = Harness::new();
        assert!(harness.cache.get(&"1".into()).is_none());
        assert!(harness.fetcher.calls().is_empty());
    }

    #[test]
    fn test_load_fetches_once() {
        let harness = Harness::new();
        harness.fetcher.reply("1", props(&[("a", json!(1).into())]));

        assert_eq!(harness.cache.load(&object("1", 1)), LoadOutcome::Requested);
        assert_eq!(harness.cache.load(&object("1", 1)), LoadOutcome::Pending);
        assert!(harness.cache.get(&"1".into()).is_none());
        assert!(harness.cache.is_pending(&"1".into()));

        assert_eq!(harness.settle(1), 1);
        assert!(harness.cache.get(&"1".into()).is_some());
        assert!(!harness.cache.is_pending(&"1".into()));
        assert_eq!(harness.cache.load(&object("1", 1)), LoadOutcome::Cached);
        assert_eq!(harness.fetcher.call_count("1"), 1);
    }

    #[test]
    fn test_load_without_actor() {
        let harness = Harness::new();
        assert_eq!(harness.cache.load(&json!(5).into()), LoadOutcome::NotLoadable);
        assert!(harness.fetcher.calls().is_empty());
    }

    #[test]
    fn test_loaded_signal() {
        let harness = Harness::new();
        harness.fetcher.reply("7", props(&[]));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        harness.cache.loaded().connect(move |actor: &ActorId| {
            seen_clone.lock().push(actor.clone());
        });

        harness.cache.load(&object("7", 1));
        harness.settle(1);
        assert_eq!(*seen.lock(), vec![ActorId::new("7")]);
    }

    #[test]
    fn test_mismatched_reply_is_dropped() {
        let harness = Harness::new();
        harness
            .fetcher
            .reply_packet("1", PropertiesPacket::new("2", props(&[("a", json!(1).into())])));

        harness.cache.load(&object("1", 1));
        harness.settle(1);

        assert!(harness.cache.get(&"1".into()).is_none());
        assert!(harness.cache.get(&"2".into()).is_none());
        assert_eq!(harness.cache.load(&object("1", 1)), LoadOutcome::Pending);
        assert_eq!(harness.fetcher.call_count("1"), 1);
    }

    #[test]
    fn test_reply_without_from_is_dropped() {
        let harness = Harness::new();
        harness.fetcher.reply_packet(
            "1",
            PropertiesPacket {
                from: None,
                properties: props(&[("a", json!(1).into())]),
            },
        );

        harness.cache.load(&object("1", 1));
        harness.settle(1);
        assert!(harness.cache.is_empty());
    }

    #[test]
    fn test_failed_fetch_needs_invalidate() {
        let harness = Harness::new();
        harness.cache.load(&object("9", 1));
        harness.settle(1);
        assert!(harness.cache.is_pending(&"9".into()));
        assert_eq!(harness.cache.load(&object("9", 1)), LoadOutcome::Pending);

        harness.fetcher.reply("9", props(&[]));
        assert!(harness.cache.invalidate(&"9".into()));
        assert_eq!(harness.cache.load(&object("9", 1)), LoadOutcome::Requested);
        harness.settle(1);
        assert!(harness.cache.get(&"9".into()).is_some());
        assert_eq!(harness.fetcher.call_count("9"), 2);
    }

    #[test]
    fn test_fetch_timeout() {
        let harness = Harness::new();
        harness.fetcher.hang("slow");
        let cache = harness
            .cache
            .clone()
            .with_fetch_timeout(Some(Duration::from_millis(20)));

        cache.load(&object("slow", 1));
        assert_eq!(harness.settle(1), 1);
        assert!(cache.get(&"slow".into()).is_none());
        assert!(cache.is_pending(&"slow".into()));
    }

    #[test]
    fn test_children_order() {
        let harness = Harness::new();
        let mut own = props(&[("b", json!(2).into()), ("a", json!(1).into())]);
        let mut getters = GetterSet::new();
        getters.insert(
            "a".to_string(),
            SafeGetterValue {
                getter_value: json!("shadowed").into(),
                getter_prototype_level: None,
                enumerable: Some(true),
                writable: None,
            },
        );
        getters.insert(
            "size".to_string(),
            SafeGetterValue {
                getter_value: json!(2).into(),
                getter_prototype_level: Some(1),
                enumerable: Some(false),
                writable: None,
            },
        );
        own.safe_getter_values = getters;
        own.prototype = Some(ObjectGrip::object("proto", "Object").into());
        harness.cache.insert("1".into(), own);

        let parent = Node::value(Some("x".into()), "x", object("1", 2));
        let children = harness.cache.children(&parent);
        let paths: Vec<&str> = children.iter().map(Node::path).collect();
        assert_eq!(paths, vec!["x/b", "x/a", "x/size", "x/__proto__"]);
        assert!(children[2].is_default_property());
        assert!(children[3].is_default_property());
        assert!(children[3].has_properties());
    }

    #[test]
    fn test_null_prototype_is_not_a_child() {
        let harness = Harness::new();
        let mut properties = props(&[("a", json!(1).into())]);
        properties.prototype = Some(Grip::null());
        harness.cache.insert("1".into(), properties);

        let parent = Node::value(None, "x", object("1", 1));
        assert_eq!(harness.cache.children(&parent).len(), 1);
    }

    #[test]
    fn test_children_of_container_and_unloaded() {
        let harness = Harness::new();
        let leaf = create_node(
            Some("n".into()),
            "scope/n",
            Some(&PropertyDescriptor::value(json!(1))),
        );
        let scope = Node::container(Some("scope".into()), "scope", vec![leaf.clone()]);
        assert_eq!(harness.cache.children(&scope), vec![leaf]);

        let unloaded = Node::value(None, "y", object("42", 3));
        assert!(harness.cache.children(&unloaded).is_empty());
    }

    #[test]
    fn test_snapshot_restore() {
        let harness = Harness::new();
        harness
            .cache
            .insert("1".into(), props(&[("a", json!(1).into())]));

        let json = serde_json::to_string(&harness.cache.snapshot()).unwrap();
        let snapshot: CacheSnapshot = serde_json::from_str(&json).unwrap();

        let other = Harness::new();
        assert_eq!(other.cache.restore(snapshot), 1);
        assert_eq!(other.cache.load(&object("1", 1)), LoadOutcome::Cached);
        assert!(other.fetcher.calls().is_empty());
    }
}
