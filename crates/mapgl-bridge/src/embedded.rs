//! Embedded-side executor.
//!
//! [`EmbeddedMapState`] owns the SDK adapter and the live object tables. It
//! looks every inbound command up in the mirror table and runs the matching
//! `apply_fn`. A failing command is reported back to the host as an `error`
//! event and never stops the executor.

use crate::channel::MessageSink;
use crate::error::BridgeError;
use crate::mirror::{self, MirrorTable};
use crate::sdk::{MapSdk, ObjectHandle};
use indexmap::IndexMap;
use mapgl_protocol::{Event, Function, MapEventKind, ObjectKind, ProtocolError, RawCommand};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Id of the element the map is created in.
pub const MAP_CONTAINER: &str = "map";

/// Live SDK objects, one table per kind, keyed by `uniqueId`.
#[derive(Debug, Default)]
pub struct ObjectTables {
    tables: HashMap<ObjectKind, IndexMap<String, ObjectHandle>>,
}

impl ObjectTables {
    pub fn get(&self, kind: ObjectKind, unique_id: &str) -> Option<ObjectHandle> {
        self.tables.get(&kind)?.get(unique_id).copied()
    }

    pub fn insert(
        &mut self,
        kind: ObjectKind,
        unique_id: String,
        handle: ObjectHandle,
    ) -> Option<ObjectHandle> {
        self.tables.entry(kind).or_default().insert(unique_id, handle)
    }

    pub fn take(&mut self, kind: ObjectKind, unique_id: &str) -> Option<ObjectHandle> {
        self.tables.get_mut(&kind)?.shift_remove(unique_id)
    }

    /// Ids of live objects of `kind`, in insertion order.
    pub fn ids(&self, kind: ObjectKind) -> Vec<&str> {
        self.tables
            .get(&kind)
            .map(|t| t.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn len(&self, kind: ObjectKind) -> usize {
        self.tables.get(&kind).map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(IndexMap::is_empty)
    }
}

/// Everything the embedded page keeps between commands.
#[derive(Debug, Default)]
pub struct MapRuntime {
    pub map_created: bool,
    /// Last style id applied, used to skip redundant `setStyleById` calls.
    pub current_style_id: Option<String>,
    pub objects: ObjectTables,
}

/// What an `apply_fn` gets to work with.
pub struct MapContext<'a> {
    pub sdk: &'a mut dyn MapSdk,
    pub channel: &'a mut dyn MessageSink,
    pub runtime: &'a mut MapRuntime,
}

impl MapContext<'_> {
    pub fn post(&mut self, event: &Event) {
        post(self.channel, event);
    }

    /// Destroys and forgets the live object, if any. Returns whether one existed.
    ///
    /// The table entry is dropped only once the SDK has destroyed the object,
    /// so a failed destroy leaves it reachable for a later remove.
    pub fn destroy_object(&mut self, kind: ObjectKind, unique_id: &str) -> Result<bool, BridgeError> {
        let Some(handle) = self.runtime.objects.get(kind, unique_id) else {
            return Ok(false);
        };
        self.sdk.destroy_object(handle)?;
        self.runtime.objects.take(kind, unique_id);
        Ok(true)
    }
}

fn post(channel: &mut dyn MessageSink, event: &Event) {
    match event.encode() {
        Ok(message) => channel.send(message),
        Err(e) => warn!(error = %e, "failed to encode event"),
    }
}

pub struct EmbeddedMapState<S, C> {
    sdk: S,
    channel: C,
    runtime: MapRuntime,
    table: MirrorTable,
}

impl<S: MapSdk, C: MessageSink> EmbeddedMapState<S, C> {
    pub fn new(sdk: S, channel: C) -> Self {
        EmbeddedMapState {
            sdk,
            channel,
            runtime: MapRuntime::default(),
            table: mirror::mirror_table(),
        }
    }

    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    pub fn sdk_mut(&mut self) -> &mut S {
        &mut self.sdk
    }

    pub fn runtime(&self) -> &MapRuntime {
        &self.runtime
    }

    /// Handles one message from the host.
    ///
    /// Text that is not a command envelope is dropped. Anything else that
    /// goes wrong (unknown function, bad params, no map yet, SDK failure) is
    /// posted as `{"type":"error","data":{"target":<function>,...}}`.
    pub fn receive(&mut self, message: &str) {
        let RawCommand { function, params } = match RawCommand::parse(message) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(error = %e, "dropping malformed command");
                return;
            }
        };
        if let Err(e) = self.execute(&function, params) {
            debug!(%function, error = %e, "command failed");
            post(&mut self.channel, &Event::error(function, e.to_string()));
        }
    }

    fn execute(&mut self, name: &str, params: Value) -> Result<(), BridgeError> {
        let definition = Function::from_name(name)
            .and_then(|function| self.table.get(&function))
            .ok_or_else(|| ProtocolError::UnknownFunction(name.to_string()))?;
        if definition.function != Function::Init && !self.runtime.map_created {
            return Err(BridgeError::MapNotCreated(definition.function));
        }
        let mut ctx = MapContext {
            sdk: &mut self.sdk,
            channel: &mut self.channel,
            runtime: &mut self.runtime,
        };
        (definition.apply_fn)(params, &mut ctx)
    }

    /// Forwards an SDK map event, augmented with a camera snapshot.
    ///
    /// A non-object payload is replaced by an empty object before the
    /// snapshot fields are added.
    pub fn emit_map_event(&mut self, kind: MapEventKind, payload: Value) {
        if !self.runtime.map_created {
            debug!(event = %kind, "map event before map creation");
            return;
        }
        let mut data = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let center = self.sdk.center();
        data.insert("zoom".to_string(), json!(self.sdk.zoom()));
        data.insert("rotation".to_string(), json!(self.sdk.rotation()));
        data.insert("pitch".to_string(), json!(self.sdk.pitch()));
        data.insert("center".to_string(), center.map_or(Value::Null, |c| json!(c)));
        data.insert("styleZoom".to_string(), json!(self.sdk.style_zoom()));
        data.insert(
            "latlng".to_string(),
            center.map_or(Value::Null, |[lng, lat]| json!({"lat": lat, "lng": lng})),
        );
        post(&mut self.channel, &Event::map_event(kind, data));
    }

    /// Reports a click on a watched object.
    pub fn object_clicked(&mut self, unique_id: &str) {
        post(&mut self.channel, &Event::marker_click(unique_id));
    }
}
