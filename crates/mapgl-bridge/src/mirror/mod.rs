//! The function mirror table.
//!
//! Every [`Function`] the host can send has exactly one
//! [`OperationDefinition`] here. Each definition carries the JS fragment the
//! generated page runs for it and the native `apply_fn` the
//! [`EmbeddedMapState`](crate::embedded::EmbeddedMapState) runs. Both
//! implementations live next to each other in the group modules.

pub mod camera;
pub mod constraints;
pub mod lifecycle;
pub mod objects;
pub mod style;
pub mod traffic;

use crate::embedded::MapContext;
use crate::error::BridgeError;
use mapgl_protocol::{Function, MapEventKind, ObjectKind, ProtocolError, DARK_STYLE_ID, LIGHT_STYLE_ID};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Native implementation of one operation; decodes its own params.
pub type ApplyFn = for<'a> fn(Value, &mut MapContext<'a>) -> Result<(), BridgeError>;

pub struct OperationDefinition {
    pub function: Function,
    /// JS run by the page when `functionName` matches.
    pub script: &'static str,
    pub apply_fn: ApplyFn,
}

pub type MirrorTable = HashMap<Function, Arc<OperationDefinition>>;

/// All operations, grouped the way the page lays them out.
pub fn all_operations() -> Vec<Arc<OperationDefinition>> {
    let mut ops = Vec::new();
    ops.extend(lifecycle::operations());
    ops.extend(camera::operations());
    ops.extend(constraints::operations());
    ops.extend(traffic::operations());
    ops.extend(style::operations());
    ops.extend(objects::operations());
    ops
}

pub fn mirror_table() -> MirrorTable {
    all_operations()
        .into_iter()
        .map(|op| (op.function, op))
        .collect()
}

/// Body of the page's command dispatcher: every fragment, in table order.
pub fn dispatch_script() -> String {
    let mut script = String::new();
    for op in all_operations() {
        script.push_str(op.script.trim());
        script.push('\n');
    }
    script
}

/// Declarations and helpers the fragments rely on.
pub fn runtime_prelude() -> String {
    let mut prelude = String::new();
    prelude.push_str("var map = null;\nvar currentStyleId = null;\n");
    for kind in ObjectKind::ALL {
        prelude.push_str(&format!("var {} = {{}};\n", kind.table_name()));
    }
    let events: Vec<&str> = MapEventKind::all().map(MapEventKind::name).collect();
    prelude.push_str(&format!(
        "var MAP_EVENTS = {};\n",
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    ));
    prelude.push_str(&format!(
        "var STYLE_ALIASES = {{ dark: '{DARK_STYLE_ID}', light: '{LIGHT_STYLE_ID}' }};\n"
    ));
    prelude.push_str(style::HELPERS.trim());
    prelude.push('\n');
    prelude.push_str(lifecycle::HELPERS.trim());
    prelude.push('\n');
    prelude.push_str(objects::HELPERS.trim());
    prelude.push('\n');
    prelude
}

/// Decodes the params of `function`, reporting failures against it.
pub(crate) fn decode_params<T: DeserializeOwned>(
    function: Function,
    params: Value,
) -> Result<T, BridgeError> {
    serde_json::from_value(params).map_err(|e| {
        BridgeError::Protocol(ProtocolError::InvalidParams {
            function: function.name().to_string(),
            reason: e.to_string(),
        })
    })
}
