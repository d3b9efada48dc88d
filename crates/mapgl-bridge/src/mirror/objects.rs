//! Declarative objects: one add/remove pair per kind.
//!
//! An add always replaces: the live object with the same `uniqueId` is
//! destroyed before the new one is created. Removing an unknown id is a
//! no-op.

use super::{decode_params, OperationDefinition};
use crate::embedded::MapContext;
use crate::error::BridgeError;
use mapgl_protocol::{
    HtmlMarkerOptions, LabelOptions, MarkerOptions, ObjectOptions, ObjectParams, PolygonOptions,
    PolylineOptions, RemoveParams,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

pub(crate) const HELPERS: &str = r#"
function destroyObject(table, uniqueId) {
    if (table[uniqueId]) {
        table[uniqueId].destroy();
        delete table[uniqueId];
    }
}
function replaceObject(table, params, Ctor, clickable) {
    destroyObject(table, params.uniqueId);
    var object = new Ctor(map, params.options);
    table[params.uniqueId] = object;
    if (clickable) {
        object.on('click', function () {
            postToHost({ type: 'markerClick', uniqueId: params.uniqueId });
        });
    }
}
"#;

const ADD_MARKER: &str = r#"
if (functionName === 'addMarker') {
    replaceObject(markers, params, mapgl.Marker, true);
}
"#;

const REMOVE_MARKER: &str = r#"
if (functionName === 'removeMarker') {
    destroyObject(markers, params.uniqueId);
}
"#;

const ADD_LABEL: &str = r#"
if (functionName === 'addLabel') {
    replaceObject(labels, params, mapgl.Label, true);
}
"#;

const REMOVE_LABEL: &str = r#"
if (functionName === 'removeLabel') {
    destroyObject(labels, params.uniqueId);
}
"#;

const ADD_POLYLINE: &str = r#"
if (functionName === 'addPolyline') {
    replaceObject(polylines, params, mapgl.Polyline, false);
}
"#;

const REMOVE_POLYLINE: &str = r#"
if (functionName === 'removePolyline') {
    destroyObject(polylines, params.uniqueId);
}
"#;

const ADD_POLYGON: &str = r#"
if (functionName === 'addPolygon') {
    replaceObject(polygons, params, mapgl.Polygon, false);
}
"#;

const REMOVE_POLYGON: &str = r#"
if (functionName === 'removePolygon') {
    destroyObject(polygons, params.uniqueId);
}
"#;

const ADD_HTML_MARKER: &str = r#"
if (functionName === 'addHtmlMarker') {
    replaceObject(htmlMarkers, params, mapgl.HtmlMarker, false);
}
"#;

const REMOVE_HTML_MARKER: &str = r#"
if (functionName === 'removeHtmlMarker') {
    destroyObject(htmlMarkers, params.uniqueId);
}
"#;

fn add_apply<O: ObjectOptions>(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let kind = O::KIND;
    let ObjectParams {
        unique_id, options, ..
    }: ObjectParams<O> = decode_params(kind.add_function(), params)?;
    if ctx.destroy_object(kind, &unique_id)? {
        trace!(%kind, %unique_id, "replacing live object");
    }
    let handle = ctx.sdk.create_object(kind, &serde_json::to_value(&options)?)?;
    ctx.runtime.objects.insert(kind, unique_id.clone(), handle);
    if kind.supports_press() {
        ctx.sdk.watch_clicks(handle, &unique_id)?;
    }
    Ok(())
}

fn remove_apply<O: ObjectOptions>(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let kind = O::KIND;
    let p: RemoveParams = decode_params(kind.remove_function(), params)?;
    ctx.destroy_object(kind, &p.unique_id)?;
    Ok(())
}

fn pair<O: ObjectOptions>(
    add_script: &'static str,
    remove_script: &'static str,
) -> [Arc<OperationDefinition>; 2] {
    [
        Arc::new(OperationDefinition {
            function: O::KIND.add_function(),
            script: add_script,
            apply_fn: add_apply::<O>,
        }),
        Arc::new(OperationDefinition {
            function: O::KIND.remove_function(),
            script: remove_script,
            apply_fn: remove_apply::<O>,
        }),
    ]
}

pub fn operations() -> Vec<Arc<OperationDefinition>> {
    let mut ops = Vec::new();
    ops.extend(pair::<MarkerOptions>(ADD_MARKER, REMOVE_MARKER));
    ops.extend(pair::<LabelOptions>(ADD_LABEL, REMOVE_LABEL));
    ops.extend(pair::<PolylineOptions>(ADD_POLYLINE, REMOVE_POLYLINE));
    ops.extend(pair::<PolygonOptions>(ADD_POLYGON, REMOVE_POLYGON));
    ops.extend(pair::<HtmlMarkerOptions>(ADD_HTML_MARKER, REMOVE_HTML_MARKER));
    ops
}
