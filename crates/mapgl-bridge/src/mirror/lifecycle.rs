//! Map construction.

use super::{decode_params, OperationDefinition};
use crate::embedded::{MapContext, MAP_CONTAINER};
use crate::error::BridgeError;
use mapgl_protocol::{resolve_style_id, Event, Function, MapEventKind, MapOptions};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub(crate) const HELPERS: &str = r#"
function snapshot(e) {
    var data = e && typeof e === 'object' ? e : {};
    var center = map.getCenter();
    data.zoom = map.getZoom();
    data.rotation = map.getRotation();
    data.pitch = map.getPitch();
    data.center = center || null;
    data.styleZoom = map.getStyleZoom();
    data.latlng = center ? { lat: center[1], lng: center[0] } : null;
    return data;
}
"#;

const INIT: &str = r#"
if (functionName === 'init') {
    if (map) {
        throw new Error('map is already created');
    }
    if (params.style) {
        params.style = resolveStyleId(params.style);
    }
    map = new mapgl.Map('map', params);
    currentStyleId = params.style || null;
    MAP_EVENTS.forEach(function (eventName) {
        map.on(eventName, function (e) {
            postToHost({ type: 'mapEvent', event: eventName, data: snapshot(e) });
        });
    });
    postToHost({ type: 'inited' });
}
"#;

fn init_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    if ctx.runtime.map_created {
        return Err(BridgeError::MapAlreadyCreated);
    }
    let mut options: MapOptions = decode_params(Function::Init, params)?;
    if let Some(style) = options.style.take() {
        options.style = Some(resolve_style_id(&style).to_string());
    }
    ctx.sdk.create_map(MAP_CONTAINER, &options)?;
    ctx.runtime.map_created = true;
    ctx.runtime.current_style_id = options.style;
    for kind in MapEventKind::all() {
        ctx.sdk.subscribe(kind)?;
    }
    info!("map created");
    ctx.post(&Event::Inited);
    Ok(())
}

pub fn operations() -> Vec<Arc<OperationDefinition>> {
    vec![Arc::new(OperationDefinition {
        function: Function::Init,
        script: INIT,
        apply_fn: init_apply,
    })]
}
