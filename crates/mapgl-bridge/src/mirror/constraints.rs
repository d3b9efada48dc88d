//! Zoom and pitch limits, max bounds.

use super::{decode_params, OperationDefinition};
use crate::embedded::MapContext;
use crate::error::BridgeError;
use mapgl_protocol::{Function, MaxBoundsParams, PitchParams, ZoomLimitParams};
use serde_json::Value;
use std::sync::Arc;

const SET_MIN_ZOOM: &str = r#"
if (functionName === 'setMinZoom') {
    map.setMinZoom(params.zoom, params.options);
}
"#;

const SET_MAX_ZOOM: &str = r#"
if (functionName === 'setMaxZoom') {
    map.setMaxZoom(params.zoom, params.options);
}
"#;

const SET_MIN_PITCH: &str = r#"
if (functionName === 'setMinPitch') {
    map.setMinPitch(params.pitch, params.options);
}
"#;

const SET_MAX_PITCH: &str = r#"
if (functionName === 'setMaxPitch') {
    map.setMaxPitch(params.pitch, params.options);
}
"#;

const SET_LOW_ZOOM_MAX_PITCH: &str = r#"
if (functionName === 'setLowZoomMaxPitch') {
    map.setLowZoomMaxPitch(params.pitch, params.options);
}
"#;

const SET_MAX_BOUNDS: &str = r#"
if (functionName === 'setMaxBounds') {
    map.setMaxBounds(params.bounds);
}
"#;

fn set_min_zoom_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: ZoomLimitParams = decode_params(Function::SetMinZoom, params)?;
    Ok(ctx.sdk.set_min_zoom(p.zoom, p.options.as_ref())?)
}

fn set_max_zoom_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: ZoomLimitParams = decode_params(Function::SetMaxZoom, params)?;
    Ok(ctx.sdk.set_max_zoom(p.zoom, p.options.as_ref())?)
}

fn set_min_pitch_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: PitchParams = decode_params(Function::SetMinPitch, params)?;
    Ok(ctx.sdk.set_min_pitch(p.pitch, p.options.as_ref())?)
}

fn set_max_pitch_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: PitchParams = decode_params(Function::SetMaxPitch, params)?;
    Ok(ctx.sdk.set_max_pitch(p.pitch, p.options.as_ref())?)
}

fn set_low_zoom_max_pitch_apply(
    params: Value,
    ctx: &mut MapContext<'_>,
) -> Result<(), BridgeError> {
    let p: PitchParams = decode_params(Function::SetLowZoomMaxPitch, params)?;
    Ok(ctx.sdk.set_low_zoom_max_pitch(p.pitch, p.options.as_ref())?)
}

fn set_max_bounds_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: MaxBoundsParams = decode_params(Function::SetMaxBounds, params)?;
    Ok(ctx.sdk.set_max_bounds(&p.bounds)?)
}

pub fn operations() -> Vec<Arc<OperationDefinition>> {
    vec![
        Arc::new(OperationDefinition {
            function: Function::SetMinZoom,
            script: SET_MIN_ZOOM,
            apply_fn: set_min_zoom_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetMaxZoom,
            script: SET_MAX_ZOOM,
            apply_fn: set_max_zoom_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetMinPitch,
            script: SET_MIN_PITCH,
            apply_fn: set_min_pitch_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetMaxPitch,
            script: SET_MAX_PITCH,
            apply_fn: set_max_pitch_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetLowZoomMaxPitch,
            script: SET_LOW_ZOOM_MAX_PITCH,
            apply_fn: set_low_zoom_max_pitch_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetMaxBounds,
            script: SET_MAX_BOUNDS,
            apply_fn: set_max_bounds_apply,
        }),
    ]
}
