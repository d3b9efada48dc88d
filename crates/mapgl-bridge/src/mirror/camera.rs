//! Camera moves. Only `setCenter` is skipped when the map already sits at
//! the requested centre; every other setter always calls through.

use super::{decode_params, OperationDefinition};
use crate::embedded::MapContext;
use crate::error::BridgeError;
use mapgl_protocol::{
    CenterParams, FitBoundsParams, Function, PaddingParams, PitchParams, RotationParams,
    StyleZoomParams, ZoomParams,
};
use serde_json::Value;
use std::sync::Arc;

const SET_CENTER: &str = r#"
if (functionName === 'setCenter') {
    var center = map.getCenter();
    if (!center || center[0] !== params.center[0] || center[1] !== params.center[1]) {
        map.setCenter(params.center, params.options);
    }
}
"#;

const SET_ZOOM: &str = r#"
if (functionName === 'setZoom') {
    map.setZoom(params.zoom, params.options);
}
"#;

const SET_STYLE_ZOOM: &str = r#"
if (functionName === 'setStyleZoom') {
    map.setStyleZoom(params.styleZoom, params.options);
}
"#;

const SET_ROTATION: &str = r#"
if (functionName === 'setRotation') {
    map.setRotation(params.rotation, params.options);
}
"#;

const SET_PITCH: &str = r#"
if (functionName === 'setPitch') {
    map.setPitch(params.pitch, params.options);
}
"#;

const SET_PADDING: &str = r#"
if (functionName === 'setPadding') {
    map.setPadding(params.padding, params.options);
}
"#;

const FIT_BOUNDS: &str = r#"
if (functionName === 'fitBounds') {
    map.fitBounds(params.bounds, params.options);
}
"#;

fn set_center_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: CenterParams = decode_params(Function::SetCenter, params)?;
    if ctx.sdk.center() != Some(p.center) {
        ctx.sdk.set_center(p.center, p.options.as_ref())?;
    }
    Ok(())
}

fn set_zoom_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: ZoomParams = decode_params(Function::SetZoom, params)?;
    ctx.sdk.set_zoom(p.zoom, p.options.as_ref())?;
    Ok(())
}

fn set_style_zoom_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: StyleZoomParams = decode_params(Function::SetStyleZoom, params)?;
    ctx.sdk.set_style_zoom(p.style_zoom, p.options.as_ref())?;
    Ok(())
}

fn set_rotation_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: RotationParams = decode_params(Function::SetRotation, params)?;
    ctx.sdk.set_rotation(p.rotation, p.options.as_ref())?;
    Ok(())
}

fn set_pitch_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: PitchParams = decode_params(Function::SetPitch, params)?;
    ctx.sdk.set_pitch(p.pitch, p.options.as_ref())?;
    Ok(())
}

fn set_padding_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: PaddingParams = decode_params(Function::SetPadding, params)?;
    ctx.sdk.set_padding(&p.padding, p.options.as_ref())?;
    Ok(())
}

fn fit_bounds_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: FitBoundsParams = decode_params(Function::FitBounds, params)?;
    ctx.sdk.fit_bounds(&p.bounds, p.options.as_ref())?;
    Ok(())
}

pub fn operations() -> Vec<Arc<OperationDefinition>> {
    vec![
        Arc::new(OperationDefinition {
            function: Function::SetCenter,
            script: SET_CENTER,
            apply_fn: set_center_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetZoom,
            script: SET_ZOOM,
            apply_fn: set_zoom_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetStyleZoom,
            script: SET_STYLE_ZOOM,
            apply_fn: set_style_zoom_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetRotation,
            script: SET_ROTATION,
            apply_fn: set_rotation_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetPitch,
            script: SET_PITCH,
            apply_fn: set_pitch_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetPadding,
            script: SET_PADDING,
            apply_fn: set_padding_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::FitBounds,
            script: FIT_BOUNDS,
            apply_fn: fit_bounds_apply,
        }),
    ]
}
