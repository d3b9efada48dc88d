//! Style and language.

use super::{decode_params, OperationDefinition};
use crate::embedded::MapContext;
use crate::error::BridgeError;
use mapgl_protocol::{resolve_style_id, Function, LanguageParams, StyleIdParams, StyleUrlParams};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub(crate) const HELPERS: &str = r#"
function resolveStyleId(styleId) {
    return STYLE_ALIASES[styleId] || styleId;
}
"#;

const SET_STYLE_BY_ID: &str = r#"
if (functionName === 'setStyleById') {
    var styleId = resolveStyleId(params.styleId);
    if (styleId !== currentStyleId) {
        map.setStyleById(styleId);
        currentStyleId = styleId;
    }
}
"#;

const SET_STYLE_FROM_URL: &str = r#"
if (functionName === 'setStyleFromUrl') {
    map.setStyleFromUrl(params.styleUrl, params.options);
}
"#;

const SET_LANGUAGE: &str = r#"
if (functionName === 'setLanguage') {
    map.setLanguage(params.lang);
}
"#;

fn set_style_by_id_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: StyleIdParams = decode_params(Function::SetStyleById, params)?;
    let style_id = resolve_style_id(&p.style_id);
    if ctx.runtime.current_style_id.as_deref() == Some(style_id) {
        debug!(style_id, "style already applied");
        return Ok(());
    }
    ctx.sdk.set_style_by_id(style_id)?;
    ctx.runtime.current_style_id = Some(style_id.to_string());
    Ok(())
}

fn set_style_from_url_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: StyleUrlParams = decode_params(Function::SetStyleFromUrl, params)?;
    Ok(ctx.sdk.set_style_from_url(&p.style_url, &p.options)?)
}

fn set_language_apply(params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    let p: LanguageParams = decode_params(Function::SetLanguage, params)?;
    Ok(ctx.sdk.set_language(&p.lang)?)
}

pub fn operations() -> Vec<Arc<OperationDefinition>> {
    vec![
        Arc::new(OperationDefinition {
            function: Function::SetLanguage,
            script: SET_LANGUAGE,
            apply_fn: set_language_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetStyleById,
            script: SET_STYLE_BY_ID,
            apply_fn: set_style_by_id_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::SetStyleFromUrl,
            script: SET_STYLE_FROM_URL,
            apply_fn: set_style_from_url_apply,
        }),
    ]
}
