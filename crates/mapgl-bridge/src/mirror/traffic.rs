//! Traffic layer toggles.

use super::OperationDefinition;
use crate::embedded::MapContext;
use crate::error::BridgeError;
use mapgl_protocol::Function;
use serde_json::Value;
use std::sync::Arc;

const SHOW_TRAFFIC: &str = r#"
if (functionName === 'showTraffic') {
    map.showTraffic();
}
"#;

const HIDE_TRAFFIC: &str = r#"
if (functionName === 'hideTraffic') {
    map.hideTraffic();
}
"#;

// Params are ignored; both commands carry `{}`.
fn show_traffic_apply(_params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    Ok(ctx.sdk.show_traffic()?)
}

fn hide_traffic_apply(_params: Value, ctx: &mut MapContext<'_>) -> Result<(), BridgeError> {
    Ok(ctx.sdk.hide_traffic()?)
}

pub fn operations() -> Vec<Arc<OperationDefinition>> {
    vec![
        Arc::new(OperationDefinition {
            function: Function::ShowTraffic,
            script: SHOW_TRAFFIC,
            apply_fn: show_traffic_apply,
        }),
        Arc::new(OperationDefinition {
            function: Function::HideTraffic,
            script: HIDE_TRAFFIC,
            apply_fn: hide_traffic_apply,
        }),
    ]
}
