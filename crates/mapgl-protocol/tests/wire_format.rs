//! Wire-shape checks for commands and events as the embedded page sees them.

use mapgl_protocol::{
    Command, Event, FitBoundsOptions, FitBoundsParams, Function, LabelOptions, LngLatBounds,
    MapEventKind, MapOptions, MarkerOptions, ObjectParams, PartialPadding, PolygonOptions,
    ProtocolError, RawCommand, StyleIdParams, StyleUrlParams,
};
use serde_json::{json, Value};

fn wire(cmd: &Command) -> Value {
    serde_json::from_str(&cmd.encode().unwrap()).unwrap()
}

#[test]
fn init_renames_api_key_to_key() {
    let opts: MapOptions = serde_json::from_value(json!({
        "apiKey": "secret",
        "center": [37.62, 55.75],
        "zoom": 13,
    }))
    .unwrap();
    assert_eq!(
        wire(&Command::Init(opts)),
        json!({
            "function": "init",
            "params": {"key": "secret", "center": [37.62, 55.75], "zoom": 13.0}
        })
    );
}

#[test]
fn add_marker_spreads_props_into_params() {
    let mut options = MarkerOptions::at([37.0, 55.0]);
    options.icon = Some("https://example.org/pin.svg".to_string());
    options.z_index = Some(10.0);
    let cmd = Command::AddMarker(ObjectParams {
        unique_id: "pin".to_string(),
        options,
        ignore_auto_fit: true,
    });
    assert_eq!(
        wire(&cmd),
        json!({
            "function": "addMarker",
            "params": {
                "uniqueId": "pin",
                "options": {
                    "coordinates": [37.0, 55.0],
                    "icon": "https://example.org/pin.svg",
                    "zIndex": 10.0
                },
                "ignoreAutoFit": true
            }
        })
    );
}

#[test]
fn add_label_keeps_unknown_sdk_options() {
    let raw = json!({
        "function": "addLabel",
        "params": {
            "uniqueId": "l1",
            "options": {"coordinates": [1.0, 2.0], "text": "hi", "haloRadius": 2}
        }
    });
    let cmd = Command::decode(&raw.to_string()).unwrap();
    match &cmd {
        Command::AddLabel(p) => {
            assert_eq!(p.options.text, "hi");
            assert_eq!(p.options.extra.get("haloRadius"), Some(&json!(2)));
        }
        other => panic!("unexpected command {other:?}"),
    }
    assert_eq!(wire(&cmd), raw);
}

#[test]
fn fit_bounds_shape() {
    let cmd = Command::FitBounds(FitBoundsParams {
        bounds: LngLatBounds {
            south_west: [10.0, 5.0],
            north_east: [30.0, 20.0],
        },
        options: Some(FitBoundsOptions {
            padding: Some(PartialPadding {
                top: Some(100.0),
                right: Some(100.0),
                bottom: Some(100.0),
                left: Some(100.0),
            }),
            ..Default::default()
        }),
    });
    assert_eq!(
        wire(&cmd),
        json!({
            "function": "fitBounds",
            "params": {
                "bounds": {"southWest": [10.0, 5.0], "northEast": [30.0, 20.0]},
                "options": {"padding": {"top": 100.0, "right": 100.0, "bottom": 100.0, "left": 100.0}}
            }
        })
    );
}

#[test]
fn style_commands_use_camel_case_params() {
    assert_eq!(
        wire(&Command::SetStyleById(StyleIdParams {
            style_id: "abc".to_string()
        })),
        json!({"function": "setStyleById", "params": {"styleId": "abc"}})
    );
    assert_eq!(
        wire(&Command::SetStyleFromUrl(StyleUrlParams {
            style_url: "https://example.org/style.json".to_string(),
            options: Default::default(),
        })),
        json!({
            "function": "setStyleFromUrl",
            "params": {"styleUrl": "https://example.org/style.json", "options": {}}
        })
    );
}

#[test]
fn every_command_decodes_back_to_its_function() {
    let samples = vec![
        json!({"function": "setCenter", "params": {"center": [1, 2]}}),
        json!({"function": "setZoom", "params": {"zoom": 3, "options": {"duration": 10, "useHeightForAnimation": true}}}),
        json!({"function": "setStyleZoom", "params": {"styleZoom": 3}}),
        json!({"function": "setRotation", "params": {"rotation": 45, "options": {"normalize": true}}}),
        json!({"function": "setPitch", "params": {"pitch": 10}}),
        json!({"function": "setMinZoom", "params": {"zoom": 2}}),
        json!({"function": "setMaxZoom", "params": {"zoom": 18}}),
        json!({"function": "setMinPitch", "params": {"pitch": 0}}),
        json!({"function": "setMaxPitch", "params": {"pitch": 60}}),
        json!({"function": "setLowZoomMaxPitch", "params": {"pitch": 30}}),
        json!({"function": "showTraffic", "params": {}}),
        json!({"function": "hideTraffic", "params": {}}),
        json!({"function": "setLanguage", "params": {"lang": "en"}}),
        json!({"function": "setMaxBounds", "params": {"bounds": {"southWest": [0, 0], "northEast": [1, 1]}}}),
        json!({"function": "setPadding", "params": {"padding": {"top": 5}}}),
        json!({"function": "removeMarker", "params": {"uniqueId": "a", "options": {"coordinates": [1, 2]}}}),
        json!({"function": "addPolyline", "params": {"uniqueId": "p", "options": {"coordinates": [[1, 2], [3, 4]]}}}),
        json!({"function": "addPolygon", "params": {"uniqueId": "g", "options": {"coordinates": [[[1, 2], [3, 4], [5, 6]]]}}}),
        json!({"function": "addHtmlMarker", "params": {"uniqueId": "h", "options": {"coordinates": [1, 2], "html": "<b>x</b>"}}}),
    ];
    for sample in samples {
        let name = sample["function"].as_str().unwrap().to_string();
        let cmd = Command::decode(&sample.to_string())
            .unwrap_or_else(|e| panic!("decode {name} failed: {e}"));
        assert_eq!(cmd.function().name(), name);
    }
}

#[test]
fn raw_command_exposes_target_before_typed_decode() {
    let raw = RawCommand::parse(r#"{"function":"addPolygon","params":{"uniqueId":"x"}}"#).unwrap();
    assert_eq!(raw.function, "addPolygon");
    match raw.into_command() {
        Err(ProtocolError::InvalidParams { function, .. }) => {
            assert_eq!(function, Function::AddPolygon.name())
        }
        other => panic!("expected invalid params, got {other:?}"),
    }
}

#[test]
fn polygon_options_require_rings() {
    let opts: Result<PolygonOptions, _> =
        serde_json::from_value(json!({"coordinates": [[1, 2], [3, 4]]}));
    assert!(opts.is_err());
    let label: LabelOptions =
        serde_json::from_value(json!({"coordinates": [1, 2], "text": "t", "interactive": false}))
            .unwrap();
    assert_eq!(label.interactive, Some(false));
}

#[test]
fn map_event_round_trips_with_payload() {
    let mut data = serde_json::Map::new();
    data.insert("isUser".to_string(), json!(true));
    let ev = Event::map_event(MapEventKind::ZoomEnd, data);
    let text = ev.encode().unwrap();
    assert_eq!(text, r#"{"type":"mapEvent","event":"zoomend","data":{"isUser":true}}"#);
    assert_eq!(Event::decode(&text).unwrap(), ev);
}
