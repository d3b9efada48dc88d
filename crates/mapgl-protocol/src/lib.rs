//! Wire codec for the map bridge.
//!
//! # Overview
//!
//! The host and the embedded map page talk over an opaque string channel.
//! Host -> embedded traffic is a [`Command`], serialized as
//! `{"function": "<name>", "params": {...}}`; embedded -> host traffic is an
//! [`Event`], serialized as `{"type": "<kind>", ...}`. Both directions are
//! fire-and-forget. This crate only encodes and decodes; it holds no state.
//!
//! # Example
//!
//! ```
//! use mapgl_protocol::{Command, Event, ZoomParams};
//!
//! let cmd = Command::SetZoom(ZoomParams { zoom: 14.0, options: None });
//! assert_eq!(cmd.encode().unwrap(), r#"{"function":"setZoom","params":{"zoom":14.0}}"#);
//!
//! let ev = Event::decode(r#"{"type":"markerClick","uniqueId":"m1"}"#).unwrap();
//! assert_eq!(ev, Event::marker_click("m1"));
//! ```

pub mod command;
pub mod error;
pub mod event;
pub mod objects;
pub mod style;
pub mod types;

pub use command::{
    CenterParams, Command, EmptyParams, FitBoundsParams, Function, LanguageParams,
    MaxBoundsParams, PaddingParams, PitchParams, RawCommand, RotationParams, StyleIdParams,
    StyleUrlParams, StyleZoomParams, ZoomLimitParams, ZoomParams,
};
pub use error::ProtocolError;
pub use event::{ErrorData, Event, MapEventKind};
pub use objects::{
    HtmlMarkerOptions, LabelOptions, MarkerOptions, ObjectKind, ObjectOptions, ObjectParams,
    PolygonOptions, PolylineOptions, RemoveParams,
};
pub use style::{resolve_style_id, DARK_STYLE_ID, LIGHT_STYLE_ID};
pub use types::{
    AnimationOptions, FitBoundsOptions, LatLngLiteral, LngLat, LngLatBounds, MapOptions, Padding,
    PartialPadding, RotationAnimationOptions, StyleOptions, ZoomAnimationOptions, ZoomPanOptions,
};
