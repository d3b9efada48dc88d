//! The map SDK as seen from the embedded side.
//!
//! The executor in [`crate::embedded`] drives the SDK only through this
//! trait; an adapter over the real SDK (or a test double) implements it.

use crate::error::SdkError;
use mapgl_protocol::{
    AnimationOptions, FitBoundsOptions, LngLat, LngLatBounds, MapEventKind, MapOptions,
    ObjectKind, PartialPadding, RotationAnimationOptions, StyleOptions, ZoomAnimationOptions,
};
use serde_json::Value;

/// Opaque handle of an SDK object, allocated by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u64);

pub trait MapSdk {
    /// Constructs the map inside `container`.
    fn create_map(&mut self, container: &str, options: &MapOptions) -> Result<(), SdkError>;

    /// Starts forwarding `event` to `EmbeddedMapState::emit_map_event`.
    fn subscribe(&mut self, event: MapEventKind) -> Result<(), SdkError>;

    fn center(&self) -> Option<LngLat>;
    fn zoom(&self) -> f64;
    fn style_zoom(&self) -> f64;
    fn rotation(&self) -> f64;
    fn pitch(&self) -> f64;

    fn set_center(
        &mut self,
        center: LngLat,
        options: Option<&AnimationOptions>,
    ) -> Result<(), SdkError>;
    fn set_zoom(&mut self, zoom: f64, options: Option<&ZoomAnimationOptions>)
        -> Result<(), SdkError>;
    fn set_style_zoom(
        &mut self,
        style_zoom: f64,
        options: Option<&AnimationOptions>,
    ) -> Result<(), SdkError>;
    fn set_rotation(
        &mut self,
        rotation: f64,
        options: Option<&RotationAnimationOptions>,
    ) -> Result<(), SdkError>;
    fn set_pitch(&mut self, pitch: f64, options: Option<&AnimationOptions>)
        -> Result<(), SdkError>;

    fn set_min_zoom(&mut self, zoom: f64, options: Option<&AnimationOptions>)
        -> Result<(), SdkError>;
    fn set_max_zoom(&mut self, zoom: f64, options: Option<&AnimationOptions>)
        -> Result<(), SdkError>;
    fn set_min_pitch(
        &mut self,
        pitch: f64,
        options: Option<&AnimationOptions>,
    ) -> Result<(), SdkError>;
    fn set_max_pitch(
        &mut self,
        pitch: f64,
        options: Option<&AnimationOptions>,
    ) -> Result<(), SdkError>;
    fn set_low_zoom_max_pitch(
        &mut self,
        pitch: f64,
        options: Option<&AnimationOptions>,
    ) -> Result<(), SdkError>;
    fn set_max_bounds(&mut self, bounds: &LngLatBounds) -> Result<(), SdkError>;

    fn show_traffic(&mut self) -> Result<(), SdkError>;
    fn hide_traffic(&mut self) -> Result<(), SdkError>;
    fn set_language(&mut self, lang: &str) -> Result<(), SdkError>;

    fn set_padding(
        &mut self,
        padding: &PartialPadding,
        options: Option<&AnimationOptions>,
    ) -> Result<(), SdkError>;
    fn fit_bounds(
        &mut self,
        bounds: &LngLatBounds,
        options: Option<&FitBoundsOptions>,
    ) -> Result<(), SdkError>;

    fn set_style_by_id(&mut self, style_id: &str) -> Result<(), SdkError>;
    fn set_style_from_url(&mut self, url: &str, options: &StyleOptions) -> Result<(), SdkError>;

    /// Creates an object of `kind` from its serialized options.
    fn create_object(&mut self, kind: ObjectKind, options: &Value)
        -> Result<ObjectHandle, SdkError>;

    /// Starts reporting clicks on `object` as presses of `unique_id`.
    fn watch_clicks(&mut self, object: ObjectHandle, unique_id: &str) -> Result<(), SdkError>;

    fn destroy_object(&mut self, object: ObjectHandle) -> Result<(), SdkError>;
}
