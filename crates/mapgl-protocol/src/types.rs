//! Geometry and option shapes shared by commands and configuration.
//!
//! Field names follow the embedded SDK's camelCase spelling so that every
//! struct serializes to exactly the object the SDK expects. Unset optional
//! fields are omitted from the wire, the same way an `undefined` property
//! disappears from a JSON document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `[lng, lat]` pair, the coordinate order used on the wire.
pub type LngLat = [f64; 2];

/// A `{lat, lng}` literal as accepted by `flyTo`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

impl LatLngLiteral {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLngLiteral { lat, lng }
    }

    /// Reorders into the `[lng, lat]` wire form.
    pub fn to_lng_lat(self) -> LngLat {
        [self.lng, self.lat]
    }
}

/// Axis-aligned box given by its south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LngLatBounds {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Same padding on all four sides.
    pub fn uniform(value: f64) -> Self {
        Padding {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Padding where any side may be left to the SDK default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialPadding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl From<Padding> for PartialPadding {
    fn from(p: Padding) -> Self {
        PartialPadding {
            top: Some(p.top),
            right: Some(p.right),
            bottom: Some(p.bottom),
            left: Some(p.left),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animate: Option<bool>,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// One of the SDK easing names (`linear`, `easeInQuad`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

/// Options accepted by `flyTo`; forwarded to both the centre and the zoom step.
pub type ZoomPanOptions = AnimationOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomAnimationOptions {
    #[serde(flatten)]
    pub animation: AnimationOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_height_for_animation: Option<bool>,
}

impl From<AnimationOptions> for ZoomAnimationOptions {
    fn from(animation: AnimationOptions) -> Self {
        ZoomAnimationOptions {
            animation,
            use_height_for_animation: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationAnimationOptions {
    #[serde(flatten)]
    pub animation: AnimationOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalize: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitBoundsOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<PartialPadding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_map_padding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consider_rotation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models_path: Option<String>,
}

/// Map construction options, sent as the `init` parameters.
///
/// `api_key` is read from either `apiKey` or `key` but always written as
/// `key`, which is the name the SDK constructor expects. Options this struct
/// does not model (`zoomControl`, `graphicsPreset`, ...) are kept in `extra`
/// and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapOptions {
    #[serde(rename = "key", alias = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<LngLat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bounds: Option<LngLatBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_zoom_max_pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_on: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
