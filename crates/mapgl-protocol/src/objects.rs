//! Declarative map objects: kinds, option shapes and add/remove parameters.

use crate::command::{Command, Function};
use crate::types::LngLat;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The five object kinds the bridge can place on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Marker,
    Label,
    Polyline,
    Polygon,
    HtmlMarker,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Marker,
        ObjectKind::Label,
        ObjectKind::Polyline,
        ObjectKind::Polygon,
        ObjectKind::HtmlMarker,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Marker => "marker",
            ObjectKind::Label => "label",
            ObjectKind::Polyline => "polyline",
            ObjectKind::Polygon => "polygon",
            ObjectKind::HtmlMarker => "htmlMarker",
        }
    }

    /// `zIndex` applied when the caller leaves it unset.
    pub fn default_z_index(self) -> f64 {
        match self {
            ObjectKind::Marker | ObjectKind::Label | ObjectKind::HtmlMarker => 10.0,
            ObjectKind::Polyline => 5.0,
            ObjectKind::Polygon => 2.0,
        }
    }

    /// Whether a press handler can be attached to objects of this kind.
    pub fn supports_press(self) -> bool {
        matches!(self, ObjectKind::Marker | ObjectKind::Label)
    }

    pub fn add_function(self) -> Function {
        match self {
            ObjectKind::Marker => Function::AddMarker,
            ObjectKind::Label => Function::AddLabel,
            ObjectKind::Polyline => Function::AddPolyline,
            ObjectKind::Polygon => Function::AddPolygon,
            ObjectKind::HtmlMarker => Function::AddHtmlMarker,
        }
    }

    pub fn remove_function(self) -> Function {
        match self {
            ObjectKind::Marker => Function::RemoveMarker,
            ObjectKind::Label => Function::RemoveLabel,
            ObjectKind::Polyline => Function::RemovePolyline,
            ObjectKind::Polygon => Function::RemovePolygon,
            ObjectKind::HtmlMarker => Function::RemoveHtmlMarker,
        }
    }

    /// Name of the embedded-side table holding live objects of this kind.
    pub fn table_name(self) -> &'static str {
        match self {
            ObjectKind::Marker => "markers",
            ObjectKind::Label => "labels",
            ObjectKind::Polyline => "polylines",
            ObjectKind::Polygon => "polygons",
            ObjectKind::HtmlMarker => "htmlMarkers",
        }
    }

    /// SDK constructor used to create objects of this kind.
    pub fn sdk_class(self) -> &'static str {
        match self {
            ObjectKind::Marker => "Marker",
            ObjectKind::Label => "Label",
            ObjectKind::Polyline => "Polyline",
            ObjectKind::Polygon => "Polygon",
            ObjectKind::HtmlMarker => "HtmlMarker",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific option shape of a declarative object.
pub trait ObjectOptions: Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq {
    const KIND: ObjectKind;

    fn z_index_mut(&mut self) -> &mut Option<f64>;

    /// Points this object contributes to auto-fit, in `[lng, lat]` order.
    fn fit_points(&self) -> Vec<LngLat>;

    /// Adjust options so the SDK reports presses on the object.
    fn enable_press(&mut self) {}

    /// Wraps add parameters into this kind's `add*` command.
    fn add_command(params: ObjectParams<Self>) -> Command;

    /// Fill in the kind's default `zIndex` if the caller did not set one.
    fn apply_default_z_index(&mut self) {
        self.z_index_mut().get_or_insert(Self::KIND.default_z_index());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerOptions {
    pub coordinates: LngLat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MarkerOptions {
    pub fn at(coordinates: LngLat) -> Self {
        MarkerOptions {
            coordinates,
            icon: None,
            size: None,
            anchor: None,
            rotation: None,
            z_index: None,
            extra: Map::new(),
        }
    }
}

impl ObjectOptions for MarkerOptions {
    const KIND: ObjectKind = ObjectKind::Marker;

    fn add_command(params: ObjectParams<Self>) -> Command {
        Command::AddMarker(params)
    }

    fn z_index_mut(&mut self) -> &mut Option<f64> {
        &mut self.z_index
    }

    fn fit_points(&self) -> Vec<LngLat> {
        vec![self.coordinates]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelOptions {
    pub coordinates: LngLat,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LabelOptions {
    pub fn new(coordinates: LngLat, text: impl Into<String>) -> Self {
        LabelOptions {
            coordinates,
            text: text.into(),
            font_size: None,
            color: None,
            interactive: None,
            z_index: None,
            extra: Map::new(),
        }
    }
}

impl ObjectOptions for LabelOptions {
    const KIND: ObjectKind = ObjectKind::Label;

    fn add_command(params: ObjectParams<Self>) -> Command {
        Command::AddLabel(params)
    }

    fn z_index_mut(&mut self) -> &mut Option<f64> {
        &mut self.z_index
    }

    fn fit_points(&self) -> Vec<LngLat> {
        vec![self.coordinates]
    }

    // Labels only emit clicks when interactive.
    fn enable_press(&mut self) {
        self.interactive.get_or_insert(true);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineOptions {
    pub coordinates: Vec<LngLat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PolylineOptions {
    pub fn through(coordinates: Vec<LngLat>) -> Self {
        PolylineOptions {
            coordinates,
            width: None,
            color: None,
            z_index: None,
            extra: Map::new(),
        }
    }
}

impl ObjectOptions for PolylineOptions {
    const KIND: ObjectKind = ObjectKind::Polyline;

    fn add_command(params: ObjectParams<Self>) -> Command {
        Command::AddPolyline(params)
    }

    fn z_index_mut(&mut self) -> &mut Option<f64> {
        &mut self.z_index
    }

    fn fit_points(&self) -> Vec<LngLat> {
        self.coordinates.clone()
    }
}

/// Polygon rings; the first ring is the outer contour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonOptions {
    pub coordinates: Vec<Vec<LngLat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PolygonOptions {
    pub fn with_rings(coordinates: Vec<Vec<LngLat>>) -> Self {
        PolygonOptions {
            coordinates,
            color: None,
            stroke_color: None,
            stroke_width: None,
            z_index: None,
            extra: Map::new(),
        }
    }
}

impl ObjectOptions for PolygonOptions {
    const KIND: ObjectKind = ObjectKind::Polygon;

    fn add_command(params: ObjectParams<Self>) -> Command {
        Command::AddPolygon(params)
    }

    fn z_index_mut(&mut self) -> &mut Option<f64> {
        &mut self.z_index
    }

    // Holes cannot extend past the outer ring.
    fn fit_points(&self) -> Vec<LngLat> {
        self.coordinates.first().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlMarkerOptions {
    pub coordinates: LngLat,
    pub html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HtmlMarkerOptions {
    pub fn new(coordinates: LngLat, html: impl Into<String>) -> Self {
        HtmlMarkerOptions {
            coordinates,
            html: html.into(),
            anchor: None,
            interactive: None,
            z_index: None,
            extra: Map::new(),
        }
    }
}

impl ObjectOptions for HtmlMarkerOptions {
    const KIND: ObjectKind = ObjectKind::HtmlMarker;

    fn add_command(params: ObjectParams<Self>) -> Command {
        Command::AddHtmlMarker(params)
    }

    fn z_index_mut(&mut self) -> &mut Option<f64> {
        &mut self.z_index
    }

    fn fit_points(&self) -> Vec<LngLat> {
        vec![self.coordinates]
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Parameters of an `add*` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectParams<O> {
    pub unique_id: String,
    pub options: O,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignore_auto_fit: bool,
}

/// Parameters of a `remove*` command; only the identity is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveParams {
    pub unique_id: String,
}

impl RemoveParams {
    pub fn new(unique_id: impl Into<String>) -> Self {
        RemoveParams {
            unique_id: unique_id.into(),
        }
    }
}
