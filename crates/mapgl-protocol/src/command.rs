//! Host -> embedded commands: `{"function": "<name>", "params": {...}}`.

use crate::error::ProtocolError;
use crate::objects::{
    HtmlMarkerOptions, LabelOptions, MarkerOptions, ObjectKind, ObjectParams, PolygonOptions,
    PolylineOptions, RemoveParams,
};
use crate::types::{
    AnimationOptions, FitBoundsOptions, LngLat, LngLatBounds, MapOptions, PartialPadding,
    RotationAnimationOptions, StyleOptions, ZoomAnimationOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Every operation name the bridge understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Init,
    SetCenter,
    SetZoom,
    SetStyleZoom,
    SetRotation,
    SetPitch,
    SetMinZoom,
    SetMaxZoom,
    SetMinPitch,
    SetMaxPitch,
    SetLowZoomMaxPitch,
    ShowTraffic,
    HideTraffic,
    SetLanguage,
    SetMaxBounds,
    SetPadding,
    FitBounds,
    SetStyleById,
    SetStyleFromUrl,
    AddMarker,
    RemoveMarker,
    AddLabel,
    RemoveLabel,
    AddPolyline,
    RemovePolyline,
    AddPolygon,
    RemovePolygon,
    AddHtmlMarker,
    RemoveHtmlMarker,
}

impl Function {
    pub const ALL: [Function; 29] = [
        Function::Init,
        Function::SetCenter,
        Function::SetZoom,
        Function::SetStyleZoom,
        Function::SetRotation,
        Function::SetPitch,
        Function::SetMinZoom,
        Function::SetMaxZoom,
        Function::SetMinPitch,
        Function::SetMaxPitch,
        Function::SetLowZoomMaxPitch,
        Function::ShowTraffic,
        Function::HideTraffic,
        Function::SetLanguage,
        Function::SetMaxBounds,
        Function::SetPadding,
        Function::FitBounds,
        Function::SetStyleById,
        Function::SetStyleFromUrl,
        Function::AddMarker,
        Function::RemoveMarker,
        Function::AddLabel,
        Function::RemoveLabel,
        Function::AddPolyline,
        Function::RemovePolyline,
        Function::AddPolygon,
        Function::RemovePolygon,
        Function::AddHtmlMarker,
        Function::RemoveHtmlMarker,
    ];

    /// Wire name, as carried in the `function` field.
    pub fn name(self) -> &'static str {
        match self {
            Function::Init => "init",
            Function::SetCenter => "setCenter",
            Function::SetZoom => "setZoom",
            Function::SetStyleZoom => "setStyleZoom",
            Function::SetRotation => "setRotation",
            Function::SetPitch => "setPitch",
            Function::SetMinZoom => "setMinZoom",
            Function::SetMaxZoom => "setMaxZoom",
            Function::SetMinPitch => "setMinPitch",
            Function::SetMaxPitch => "setMaxPitch",
            Function::SetLowZoomMaxPitch => "setLowZoomMaxPitch",
            Function::ShowTraffic => "showTraffic",
            Function::HideTraffic => "hideTraffic",
            Function::SetLanguage => "setLanguage",
            Function::SetMaxBounds => "setMaxBounds",
            Function::SetPadding => "setPadding",
            Function::FitBounds => "fitBounds",
            Function::SetStyleById => "setStyleById",
            Function::SetStyleFromUrl => "setStyleFromUrl",
            Function::AddMarker => "addMarker",
            Function::RemoveMarker => "removeMarker",
            Function::AddLabel => "addLabel",
            Function::RemoveLabel => "removeLabel",
            Function::AddPolyline => "addPolyline",
            Function::RemovePolyline => "removePolyline",
            Function::AddPolygon => "addPolygon",
            Function::RemovePolygon => "removePolygon",
            Function::AddHtmlMarker => "addHtmlMarker",
            Function::RemoveHtmlMarker => "removeHtmlMarker",
        }
    }

    pub fn from_name(name: &str) -> Option<Function> {
        Function::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Object kind touched by an `add*`/`remove*` function.
    pub fn object_kind(self) -> Option<ObjectKind> {
        ObjectKind::ALL
            .iter()
            .copied()
            .find(|k| k.add_function() == self || k.remove_function() == self)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterParams {
    pub center: LngLat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomParams {
    pub zoom: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ZoomAnimationOptions>,
}

/// Parameters of `setMinZoom` / `setMaxZoom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimitParams {
    pub zoom: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleZoomParams {
    pub style_zoom: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationParams {
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RotationAnimationOptions>,
}

/// Parameters shared by the pitch setters and pitch limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchParams {
    pub pitch: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyParams {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageParams {
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxBoundsParams {
    pub bounds: LngLatBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddingParams {
    pub padding: PartialPadding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitBoundsParams {
    pub bounds: LngLatBounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<FitBoundsOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleIdParams {
    pub style_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleUrlParams {
    pub style_url: String,
    #[serde(default)]
    pub options: StyleOptions,
}

/// A single host -> embedded command.
///
/// Serializes to the adjacently tagged wire shape
/// `{"function": "<name>", "params": {...}}`; the variant set is the same as
/// [`Function`], so a command can never name an operation the embedded side
/// does not implement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function", content = "params", rename_all = "camelCase")]
pub enum Command {
    Init(MapOptions),
    SetCenter(CenterParams),
    SetZoom(ZoomParams),
    SetStyleZoom(StyleZoomParams),
    SetRotation(RotationParams),
    SetPitch(PitchParams),
    SetMinZoom(ZoomLimitParams),
    SetMaxZoom(ZoomLimitParams),
    SetMinPitch(PitchParams),
    SetMaxPitch(PitchParams),
    SetLowZoomMaxPitch(PitchParams),
    ShowTraffic(EmptyParams),
    HideTraffic(EmptyParams),
    SetLanguage(LanguageParams),
    SetMaxBounds(MaxBoundsParams),
    SetPadding(PaddingParams),
    FitBounds(FitBoundsParams),
    SetStyleById(StyleIdParams),
    SetStyleFromUrl(StyleUrlParams),
    AddMarker(ObjectParams<MarkerOptions>),
    RemoveMarker(RemoveParams),
    AddLabel(ObjectParams<LabelOptions>),
    RemoveLabel(RemoveParams),
    AddPolyline(ObjectParams<PolylineOptions>),
    RemovePolyline(RemoveParams),
    AddPolygon(ObjectParams<PolygonOptions>),
    RemovePolygon(RemoveParams),
    AddHtmlMarker(ObjectParams<HtmlMarkerOptions>),
    RemoveHtmlMarker(RemoveParams),
}

impl Command {
    pub fn function(&self) -> Function {
        match self {
            Command::Init(_) => Function::Init,
            Command::SetCenter(_) => Function::SetCenter,
            Command::SetZoom(_) => Function::SetZoom,
            Command::SetStyleZoom(_) => Function::SetStyleZoom,
            Command::SetRotation(_) => Function::SetRotation,
            Command::SetPitch(_) => Function::SetPitch,
            Command::SetMinZoom(_) => Function::SetMinZoom,
            Command::SetMaxZoom(_) => Function::SetMaxZoom,
            Command::SetMinPitch(_) => Function::SetMinPitch,
            Command::SetMaxPitch(_) => Function::SetMaxPitch,
            Command::SetLowZoomMaxPitch(_) => Function::SetLowZoomMaxPitch,
            Command::ShowTraffic(_) => Function::ShowTraffic,
            Command::HideTraffic(_) => Function::HideTraffic,
            Command::SetLanguage(_) => Function::SetLanguage,
            Command::SetMaxBounds(_) => Function::SetMaxBounds,
            Command::SetPadding(_) => Function::SetPadding,
            Command::FitBounds(_) => Function::FitBounds,
            Command::SetStyleById(_) => Function::SetStyleById,
            Command::SetStyleFromUrl(_) => Function::SetStyleFromUrl,
            Command::AddMarker(_) => Function::AddMarker,
            Command::RemoveMarker(_) => Function::RemoveMarker,
            Command::AddLabel(_) => Function::AddLabel,
            Command::RemoveLabel(_) => Function::RemoveLabel,
            Command::AddPolyline(_) => Function::AddPolyline,
            Command::RemovePolyline(_) => Function::RemovePolyline,
            Command::AddPolygon(_) => Function::AddPolygon,
            Command::RemovePolygon(_) => Function::RemovePolygon,
            Command::AddHtmlMarker(_) => Function::AddHtmlMarker,
            Command::RemoveHtmlMarker(_) => Function::RemoveHtmlMarker,
        }
    }

    /// Builds the `remove*` command for an object.
    pub fn remove(kind: ObjectKind, unique_id: impl Into<String>) -> Command {
        let params = RemoveParams::new(unique_id);
        match kind {
            ObjectKind::Marker => Command::RemoveMarker(params),
            ObjectKind::Label => Command::RemoveLabel(params),
            ObjectKind::Polyline => Command::RemovePolyline(params),
            ObjectKind::Polygon => Command::RemovePolygon(params),
            ObjectKind::HtmlMarker => Command::RemoveHtmlMarker(params),
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a wire command.
    ///
    /// The envelope is read first so that an unknown function name and a
    /// parameter mismatch are reported separately, with the function name
    /// attached to the latter.
    pub fn decode(message: &str) -> Result<Command, ProtocolError> {
        RawCommand::parse(message)?.into_command()
    }
}

fn empty_params() -> Value {
    Value::Object(Map::new())
}

/// Command envelope with its parameters left untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCommand {
    pub function: String,
    #[serde(default = "empty_params")]
    pub params: Value,
}

impl RawCommand {
    pub fn parse(message: &str) -> Result<RawCommand, ProtocolError> {
        Ok(serde_json::from_str(message)?)
    }

    pub fn into_command(self) -> Result<Command, ProtocolError> {
        let function = Function::from_name(&self.function)
            .ok_or_else(|| ProtocolError::UnknownFunction(self.function.clone()))?;
        let mut envelope = Map::new();
        envelope.insert("function".to_string(), Value::String(self.function));
        envelope.insert("params".to_string(), self.params);
        serde_json::from_value(Value::Object(envelope)).map_err(|e| ProtocolError::InvalidParams {
            function: function.name().to_string(),
            reason: e.to_string(),
        })
    }
}
