//! Embedded -> host events: `{"type": "...", ...}`.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Map events the embedded side subscribes to and forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    Move,
    MoveStart,
    MoveEnd,
    Center,
    CenterStart,
    CenterEnd,
    Zoom,
    ZoomStart,
    ZoomEnd,
    Rotation,
    RotationStart,
    RotationEnd,
    Pitch,
    PitchStart,
    PitchEnd,
    Click,
    ContextMenu,
    MouseMove,
    MouseOver,
    MouseOut,
    MouseDown,
    MouseUp,
    TouchStart,
    TouchEnd,
    Idle,
    Resize,
    TrafficShow,
    TrafficHide,
    TrafficScore,
    FloorPlanShow,
    FloorPlanHide,
    FloorLevelChange,
    StyleLoad,
    StyleLoadError,
    ChangeLanguage,
    Destroy,
    Error,
    GraphicsPresetChange,
}

/// `(kind, SDK event name, host callback name)`.
const MAP_EVENT_TABLE: [(MapEventKind, &str, &str); 38] = [
    (MapEventKind::Move, "move", "onMove"),
    (MapEventKind::MoveStart, "movestart", "onMoveStart"),
    (MapEventKind::MoveEnd, "moveend", "onMoveEnd"),
    (MapEventKind::Center, "center", "onCenter"),
    (MapEventKind::CenterStart, "centerstart", "onCenterStart"),
    (MapEventKind::CenterEnd, "centerend", "onCenterEnd"),
    (MapEventKind::Zoom, "zoom", "onZoom"),
    (MapEventKind::ZoomStart, "zoomstart", "onZoomStart"),
    (MapEventKind::ZoomEnd, "zoomend", "onZoomEnd"),
    (MapEventKind::Rotation, "rotation", "onRotation"),
    (MapEventKind::RotationStart, "rotationstart", "onRotationStart"),
    (MapEventKind::RotationEnd, "rotationend", "onRotationEnd"),
    (MapEventKind::Pitch, "pitch", "onPitch"),
    (MapEventKind::PitchStart, "pitchstart", "onPitchStart"),
    (MapEventKind::PitchEnd, "pitchend", "onPitchEnd"),
    (MapEventKind::Click, "click", "onClick"),
    (MapEventKind::ContextMenu, "contextmenu", "onContextMenu"),
    (MapEventKind::MouseMove, "mousemove", "onMouseMove"),
    (MapEventKind::MouseOver, "mouseover", "onMouseOver"),
    (MapEventKind::MouseOut, "mouseout", "onMouseOut"),
    (MapEventKind::MouseDown, "mousedown", "onMouseDown"),
    (MapEventKind::MouseUp, "mouseup", "onMouseUp"),
    (MapEventKind::TouchStart, "touchstart", "onTouchStart"),
    (MapEventKind::TouchEnd, "touchend", "onTouchEnd"),
    (MapEventKind::Idle, "idle", "onIdle"),
    (MapEventKind::Resize, "resize", "onResize"),
    (MapEventKind::TrafficShow, "trafficshow", "onTrafficShow"),
    (MapEventKind::TrafficHide, "traffichide", "onTrafficHide"),
    (MapEventKind::TrafficScore, "trafficscore", "onTrafficScore"),
    (MapEventKind::FloorPlanShow, "floorplanshow", "onFloorPlanShow"),
    (MapEventKind::FloorPlanHide, "floorplanhide", "onFloorPlanHide"),
    (MapEventKind::FloorLevelChange, "floorlevelchange", "onFloorLevelChange"),
    (MapEventKind::StyleLoad, "styleload", "onStyleLoad"),
    (MapEventKind::StyleLoadError, "styleloaderror", "onStyleLoadError"),
    (MapEventKind::ChangeLanguage, "changeLanguage", "onChangeLanguage"),
    (MapEventKind::Destroy, "destroy", "onDestroy"),
    (MapEventKind::Error, "error", "onError"),
    (MapEventKind::GraphicsPresetChange, "graphicspresetchange", "onGraphicsPresetChange"),
];

impl MapEventKind {
    pub fn all() -> impl Iterator<Item = MapEventKind> {
        MAP_EVENT_TABLE.iter().map(|(kind, _, _)| *kind)
    }

    fn entry(self) -> &'static (MapEventKind, &'static str, &'static str) {
        // The table lists every variant exactly once, in declaration order.
        &MAP_EVENT_TABLE[self as usize]
    }

    /// Event name as emitted by the SDK.
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Name of the host callback that receives this event (`onMove`, ...).
    pub fn callback_name(self) -> &'static str {
        self.entry().2
    }

    pub fn from_name(name: &str) -> Option<MapEventKind> {
        MAP_EVENT_TABLE
            .iter()
            .find(|(_, event, _)| *event == name)
            .map(|(kind, _, _)| *kind)
    }
}

impl fmt::Display for MapEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of an `error` event: which operation failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    pub target: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// The map is constructed and every event subscription is attached.
    Inited,
    /// A forwarded map event. `event` is kept as a plain string: names the
    /// host does not know are dropped on receipt rather than failing decode.
    MapEvent {
        event: String,
        #[serde(default)]
        data: Value,
    },
    MarkerClick {
        #[serde(rename = "uniqueId")]
        unique_id: String,
    },
    Error { data: ErrorData },
}

impl Event {
    pub fn map_event(kind: MapEventKind, data: Map<String, Value>) -> Event {
        Event::MapEvent {
            event: kind.name().to_string(),
            data: Value::Object(data),
        }
    }

    pub fn marker_click(unique_id: impl Into<String>) -> Event {
        Event::MarkerClick {
            unique_id: unique_id.into(),
        }
    }

    pub fn error(target: impl Into<String>, message: impl Into<String>) -> Event {
        Event::Error {
            data: ErrorData {
                target: target.into(),
                message: message.into(),
            },
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(message: &str) -> Result<Event, ProtocolError> {
        Ok(serde_json::from_str(message)?)
    }
}
