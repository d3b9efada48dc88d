//! Host-side event routing.

use mapgl_protocol::{ErrorData, Event, MapEventKind};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

pub type MapEventHandler = Box<dyn FnMut(&Value)>;
pub type BridgeErrorHandler = Box<dyn FnMut(&ErrorData)>;

/// Where an inbound message should go.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Inited,
    MapEvent { kind: MapEventKind, data: Value },
    Press { unique_id: String },
    Error(ErrorData),
    /// Not deliverable; `reason` is for logging only.
    Dropped { reason: String },
}

/// Classifies one inbound message. Never fails: anything that cannot be
/// delivered becomes [`Route::Dropped`].
pub fn route(message: &str) -> Route {
    match Event::decode(message) {
        Ok(Event::Inited) => Route::Inited,
        Ok(Event::MapEvent { event, data }) => match MapEventKind::from_name(&event) {
            Some(kind) => Route::MapEvent { kind, data },
            None => Route::Dropped {
                reason: format!("unknown map event \"{event}\""),
            },
        },
        Ok(Event::MarkerClick { unique_id }) => Route::Press { unique_id },
        Ok(Event::Error { data }) => Route::Error(data),
        Err(e) => Route::Dropped {
            reason: e.to_string(),
        },
    }
}

/// Callbacks the host registers with a session.
#[derive(Default)]
pub struct MapCallbacks {
    on_init: Option<Box<dyn FnOnce()>>,
    handlers: HashMap<MapEventKind, MapEventHandler>,
    on_bridge_error: Option<BridgeErrorHandler>,
}

impl MapCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs once, when the first `inited` arrives.
    pub fn on_init(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_init = Some(Box::new(f));
        self
    }

    pub fn on(mut self, kind: MapEventKind, f: impl FnMut(&Value) + 'static) -> Self {
        self.handlers.insert(kind, Box::new(f));
        self
    }

    /// Receives `error` events reported by the embedded side.
    pub fn on_bridge_error(mut self, f: impl FnMut(&ErrorData) + 'static) -> Self {
        self.on_bridge_error = Some(Box::new(f));
        self
    }

    pub fn set_handler(&mut self, kind: MapEventKind, f: impl FnMut(&Value) + 'static) {
        self.handlers.insert(kind, Box::new(f));
    }

    pub fn clear_handler(&mut self, kind: MapEventKind) -> bool {
        self.handlers.remove(&kind).is_some()
    }

    pub fn has_handler(&self, kind: MapEventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub(crate) fn fire_init(&mut self) -> bool {
        match self.on_init.take() {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    pub(crate) fn dispatch_map_event(&mut self, kind: MapEventKind, data: &Value) -> bool {
        match self.handlers.get_mut(&kind) {
            Some(handler) => {
                handler(data);
                true
            }
            None => false,
        }
    }

    pub(crate) fn dispatch_error(&mut self, data: &ErrorData) -> bool {
        match self.on_bridge_error.as_mut() {
            Some(handler) => {
                handler(data);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for MapCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.handlers.keys().map(|k| k.callback_name()).collect();
        kinds.sort_unstable();
        f.debug_struct("MapCallbacks")
            .field("on_init", &self.on_init.is_some())
            .field("handlers", &kinds)
            .field("on_bridge_error", &self.on_bridge_error.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn routes_known_events() {
        assert_eq!(route(r#"{"type":"inited"}"#), Route::Inited);
        assert_eq!(
            route(r#"{"type":"mapEvent","event":"zoomend","data":{"zoom":3}}"#),
            Route::MapEvent {
                kind: MapEventKind::ZoomEnd,
                data: json!({"zoom": 3}),
            }
        );
        assert_eq!(
            route(r#"{"type":"markerClick","uniqueId":"m"}"#),
            Route::Press {
                unique_id: "m".to_string()
            }
        );
    }

    #[test]
    fn drops_unknown_and_malformed() {
        assert!(matches!(
            route(r#"{"type":"mapEvent","event":"teleport"}"#),
            Route::Dropped { .. }
        ));
        assert!(matches!(route("not json"), Route::Dropped { .. }));
        assert!(matches!(route(r#"{"type":"nope"}"#), Route::Dropped { .. }));
        assert!(matches!(route("[]"), Route::Dropped { .. }));
    }

    #[test]
    fn on_init_runs_once() {
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let mut cbs = MapCallbacks::new().on_init(move || *c.borrow_mut() += 1);
        assert!(cbs.fire_init());
        assert!(!cbs.fire_init());
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn handlers_can_be_swapped_at_runtime() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let mut cbs = MapCallbacks::new();
        assert!(!cbs.dispatch_map_event(MapEventKind::Click, &json!({})));
        cbs.set_handler(MapEventKind::Click, move |v| s.borrow_mut().push(v.clone()));
        assert!(cbs.dispatch_map_event(MapEventKind::Click, &json!({"x": 1})));
        assert!(cbs.clear_handler(MapEventKind::Click));
        assert!(!cbs.has_handler(MapEventKind::Click));
        assert_eq!(*seen.borrow(), vec![json!({"x": 1})]);
    }
}
