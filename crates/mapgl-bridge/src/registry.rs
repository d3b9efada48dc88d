//! Host-side object registry: press handlers and auto-fit contributions.

use indexmap::IndexMap;
use mapgl_protocol::{
    Command, HtmlMarkerOptions, LabelOptions, LngLat, MarkerOptions, ObjectKind, ObjectOptions,
    ObjectParams, PolygonOptions, PolylineOptions,
};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

pub type PressHandler = Box<dyn FnMut()>;

/// Props of one declarative object, as supplied by the caller.
pub struct ObjectProps<O> {
    pub unique_id: String,
    pub options: O,
    pub ignore_auto_fit: bool,
    pub on_press: Option<PressHandler>,
}

pub type MarkerProps = ObjectProps<MarkerOptions>;
pub type LabelProps = ObjectProps<LabelOptions>;
pub type PolylineProps = ObjectProps<PolylineOptions>;
pub type PolygonProps = ObjectProps<PolygonOptions>;
pub type HtmlMarkerProps = ObjectProps<HtmlMarkerOptions>;

impl<O: ObjectOptions> ObjectProps<O> {
    pub fn new(unique_id: impl Into<String>, options: O) -> Self {
        ObjectProps {
            unique_id: unique_id.into(),
            options,
            ignore_auto_fit: false,
            on_press: None,
        }
    }

    /// Keeps this object out of auto-fit.
    pub fn ignore_auto_fit(mut self) -> Self {
        self.ignore_auto_fit = true;
        self
    }

    pub fn on_press(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(handler));
        self
    }

    /// Wire params for these props, without defaults applied.
    pub fn params(&self) -> ObjectParams<O> {
        ObjectParams {
            unique_id: self.unique_id.clone(),
            options: self.options.clone(),
            ignore_auto_fit: self.ignore_auto_fit,
        }
    }
}

impl<O: fmt::Debug> fmt::Debug for ObjectProps<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectProps")
            .field("unique_id", &self.unique_id)
            .field("options", &self.options)
            .field("ignore_auto_fit", &self.ignore_auto_fit)
            .field("on_press", &self.on_press.is_some())
            .finish()
    }
}

/// Tracks what the host needs to remember about live objects.
///
/// Press handlers are keyed by `uniqueId` alone, since that is all a
/// `markerClick` event carries. Auto-fit points are keyed by kind and id so
/// that objects of different kinds sharing an id do not overwrite each other.
#[derive(Default)]
pub struct ObjectRegistry {
    press_handlers: HashMap<String, PressHandler>,
    fit_points: IndexMap<(ObjectKind, String), Vec<LngLat>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `props` and returns the add command to send.
    ///
    /// A re-add replaces the previous registration: a missing press handler
    /// or an `ignore_auto_fit` flag clears what the earlier add left behind.
    pub fn prepare_add<O: ObjectOptions>(&mut self, props: ObjectProps<O>) -> Command {
        let ObjectProps {
            unique_id,
            mut options,
            ignore_auto_fit,
            on_press,
        } = props;
        let kind = O::KIND;
        options.apply_default_z_index();
        if kind.supports_press() {
            match on_press {
                Some(handler) => {
                    options.enable_press();
                    self.press_handlers.insert(unique_id.clone(), handler);
                }
                None => {
                    self.press_handlers.remove(&unique_id);
                }
            }
        } else if on_press.is_some() {
            warn!(%kind, %unique_id, "press handlers are not supported for this kind");
        }

        let key = (kind, unique_id.clone());
        let points = options.fit_points();
        if ignore_auto_fit || points.is_empty() {
            self.fit_points.shift_remove(&key);
        } else {
            self.fit_points.insert(key, points);
        }

        O::add_command(ObjectParams {
            unique_id,
            options,
            ignore_auto_fit,
        })
    }

    /// Forgets the object and returns the remove command to send. Unknown
    /// ids leave the registry untouched.
    pub fn prepare_remove(&mut self, kind: ObjectKind, unique_id: &str) -> Command {
        self.fit_points.shift_remove(&(kind, unique_id.to_string()));
        if kind.supports_press() {
            self.press_handlers.remove(unique_id);
        }
        Command::remove(kind, unique_id)
    }

    /// Runs the press handler for `unique_id`. Returns `false` if none is set.
    pub fn dispatch_press(&mut self, unique_id: &str) -> bool {
        match self.press_handlers.get_mut(unique_id) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn has_press_handler(&self, unique_id: &str) -> bool {
        self.press_handlers.contains_key(unique_id)
    }

    /// Every point currently contributing to auto-fit.
    pub fn fit_points(&self) -> impl Iterator<Item = &LngLat> + '_ {
        self.fit_points.values().flatten()
    }

    pub fn contributes_to_fit(&self, kind: ObjectKind, unique_id: &str) -> bool {
        self.fit_points.contains_key(&(kind, unique_id.to_string()))
    }

    pub fn clear(&mut self) {
        self.press_handlers.clear();
        self.fit_points.clear();
    }
}

impl fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("press_handlers", &self.press_handlers.keys().collect::<Vec<_>>())
            .field("fit_points", &self.fit_points)
            .finish()
    }
}
