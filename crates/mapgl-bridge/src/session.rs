//! Host-side session: lifecycle, imperative control and declarative objects.
//!
//! A session moves `Loading -> Initializing -> Ready`, and to `Closed` from
//! any state. `init` is sent when the embedded document reports load
//! completion; declarative adds made before `inited` are queued and flushed
//! once it arrives.

use crate::autofit::AutoFitSetting;
use crate::channel::MessageSink;
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::events::{route, MapCallbacks, Route};
use crate::registry::{
    HtmlMarkerProps, LabelProps, MarkerProps, ObjectProps, ObjectRegistry, PolygonProps,
    PolylineProps,
};
use mapgl_protocol::{
    resolve_style_id, AnimationOptions, CenterParams, Command, EmptyParams, FitBoundsOptions,
    FitBoundsParams, LanguageParams, LatLngLiteral, LngLat, LngLatBounds, MapOptions,
    MaxBoundsParams, ObjectKind, ObjectOptions, PaddingParams, PartialPadding, PitchParams,
    RotationAnimationOptions, RotationParams, StyleIdParams, StyleOptions, StyleUrlParams,
    StyleZoomParams, ZoomAnimationOptions, ZoomLimitParams, ZoomPanOptions, ZoomParams,
};
use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use tracing::{debug, info, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The embedded document has not finished loading.
    Loading,
    /// `init` was sent; waiting for `inited`.
    Initializing,
    Ready,
    Closed,
}

/// A declarative object of any kind.
#[derive(Debug)]
pub enum ObjectDecl {
    Marker(MarkerProps),
    Label(LabelProps),
    Polyline(PolylineProps),
    Polygon(PolygonProps),
    HtmlMarker(HtmlMarkerProps),
}

impl ObjectDecl {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectDecl::Marker(_) => ObjectKind::Marker,
            ObjectDecl::Label(_) => ObjectKind::Label,
            ObjectDecl::Polyline(_) => ObjectKind::Polyline,
            ObjectDecl::Polygon(_) => ObjectKind::Polygon,
            ObjectDecl::HtmlMarker(_) => ObjectKind::HtmlMarker,
        }
    }

    pub fn unique_id(&self) -> &str {
        match self {
            ObjectDecl::Marker(p) => &p.unique_id,
            ObjectDecl::Label(p) => &p.unique_id,
            ObjectDecl::Polyline(p) => &p.unique_id,
            ObjectDecl::Polygon(p) => &p.unique_id,
            ObjectDecl::HtmlMarker(p) => &p.unique_id,
        }
    }

    fn same_object(&self, kind: ObjectKind, unique_id: &str) -> bool {
        self.kind() == kind && self.unique_id() == unique_id
    }
}

impl From<MarkerProps> for ObjectDecl {
    fn from(p: MarkerProps) -> Self {
        ObjectDecl::Marker(p)
    }
}

impl From<LabelProps> for ObjectDecl {
    fn from(p: LabelProps) -> Self {
        ObjectDecl::Label(p)
    }
}

impl From<PolylineProps> for ObjectDecl {
    fn from(p: PolylineProps) -> Self {
        ObjectDecl::Polyline(p)
    }
}

impl From<PolygonProps> for ObjectDecl {
    fn from(p: PolygonProps) -> Self {
        ObjectDecl::Polygon(p)
    }
}

impl From<HtmlMarkerProps> for ObjectDecl {
    fn from(p: HtmlMarkerProps) -> Self {
        ObjectDecl::HtmlMarker(p)
    }
}

fn options_fingerprint(options: &MapOptions) -> Result<u64, BridgeError> {
    let serialized = serde_json::to_string(options)?;
    let mut hasher = DefaultHasher::new();
    serialized.hash(&mut hasher);
    Ok(hasher.finish())
}

pub struct MapSession<C> {
    channel: C,
    state: SessionState,
    options: MapOptions,
    applied_options: Option<u64>,
    auto_fit: AutoFitSetting,
    registry: ObjectRegistry,
    callbacks: MapCallbacks,
    pending: VecDeque<ObjectDecl>,
}

impl<C: MessageSink> MapSession<C> {
    /// Creates a session. Nothing is sent until [`on_load_end`](Self::on_load_end).
    pub fn new(channel: C, options: MapOptions, callbacks: MapCallbacks) -> Self {
        MapSession {
            channel,
            state: SessionState::Loading,
            options,
            applied_options: None,
            auto_fit: AutoFitSetting::default(),
            registry: ObjectRegistry::new(),
            callbacks,
            pending: VecDeque::new(),
        }
    }

    pub fn from_config(config: &BridgeConfig, channel: C, callbacks: MapCallbacks) -> Self {
        Self::new(channel, config.options.clone(), callbacks).with_auto_fit(config.auto_fit_bounds)
    }

    pub fn with_auto_fit(mut self, setting: impl Into<AutoFitSetting>) -> Self {
        self.auto_fit = setting.into();
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn auto_fit(&self) -> AutoFitSetting {
        self.auto_fit
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn callbacks_mut(&mut self) -> &mut MapCallbacks {
        &mut self.callbacks
    }

    /// Number of declarative adds waiting for `inited`.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The embedded document finished loading: send `init` unless the map
    /// is already up.
    pub fn on_load_end(&mut self) -> Result<(), BridgeError> {
        match self.state {
            SessionState::Closed => Err(BridgeError::SessionClosed),
            SessionState::Ready => {
                debug!("load end after inited ignored");
                Ok(())
            }
            SessionState::Loading | SessionState::Initializing => {
                let command = Command::Init(self.init_options());
                self.state = SessionState::Initializing;
                self.emit(&command)?;
                info!("init sent");
                Ok(())
            }
        }
    }

    fn init_options(&self) -> MapOptions {
        let mut options = self.options.clone();
        if let Some(style) = options.style.take() {
            options.style = Some(resolve_style_id(&style).to_string());
        }
        options
    }

    /// Handles one message from the embedded side. Never fails: anything
    /// undeliverable is logged and dropped.
    pub fn handle_message(&mut self, message: &str) {
        if self.state == SessionState::Closed {
            debug!("session closed; inbound message ignored");
            return;
        }
        match route(message) {
            Route::Inited => self.on_inited(),
            Route::MapEvent { kind, data } => {
                if !self.callbacks.dispatch_map_event(kind, &data) {
                    trace!(event = %kind, "no handler for map event");
                }
            }
            Route::Press { unique_id } => {
                if !self.registry.dispatch_press(&unique_id) {
                    debug!(%unique_id, "press for object without handler");
                }
            }
            Route::Error(data) => {
                warn!(function = %data.target, error = %data.message, "embedded command failed");
                self.callbacks.dispatch_error(&data);
            }
            Route::Dropped { reason } => debug!(%reason, "inbound message dropped"),
        }
    }

    fn on_inited(&mut self) {
        if self.state == SessionState::Ready {
            debug!("repeated inited ignored");
            return;
        }
        self.state = SessionState::Ready;
        self.applied_options = options_fingerprint(&self.options).ok();
        info!(queued = self.pending.len(), "map inited");
        self.callbacks.fire_init();
        if let Err(e) = self.flush_pending() {
            warn!(error = %e, "failed to flush queued objects");
        }
    }

    fn flush_pending(&mut self) -> Result<(), BridgeError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        while let Some(decl) = self.pending.pop_front() {
            match decl {
                ObjectDecl::Marker(p) => self.place(p)?,
                ObjectDecl::Label(p) => self.place(p)?,
                ObjectDecl::Polyline(p) => self.place(p)?,
                ObjectDecl::Polygon(p) => self.place(p)?,
                ObjectDecl::HtmlMarker(p) => self.place(p)?,
            }
        }
        self.refit()
    }

    /// Sends a command the caller issued, honouring the session state.
    fn send(&mut self, command: Command) -> Result<(), BridgeError> {
        match self.state {
            SessionState::Closed => {
                warn!(function = %command.function(), "command after close");
                return Err(BridgeError::SessionClosed);
            }
            SessionState::Loading => {
                warn!(function = %command.function(), "document not loaded; command dropped");
                return Ok(());
            }
            SessionState::Initializing => {
                warn!(function = %command.function(), "command sent before inited");
            }
            SessionState::Ready => {}
        }
        self.emit(&command)
    }

    fn emit(&mut self, command: &Command) -> Result<(), BridgeError> {
        let message = command.encode()?;
        trace!(function = %command.function(), %message, "send");
        self.channel.send(message);
        Ok(())
    }

    pub fn set_center(
        &mut self,
        center: LngLat,
        options: Option<AnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetCenter(CenterParams { center, options }))
    }

    pub fn set_zoom(
        &mut self,
        zoom: f64,
        options: Option<ZoomAnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetZoom(ZoomParams { zoom, options }))
    }

    pub fn set_style_zoom(
        &mut self,
        style_zoom: f64,
        options: Option<AnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetStyleZoom(StyleZoomParams {
            style_zoom,
            options,
        }))
    }

    pub fn set_rotation(
        &mut self,
        rotation: f64,
        options: Option<RotationAnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetRotation(RotationParams { rotation, options }))
    }

    pub fn set_pitch(
        &mut self,
        pitch: f64,
        options: Option<AnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetPitch(PitchParams { pitch, options }))
    }

    pub fn set_min_zoom(
        &mut self,
        zoom: f64,
        options: Option<AnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetMinZoom(ZoomLimitParams { zoom, options }))
    }

    pub fn set_max_zoom(
        &mut self,
        zoom: f64,
        options: Option<AnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetMaxZoom(ZoomLimitParams { zoom, options }))
    }

    pub fn set_min_pitch(
        &mut self,
        pitch: f64,
        options: Option<AnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetMinPitch(PitchParams { pitch, options }))
    }

    pub fn set_max_pitch(
        &mut self,
        pitch: f64,
        options: Option<AnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetMaxPitch(PitchParams { pitch, options }))
    }

    pub fn set_low_zoom_max_pitch(
        &mut self,
        pitch: f64,
        options: Option<AnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetLowZoomMaxPitch(PitchParams { pitch, options }))
    }

    pub fn show_traffic(&mut self) -> Result<(), BridgeError> {
        self.send(Command::ShowTraffic(EmptyParams {}))
    }

    pub fn hide_traffic(&mut self) -> Result<(), BridgeError> {
        self.send(Command::HideTraffic(EmptyParams {}))
    }

    pub fn set_language(&mut self, lang: impl Into<String>) -> Result<(), BridgeError> {
        self.send(Command::SetLanguage(LanguageParams { lang: lang.into() }))
    }

    pub fn set_max_bounds(&mut self, bounds: LngLatBounds) -> Result<(), BridgeError> {
        self.send(Command::SetMaxBounds(MaxBoundsParams { bounds }))
    }

    pub fn set_padding(
        &mut self,
        padding: impl Into<PartialPadding>,
        options: Option<AnimationOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetPadding(PaddingParams {
            padding: padding.into(),
            options,
        }))
    }

    pub fn fit_bounds(
        &mut self,
        bounds: LngLatBounds,
        options: Option<FitBoundsOptions>,
    ) -> Result<(), BridgeError> {
        self.send(Command::FitBounds(FitBoundsParams { bounds, options }))
    }

    /// `"dark"` and `"light"` are resolved before sending.
    pub fn set_style_by_id(&mut self, style_id: &str) -> Result<(), BridgeError> {
        self.send(Command::SetStyleById(StyleIdParams {
            style_id: resolve_style_id(style_id).to_string(),
        }))
    }

    pub fn set_style_from_url(
        &mut self,
        style_url: impl Into<String>,
        options: StyleOptions,
    ) -> Result<(), BridgeError> {
        self.send(Command::SetStyleFromUrl(StyleUrlParams {
            style_url: style_url.into(),
            options,
        }))
    }

    /// `setCenter` followed, when `zoom` is given, by `setZoom`; both get
    /// the same animation options.
    pub fn fly_to(
        &mut self,
        latlng: LatLngLiteral,
        zoom: Option<f64>,
        options: Option<ZoomPanOptions>,
    ) -> Result<(), BridgeError> {
        self.set_center(latlng.to_lng_lat(), options.clone())?;
        if let Some(zoom) = zoom {
            self.set_zoom(zoom, options.map(ZoomAnimationOptions::from))?;
        }
        Ok(())
    }

    /// Replaces the session options. Once the map is up, a change is pushed
    /// as `setStyleById` (when a style is set) and `setCenter` (when a
    /// centre is set); other fields only take effect on the next `init`.
    pub fn update_options(&mut self, options: MapOptions) -> Result<(), BridgeError> {
        if self.state == SessionState::Closed {
            return Err(BridgeError::SessionClosed);
        }
        let fingerprint = options_fingerprint(&options)?;
        self.options = options;
        if self.state != SessionState::Ready || self.applied_options == Some(fingerprint) {
            return Ok(());
        }
        self.applied_options = Some(fingerprint);
        if let Some(style) = self.options.style.clone() {
            self.set_style_by_id(&style)?;
        }
        if let Some(center) = self.options.center {
            self.set_center(center, Some(AnimationOptions::default()))?;
        }
        Ok(())
    }

    /// Adds (or replaces) a declarative object.
    pub fn add<O>(&mut self, props: ObjectProps<O>) -> Result<(), BridgeError>
    where
        O: ObjectOptions,
        ObjectDecl: From<ObjectProps<O>>,
    {
        match self.state {
            SessionState::Closed => Err(BridgeError::SessionClosed),
            SessionState::Ready => {
                self.place(props)?;
                self.refit()
            }
            SessionState::Loading | SessionState::Initializing => {
                let decl = ObjectDecl::from(props);
                let (kind, unique_id) = (decl.kind(), decl.unique_id().to_string());
                debug!(%kind, %unique_id, "add queued until inited");
                self.pending.retain(|d| !d.same_object(kind, &unique_id));
                self.pending.push_back(decl);
                Ok(())
            }
        }
    }

    fn place<O: ObjectOptions>(&mut self, props: ObjectProps<O>) -> Result<(), BridgeError> {
        let command = self.registry.prepare_add(props);
        self.emit(&command)
    }

    /// Removes a declarative object. Unknown ids are not an error; a
    /// still-queued add is cancelled instead.
    pub fn remove(&mut self, kind: ObjectKind, unique_id: &str) -> Result<(), BridgeError> {
        match self.state {
            SessionState::Closed => Err(BridgeError::SessionClosed),
            SessionState::Ready => {
                let command = self.registry.prepare_remove(kind, unique_id);
                self.emit(&command)?;
                self.refit()
            }
            SessionState::Loading | SessionState::Initializing => {
                let before = self.pending.len();
                self.pending.retain(|d| !d.same_object(kind, unique_id));
                if self.pending.len() != before {
                    debug!(%kind, %unique_id, "queued add cancelled");
                }
                Ok(())
            }
        }
    }

    pub fn add_marker(&mut self, props: MarkerProps) -> Result<(), BridgeError> {
        self.add(props)
    }

    pub fn remove_marker(&mut self, unique_id: &str) -> Result<(), BridgeError> {
        self.remove(ObjectKind::Marker, unique_id)
    }

    pub fn add_label(&mut self, props: LabelProps) -> Result<(), BridgeError> {
        self.add(props)
    }

    pub fn remove_label(&mut self, unique_id: &str) -> Result<(), BridgeError> {
        self.remove(ObjectKind::Label, unique_id)
    }

    pub fn add_polyline(&mut self, props: PolylineProps) -> Result<(), BridgeError> {
        self.add(props)
    }

    pub fn remove_polyline(&mut self, unique_id: &str) -> Result<(), BridgeError> {
        self.remove(ObjectKind::Polyline, unique_id)
    }

    pub fn add_polygon(&mut self, props: PolygonProps) -> Result<(), BridgeError> {
        self.add(props)
    }

    pub fn remove_polygon(&mut self, unique_id: &str) -> Result<(), BridgeError> {
        self.remove(ObjectKind::Polygon, unique_id)
    }

    pub fn add_html_marker(&mut self, props: HtmlMarkerProps) -> Result<(), BridgeError> {
        self.add(props)
    }

    pub fn remove_html_marker(&mut self, unique_id: &str) -> Result<(), BridgeError> {
        self.remove(ObjectKind::HtmlMarker, unique_id)
    }

    fn refit(&mut self) -> Result<(), BridgeError> {
        match self.auto_fit.fit_command(self.registry.fit_points()) {
            Some(command) => self.emit(&command),
            None => Ok(()),
        }
    }

    /// Ends the session. Queued adds and registered handlers are dropped.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closed;
        self.pending.clear();
        self.registry.clear();
        info!("session closed");
    }
}
