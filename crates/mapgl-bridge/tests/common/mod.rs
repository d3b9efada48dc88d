//! Shared test doubles: a scripted map SDK and a host <-> embedded loopback.
#![allow(dead_code)]

use mapgl_bridge::{
    AutoFitSetting, EmbeddedMapState, MapCallbacks, MapSdk, MapSession, ObjectHandle, Outbox,
    SdkError,
};
use mapgl_protocol::{
    AnimationOptions, FitBoundsOptions, LngLat, LngLatBounds, MapEventKind, MapOptions,
    ObjectKind, PartialPadding, RotationAnimationOptions, StyleOptions, ZoomAnimationOptions,
};
use serde_json::Value;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::Rc;

/// What the fake map looks like after a sequence of calls.
#[derive(Debug, Default)]
pub struct FakeMap {
    pub created_with: Option<MapOptions>,
    pub subscriptions: Vec<MapEventKind>,
    pub center: Option<LngLat>,
    pub zoom: f64,
    pub style_zoom: f64,
    pub rotation: f64,
    pub pitch: f64,
    pub style_id: Option<String>,
    pub traffic: bool,
    /// Every mutating call, as `name` or `name:arg`.
    pub calls: Vec<String>,
    pub fitted: Vec<(LngLatBounds, Option<FitBoundsOptions>)>,
    pub live: BTreeMap<u64, (ObjectKind, Value)>,
    pub clickable: BTreeMap<u64, String>,
    pub destroyed: Vec<u64>,
    next_handle: u64,
    /// Call name that fails with an SDK error.
    pub fail_on: Option<&'static str>,
}

impl FakeMap {
    /// Live objects of `kind` as (handle, options).
    pub fn live_of(&self, kind: ObjectKind) -> Vec<(u64, &Value)> {
        self.live
            .iter()
            .filter(|(_, (k, _))| *k == kind)
            .map(|(h, (_, v))| (*h, v))
            .collect()
    }

    fn record(&mut self, call: impl Into<String>) -> Result<(), SdkError> {
        let call = call.into();
        let name = call.split(':').next().unwrap_or_default().to_string();
        self.calls.push(call);
        match self.fail_on {
            Some(failing) if failing == name => Err(SdkError::new(format!("{name} failed"))),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeSdk(pub Rc<RefCell<FakeMap>>);

impl FakeSdk {
    pub fn map(&self) -> Ref<'_, FakeMap> {
        self.0.borrow()
    }

    pub fn map_mut(&self) -> RefMut<'_, FakeMap> {
        self.0.borrow_mut()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.map()
            .calls
            .iter()
            .filter(|c| c.split(':').next() == Some(name))
            .count()
    }
}

impl MapSdk for FakeSdk {
    fn create_map(&mut self, container: &str, options: &MapOptions) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record(format!("createMap:{container}"))?;
        map.center = options.center;
        map.zoom = options.zoom.unwrap_or(0.0);
        map.style_id = options.style.clone();
        map.created_with = Some(options.clone());
        Ok(())
    }

    fn subscribe(&mut self, event: MapEventKind) -> Result<(), SdkError> {
        self.map_mut().subscriptions.push(event);
        Ok(())
    }

    fn center(&self) -> Option<LngLat> {
        self.map().center
    }

    fn zoom(&self) -> f64 {
        self.map().zoom
    }

    fn style_zoom(&self) -> f64 {
        self.map().style_zoom
    }

    fn rotation(&self) -> f64 {
        self.map().rotation
    }

    fn pitch(&self) -> f64 {
        self.map().pitch
    }

    fn set_center(&mut self, center: LngLat, _: Option<&AnimationOptions>) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record(format!("setCenter:{},{}", center[0], center[1]))?;
        map.center = Some(center);
        Ok(())
    }

    fn set_zoom(&mut self, zoom: f64, _: Option<&ZoomAnimationOptions>) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record(format!("setZoom:{zoom}"))?;
        map.zoom = zoom;
        Ok(())
    }

    fn set_style_zoom(&mut self, style_zoom: f64, _: Option<&AnimationOptions>) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record(format!("setStyleZoom:{style_zoom}"))?;
        map.style_zoom = style_zoom;
        Ok(())
    }

    fn set_rotation(
        &mut self,
        rotation: f64,
        _: Option<&RotationAnimationOptions>,
    ) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record(format!("setRotation:{rotation}"))?;
        map.rotation = rotation;
        Ok(())
    }

    fn set_pitch(&mut self, pitch: f64, _: Option<&AnimationOptions>) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record(format!("setPitch:{pitch}"))?;
        map.pitch = pitch;
        Ok(())
    }

    fn set_min_zoom(&mut self, zoom: f64, _: Option<&AnimationOptions>) -> Result<(), SdkError> {
        self.map_mut().record(format!("setMinZoom:{zoom}"))
    }

    fn set_max_zoom(&mut self, zoom: f64, _: Option<&AnimationOptions>) -> Result<(), SdkError> {
        self.map_mut().record(format!("setMaxZoom:{zoom}"))
    }

    fn set_min_pitch(&mut self, pitch: f64, _: Option<&AnimationOptions>) -> Result<(), SdkError> {
        self.map_mut().record(format!("setMinPitch:{pitch}"))
    }

    fn set_max_pitch(&mut self, pitch: f64, _: Option<&AnimationOptions>) -> Result<(), SdkError> {
        self.map_mut().record(format!("setMaxPitch:{pitch}"))
    }

    fn set_low_zoom_max_pitch(
        &mut self,
        pitch: f64,
        _: Option<&AnimationOptions>,
    ) -> Result<(), SdkError> {
        self.map_mut().record(format!("setLowZoomMaxPitch:{pitch}"))
    }

    fn set_max_bounds(&mut self, _: &LngLatBounds) -> Result<(), SdkError> {
        self.map_mut().record("setMaxBounds")
    }

    fn show_traffic(&mut self) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record("showTraffic")?;
        map.traffic = true;
        Ok(())
    }

    fn hide_traffic(&mut self) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record("hideTraffic")?;
        map.traffic = false;
        Ok(())
    }

    fn set_language(&mut self, lang: &str) -> Result<(), SdkError> {
        self.map_mut().record(format!("setLanguage:{lang}"))
    }

    fn set_padding(&mut self, _: &PartialPadding, _: Option<&AnimationOptions>) -> Result<(), SdkError> {
        self.map_mut().record("setPadding")
    }

    fn fit_bounds(
        &mut self,
        bounds: &LngLatBounds,
        options: Option<&FitBoundsOptions>,
    ) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record("fitBounds")?;
        map.fitted.push((*bounds, options.cloned()));
        Ok(())
    }

    fn set_style_by_id(&mut self, style_id: &str) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record(format!("setStyleById:{style_id}"))?;
        map.style_id = Some(style_id.to_string());
        Ok(())
    }

    fn set_style_from_url(&mut self, url: &str, _: &StyleOptions) -> Result<(), SdkError> {
        self.map_mut().record(format!("setStyleFromUrl:{url}"))
    }

    fn create_object(&mut self, kind: ObjectKind, options: &Value) -> Result<ObjectHandle, SdkError> {
        let mut map = self.map_mut();
        map.record(format!("create:{kind}"))?;
        map.next_handle += 1;
        let handle = map.next_handle;
        map.live.insert(handle, (kind, options.clone()));
        Ok(ObjectHandle(handle))
    }

    fn watch_clicks(&mut self, object: ObjectHandle, unique_id: &str) -> Result<(), SdkError> {
        self.map_mut().clickable.insert(object.0, unique_id.to_string());
        Ok(())
    }

    fn destroy_object(&mut self, object: ObjectHandle) -> Result<(), SdkError> {
        let mut map = self.map_mut();
        map.record(format!("destroy:{}", object.0))?;
        map.live.remove(&object.0);
        map.clickable.remove(&object.0);
        map.destroyed.push(object.0);
        Ok(())
    }
}

/// A host session wired to an embedded executor through two outboxes.
pub struct Loopback {
    pub session: MapSession<Outbox>,
    pub embedded: EmbeddedMapState<FakeSdk, Outbox>,
    pub sdk: FakeSdk,
    /// Host -> embedded.
    pub commands: Outbox,
    /// Embedded -> host.
    pub events: Outbox,
    /// Every command string delivered so far.
    pub sent: Vec<String>,
}

impl Loopback {
    pub fn new(options: MapOptions, callbacks: MapCallbacks) -> Self {
        Self::with_auto_fit(options, callbacks, AutoFitSetting::default())
    }

    pub fn with_auto_fit(
        options: MapOptions,
        callbacks: MapCallbacks,
        auto_fit: AutoFitSetting,
    ) -> Self {
        let commands = Outbox::new();
        let events = Outbox::new();
        let sdk = FakeSdk::default();
        Loopback {
            session: MapSession::new(commands.clone(), options, callbacks).with_auto_fit(auto_fit),
            embedded: EmbeddedMapState::new(sdk.clone(), events.clone()),
            sdk,
            commands,
            events,
            sent: Vec::new(),
        }
    }

    /// Delivers queued messages both ways until nothing is in flight.
    pub fn pump(&mut self) {
        loop {
            let commands = self.commands.drain();
            let events = self.events.drain();
            if commands.is_empty() && events.is_empty() {
                break;
            }
            for command in commands {
                self.embedded.receive(&command);
                self.sent.push(command);
            }
            for event in events {
                self.session.handle_message(&event);
            }
        }
    }

    /// Load end plus the full init handshake.
    pub fn start(&mut self) {
        self.session.on_load_end().unwrap();
        self.pump();
    }

    /// Simulates a click on the live object watched under `unique_id`.
    pub fn click(&mut self, unique_id: &str) {
        let watched = self
            .sdk
            .map()
            .clickable
            .values()
            .any(|id| id == unique_id);
        assert!(watched, "{unique_id} is not clickable");
        self.embedded.object_clicked(unique_id);
        self.pump();
    }

    /// Function names of every delivered command, in order.
    pub fn sent_functions(&self) -> Vec<String> {
        self.sent
            .iter()
            .map(|m| {
                serde_json::from_str::<Value>(m).unwrap()["function"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect()
    }
}
