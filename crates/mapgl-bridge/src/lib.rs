//! Host <-> embedded map bridge.
//!
//! The host drives a [`MapSession`]: it sends `init` when the embedded page
//! has loaded, exposes one method per map operation, tracks declarative
//! objects in an [`ObjectRegistry`] and keeps the camera framed around them
//! (auto-fit). Inbound events are routed to the callbacks in
//! [`MapCallbacks`].
//!
//! The embedded page runs the same operations from the [`mirror`] table,
//! either as the generated JS ([`WebContent`]) or natively through
//! [`EmbeddedMapState`] over any [`MapSdk`] implementation.
//!
//! ```
//! use mapgl_bridge::{MapCallbacks, MapSession, Outbox};
//! use mapgl_protocol::MapOptions;
//!
//! let outbox = Outbox::new();
//! let mut session = MapSession::new(outbox.clone(), MapOptions::default(), MapCallbacks::new());
//! session.on_load_end().unwrap();
//! assert_eq!(outbox.pop().as_deref(), Some(r#"{"function":"init","params":{}}"#));
//!
//! session.handle_message(r#"{"type":"inited"}"#);
//! assert!(session.is_initialized());
//! ```

pub mod autofit;
pub mod channel;
pub mod cli;
pub mod config;
pub mod declarative;
pub mod document;
pub mod embedded;
pub mod error;
pub mod events;
pub mod mirror;
pub mod registry;
pub mod sdk;
pub mod session;

pub use autofit::{union_bounds, AutoFitSetting};
pub use channel::{MessageSink, Outbox};
pub use config::{BridgeConfig, FadeIn, Injections};
pub use declarative::Declared;
pub use document::WebContent;
pub use embedded::{EmbeddedMapState, MapContext, MapRuntime, ObjectTables};
pub use error::{BridgeError, SdkError};
pub use events::{route, MapCallbacks, Route};
pub use mirror::{mirror_table, MirrorTable, OperationDefinition};
pub use registry::{
    HtmlMarkerProps, LabelProps, MarkerProps, ObjectProps, ObjectRegistry, PolygonProps,
    PolylineProps,
};
pub use sdk::{MapSdk, ObjectHandle};
pub use session::{MapSession, ObjectDecl, SessionState};
