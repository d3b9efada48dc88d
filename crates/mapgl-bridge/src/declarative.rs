//! Component-style object lifecycle on top of [`MapSession`].

use crate::channel::MessageSink;
use crate::error::BridgeError;
use crate::registry::ObjectProps;
use crate::session::{MapSession, ObjectDecl};
use mapgl_protocol::ObjectOptions;
use std::marker::PhantomData;

/// One mounted declarative object.
///
/// [`render`](Declared::render) re-adds the object only when its serialized
/// props differ from the last render; press handlers are not part of that
/// comparison. [`unmount`](Declared::unmount) removes it.
#[derive(Debug)]
pub struct Declared<O> {
    unique_id: Option<String>,
    rendered: Option<String>,
    _kind: PhantomData<O>,
}

impl<O> Default for Declared<O> {
    fn default() -> Self {
        Declared {
            unique_id: None,
            rendered: None,
            _kind: PhantomData,
        }
    }
}

impl<O> Declared<O>
where
    O: ObjectOptions,
    ObjectDecl: From<ObjectProps<O>>,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unique_id(&self) -> Option<&str> {
        self.unique_id.as_deref()
    }

    /// Returns whether an add was issued.
    pub fn render<C: MessageSink>(
        &mut self,
        session: &mut MapSession<C>,
        props: ObjectProps<O>,
    ) -> Result<bool, BridgeError> {
        let snapshot = serde_json::to_string(&props.params())?;
        if self.rendered.as_deref() == Some(snapshot.as_str()) {
            return Ok(false);
        }
        // An id change means a different object; drop the old one.
        if let Some(previous) = self.unique_id.as_deref() {
            if previous != props.unique_id {
                session.remove(O::KIND, previous)?;
                self.unique_id = None;
                self.rendered = None;
            }
        }
        let unique_id = props.unique_id.clone();
        session.add(props)?;
        self.unique_id = Some(unique_id);
        self.rendered = Some(snapshot);
        Ok(true)
    }

    pub fn unmount<C: MessageSink>(self, session: &mut MapSession<C>) -> Result<(), BridgeError> {
        match self.unique_id {
            Some(unique_id) => session.remove(O::KIND, &unique_id),
            None => Ok(()),
        }
    }
}
