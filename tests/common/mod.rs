//! Shared test doubles: a recording set of surfaces and a scripted source.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use docviewer::api::{ApiError, DocumentPayload};
use docviewer::viewer::{
    Clipboard, DocumentSource, LoadingIndicator, NotificationKind, Notifier, OverlayHost,
    PrintSurface, RenderedOverlay, SurfaceError, Surfaces,
};

/// Everything the controller did to its surfaces, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LoadingShown(String),
    LoadingHidden,
    Notified(NotificationKind, String),
    Mounted(RenderedOverlay),
    BodySet(String),
    ToggleLabelSet(String),
    Unmounted,
    Copied(String),
    Printed { title: String, document: String },
}

#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
    pub clipboard_fails: AtomicBool,
    pub printer_fails: AtomicBool,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn surfaces(self: &Arc<Self>) -> Surfaces {
        Surfaces {
            loading: self.clone(),
            notifier: self.clone(),
            overlay: self.clone(),
            clipboard: self.clone(),
            printer: self.clone(),
        }
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn notifications(&self) -> Vec<(NotificationKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notified(kind, message) => Some((kind, message)),
                _ => None,
            })
            .collect()
    }

    pub fn mounts(&self) -> Vec<RenderedOverlay> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Mounted(overlay) => Some(overlay),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Event) -> usize {
        self.events().iter().filter(|e| *e == wanted).count()
    }

    pub fn loading_shown(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::LoadingShown(_)))
            .count()
    }

    pub fn loading_hidden(&self) -> usize {
        self.count(&Event::LoadingHidden)
    }

    /// Body the overlay currently displays, replaying mounts and updates.
    pub fn visible_body(&self) -> Option<String> {
        let mut body = None;
        for event in self.events() {
            match event {
                Event::Mounted(overlay) => body = Some(overlay.body),
                Event::BodySet(b) => body = Some(b),
                Event::Unmounted => body = None,
                _ => {}
            }
        }
        body
    }
}

impl LoadingIndicator for Recorder {
    fn show(&self, message: &str) {
        self.push(Event::LoadingShown(message.to_string()));
    }

    fn hide(&self) {
        self.push(Event::LoadingHidden);
    }
}

impl Notifier for Recorder {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.push(Event::Notified(kind, message.to_string()));
    }
}

impl OverlayHost for Recorder {
    fn mount(&self, overlay: &RenderedOverlay) {
        self.push(Event::Mounted(overlay.clone()));
    }

    fn set_body(&self, body: &str) {
        self.push(Event::BodySet(body.to_string()));
    }

    fn set_toggle_label(&self, label: &str) {
        self.push(Event::ToggleLabelSet(label.to_string()));
    }

    fn unmount(&self) {
        self.push(Event::Unmounted);
    }
}

impl Clipboard for Recorder {
    fn write_text(&self, text: &str) -> Result<(), SurfaceError> {
        if self.clipboard_fails.load(Ordering::SeqCst) {
            return Err(SurfaceError::PermissionDenied("clipboard-write".to_string()));
        }
        self.push(Event::Copied(text.to_string()));
        Ok(())
    }
}

impl PrintSurface for Recorder {
    fn print(&self, title: &str, document: &str) -> Result<(), SurfaceError> {
        if self.printer_fails.load(Ordering::SeqCst) {
            return Err(SurfaceError::Unavailable("popup blocked".to_string()));
        }
        self.push(Event::Printed {
            title: title.to_string(),
            document: document.to_string(),
        });
        Ok(())
    }
}

/// Canned backend reply for one document id.
#[derive(Debug, Clone)]
pub enum Reply {
    Document(DocumentPayload),
    Status(u16, Option<String>),
    Application(String),
}

impl Reply {
    fn into_result(self, doc_id: &str) -> Result<DocumentPayload, ApiError> {
        match self {
            Reply::Document(mut payload) => {
                payload.document_id = doc_id.to_string();
                Ok(payload)
            }
            Reply::Status(status, message) => Err(ApiError::Status { status, message }),
            Reply::Application(message) => Err(ApiError::Application(message)),
        }
    }
}

struct Script {
    reply: Reply,
    gate: Option<Arc<Notify>>,
}

/// Document source answering from a script, optionally holding a reply
/// until its gate is opened.
#[derive(Default)]
pub struct ScriptedSource {
    scripts: Mutex<HashMap<String, Script>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, doc_id: &str, reply: Reply) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(doc_id.to_string(), Script { reply, gate: None });
        self
    }

    /// Reply only after the returned gate is notified.
    pub fn gated_reply(self, doc_id: &str, reply: Reply) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.scripts.lock().unwrap().insert(
            doc_id.to_string(),
            Script {
                reply,
                gate: Some(gate.clone()),
            },
        );
        (self, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentSource for ScriptedSource {
    async fn fetch_full_document(
        &self,
        doc_id: &str,
        _query: &str,
    ) -> Result<DocumentPayload, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (reply, gate) = {
            let scripts = self.scripts.lock().unwrap();
            match scripts.get(doc_id) {
                Some(script) => (script.reply.clone(), script.gate.clone()),
                None => (Reply::Status(404, None), None),
            }
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        reply.into_result(doc_id)
    }
}

pub fn payload(name: &str, content: &str) -> DocumentPayload {
    DocumentPayload {
        document_id: String::new(),
        document_name: name.to_string(),
        score_percentage: "91%".to_string(),
        word_count: 120,
        full_content: content.to_string(),
    }
}

pub const BAGHDAD: &str = "<mark>بغداد</mark> هي عاصمة <b>الخلافة</b> <mark class=\"search-highlight\">العباسية</mark>";
