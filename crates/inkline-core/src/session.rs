//! Input session: turns pointer events into strokes and notifies listeners.
//!
//! An [`InkSession`] owns the stroke currently being drawn. Listeners are
//! told when a stroke starts, grows, closes a section, finishes or is
//! discarded, so a renderer can rebuild only the open section and cache the
//! closed ones.

use crate::config::StrokeConfig;
use crate::point::RawPoint;
use crate::stroke::Stroke;
use kurbo::Point;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use uuid::Uuid;

/// Pointer input for a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerInput {
    Down {
        position: Point,
        pressure: f64,
        timestamp: f64,
    },
    Move {
        position: Point,
        pressure: f64,
        timestamp: f64,
    },
    Up,
    /// The platform took the pointer away (e.g. a palm-rejection gesture).
    Cancel,
}

/// Notifications published by an [`InkSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkEvent {
    StrokeStarted { id: Uuid },
    /// The open section changed and should be redrawn.
    StrokeUpdated { id: Uuid, open_section: usize },
    /// The section starting at `section_start` will not change anymore.
    SectionClosed { id: Uuid, section_start: usize },
    StrokeFinished { id: Uuid },
    StrokeDiscarded { id: Uuid },
}

/// Receiver of session events.
pub trait InkListener {
    fn on_event(&mut self, event: &InkEvent, stroke: &Stroke);
}

impl<F> InkListener for F
where
    F: FnMut(&InkEvent, &Stroke),
{
    fn on_event(&mut self, event: &InkEvent, stroke: &Stroke) {
        self(event, stroke)
    }
}

/// Forwards events to a channel, e.g. to a render thread.
pub struct ChannelListener(pub Sender<InkEvent>);

impl InkListener for ChannelListener {
    fn on_event(&mut self, event: &InkEvent, _stroke: &Stroke) {
        // A closed receiver just means nobody is listening anymore.
        let _ = self.0.send(*event);
    }
}

/// Handle returned by [`InkSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Drives one stroke at a time from pointer input.
pub struct InkSession {
    config: StrokeConfig,
    active: Option<(Uuid, Stroke)>,
    /// Position of the last accepted sample, for dropping repeated events.
    last_position: Option<Point>,
    listeners: Vec<(ListenerId, Box<dyn InkListener>)>,
    next_listener: u64,
}

impl InkSession {
    pub fn new(config: StrokeConfig) -> Self {
        Self {
            config,
            active: None,
            last_position: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: impl InkListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// The stroke being drawn, if any.
    pub fn active(&self) -> Option<(Uuid, &Stroke)> {
        self.active.as_ref().map(|(id, stroke)| (*id, stroke))
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Feed one pointer event. Returns the finished stroke on pointer-up.
    pub fn handle(&mut self, input: PointerInput) -> Option<(Uuid, Stroke)> {
        match input {
            PointerInput::Down {
                position,
                pressure,
                timestamp,
            } => {
                let finished = self.finish();
                self.begin(RawPoint::from_pointer_sample(position, pressure, timestamp));
                finished
            }
            PointerInput::Move {
                position,
                pressure,
                timestamp,
            } => {
                self.extend(RawPoint::from_pointer_sample(position, pressure, timestamp));
                None
            }
            PointerInput::Up => self.finish(),
            PointerInput::Cancel => {
                if let Some((id, stroke)) = self.active.take() {
                    debug!("Stroke {} discarded", id);
                    self.last_position = None;
                    emit(&mut self.listeners, &InkEvent::StrokeDiscarded { id }, &stroke);
                }
                None
            }
        }
    }

    fn begin(&mut self, raw: RawPoint) {
        let id = Uuid::new_v4();
        let mut stroke = Stroke::new(self.config.clone());
        stroke.push(raw);
        debug!("Stroke {} started", id);

        emit(&mut self.listeners, &InkEvent::StrokeStarted { id }, &stroke);
        emit(
            &mut self.listeners,
            &InkEvent::StrokeUpdated {
                id,
                open_section: stroke.last_section(),
            },
            &stroke,
        );
        self.last_position = Some(raw.position());
        self.active = Some((id, stroke));
    }

    fn extend(&mut self, raw: RawPoint) {
        let Some((id, stroke)) = self.active.as_mut() else {
            return;
        };
        if self.last_position == Some(raw.position()) {
            trace!("Dropping repeated sample at {:?}", raw.position());
            return;
        }
        self.last_position = Some(raw.position());

        let known = stroke.sections().len();
        stroke.push(raw);

        let id = *id;
        let sections = stroke.sections();
        for &section_start in &sections[known - 1..sections.len() - 1] {
            debug!("Stroke {} closed section {}", id, section_start);
            emit(
                &mut self.listeners,
                &InkEvent::SectionClosed { id, section_start },
                stroke,
            );
        }
        emit(
            &mut self.listeners,
            &InkEvent::StrokeUpdated {
                id,
                open_section: stroke.last_section(),
            },
            stroke,
        );
    }

    fn finish(&mut self) -> Option<(Uuid, Stroke)> {
        let (id, stroke) = self.active.take()?;
        self.last_position = None;
        debug!("Stroke {} finished with {} points", id, stroke.len());
        emit(&mut self.listeners, &InkEvent::StrokeFinished { id }, &stroke);
        Some((id, stroke))
    }
}

fn emit(listeners: &mut [(ListenerId, Box<dyn InkListener>)], event: &InkEvent, stroke: &Stroke) {
    for (_, listener) in listeners.iter_mut() {
        listener.on_event(event, stroke);
    }
}
