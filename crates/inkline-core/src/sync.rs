//! Stroke replication messages.
//!
//! A drawing client sends the points of its active stroke as `append`
//! messages keyed by point index. Replicas feed them through
//! [`Stroke::insert`], so messages may arrive in any order: batches that
//! arrive early wait in the stroke's pending buffer.
//!
//! ```json
//! { "type": "begin", "stroke": "<uuid>" }
//! { "type": "append", "stroke": "<uuid>", "from_index": 0, "points": [...] }
//! { "type": "end", "stroke": "<uuid>" }
//! ```

use crate::config::StrokeConfig;
use crate::error::StrokeResult;
use crate::point::RawPoint;
use crate::stroke::Stroke;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A stroke edit sent between peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrokeMessage {
    Begin { stroke: Uuid },
    /// Retained points starting at `from_index`.
    Append {
        stroke: Uuid,
        from_index: usize,
        points: Vec<RawPoint>,
    },
    End { stroke: Uuid },
}

impl StrokeMessage {
    pub fn stroke_id(&self) -> Uuid {
        match self {
            StrokeMessage::Begin { stroke }
            | StrokeMessage::Append { stroke, .. }
            | StrokeMessage::End { stroke } => *stroke,
        }
    }

    pub fn to_json(&self) -> StrokeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(input: &str) -> StrokeResult<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Produces messages for a locally drawn stroke.
#[derive(Debug, Clone)]
pub struct StrokeBroadcaster {
    id: Uuid,
    /// Number of points already sent.
    sent: usize,
}

impl StrokeBroadcaster {
    /// Start broadcasting stroke `id`.
    pub fn new(id: Uuid) -> (Self, StrokeMessage) {
        (Self { id, sent: 0 }, StrokeMessage::Begin { stroke: id })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Points retained since the last call, if any.
    ///
    /// A pressure fold into an already-sent point is not resent.
    pub fn poll(&mut self, stroke: &Stroke) -> Option<StrokeMessage> {
        let points = stroke.points();
        if points.len() <= self.sent {
            return None;
        }

        let from_index = self.sent;
        self.sent = points.len();
        Some(StrokeMessage::Append {
            stroke: self.id,
            from_index,
            points: points[from_index..].iter().map(|p| p.position).collect(),
        })
    }

    pub fn end(self) -> StrokeMessage {
        StrokeMessage::End { stroke: self.id }
    }
}

/// Strokes rebuilt from remote messages.
pub struct StrokeReplica {
    config: StrokeConfig,
    strokes: HashMap<Uuid, Stroke>,
    finished: HashSet<Uuid>,
}

impl Default for StrokeReplica {
    fn default() -> Self {
        Self::new(StrokeConfig::replica())
    }
}

impl StrokeReplica {
    /// `config` should not smooth or skip, see [`StrokeConfig::replica`].
    pub fn new(config: StrokeConfig) -> Self {
        Self {
            config,
            strokes: HashMap::new(),
            finished: HashSet::new(),
        }
    }

    /// Apply one message. An `append` may arrive before its `begin`.
    pub fn apply(&mut self, message: StrokeMessage) -> StrokeResult<()> {
        match message {
            StrokeMessage::Begin { stroke } => {
                debug!("Remote stroke {} started", stroke);
                self.stroke_mut(stroke);
            }
            StrokeMessage::Append {
                stroke,
                from_index,
                points,
            } => {
                if self.finished.contains(&stroke) {
                    warn!("Append to finished stroke {}", stroke);
                }
                self.stroke_mut(stroke).insert(from_index, points)?;
            }
            StrokeMessage::End { stroke } => {
                debug!("Remote stroke {} finished", stroke);
                self.finished.insert(stroke);
            }
        }
        Ok(())
    }

    fn stroke_mut(&mut self, id: Uuid) -> &mut Stroke {
        self.strokes
            .entry(id)
            .or_insert_with(|| Stroke::new(self.config.clone()))
    }

    pub fn get(&self, id: &Uuid) -> Option<&Stroke> {
        self.strokes.get(id)
    }

    pub fn is_finished(&self, id: &Uuid) -> bool {
        self.finished.contains(id)
    }

    /// Remove a stroke, e.g. once it has been committed to the document.
    pub fn take(&mut self, id: &Uuid) -> Option<Stroke> {
        self.finished.remove(id);
        self.strokes.remove(id)
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
