//! Inkline Core Library
//!
//! Incremental stroke model and outline generation for pressure-sensitive
//! freehand ink. Points are pushed as they are sampled; outlines are queried
//! per section so closed sections can be cached by the renderer.

pub mod config;
pub mod error;
pub mod point;
pub mod session;
pub mod spring;
pub mod stroke;
pub mod sync;
pub mod vector;

mod outline;

pub use config::{SmoothingPolicy, SpreadConfig, SpringConfig, StrokeConfig, TailConfig};
pub use error::{StrokeError, StrokeResult};
pub use point::{Point, RawPoint};
pub use session::{ChannelListener, InkEvent, InkListener, InkSession, ListenerId, PointerInput};
pub use spring::Spring;
pub use stroke::Stroke;
pub use sync::{StrokeBroadcaster, StrokeMessage, StrokeReplica};
