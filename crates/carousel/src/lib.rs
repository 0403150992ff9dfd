//! # carousel
//!
//! A rotating carousel ("streamRotate") that works directly on an
//! [`html::Document`]: one item visible at a time, previous/next controls,
//! one indicator dot per item and an optional auto-advance timer.
//!
//! - [`CarouselController`]: attaches carousels to containers and routes
//!   clicks, commands and timer ticks to them
//! - [`CarouselConfig`]: the option set (`selector`, `autoRotateSpeed`, `height`)
//! - [`Command`]: tagged operations, plus parsing of the "options or method
//!   name" calling convention
//! - [`TimerQueue`]: the deterministic clock the controller schedules on
//!
//! ```
//! use carousel::{CarouselConfig, CarouselController};
//! use html::build::{doc, elem, text};
//! use html::Document;
//!
//! let slides = (0..3)
//!     .map(|i| elem("figure", &[("class", "slide")], vec![text(&i.to_string())]))
//!     .collect();
//! let mut dom = Document::from_node(&doc(vec![elem("div", &[], slides)]));
//! let host = dom.children(dom.root())[0];
//!
//! let mut carousels = CarouselController::new();
//! carousels.initialize(&mut dom, host, &CarouselConfig::new(".slide")).unwrap();
//!
//! let next = carousels.get(host).unwrap().parts().nav_right;
//! carousels.click(&mut dom, next).unwrap();
//! assert_eq!(carousels.get(host).unwrap().position(), 1);
//! ```

mod command;
mod config;
mod controller;
mod error;
pub mod events;
pub mod markup;
mod state;
mod timers;

pub use command::{Command, Direction};
pub use config::{CarouselConfig, CarouselSettings, ConfigError};
pub use controller::CarouselController;
pub use error::CarouselError;
pub use markup::CarouselParts;
pub use state::{CarouselState, InstanceId, Rotation};
pub use timers::{Millis, TimerId, TimerQueue};
