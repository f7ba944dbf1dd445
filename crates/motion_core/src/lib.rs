//! Motion Playground Core
//!
//! Foundational primitives shared by the playground crates:
//!
//! - **Colors**: RGBA colors with hex parsing and channel-wise interpolation
//! - **State Machines**: Typed state machines for animation run cycles
//! - **Property Notification**: Observer-style change notification for view-models
//!
//! # Example
//!
//! ```rust
//! use motion_core::Color;
//!
//! let from = Color::from_hex(0x000000);
//! let to = Color::parse_hex("#FFFFFF").unwrap();
//!
//! let mid = from.lerp(to, 0.5);
//! assert!((mid.r - 0.5).abs() < 1e-6);
//! ```

pub mod color;
pub mod fsm;
pub mod notify;

pub use color::{Color, ColorParseError};
pub use fsm::{StateMachine, StateMachineBuilder, Transition, DEFAULT_HISTORY_LIMIT};
pub use notify::{PropertyChanged, PropertyNotifier, SubscriptionId};
