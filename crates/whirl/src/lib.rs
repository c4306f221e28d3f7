pub mod macros;

pub mod animator;
pub mod choice;
pub mod driver;
pub mod physics;
pub mod segment;

pub use animator::{Animator, Resolution, SpinTicket, StepResult, WheelError, WheelState};
pub use choice::{Choice, Label, LoadError};
pub use driver::{Surface, Tick};
pub use physics::{Physics, RngSpeed, SpeedSource, ThreadSpeed};
