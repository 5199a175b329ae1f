//! RC input layer.
//!
//! [`RemoteControl`] samples the receiver through [`InputPins`](helm_traits::InputPins),
//! recognizes the arm, neutral and disarm stick gestures and walks the vehicle
//! through its lifecycle:
//!
//! ```text
//! Inactive -> BeingArmed -> Armed -> BeingDisarmed -> Disarmed -> Inactive
//! ```
//!
//! While armed it publishes a goal vector scaled by the limit table of the
//! mode picked with the rate/level selector switch.

mod comm;
mod params;
mod remote_control;
mod request;

use helm_goal_payloads::{Axis4r, GoalMode, VehicleStateType};
use helm_traits::HelmResult;

pub use comm::{LogCommLink, ThrottledCommLink};
pub use params::{read_params, Params, RcParams};
pub use remote_control::RemoteControl;
pub use request::RcRequest;

/// A source of goals for the controller stage.
pub trait GoalInput {
    /// Back to the configured default state with goal and timers zeroed.
    fn reset(&mut self);

    /// One periodic tick. Fatal errors mean the loop has to stop calling.
    fn update(&mut self) -> HelmResult<()>;

    fn goal(&self) -> &Axis4r;
    fn goal_mode(&self) -> &GoalMode;
    fn vehicle_state(&self) -> VehicleStateType;

    /// How long the current gesture has been held.
    fn request_duration_ms(&self) -> u64;
}
