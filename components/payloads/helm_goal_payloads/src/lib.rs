//! Payloads exchanged between the pilot input layer and the controller stage.
//!
//! The goal is a 4-slot vector (roll, pitch, yaw, throttle) and comes with a
//! [`GoalMode`], a 4-slot vector of tags telling the controller how to read
//! each slot.

mod axis;
mod goal_mode;
mod vehicle;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

pub use axis::{Axis3, Axis3r, Axis4, Axis4r};
pub use goal_mode::{
    GoalMode, GoalModeType, ALL_RATE_MODE, POSITION_MODE, STANDARD_ANGLE_MODE, UNKNOWN_MODE,
    VELOCITY_MODE, VELOCITY_XY_POS_Z_MODE,
};
pub use vehicle::{GeoPoint, VehicleState, VehicleStateType};

/// What the input layer published at a given tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct GoalFrame {
    pub timestamp_ms: u64,
    pub state: VehicleStateType,
    pub goal: Axis4r,
    pub goal_mode: GoalMode,
}
