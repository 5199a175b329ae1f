use crate::axis::Axis4;
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// How the controller stage has to interpret one slot of the goal vector.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum GoalModeType {
    #[default]
    Unknown = 0,
    Passthrough = 1,
    AngleLevel = 2,
    AngleRate = 3,
    VelocityWorld = 4,
    PositionWorld = 5,
    ConstantOutput = 6,
}

impl GoalModeType {
    pub const fn as_str(self) -> &'static str {
        match self {
            GoalModeType::Unknown => "unknown",
            GoalModeType::Passthrough => "passthrough",
            GoalModeType::AngleLevel => "level",
            GoalModeType::AngleRate => "rate",
            GoalModeType::VelocityWorld => "velocity",
            GoalModeType::PositionWorld => "position",
            GoalModeType::ConstantOutput => "constant",
        }
    }
}

impl Display for GoalModeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mode tag per goal slot: roll, pitch, yaw, throttle.
/// `GoalMode::default()` is all `Unknown`, not the standard angle mode.
pub type GoalMode = Axis4<GoalModeType>;

use GoalModeType::*;

pub static STANDARD_ANGLE_MODE: GoalMode =
    Axis4::new(AngleLevel, AngleLevel, AngleRate, Passthrough);
pub static ALL_RATE_MODE: GoalMode = Axis4::new(AngleRate, AngleRate, AngleRate, Passthrough);
pub static VELOCITY_XY_POS_Z_MODE: GoalMode =
    Axis4::new(VelocityWorld, VelocityWorld, AngleRate, PositionWorld);
pub static VELOCITY_MODE: GoalMode =
    Axis4::new(VelocityWorld, VelocityWorld, AngleRate, VelocityWorld);
pub static POSITION_MODE: GoalMode =
    Axis4::new(PositionWorld, PositionWorld, AngleRate, PositionWorld);
pub static UNKNOWN_MODE: GoalMode = Axis4::new(Unknown, Unknown, Unknown, Unknown);

impl Axis4<GoalModeType> {
    /// Levels commanded on roll/pitch, rate on yaw, throttle passed through.
    pub fn standard_angle_mode() -> &'static GoalMode {
        &STANDARD_ANGLE_MODE
    }

    pub fn all_rate_mode() -> &'static GoalMode {
        &ALL_RATE_MODE
    }

    pub fn velocity_xy_pos_z_mode() -> &'static GoalMode {
        &VELOCITY_XY_POS_Z_MODE
    }

    pub fn velocity_mode() -> &'static GoalMode {
        &VELOCITY_MODE
    }

    pub fn position_mode() -> &'static GoalMode {
        &POSITION_MODE
    }

    pub fn unknown_mode() -> &'static GoalMode {
        &UNKNOWN_MODE
    }

    /// Mode not determined yet. Never hand this to a controller.
    pub fn is_unknown(&self) -> bool {
        *self == UNKNOWN_MODE
    }
}

impl Display for Axis4<GoalModeType> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.roll(),
            self.pitch(),
            self.yaw(),
            self.throttle()
        )
    }
}
