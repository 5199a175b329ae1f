use bincode::{Decode, Encode};
use helm_traits::{ErrorKind, HelmError, HelmResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Geographic position. The all-NaN point means no home has been set yet.
#[derive(Debug, Clone, Copy, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f32,
}

impl GeoPoint {
    pub const NAN: GeoPoint = GeoPoint {
        latitude: f64::NAN,
        longitude: f64::NAN,
        altitude: f32::NAN,
    };

    pub const fn new(latitude: f64, longitude: f64, altitude: f32) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Only the latitude is checked.
    pub fn is_nan(&self) -> bool {
        self.latitude.is_nan()
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::NAN
    }
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum VehicleStateType {
    #[default]
    Unknown = 0,
    Inactive = 1,
    BeingArmed = 2,
    Armed = 3,
    Active = 4,
    BeingDisarmed = 5,
    Disarmed = 6,
}

impl VehicleStateType {
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleStateType::Unknown => "unknown",
            VehicleStateType::Inactive => "inactive",
            VehicleStateType::BeingArmed => "being armed",
            VehicleStateType::Armed => "armed",
            VehicleStateType::Active => "active",
            VehicleStateType::BeingDisarmed => "being disarmed",
            VehicleStateType::Disarmed => "disarmed",
        }
    }
}

impl Display for VehicleStateType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse lifecycle of the vehicle, guarded by the home point invariant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct VehicleState {
    state: VehicleStateType,
    home_point: GeoPoint,
}

impl VehicleState {
    pub fn state(&self) -> VehicleStateType {
        self.state
    }

    pub fn home_geo_point(&self) -> &GeoPoint {
        &self.home_point
    }

    /// Armed needs a home point with a valid latitude, which is then kept.
    /// Other states ignore `home_point`.
    pub fn set_state(&mut self, state: VehicleStateType, home_point: GeoPoint) -> HelmResult<()> {
        if state == VehicleStateType::Armed {
            if home_point.is_nan() {
                return Err(HelmError::new(
                    ErrorKind::InvalidPrecondition,
                    "home_point must be supplied to set armed state",
                ));
            }
            self.home_point = home_point;
        }
        self.state = state;
        Ok(())
    }
}
