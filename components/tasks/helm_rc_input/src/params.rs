use helm_goal_payloads::{Axis3r, Axis4, GoalMode, VehicleStateType};
use helm_traits::{ErrorKind, HelmError, HelmResult};
use ron::extensions::Extensions;
use ron::Options;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

const DEFAULT_MIN_ARMED_THROTTLE: f32 = 0.1;
const DEFAULT_ANGLE_LIMIT_DEG: f32 = 25.0;
const DEFAULT_YAW_RATE_LIMIT_DPS: f32 = 180.0;
const DEFAULT_ACRO_RATE_DPS: f32 = 360.0;

/// Receiver side settings: channel map, gesture timings and thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcParams {
    /// Board channel ids for roll, pitch, yaw and throttle.
    pub channels: Axis4<u16>,
    /// Three way switch selecting level or rate control.
    pub rate_level_mode_channel: u16,
    pub read_interval_ms: u64,
    pub arm_duration_ms: u64,
    pub neutral_duration_ms: u64,
    pub disarm_duration_ms: u64,
    /// Stick slack for gestures, in normalized units.
    pub action_request_tolerance: f32,
    /// Selector readings below this value mean level mode.
    pub max_angle_level_switch: f32,
    /// Floor applied to the throttle goal while flying.
    pub min_angling_throttle: f32,
}

impl Default for RcParams {
    fn default() -> Self {
        Self {
            // roll, pitch, yaw, throttle on an AETR receiver
            channels: Axis4::new(0, 1, 3, 2),
            rate_level_mode_channel: 4,
            read_interval_ms: 10,
            arm_duration_ms: 100,
            neutral_duration_ms: 100,
            disarm_duration_ms: 100,
            action_request_tolerance: 0.1,
            // for 3 way switch, 1/3 value for each position
            max_angle_level_switch: 0.3,
            min_angling_throttle: DEFAULT_MIN_ARMED_THROTTLE / 1.5,
        }
    }
}

/// Immutable parameter block handed to the input layer at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Throttle held while arming so the motors idle.
    pub min_armed_throttle: f32,
    pub rc: RcParams,
    /// Full stick deflection in level mode: radians on roll/pitch, rad/s on yaw.
    pub angle_level_limit: Axis3r,
    /// Full stick deflection in rate mode, rad/s.
    pub angle_rate_limit: Axis3r,
    pub default_goal_mode: GoalMode,
    pub default_vehicle_state: VehicleStateType,
}

impl Default for Params {
    fn default() -> Self {
        let angle = DEFAULT_ANGLE_LIMIT_DEG.to_radians();
        let acro = DEFAULT_ACRO_RATE_DPS.to_radians();
        Self {
            min_armed_throttle: DEFAULT_MIN_ARMED_THROTTLE,
            rc: RcParams::default(),
            angle_level_limit: Axis3r::new(angle, angle, DEFAULT_YAW_RATE_LIMIT_DPS.to_radians()),
            angle_rate_limit: Axis3r::new(acro, acro, acro),
            default_goal_mode: *GoalMode::standard_angle_mode(),
            default_vehicle_state: VehicleStateType::Inactive,
        }
    }
}

fn config_error(message: String) -> HelmError {
    HelmError::new(ErrorKind::Config, message)
}

impl Params {
    /// Rejects blocks the state machine cannot run with.
    pub fn validate(&self) -> HelmResult<()> {
        let tolerance = self.rc.action_request_tolerance;
        // at 0.5 and above the neutral box overlaps the gesture corners
        if !(tolerance > 0.0 && tolerance < 0.5) {
            return Err(config_error(format!(
                "action_request_tolerance must be in (0, 0.5) but it was {}",
                tolerance
            )));
        }
        for (name, value) in [
            ("min_armed_throttle", self.min_armed_throttle),
            ("min_angling_throttle", self.rc.min_angling_throttle),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(config_error(format!(
                    "{} must be in [0, 1] but it was {}",
                    name, value
                )));
            }
        }
        match self.default_vehicle_state {
            VehicleStateType::Inactive
            | VehicleStateType::BeingArmed
            | VehicleStateType::Armed
            | VehicleStateType::BeingDisarmed
            | VehicleStateType::Disarmed => {}
            other => {
                return Err(config_error(format!(
                    "default_vehicle_state {:?} is not part of the rc lifecycle",
                    other
                )))
            }
        }
        if self.default_goal_mode.is_unknown() {
            return Err(config_error("default_goal_mode cannot be unknown".to_string()));
        }
        Ok(())
    }

    fn get_options() -> Options {
        Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .with_default_extension(Extensions::UNWRAP_NEWTYPES)
            .with_default_extension(Extensions::UNWRAP_VARIANT_NEWTYPES)
    }

    /// Parses and validates a RON parameter block. Missing fields take their default.
    pub fn from_ron_str(ron: &str) -> HelmResult<Self> {
        let params: Params = Self::get_options()
            .from_str(ron)
            .map_err(|e| config_error(format!("Syntax error in params: {}", e)))?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_ron_string(&self) -> HelmResult<String> {
        let pretty = ron::ser::PrettyConfig::default();
        Self::get_options()
            .to_string_pretty(self, pretty)
            .map_err(|e| config_error(format!("Failed to serialize params: {}", e)))
    }
}

/// Read a parameter block from a file.
pub fn read_params<P: AsRef<Path>>(params_filename: P) -> HelmResult<Params> {
    let path = params_filename.as_ref();
    let content = read_to_string(path).map_err(|e| {
        config_error(format!("Failed to read params file: {:?}", path)).add_context(&e.to_string())
    })?;
    Params::from_ron_str(&content).map_err(|e| e.add_context(&path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use helm_goal_payloads::GoalModeType;

    #[test]
    fn test_defaults_validate() {
        let params = Params::default();
        params.validate().unwrap();
        assert_relative_eq!(params.rc.min_angling_throttle, 0.1 / 1.5);
        assert_relative_eq!(params.angle_level_limit.roll(), 0.436_332_3, epsilon = 1e-6);
        assert_eq!(params.default_vehicle_state, VehicleStateType::Inactive);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let txt = r#"(
            min_armed_throttle: 0.2,
            rc: (arm_duration_ms: 500, channels: (3, 2, 0, 1)),
        )"#;
        let params = Params::from_ron_str(txt).unwrap();
        assert_eq!(params.min_armed_throttle, 0.2);
        assert_eq!(params.rc.arm_duration_ms, 500);
        assert_eq!(params.rc.disarm_duration_ms, 100);
        assert_eq!(params.rc.channels.throttle(), 1);
        assert_eq!(params.default_goal_mode, *GoalMode::standard_angle_mode());
    }

    #[test]
    fn test_goal_mode_from_ron() {
        let txt = "(default_goal_mode: (AngleRate, AngleRate, AngleRate, Passthrough))";
        let params = Params::from_ron_str(txt).unwrap();
        assert_eq!(params.default_goal_mode.roll(), GoalModeType::AngleRate);
    }

    #[test]
    fn test_syntax_error_is_config_error() {
        let err = Params::from_ron_str("(rc: (arm_duration_ms: \"soon\"))").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_tolerance_bounds() {
        let mut params = Params::default();
        params.rc.action_request_tolerance = 0.5;
        assert_eq!(params.validate().unwrap_err().kind(), ErrorKind::Config);
        params.rc.action_request_tolerance = 0.0;
        assert!(params.validate().is_err());
        params.rc.action_request_tolerance = 0.49;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_default_state_must_be_in_lifecycle() {
        let mut params = Params::default();
        params.default_vehicle_state = VehicleStateType::Active;
        assert!(params.validate().is_err());
        params.default_vehicle_state = VehicleStateType::Unknown;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_unknown_goal_mode_rejected() {
        let mut params = Params::default();
        params.default_goal_mode = *GoalMode::unknown_mode();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut params = Params::default();
        params.rc.rate_level_mode_channel = 6;
        let txt = params.to_ron_string().unwrap();
        assert_eq!(Params::from_ron_str(&txt).unwrap(), params);
    }

    #[test]
    fn test_read_params_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.ron");
        std::fs::write(&path, "(rc: (read_interval_ms: 4))").unwrap();
        assert_eq!(read_params(&path).unwrap().rc.read_interval_ms, 4);

        let missing = dir.path().join("nope.ron");
        let err = read_params(&missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.context().is_some());
    }
}
