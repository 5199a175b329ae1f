use helm_goal_payloads::{Axis4r, GeoPoint};
use helm_rc_input::{Params, RcParams};
use helm_traits::InputPins;
use std::cell::Cell;

const CHANNEL_COUNT: usize = 16;

/// Stick positions held for a while.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub name: &'static str,
    pub duration_ms: u64,
    /// roll, pitch, yaw, throttle
    pub sticks: Axis4r,
    pub selector: f32,
}

/// Receiver whose channels are whatever the current phase says.
/// Channels past the 16th always read 0.
#[derive(Debug, Default)]
pub struct ScriptedPins {
    values: Cell<[f32; CHANNEL_COUNT]>,
}

impl ScriptedPins {
    pub fn apply(&self, phase: &Phase, rc: &RcParams) {
        let mut values = [0.0; CHANNEL_COUNT];
        let mut put = |channel: u16, value: f32| {
            if let Some(slot) = values.get_mut(channel as usize) {
                *slot = value;
            }
        };
        put(rc.channels.roll(), phase.sticks.roll());
        put(rc.channels.pitch(), phase.sticks.pitch());
        put(rc.channels.yaw(), phase.sticks.yaw());
        put(rc.channels.throttle(), phase.sticks.throttle());
        put(rc.rate_level_mode_channel, phase.selector);
        self.values.set(values);
    }
}

impl InputPins for ScriptedPins {
    fn read_channel(&self, channel: u16) -> f32 {
        self.values
            .get()
            .get(channel as usize)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Arm, take off in level mode, flip to rate mode, disarm.
/// Every gesture is held a few ticks longer than its configured duration.
pub fn default_script(params: &Params, tick_ms: u64) -> Vec<Phase> {
    let hold = |duration_ms: u64| duration_ms + 4 * tick_ms;
    let rc = &params.rc;
    let level = 0.0;
    let rate = 1.0;
    vec![
        Phase {
            name: "idle",
            duration_ms: 10 * tick_ms,
            sticks: Axis4r::new(0.0, 0.0, 0.0, 0.0),
            selector: level,
        },
        Phase {
            name: "arm gesture",
            duration_ms: hold(rc.arm_duration_ms),
            sticks: Axis4r::new(-1.0, 1.0, 1.0, 0.0),
            selector: level,
        },
        Phase {
            name: "center sticks",
            duration_ms: hold(rc.neutral_duration_ms),
            sticks: Axis4r::new(0.0, 0.0, 0.0, 0.0),
            selector: level,
        },
        Phase {
            name: "climb and bank",
            duration_ms: 25 * tick_ms,
            sticks: Axis4r::new(0.3, -0.2, 0.1, 0.6),
            selector: level,
        },
        Phase {
            name: "roll in rate mode",
            duration_ms: 25 * tick_ms,
            sticks: Axis4r::new(0.5, 0.0, -0.1, 0.5),
            selector: rate,
        },
        Phase {
            name: "disarm gesture",
            duration_ms: hold(rc.disarm_duration_ms),
            sticks: Axis4r::new(1.0, 1.0, -1.0, 0.0),
            selector: level,
        },
        Phase {
            name: "idle",
            duration_ms: 10 * tick_ms,
            sticks: Axis4r::new(0.0, 0.0, 0.0, 0.0),
            selector: level,
        },
    ]
}

/// Parses `lat,lon,alt`.
pub fn parse_geo_point(text: &str) -> Result<GeoPoint, String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [lat, lon, alt] = parts.as_slice() else {
        return Err(format!("expected lat,lon,alt but got {:?}", text));
    };
    let latitude = lat
        .parse::<f64>()
        .map_err(|e| format!("bad latitude {:?}: {}", lat, e))?;
    let longitude = lon
        .parse::<f64>()
        .map_err(|e| format!("bad longitude {:?}: {}", lon, e))?;
    let altitude = alt
        .parse::<f32>()
        .map_err(|e| format!("bad altitude {:?}: {}", alt, e))?;
    Ok(GeoPoint::new(latitude, longitude, altitude))
}
