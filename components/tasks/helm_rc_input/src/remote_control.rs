use crate::params::Params;
use crate::request::RcRequest;
use crate::GoalInput;
use helm_clock::Clock;
use helm_goal_payloads::{Axis3r, Axis4r, GoalFrame, GoalMode, VehicleStateType};
use helm_traits::{CommLink, ErrorKind, HelmError, HelmResult, InputPins};
use log::{debug, error, info, trace};

/// Pilot sticks in, goal and goal mode out.
///
/// Everything it talks to is borrowed: the clock, the board pins, the comm
/// link and the parameter block all outlive the machine and are never mutated.
pub struct RemoteControl<'a, C: ?Sized, P: ?Sized, L: ?Sized> {
    params: &'a Params,
    clock: &'a C,
    board_inputs: &'a P,
    comm_link: &'a L,

    goal: Axis4r,
    goal_mode: GoalMode,
    vehicle_state: VehicleStateType,
    last_rc_read_ms: u64,
    request_duration_ms: u64,
    // last selector reading, None until the first tick after reset
    angle_mode: Option<f32>,
    level_mode: bool,
    #[cfg(test)]
    mode_evaluations: u32,
}

impl<'a, C, P, L> RemoteControl<'a, C, P, L>
where
    C: Clock + ?Sized,
    P: InputPins + ?Sized,
    L: CommLink + ?Sized,
{
    pub fn new(params: &'a Params, clock: &'a C, board_inputs: &'a P, comm_link: &'a L) -> Self {
        let mut rc = Self {
            params,
            clock,
            board_inputs,
            comm_link,
            goal: Axis4r::ZERO,
            goal_mode: params.default_goal_mode,
            vehicle_state: params.default_vehicle_state,
            last_rc_read_ms: 0,
            request_duration_ms: 0,
            angle_mode: None,
            level_mode: true,
            #[cfg(test)]
            mode_evaluations: 0,
        };
        rc.reset();
        rc
    }

    pub fn params(&self) -> &Params {
        self.params
    }

    /// Snapshot of what the last processed tick published.
    pub fn frame(&self) -> GoalFrame {
        GoalFrame {
            timestamp_ms: self.last_rc_read_ms,
            state: self.vehicle_state,
            goal: self.goal,
            goal_mode: self.goal_mode,
        }
    }

    fn send(&self, line: &'static str) {
        if let Err(e) = self.comm_link.log(line) {
            trace!("comm link dropped a line: {}", e);
        }
    }

    fn read_channels(&self) -> Axis4r {
        let channels = &self.params.rc.channels;
        let read = |id: u16| self.board_inputs.read_channel(id);
        Axis4r::new(
            read(channels.roll()),
            read(channels.pitch()),
            read(channels.yaw()),
            read(channels.throttle()),
        )
    }

    fn update_goal_mode(&mut self) {
        let reading = self
            .board_inputs
            .read_channel(self.params.rc.rate_level_mode_channel);
        if self.angle_mode == Some(reading) {
            return;
        }
        self.angle_mode = Some(reading);
        #[cfg(test)]
        {
            self.mode_evaluations += 1;
        }
        // NaN compares false and falls back to rate mode
        self.level_mode = reading < self.params.rc.max_angle_level_switch;
        self.goal_mode = if self.level_mode {
            *GoalMode::standard_angle_mode()
        } else {
            *GoalMode::all_rate_mode()
        };
        debug!("rc goal mode {} (selector {})", self.goal_mode, reading);
    }

    fn limits(&self) -> &Axis3r {
        if self.level_mode {
            &self.params.angle_level_limit
        } else {
            &self.params.angle_rate_limit
        }
    }

    fn update_goal(&mut self, channels: &Axis4r) {
        let min_throttle = self.params.rc.min_angling_throttle;
        let throttle = channels.throttle();
        // the vehicle keeps enough throttle to control its attitude, a NaN reading included
        self.goal.set_throttle(if throttle.is_nan() || throttle <= min_throttle {
            min_throttle
        } else {
            throttle
        });
        let axis3 = self.limits().col_wise_multiply(channels.axis3());
        self.goal.set_axis3(axis3);
    }

    /// Adds `dt` to the gesture hold time, true once it exceeds `hold_ms`.
    fn hold(&mut self, dt: u64, hold_ms: u64) -> bool {
        self.request_duration_ms += dt;
        self.request_duration_ms > hold_ms
    }

    fn transition(&mut self, next: VehicleStateType) {
        debug!("rc state {} -> {}", self.vehicle_state, next);
        self.vehicle_state = next;
        self.request_duration_ms = 0;
    }

    fn step(&mut self, dt: u64, channels: &Axis4r) -> HelmResult<()> {
        let request = RcRequest::classify(channels, self.params.rc.action_request_tolerance);
        let params = self.params;
        let rc = &params.rc;

        match self.vehicle_state {
            VehicleStateType::Inactive => {
                self.send("State: inactive");
                if request == RcRequest::ArmRequest {
                    self.send("State: arm request received");
                    if self.hold(dt, rc.arm_duration_ms) {
                        self.transition(VehicleStateType::BeingArmed);
                    }
                } else {
                    self.request_duration_ms = 0;
                }
            }
            VehicleStateType::BeingArmed => {
                self.send("State: being armed");
                // motors spin at idle while the pilot centers the sticks
                self.goal.set_throttle(params.min_armed_throttle);
                self.goal.set_axis3(Axis3r::ZERO);
                if request == RcRequest::NeutralRequest {
                    self.send("State: neutral request received");
                    if self.hold(dt, rc.neutral_duration_ms) {
                        self.transition(VehicleStateType::Armed);
                        info!("rc armed");
                    }
                } else {
                    self.request_duration_ms = 0;
                }
            }
            VehicleStateType::Armed => {
                self.send("State: armed");
                if request == RcRequest::DisarmRequest {
                    self.send("State: disarm request received");
                    if self.hold(dt, rc.disarm_duration_ms) {
                        self.transition(VehicleStateType::BeingDisarmed);
                    }
                } else {
                    self.request_duration_ms = 0;
                    self.update_goal(channels);
                }
            }
            VehicleStateType::BeingDisarmed => {
                self.send("State: being disarmed");
                self.goal.set_axis3(Axis3r::ZERO);
                self.transition(VehicleStateType::Disarmed);
            }
            VehicleStateType::Disarmed => {
                self.send("State: disarmed");
                self.goal = Axis4r::ZERO;
                self.transition(VehicleStateType::Inactive);
                info!("rc disarmed");
            }
            VehicleStateType::Unknown | VehicleStateType::Active => {
                error!(
                    "rc lifecycle reached {} which it can never enter",
                    self.vehicle_state
                );
                return Err(HelmError::new(
                    ErrorKind::InternalInconsistency,
                    format!(
                        "VehicleStateType {} is not supported by RemoteControl",
                        self.vehicle_state
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl<C, P, L> GoalInput for RemoteControl<'_, C, P, L>
where
    C: Clock + ?Sized,
    P: InputPins + ?Sized,
    L: CommLink + ?Sized,
{
    fn reset(&mut self) {
        self.goal = Axis4r::ZERO;
        self.goal_mode = self.params.default_goal_mode;
        self.vehicle_state = self.params.default_vehicle_state;
        self.last_rc_read_ms = 0;
        self.request_duration_ms = 0;
        self.angle_mode = None;
        self.level_mode = true;
    }

    fn update(&mut self) -> HelmResult<()> {
        let now = self.clock.millis();
        let dt = now.saturating_sub(self.last_rc_read_ms);
        if dt <= self.params.rc.read_interval_ms {
            return Ok(());
        }
        self.last_rc_read_ms = now;

        let channels = self.read_channels();
        self.update_goal_mode();
        self.step(dt, &channels)
    }

    fn goal(&self) -> &Axis4r {
        &self.goal
    }

    fn goal_mode(&self) -> &GoalMode {
        &self.goal_mode
    }

    fn vehicle_state(&self) -> VehicleStateType {
        self.vehicle_state
    }

    fn request_duration_ms(&self) -> u64 {
        self.request_duration_ms
    }
}
