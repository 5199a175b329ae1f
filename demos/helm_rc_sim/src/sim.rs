use crate::pilot::{Phase, ScriptedPins};
use helm_clock::BoardClock;
use helm_goal_payloads::{GeoPoint, GoalFrame, VehicleState, VehicleStateType};
use helm_rc_input::{GoalInput, LogCommLink, Params, RemoteControl, ThrottledCommLink};
use helm_traits::{ErrorKind, HelmResult};
use log::{debug, info, warn};

const COMM_PERIOD_MS: u64 = 250;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary {
    pub ticks: u64,
    pub armed: bool,
    pub final_state: VehicleStateType,
}

/// Mirrors the rc lifecycle into the vehicle state. A missing home only warns.
fn follow(vehicle: &mut VehicleState, state: VehicleStateType, home: GeoPoint) -> HelmResult<()> {
    match vehicle.set_state(state, home) {
        Ok(()) => info!("vehicle {}", vehicle.state()),
        Err(e) if e.kind() == ErrorKind::InvalidPrecondition => {
            warn!("vehicle stays {}: {}", vehicle.state(), e.message())
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Plays `script` against a fresh [`RemoteControl`] on a mocked clock.
/// `on_frame` sees every tick, including the ones skipped by the read interval.
pub fn run<F>(
    params: &Params,
    script: &[Phase],
    tick_ms: u64,
    home: GeoPoint,
    mut on_frame: F,
) -> HelmResult<Summary>
where
    F: FnMut(&GoalFrame) -> HelmResult<()>,
{
    let (clock, mock) = BoardClock::mock();
    let pins = ScriptedPins::default();
    let link = ThrottledCommLink::new(&clock, LogCommLink, COMM_PERIOD_MS);
    let mut rc = RemoteControl::new(params, &clock, &pins, &link);

    let mut vehicle = VehicleState::default();
    let mut last_state = rc.vehicle_state();
    follow(&mut vehicle, last_state, home)?;
    let mut summary = Summary::default();

    for phase in script {
        info!("pilot: {} for {} ms", phase.name, phase.duration_ms);
        pins.apply(phase, &params.rc);

        let mut elapsed = 0;
        while elapsed < phase.duration_ms {
            mock.increment_ms(tick_ms);
            elapsed += tick_ms;
            summary.ticks += 1;

            rc.update()?;

            let state = rc.vehicle_state();
            if state != last_state {
                follow(&mut vehicle, state, home)?;
                summary.armed |= state == VehicleStateType::Armed;
                last_state = state;
            }

            let frame = rc.frame();
            debug!(
                "t={} {} goal {:?} mode {}",
                frame.timestamp_ms, frame.state, frame.goal, frame.goal_mode
            );
            on_frame(&frame)?;
        }
    }

    summary.final_state = rc.vehicle_state();
    Ok(summary)
}
