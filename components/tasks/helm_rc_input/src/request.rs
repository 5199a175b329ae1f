use helm_goal_payloads::Axis4r;

/// Gesture read from a single stick snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcRequest {
    None,
    ArmRequest,
    DisarmRequest,
    NeutralRequest,
}

fn is_in_tolerance(val: f32, tolerance: f32, center: f32) -> bool {
    val <= center + tolerance && val >= center - tolerance
}

impl RcRequest {
    /// Classifies roll/pitch/yaw/throttle readings.
    ///
    /// Arm is yaw full right, roll full left, pitch full forward and throttle
    /// down. Disarm mirrors yaw and roll. Neutral is all three angular sticks
    /// centered, whatever the throttle.
    pub fn classify(channels: &Axis4r, tolerance: f32) -> RcRequest {
        let stick_min = 1.0 - tolerance;
        let normalized_pitch = (channels.pitch() + 1.0) / 2.0;

        if channels.yaw() >= stick_min
            && channels.throttle() <= tolerance
            && channels.roll() <= -stick_min
            && normalized_pitch >= stick_min
        {
            RcRequest::ArmRequest
        } else if channels.yaw() <= -stick_min
            && channels.throttle() <= tolerance
            && channels.roll() >= stick_min
            && normalized_pitch >= stick_min
        {
            RcRequest::DisarmRequest
        } else if is_in_tolerance(channels.roll(), tolerance, 0.0)
            && is_in_tolerance(channels.pitch(), tolerance, 0.0)
            && is_in_tolerance(channels.yaw(), tolerance, 0.0)
        {
            RcRequest::NeutralRequest
        } else {
            RcRequest::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.1;

    fn sticks(roll: f32, pitch: f32, yaw: f32, throttle: f32) -> Axis4r {
        Axis4r::new(roll, pitch, yaw, throttle)
    }

    #[test]
    fn test_arm_and_disarm_corners() {
        assert_eq!(
            RcRequest::classify(&sticks(-1.0, 1.0, 1.0, 0.0), EPS),
            RcRequest::ArmRequest
        );
        assert_eq!(
            RcRequest::classify(&sticks(1.0, 1.0, -1.0, 0.0), EPS),
            RcRequest::DisarmRequest
        );
    }

    #[test]
    fn test_throttle_up_blocks_gestures() {
        assert_eq!(
            RcRequest::classify(&sticks(-1.0, 1.0, 1.0, 0.5), EPS),
            RcRequest::None
        );
        assert_eq!(
            RcRequest::classify(&sticks(1.0, 1.0, -1.0, 0.11), EPS),
            RcRequest::None
        );
    }

    #[test]
    fn test_pitch_is_normalized() {
        // normalized (0.8 + 1) / 2 = 0.9 sits exactly on the edge
        assert_eq!(
            RcRequest::classify(&sticks(-1.0, 0.8, 1.0, 0.0), 0.1),
            RcRequest::ArmRequest
        );
        assert_eq!(
            RcRequest::classify(&sticks(-1.0, 0.7, 1.0, 0.0), 0.1),
            RcRequest::None
        );
    }

    #[test]
    fn test_neutral_ignores_throttle() {
        for throttle in [0.0, 0.5, 1.0] {
            assert_eq!(
                RcRequest::classify(&sticks(0.05, -0.05, 0.0, throttle), EPS),
                RcRequest::NeutralRequest
            );
        }
    }

    #[test]
    fn test_neutral_edges_are_inclusive() {
        let tolerance = 0.25;
        assert_eq!(
            RcRequest::classify(&sticks(0.25, -0.25, 0.25, 0.0), tolerance),
            RcRequest::NeutralRequest
        );
        assert_eq!(
            RcRequest::classify(&sticks(0.26, 0.0, 0.0, 0.0), tolerance),
            RcRequest::None
        );
    }

    #[test]
    fn test_exactly_one_gesture_on_a_grid() {
        let steps = [-1.0, -0.9, -0.5, -0.1, 0.0, 0.1, 0.5, 0.9, 1.0];
        for &roll in &steps {
            for &pitch in &steps {
                for &yaw in &steps {
                    for throttle in [0.0, 0.1, 0.5] {
                        let s = sticks(roll, pitch, yaw, throttle);
                        let hits = [
                            s.yaw() >= 0.9
                                && s.throttle() <= EPS
                                && s.roll() <= -0.9
                                && (s.pitch() + 1.0) / 2.0 >= 0.9,
                            s.yaw() <= -0.9
                                && s.throttle() <= EPS
                                && s.roll() >= 0.9
                                && (s.pitch() + 1.0) / 2.0 >= 0.9,
                            [roll, pitch, yaw].iter().all(|v| v.abs() <= EPS),
                        ];
                        assert!(hits.iter().filter(|h| **h).count() <= 1);
                        let expected = match hits {
                            [true, _, _] => RcRequest::ArmRequest,
                            [_, true, _] => RcRequest::DisarmRequest,
                            [_, _, true] => RcRequest::NeutralRequest,
                            _ => RcRequest::None,
                        };
                        assert_eq!(RcRequest::classify(&s, EPS), expected, "{:?}", s);
                    }
                }
            }
        }
    }
}
