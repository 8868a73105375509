//! Arm command documents and the validated builder
//!
//! A [`JointAngleRequest`] is caller input: one target angle per joint
//! plus a motion duration. [`ArmCommand::build`] validates the request
//! against a [`ProtocolConfig`] and produces the canonical command
//! document the arm controller consumes. Building is pure: no I/O, no
//! transport knowledge, no shared state.

use serde::{Deserialize, Serialize};

use crate::{ProtocolConfig, ValidationError};

/// A caller-supplied joint motion request.
///
/// Angles are in degrees, one per controllable joint, in joint order.
/// The duration is the time in seconds allotted to reach the target
/// pose. Values are passed through as-is; no rounding or clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct JointAngleRequest {
    pub angles: Vec<f64>,
    pub duration: f64,
}

impl JointAngleRequest {
    pub fn new(angles: Vec<f64>, duration: f64) -> Self {
        Self { angles, duration }
    }

    /// Build a request using the configured default duration.
    pub fn with_default_duration(angles: Vec<f64>, config: &ProtocolConfig) -> Self {
        Self {
            angles,
            duration: config.default_duration,
        }
    }
}

/// The canonical wire-level command document.
///
/// Field names on the wire are fixed by the arm controller's protocol
/// and must not change: `seq`, `address`, `funcode`, `angle`,
/// `duration`, `habr`, `plyLevel`. The four per-joint arrays always
/// have identical length equal to the DOF count.
///
/// Which fields are meaningful is determined by `funcode`; this crate
/// builds only joint-position-with-duration documents, but the model
/// deserializes any document of this shape regardless of funcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmCommand {
    #[serde(rename = "seq")]
    pub sequence_id: u32,
    #[serde(rename = "address")]
    pub target_address: u32,
    #[serde(rename = "funcode")]
    pub function_code: u32,
    #[serde(rename = "angle")]
    pub angle_targets: Vec<f64>,
    #[serde(rename = "duration")]
    pub angle_durations: Vec<f64>,
    #[serde(rename = "habr")]
    pub angle_accelerations: Vec<i64>,
    #[serde(rename = "plyLevel")]
    pub angle_precision_levels: Vec<i64>,
}

impl ArmCommand {
    /// Validate a request and build the joint-position command document.
    ///
    /// Checks run in order, first failure wins:
    /// 1. the angle count matches the configured DOF count,
    /// 2. every angle is finite,
    /// 3. the duration is finite and positive.
    ///
    /// On success every per-joint array is exactly `dof_count` long:
    /// angles are copied in order, the requested duration is replicated
    /// into every duration slot (a protocol convention, not a per-joint
    /// feature), and the acceleration and precision slots carry the
    /// configured protocol constants.
    pub fn build(
        request: &JointAngleRequest,
        config: &ProtocolConfig,
    ) -> Result<Self, ValidationError> {
        if request.angles.len() != config.dof_count {
            return Err(ValidationError::WrongJointCount {
                expected: config.dof_count,
                actual: request.angles.len(),
            });
        }

        if let Some((index, &value)) = request
            .angles
            .iter()
            .enumerate()
            .find(|(_, a)| !a.is_finite())
        {
            return Err(ValidationError::NonFiniteAngle { index, value });
        }

        if !request.duration.is_finite() || request.duration <= 0.0 {
            return Err(ValidationError::InvalidDuration(request.duration));
        }

        Ok(Self {
            sequence_id: config.sequence_id,
            target_address: config.target_address,
            function_code: config.function_code,
            angle_targets: request.angles.clone(),
            angle_durations: vec![request.duration; config.dof_count],
            angle_accelerations: vec![config.acceleration; config.dof_count],
            angle_precision_levels: vec![config.precision_level; config.dof_count],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> JointAngleRequest {
        JointAngleRequest::new(vec![90.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 2.0)
    }

    #[test]
    fn test_build_joint_position_command() {
        let config = ProtocolConfig::default();
        let command = ArmCommand::build(&valid_request(), &config).unwrap();

        assert_eq!(command.sequence_id, 4);
        assert_eq!(command.target_address, 1);
        assert_eq!(command.function_code, 2);
        assert_eq!(command.angle_targets, vec![90.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(command.angle_durations, vec![2.0; 7]);
        assert_eq!(command.angle_accelerations, vec![20; 7]);
        assert_eq!(command.angle_precision_levels, vec![3; 7]);
    }

    #[test]
    fn test_all_arrays_match_dof_count() {
        let config = ProtocolConfig {
            dof_count: 5,
            ..ProtocolConfig::default()
        };
        let request = JointAngleRequest::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], 0.5);
        let command = ArmCommand::build(&request, &config).unwrap();

        assert_eq!(command.angle_targets.len(), 5);
        assert_eq!(command.angle_durations.len(), 5);
        assert_eq!(command.angle_accelerations.len(), 5);
        assert_eq!(command.angle_precision_levels.len(), 5);
    }

    #[test]
    fn test_duration_is_replicated_per_joint() {
        let config = ProtocolConfig::default();
        let request = JointAngleRequest::new(vec![0.0; 7], 3.25);
        let command = ArmCommand::build(&request, &config).unwrap();

        for slot in &command.angle_durations {
            assert_eq!(*slot, 3.25);
        }
    }

    #[test]
    fn test_wrong_joint_count_rejected() {
        let config = ProtocolConfig::default();
        let request = JointAngleRequest::new(vec![0.0; 6], 2.0);

        let err = ArmCommand::build(&request, &config).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongJointCount {
                expected: 7,
                actual: 6
            }
        );
    }

    #[test]
    fn test_joint_count_checked_before_values() {
        // Count mismatch wins even when the values would also fail.
        let config = ProtocolConfig::default();
        let request = JointAngleRequest::new(vec![f64::NAN; 6], -1.0);

        let err = ArmCommand::build(&request, &config).unwrap_err();
        assert!(matches!(err, ValidationError::WrongJointCount { .. }));
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let config = ProtocolConfig::default();
        let mut angles = vec![0.0; 7];
        angles[3] = f64::INFINITY;
        let request = JointAngleRequest::new(angles, 2.0);

        let err = ArmCommand::build(&request, &config).unwrap_err();
        assert!(matches!(err, ValidationError::NonFiniteAngle { index: 3, .. }));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let config = ProtocolConfig::default();
        let request = JointAngleRequest::new(vec![0.0; 7], 0.0);

        let err = ArmCommand::build(&request, &config).unwrap_err();
        assert_eq!(err, ValidationError::InvalidDuration(0.0));
    }

    #[test]
    fn test_negative_and_nan_duration_rejected() {
        let config = ProtocolConfig::default();

        let request = JointAngleRequest::new(vec![0.0; 7], -2.0);
        assert!(matches!(
            ArmCommand::build(&request, &config),
            Err(ValidationError::InvalidDuration(_))
        ));

        let request = JointAngleRequest::new(vec![0.0; 7], f64::NAN);
        assert!(matches!(
            ArmCommand::build(&request, &config),
            Err(ValidationError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_build_is_deterministic() {
        let config = ProtocolConfig::default();
        let first = ArmCommand::build(&valid_request(), &config).unwrap();
        let second = ArmCommand::build(&valid_request(), &config).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_wire_field_names_are_pinned() {
        let config = ProtocolConfig::default();
        let command = ArmCommand::build(&valid_request(), &config).unwrap();

        let value: serde_json::Value = serde_json::to_value(&command).unwrap();
        let object = value.as_object().unwrap();

        for key in ["seq", "address", "funcode", "angle", "duration", "habr", "plyLevel"] {
            assert!(object.contains_key(key), "missing wire field '{}'", key);
        }
        assert_eq!(object.len(), 7);

        assert_eq!(object["seq"], 4);
        assert_eq!(object["address"], 1);
        assert_eq!(object["funcode"], 2);
        assert_eq!(object["angle"][0], 90.0);
        assert_eq!(object["habr"][6], 20);
        assert_eq!(object["plyLevel"][0], 3);
    }

    #[test]
    fn test_wire_round_trip() {
        let config = ProtocolConfig::default();
        let command = ArmCommand::build(&valid_request(), &config).unwrap();

        let wire = serde_json::to_string(&command).unwrap();
        let parsed: ArmCommand = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed, command);
    }

    #[test]
    fn test_with_default_duration() {
        let config = ProtocolConfig::default();
        let request = JointAngleRequest::with_default_duration(vec![0.0; 7], &config);
        assert_eq!(request.duration, 2.0);
    }
}
