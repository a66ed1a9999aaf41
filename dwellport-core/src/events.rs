//! Event types for dwellport

use crate::controller::TransitionPhase;
use crate::math::Vec3;
use crate::scene::{ObjectId, TransformId};

#[derive(Debug, Clone, PartialEq)]
pub enum DwellEvent {
    TargetLocked {
        transform: TransformId,
        start_position: Vec3,
        target_position: Vec3,
    },
    TargetLost {
        transform: TransformId,
    },
    DwellCompleted {
        transform: TransformId,
    },
    TransitionStarted {
        destination: Vec3,
        target_object: ObjectId,
    },
    TransitionPhaseChanged {
        phase: TransitionPhase,
    },
    Relocated {
        destination: Vec3,
        deactivated: ObjectId,
        reactivated: Option<ObjectId>,
    },
    TransitionFinished {
        destination: Vec3,
    },
}

impl DwellEvent {
    pub fn transform(&self) -> Option<TransformId> {
        match self {
            Self::TargetLocked { transform, .. }
            | Self::TargetLost { transform }
            | Self::DwellCompleted { transform } => Some(*transform),
            _ => None,
        }
    }

    pub fn is_transition_event(&self) -> bool {
        matches!(
            self,
            Self::TransitionStarted { .. }
                | Self::TransitionPhaseChanged { .. }
                | Self::Relocated { .. }
                | Self::TransitionFinished { .. }
        )
    }
}
