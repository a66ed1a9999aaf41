//! Viewer rig and teleport execution interfaces.

use crate::math::{Pose, Vec3};
use crossbeam_channel::{Receiver, Sender, unbounded};

/// How the rig's orientation is matched when it lands on the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchOrientation {
    /// Keep the rig upright in world space
    WorldSpaceUp,
    /// Align the rig's up vector with the target surface
    #[default]
    TargetUp,
    /// Align both up and forward with the target
    TargetUpAndForward,
    /// Leave orientation untouched
    None,
}

/// Relocation request handed to the [`TeleportExecutor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportRequest {
    pub destination: Vec3,
    pub match_orientation: MatchOrientation,
}

impl TeleportRequest {
    pub fn new(destination: Vec3, match_orientation: MatchOrientation) -> Self {
        Self {
            destination,
            match_orientation,
        }
    }
}

/// Performs the actual viewpoint relocation. Fire-and-forget: the controller
/// never waits for an acknowledgement.
pub trait TeleportExecutor {
    fn request(&mut self, request: TeleportRequest);
}

/// Source of the viewer's head pose (the gaze camera).
pub trait ViewerRig {
    fn pose(&self) -> Pose;
}

/// Teleport executor that queues requests on a channel.
///
/// The host drains the paired receiver at a point of its choosing, typically
/// right before it moves the rig for the frame.
#[derive(Debug, Clone)]
pub struct ChannelTeleportExecutor {
    sender: Sender<TeleportRequest>,
}

impl ChannelTeleportExecutor {
    pub fn new() -> (Self, Receiver<TeleportRequest>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }
}

impl TeleportExecutor for ChannelTeleportExecutor {
    fn request(&mut self, request: TeleportRequest) {
        if let Err(e) = self.sender.send(request) {
            log::warn!("Dropping teleport request to {:?}: {}", request.destination, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_executor_queues_requests() {
        let (mut executor, receiver) = ChannelTeleportExecutor::new();
        let destination = Vec3::new(1.0, 0.0, -4.0);
        executor.request(TeleportRequest::new(destination, MatchOrientation::TargetUp));
        executor.request(TeleportRequest::new(Vec3::ZERO, MatchOrientation::None));

        let queued: Vec<_> = receiver.try_iter().collect();
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[0].destination, Vec3::new(1.0, 0.0, -4.0));
        assert_eq!(queued[0].match_orientation, MatchOrientation::TargetUp);
    }

    #[test]
    fn test_disconnected_receiver_is_not_fatal() {
        let (mut executor, receiver) = ChannelTeleportExecutor::new();
        drop(receiver);
        executor.request(TeleportRequest::new(Vec3::ONE, MatchOrientation::default()));
    }
}
