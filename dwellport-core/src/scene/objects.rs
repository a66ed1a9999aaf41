use super::ObjectId;

/// Activation state of scene objects.
///
/// Deactivating an object that no longer exists must be a no-op.
pub trait SceneObjects {
    fn set_active(&mut self, object: ObjectId, active: bool);
}
