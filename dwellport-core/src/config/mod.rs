mod teleport_desc;

pub use teleport_desc::GazeTeleportDesc;
