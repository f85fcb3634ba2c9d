//! Shared joint-angle state.
//!
//! This module owns the canonical joint-name table and the current angle
//! frame. The frame is opaque: the service moves it around as raw bytes and
//! never decodes individual angles.

use std::sync::Mutex;

/// Bytes occupied by one joint in the angle frame.
pub const BYTES_PER_JOINT: usize = 4;

/// Joint names of the Pepper upper body, in wire order.
///
/// The order is a contract shared with every peer implementation (the angle
/// sender and the robot-side reader use the same table); it must never be
/// reordered.
pub const PEPPER_JOINT_NAMES: [&str; 13] = [
    "LShoulderPitch",
    "LShoulderRoll",
    "LElbowYaw",
    "LElbowRoll",
    "LWristYaw",
    "RShoulderPitch",
    "RShoulderRoll",
    "RElbowYaw",
    "RElbowRoll",
    "RWristYaw",
    "HipPitch",
    "LHand",
    "RHand",
];

/// Thread-safe owner of the joint-name table and the current angle frame.
///
/// The name table is fixed at construction and needs no lock. The frame is
/// replaced wholesale under a mutex so a reader can never observe a mix of
/// pre- and post-write bytes, which matters because every connection is
/// served on its own task.
///
/// # Why `std::sync::Mutex`?
///
/// The lock is only ever held for an O(frame) copy or swap and never across
/// an await point, so the async-aware mutex would add nothing but overhead.
pub struct JointStore {
    names: Vec<String>,
    frame: Mutex<Vec<u8>>,
}

impl JointStore {
    /// Creates a store for the given joints with an all-zero angle frame.
    pub fn new(names: Vec<String>) -> Self {
        let frame = vec![0u8; names.len() * BYTES_PER_JOINT];
        Self {
            names,
            frame: Mutex::new(frame),
        }
    }

    /// Creates a store with the production Pepper joint table.
    pub fn pepper() -> Self {
        Self::new(PEPPER_JOINT_NAMES.iter().map(|name| name.to_string()).collect())
    }

    /// The joint names, in wire order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Byte length of a full angle frame.
    pub fn frame_len(&self) -> usize {
        self.names.len() * BYTES_PER_JOINT
    }

    /// Returns a snapshot of the current frame.
    ///
    /// Clones under the lock so the caller can hold the bytes as long as it
    /// likes without stalling writers.
    pub fn angles(&self) -> Vec<u8> {
        self.frame.lock().unwrap().clone()
    }

    /// Replaces the frame wholesale.
    ///
    /// Length validation happens at the protocol layer before this is
    /// called; the store accepts whatever it is handed.
    pub fn set_angles(&self, frame: Vec<u8>) {
        *self.frame.lock().unwrap() = frame;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_has_zeroed_frame_matching_joint_count() {
        let store = JointStore::new(vec!["A".to_string(), "B".to_string(), "C".to_string()]);
        assert_eq!(store.frame_len(), 12);
        assert_eq!(store.angles(), vec![0u8; 12]);
    }

    #[test]
    fn replace_then_read_round_trips() {
        let store = JointStore::new(vec!["A".to_string()]);
        store.set_angles(vec![9, 8, 7, 6]);
        assert_eq!(store.angles(), vec![9, 8, 7, 6]);
    }

    #[test]
    fn snapshots_are_detached_from_later_writes() {
        let store = JointStore::new(vec!["A".to_string()]);
        let before = store.angles();
        store.set_angles(vec![1, 2, 3, 4]);
        assert_eq!(before, vec![0u8; 4]);
        assert_eq!(store.angles(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn pepper_table_is_in_wire_order() {
        let store = JointStore::pepper();
        assert_eq!(store.names().len(), 13);
        assert_eq!(store.frame_len(), 52);
        assert_eq!(store.names().first().map(String::as_str), Some("LShoulderPitch"));
        assert_eq!(store.names().last().map(String::as_str), Some("RHand"));
    }
}
