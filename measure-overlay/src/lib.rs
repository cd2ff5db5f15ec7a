//! In-scene distance and angle measurement overlay for Bevy.
//!
//! Point at scene geometry, click to measure distances, hold Shift to measure
//! angles. Visuals and the floating readout are described by JSON prefabs
//! wired into a measurement profile; the `authoring` module generates and
//! wires those files.

pub mod authoring;
pub mod engine;
pub mod tools;
