//! Interactive tools layered over the scene.
//!
//! ## Tool Activation Flow
//!
//! ```text
//! Toggle key / HUD button / `start_active` profile setting
//!   └─> ToolToggleEvent
//!       └─> handle_tool_toggle_events()
//!           ├─> MeasurementToolManager activate / deactivate
//!           └─> on deactivation: clear session, hide readout
//! Escape
//!   └─> ClearMeasurementEvent
//!       └─> handle_clear_measurement_events()
//! ```
//!
//! ## Measure Tool
//! - **Activation**: `M` key (configurable in the profile) or the HUD button
//! - **Distance**: drag from the start point to the end point, or click both
//! - **Angle**: hold Shift and press on the first point, drag to the vertex and
//!   release, then click the third point
//! - Live lines, point markers and a floating readout follow the cursor; the
//!   angle arc appears once the angle is complete.

/// HUD toolbar with the measure toggle button and usage hint.
pub mod hud;

/// Distance and angle measurement session, visuals and readout.
pub mod measure;

/// Tool activation state and the events driving it.
pub mod tool_manager;
