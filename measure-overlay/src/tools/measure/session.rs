use super::geometry::{
    distance, format_angle, format_distance, format_legs, vertex_angle_degrees,
};
use bevy::prelude::*;
use constants::render_settings::MIN_SEGMENT_LENGTH;
use serde::{Deserialize, Serialize};

/// Which gesture a measurement session was started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureKind {
    Distance,
    Angle,
}

/// Interaction phase of the current measurement session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeasurePhase {
    #[default]
    Idle,
    /// Start placed, end follows the cursor.
    FirstPointSet {
        start: Vec3,
        end: Vec3,
        /// The button that placed `start` is still down. Releasing it away from
        /// `start` completes a drag measurement; releasing it on `start` anchors
        /// the point for a second click.
        awaiting_release: bool,
    },
    DistanceComplete {
        start: Vec3,
        end: Vec3,
    },
    /// Button held after placing the first leg's start, vertex follows the cursor.
    Dragging {
        start: Vec3,
        vertex: Vec3,
    },
    /// Vertex fixed, third point follows the cursor.
    VertexSet {
        start: Vec3,
        vertex: Vec3,
        end: Vec3,
    },
    AngleComplete {
        start: Vec3,
        vertex: Vec3,
        end: Vec3,
    },
}

impl MeasurePhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            Self::DistanceComplete { .. } | Self::AngleComplete { .. }
        )
    }

    /// Vertices of the measurement line, in drawing order.
    pub fn polyline(&self) -> Vec<Vec3> {
        match *self {
            Self::Idle => Vec::new(),
            Self::FirstPointSet { start, end, .. } | Self::DistanceComplete { start, end } => {
                vec![start, end]
            }
            Self::Dragging { start, vertex } => vec![start, vertex],
            Self::VertexSet { start, vertex, end }
            | Self::AngleComplete { start, vertex, end } => vec![start, vertex, end],
        }
    }

    /// Points that carry a marker. Cursor-following ends are left unmarked
    /// until they are fixed, except the vertex while dragging.
    pub fn marker_points(&self) -> Vec<Vec3> {
        match *self {
            Self::Idle => Vec::new(),
            Self::FirstPointSet { start, .. } => vec![start],
            Self::DistanceComplete { start, end } => vec![start, end],
            Self::Dragging { start, vertex } | Self::VertexSet { start, vertex, .. } => {
                vec![start, vertex]
            }
            Self::AngleComplete { start, vertex, end } => vec![start, vertex, end],
        }
    }

    /// Live text for the floating readout.
    pub fn readout(&self) -> Readout {
        match *self {
            Self::Idle => Readout::default(),
            Self::FirstPointSet { start, end, .. } | Self::DistanceComplete { start, end } => {
                Readout {
                    distance: format_distance(distance(start, end)),
                    angle: String::new(),
                }
            }
            Self::Dragging { start, vertex } => Readout {
                distance: format_legs(distance(start, vertex), None),
                angle: String::new(),
            },
            Self::VertexSet { start, vertex, end }
            | Self::AngleComplete { start, vertex, end } => Readout {
                distance: format_legs(distance(start, vertex), Some(distance(vertex, end))),
                angle: format_angle(vertex_angle_degrees(start, vertex, end)),
            },
        }
    }
}

/// Readout lines; an empty line is hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readout {
    pub distance: String,
    pub angle: String,
}

/// Primary button and cursor state sampled once per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerInput {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
    pub angle_modifier: bool,
    pub hit: Option<Vec3>,
}

/// A finished measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Measurement {
    Distance {
        id: u32,
        start: Vec3,
        end: Vec3,
        distance: f32,
    },
    Angle {
        id: u32,
        start: Vec3,
        vertex: Vec3,
        end: Vec3,
        degrees: f32,
        first_leg: f32,
        second_leg: f32,
    },
}

impl Measurement {
    pub fn id(&self) -> u32 {
        match self {
            Self::Distance { id, .. } | Self::Angle { id, .. } => *id,
        }
    }
}

/// Observable result of a single [`MeasureSession::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionTransition {
    Started { kind: MeasureKind, position: Vec3 },
    Updated,
    VertexFixed { position: Vec3 },
    Completed(Measurement),
}

/// Measurement session state machine.
#[derive(Debug, Clone, Default)]
pub struct MeasureSession {
    phase: MeasurePhase,
    next_id: u32,
}

impl MeasureSession {
    pub fn phase(&self) -> &MeasurePhase {
        &self.phase
    }

    /// Drop the current measurement. Returns whether anything was cleared.
    pub fn clear(&mut self) -> bool {
        let had_points = !self.phase.is_idle();
        self.phase = MeasurePhase::Idle;
        had_points
    }

    /// Advance the session by one frame of pointer input.
    pub fn step(&mut self, input: &PointerInput) -> Option<SessionTransition> {
        match self.phase {
            MeasurePhase::Idle
            | MeasurePhase::DistanceComplete { .. }
            | MeasurePhase::AngleComplete { .. } => {
                if !input.pressed {
                    return None;
                }
                let hit = input.hit?;
                let kind = if input.angle_modifier {
                    self.phase = MeasurePhase::Dragging {
                        start: hit,
                        vertex: hit,
                    };
                    MeasureKind::Angle
                } else {
                    // A tap reports press and release in the same frame.
                    self.phase = MeasurePhase::FirstPointSet {
                        start: hit,
                        end: hit,
                        awaiting_release: !input.released,
                    };
                    MeasureKind::Distance
                };
                Some(SessionTransition::Started {
                    kind,
                    position: hit,
                })
            }

            MeasurePhase::FirstPointSet {
                start,
                end,
                awaiting_release,
            } => {
                if input.released {
                    if awaiting_release {
                        match input.hit {
                            Some(end) if distance(start, end) > MIN_SEGMENT_LENGTH => {
                                self.phase = MeasurePhase::DistanceComplete { start, end };
                                return Some(SessionTransition::Completed(
                                    self.complete_distance(start, end),
                                ));
                            }
                            _ => {
                                self.phase = MeasurePhase::FirstPointSet {
                                    start,
                                    end,
                                    awaiting_release: false,
                                };
                                return None;
                            }
                        }
                    }
                    let end = input.hit?;
                    self.phase = MeasurePhase::DistanceComplete { start, end };
                    return Some(SessionTransition::Completed(self.complete_distance(start, end)));
                }
                // The end follows while dragging out the first press, and while
                // hovering before the second click; it stays put once the second
                // press lands.
                if input.held && !awaiting_release {
                    return None;
                }
                let hit = input.hit?;
                if hit == end {
                    return None;
                }
                self.phase = MeasurePhase::FirstPointSet {
                    start,
                    end: hit,
                    awaiting_release,
                };
                Some(SessionTransition::Updated)
            }

            MeasurePhase::Dragging { start, vertex } => {
                if input.held && !input.released {
                    let hit = input.hit?;
                    if hit == vertex {
                        return None;
                    }
                    self.phase = MeasurePhase::Dragging { start, vertex: hit };
                    return Some(SessionTransition::Updated);
                }
                // Released, or the release was missed (focus loss): fix the vertex.
                let vertex = input.hit.unwrap_or(vertex);
                self.phase = MeasurePhase::VertexSet {
                    start,
                    vertex,
                    end: vertex,
                };
                Some(SessionTransition::VertexFixed { position: vertex })
            }

            MeasurePhase::VertexSet { start, vertex, end } => {
                if input.released {
                    let end = input.hit?;
                    self.phase = MeasurePhase::AngleComplete { start, vertex, end };
                    return Some(SessionTransition::Completed(
                        self.complete_angle(start, vertex, end),
                    ));
                }
                if input.held {
                    return None;
                }
                let hit = input.hit?;
                if hit == end {
                    return None;
                }
                self.phase = MeasurePhase::VertexSet {
                    start,
                    vertex,
                    end: hit,
                };
                Some(SessionTransition::Updated)
            }
        }
    }

    fn complete_distance(&mut self, start: Vec3, end: Vec3) -> Measurement {
        let id = self.take_id();
        Measurement::Distance {
            id,
            start,
            end,
            distance: distance(start, end),
        }
    }

    fn complete_angle(&mut self, start: Vec3, vertex: Vec3, end: Vec3) -> Measurement {
        let id = self.take_id();
        Measurement::Angle {
            id,
            start,
            vertex,
            end,
            degrees: vertex_angle_degrees(start, vertex, end),
            first_leg: distance(start, vertex),
            second_leg: distance(vertex, end),
        }
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
