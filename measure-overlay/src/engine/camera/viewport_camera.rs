use bevy::input::mouse::{AccumulatedMouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

const YAW_SENSITIVITY: f32 = 0.0035;
const PITCH_SENSITIVITY: f32 = 0.0030;
const PITCH_LIMIT: f32 = 1.55;

#[derive(Resource, Debug, Clone)]
pub struct ViewportCamera {
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    /// Fly speed in world units per second.
    pub speed: f32,
    pub dolly_step: f32,
    pub smoothing: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(-4.0, 5.0, 9.0),
            pitch: -0.45,
            yaw: -0.4,
            speed: 6.0,
            dolly_step: 1.0,
            smoothing: 12.0,
        }
    }
}

impl ViewportCamera {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * YAW_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * PITCH_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move in view space: x right, y world up, z backwards.
    pub fn fly(&mut self, input: Vec3, distance: f32) {
        let Some(direction) = input.try_normalize() else {
            return;
        };
        let rotation = self.rotation();
        let right = rotation * Vec3::X;
        let forward = rotation * Vec3::Z;
        let world = right * direction.x + Vec3::Y * direction.y + forward * direction.z;
        self.position += world * distance;
    }

    pub fn dolly(&mut self, amount: f32) {
        let forward = self.rotation() * Vec3::NEG_Z;
        self.position += forward * amount * self.dolly_step;
    }
}

pub fn spawn_viewport_camera(mut commands: Commands, viewport: Res<ViewportCamera>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(viewport.position).with_rotation(viewport.rotation()),
        Name::new("ViewportCamera"),
    ));
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    if mouse_button.pressed(MouseButton::Right) && mouse_motion.delta != Vec2::ZERO {
        viewport.look(mouse_motion.delta);
    }

    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();
    if scroll.abs() > f32::EPSILON {
        viewport.dolly(scroll);
    }

    let mut move_input = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) { move_input.z -= 1.0; }
    if keyboard.pressed(KeyCode::KeyS) { move_input.z += 1.0; }
    if keyboard.pressed(KeyCode::KeyD) { move_input.x += 1.0; }
    if keyboard.pressed(KeyCode::KeyA) { move_input.x -= 1.0; }
    if keyboard.pressed(KeyCode::KeyE) { move_input.y += 1.0; }
    if keyboard.pressed(KeyCode::KeyQ) { move_input.y -= 1.0; }

    if move_input != Vec3::ZERO {
        // Ctrl slows down; Shift is reserved for angle measurement.
        let mut speed = viewport.speed;
        if keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
            speed *= 0.25;
        }
        viewport.fly(move_input, speed * time.delta_secs());
    }

    let lerp = (viewport.smoothing * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(viewport.position, lerp);
    camera_transform.rotation = camera_transform.rotation.slerp(viewport.rotation(), lerp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_is_clamped() {
        let mut cam = ViewportCamera::default();
        cam.look(Vec2::new(0.0, -10_000.0));
        assert!((cam.pitch - PITCH_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn test_fly_forward_follows_yaw() {
        let mut cam = ViewportCamera {
            position: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            ..default()
        };
        cam.fly(Vec3::new(0.0, 0.0, -1.0), 2.0);
        assert!(cam.position.distance(Vec3::new(0.0, 0.0, -2.0)) < 1e-5);
    }

    #[test]
    fn test_dolly_moves_along_view() {
        let mut cam = ViewportCamera {
            position: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            dolly_step: 1.0,
            ..default()
        };
        cam.dolly(3.0);
        assert!(cam.position.distance(Vec3::new(0.0, 0.0, -3.0)) < 1e-5);
    }
}
