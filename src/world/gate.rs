//! The pen gate: two doors that swing outward on their hinges.
//!
//! The gate only blocks while it is fully shut. The collider comes off the
//! moment it starts opening and goes back on once it has finished closing.

use bevy::prelude::*;

use crate::config::GameBalance;
use crate::shared::*;

const DOOR_COLOR: Color = Color::srgb(0.62, 0.45, 0.26);
const DOOR_THICKNESS: f32 = 0.2;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct SwingGate {
    pub open: bool,
    /// 0.0 is shut, 1.0 is wide open.
    pub progress: f32,
    pub swinging: bool,
    pub half_width: f32,
}

impl SwingGate {
    pub fn closed(width: f32) -> Self {
        Self {
            open: false,
            progress: 0.0,
            swinging: false,
            half_width: width * 0.5,
        }
    }

    pub fn collider(&self) -> Fence {
        Fence {
            half_extents: Vec2::new(DOOR_THICKNESS * 0.5, self.half_width),
        }
    }
}

/// Hinge of one door. `sign` picks the rotation direction so both doors
/// swing out of the pen.
#[derive(Component, Debug, Clone, Copy)]
pub struct DoorHinge {
    pub sign: f32,
}

pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Hinge rotation in radians for a swing `progress`.
pub fn door_angle(progress: f32) -> f32 {
    smoothstep(progress) * std::f32::consts::FRAC_PI_2
}

/// Move the swing toward its goal. Returns the new progress and whether
/// the swing finished.
pub fn step_swing(progress: f32, opening: bool, dt: f32, swing_secs: f32) -> (f32, bool) {
    let goal = if opening { 1.0 } else { 0.0 };
    if swing_secs <= 0.0 {
        return (goal, true);
    }
    let step = dt / swing_secs;
    let next = if opening {
        (progress + step).min(1.0)
    } else {
        (progress - step).max(0.0)
    };
    (next, next == goal)
}

pub fn gate_prompt(gate: &SwingGate) -> (String, bool) {
    let label = if gate.open { "Close Gate [E]" } else { "Open Gate [E]" };
    (label.to_string(), !gate.swinging)
}

pub fn spawn_gate(commands: &mut Commands, pos: Vec2, width: f32) {
    let gate = SwingGate::closed(width);
    let half = gate.half_width;
    let collider = gate.collider();
    commands
        .spawn((
            gate,
            collider,
            Interactable::new(InteractionKind::Gate),
            GameplayEntity,
            Transform::from_xyz(pos.x, pos.y, Z_ACTOR - 0.4),
            Visibility::default(),
        ))
        .with_children(|parent| {
            // Upper door hangs down from its hinge, lower door reaches up.
            for (hinge_y, sign) in [(half, -1.0), (-half, 1.0)] {
                parent
                    .spawn((
                        DoorHinge { sign },
                        Transform::from_xyz(0.0, hinge_y, 0.0),
                        Visibility::default(),
                    ))
                    .with_children(|hinge| {
                        hinge.spawn((
                            Sprite::from_color(DOOR_COLOR, Vec2::new(DOOR_THICKNESS, half)),
                            Transform::from_xyz(0.0, -hinge_y * 0.5, 0.0),
                        ));
                    });
            }
        });
}

pub fn update_gate_prompts(mut gates: Query<(&SwingGate, &mut Interactable)>) {
    for (gate, mut interactable) in &mut gates {
        let (prompt, available) = gate_prompt(gate);
        interactable.set(prompt, available);
    }
}

pub fn toggle_gate_on_interact(
    mut commands: Commands,
    mut events: EventReader<InteractEvent>,
    mut gates: Query<&mut SwingGate>,
) {
    for event in events.read() {
        if event.kind != InteractionKind::Gate {
            continue;
        }
        let Ok(mut gate) = gates.get_mut(event.target) else {
            continue;
        };
        if gate.swinging {
            continue;
        }
        gate.open = !gate.open;
        gate.swinging = true;
        if gate.open {
            commands.entity(event.target).remove::<Fence>();
            info!("[World] Gate opening");
        } else {
            info!("[World] Gate closing");
        }
    }
}

pub fn swing_gates(
    mut commands: Commands,
    time: Res<Time>,
    balance: Res<GameBalance>,
    mut gates: Query<(Entity, &mut SwingGate, &Children)>,
    mut hinges: Query<(&DoorHinge, &mut Transform)>,
) {
    for (entity, mut gate, children) in &mut gates {
        if gate.swinging {
            let (progress, done) = step_swing(
                gate.progress,
                gate.open,
                time.delta_secs(),
                balance.world.gate_swing_secs,
            );
            gate.progress = progress;
            if done {
                gate.swinging = false;
                if !gate.open {
                    commands.entity(entity).insert(gate.collider());
                }
            }
        }

        let angle = door_angle(gate.progress);
        for child in children.iter() {
            if let Ok((hinge, mut tf)) = hinges.get_mut(*child) {
                tf.rotation = Quat::from_rotation_z(angle * hinge.sign);
            }
        }
    }
}
