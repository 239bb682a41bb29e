//! Demo host modules.
//!
//! Two independent modules, each owning its state and registering one page.

use std::sync::{Arc, Mutex, PoisonError};

use modsettings::{
    Accessor, Control, Enumeration, Host, Registry, Result, Value, enum_field, field, method,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Casual,
    Normal,
    Veteran,
}

impl Enumeration for Difficulty {
    const VARIANTS: &'static [Self] = &[Difficulty::Casual, Difficulty::Normal, Difficulty::Veteran];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    Orthographic,
}

impl Enumeration for Projection {
    const VARIANTS: &'static [Self] = &[Projection::Perspective, Projection::Orthographic];
}

/// Player movement and survival tweaks.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTweaks {
    pub nickname: String,
    pub notes: String,
    pub god_mode: bool,
    pub difficulty: Difficulty,
    pub lives: i32,
    pub walk_speed: f32,
    pub max_speed: f32,
    pub health: i32,
}

impl Default for PlayerTweaks {
    fn default() -> Self {
        Self {
            nickname: "Courier".to_string(),
            notes: String::new(),
            god_mode: false,
            difficulty: Difficulty::Normal,
            lives: 3,
            walk_speed: 4.5,
            max_speed: 12.0,
            health: 100,
        }
    }
}

impl PlayerTweaks {
    const MAX_HEALTH: i32 = 100;

    fn heal(&mut self, args: &[Value]) {
        let amount = match args.first() {
            Some(Value::Int(n)) => *n,
            _ => 1,
        };
        self.health = (self.health + amount).min(Self::MAX_HEALTH);
    }

    fn regenerate(&mut self) {
        self.heal(&[Value::Int(1)]);
    }

    fn respawn(&mut self) {
        self.health = Self::MAX_HEALTH;
        self.lives = (self.lives - 1).max(0);
    }

    fn controls() -> Result<Vec<Control>> {
        Ok(vec![
            Control::label("Movement and survival tweaks for the local player."),
            Control::dynamic_label(Accessor::getter("status", |p: &PlayerTweaks| {
                format!("Health {} / {}", p.health, Self::MAX_HEALTH)
            })),
            Control::text_field(field!(PlayerTweaks, nickname))?,
            Control::text_area(field!(PlayerTweaks, notes))?,
            Control::toggle(field!(PlayerTweaks, god_mode), "God mode")?,
            Control::toolbar(
                enum_field!(PlayerTweaks, difficulty),
                ["Casual", "Normal", "Veteran"],
            )?,
            Control::horizontal_slider(field!(PlayerTweaks, lives), 1.0, 9.0)?,
            Control::horizontal_slider(field!(PlayerTweaks, max_speed), 1.0, 20.0)?,
            Control::horizontal_slider(
                field!(PlayerTweaks, walk_speed),
                0.5,
                field!(PlayerTweaks, max_speed),
            )?,
            Control::spacing(15),
            Control::button_with_args(
                "Heal +25",
                method!(PlayerTweaks, heal, args),
                vec![Value::Int(25)],
            ),
            Control::repeat_button("Regenerate", method!(PlayerTweaks, regenerate)),
            Control::button("Respawn", method!(PlayerTweaks, respawn)),
        ])
    }
}

/// Third-person camera rig.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub projection: Projection,
    pub preset: i32,
    pub fov: f32,
    pub height: f32,
    pub render_distance: i32,
    pub smoothing: bool,
    pub zoom: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective,
            preset: 1,
            fov: 75.0,
            height: 1.8,
            render_distance: 250,
            smoothing: true,
            zoom: 1.0,
        }
    }
}

impl CameraRig {
    fn zoom(&mut self, args: &[Value]) {
        let delta = args.first().and_then(Value::as_f32).unwrap_or(0.0);
        self.zoom = (self.zoom + delta).clamp(0.25, 8.0);
    }

    fn controls() -> Result<Vec<Control>> {
        Ok(vec![
            Control::toolbar(
                enum_field!(CameraRig, projection),
                ["Perspective", "Orthographic"],
            )?,
            Control::selection_grid(
                field!(CameraRig, preset),
                ["Close", "Shoulder", "Far", "Top", "Side", "Free"],
                3,
            )?,
            Control::horizontal_slider(field!(CameraRig, fov), 40.0, 120.0)?,
            Control::vertical_slider(field!(CameraRig, height), 0.0, 10.0)?,
            Control::horizontal_slider(field!(CameraRig, render_distance), 50.0, 500.0)?,
            Control::toggle(field!(CameraRig, smoothing), "Smooth follow")?,
            Control::dynamic_label(Accessor::getter("zoom_level", |c: &CameraRig| {
                format!("Zoom x{:.2}", c.zoom)
            })),
            Control::repeat_button_with_args(
                "Zoom in",
                method!(CameraRig, zoom, args),
                vec![Value::Float(0.05)],
            ),
            Control::repeat_button_with_args(
                "Zoom out",
                method!(CameraRig, zoom, args),
                vec![Value::Float(-0.05)],
            ),
        ])
    }
}

/// State of both demo modules.
#[derive(Debug, Clone, Default)]
pub struct Demo {
    pub player: Arc<Mutex<PlayerTweaks>>,
    pub camera: Arc<Mutex<CameraRig>>,
}

impl Demo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register both pages with the process-wide registry.
    pub fn register_global(&self) -> Result<()> {
        self.register_with(|name, host, controls, reset| {
            modsettings::register_page_with_reset(name, host, controls, reset)
        })
    }

    pub fn register(&self, registry: &mut Registry) -> Result<()> {
        self.register_with(|name, host, controls, reset| {
            registry.register_page_with_reset(name, host, controls, reset)
        })
    }

    fn register_with(
        &self,
        mut register: impl FnMut(&str, Host, Vec<Control>, bool) -> Result<()>,
    ) -> Result<()> {
        let player: Host = self.player.clone();
        register("PlayerTweaks", player, PlayerTweaks::controls()?, true)?;
        // camera settings are cheap to redo by hand
        let camera: Host = self.camera.clone();
        register("CameraRig", camera, CameraRig::controls()?, false)
    }

    /// One-line summaries shown while the menu is hidden.
    pub fn status(&self) -> Vec<String> {
        let player = self.player.lock().unwrap_or_else(PoisonError::into_inner);
        let camera = self.camera.lock().unwrap_or_else(PoisonError::into_inner);
        vec![
            format!(
                "{} ({:?}): health {}, lives {}, speed {:.1}/{:.1}{}",
                player.nickname,
                player.difficulty,
                player.health,
                player.lives,
                player.walk_speed,
                player.max_speed,
                if player.god_mode { ", god mode" } else { "" },
            ),
            format!(
                "Camera: {:?}, preset {}, fov {:.0}, height {:.1}, distance {}, zoom x{:.2}",
                camera.projection,
                camera.preset,
                camera.fov,
                camera.height,
                camera.render_distance,
                camera.zoom,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use modsettings::{Config, MemoryStore, Settings};

    use super::*;

    fn settings(demo: &Demo) -> Settings<MemoryStore> {
        let mut registry = Registry::new();
        demo.register(&mut registry).unwrap();
        Settings::startup(registry, MemoryStore::new(), Config::default()).unwrap()
    }

    #[test]
    fn test_pages_cover_every_control() {
        let demo = Demo::new();
        let settings = settings(&demo);
        let names: Vec<&str> = settings.pages().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["CameraRig", "PlayerTweaks"]);

        let kinds: BTreeSet<&str> = settings
            .pages()
            .iter()
            .flat_map(|p| p.controls())
            .map(Control::kind_name)
            .collect();
        assert_eq!(kinds.len(), 11);
        assert!(!settings.pages()[0].reset_enabled());
    }

    #[test]
    fn test_actions() {
        let mut player = PlayerTweaks {
            health: 90,
            ..Default::default()
        };
        player.heal(&[Value::Int(25)]);
        assert_eq!(player.health, 100);
        player.health = 10;
        player.regenerate();
        assert_eq!(player.health, 11);
        player.respawn();
        assert_eq!((player.health, player.lives), (100, 2));

        let mut camera = CameraRig::default();
        camera.zoom(&[Value::Float(-5.0)]);
        assert_eq!(camera.zoom, 0.25);
    }

    #[test]
    fn test_reset_restores_startup_values() {
        let demo = Demo::new();
        let mut settings = settings(&demo);
        let index = settings
            .pages()
            .iter()
            .position(|p| p.name() == "PlayerTweaks")
            .unwrap();

        {
            let mut player = demo.player.lock().unwrap();
            player.lives = 7;
            player.difficulty = Difficulty::Veteran;
            player.health = 12;
        }
        settings.reset(index).unwrap();

        let player = demo.player.lock().unwrap();
        assert_eq!(player.lives, 3);
        assert_eq!(player.difficulty, Difficulty::Normal);
        // not bound to a value control
        assert_eq!(player.health, 12);
    }
}
