//! Spinning cube demo
//!
//! Minimal embedding of the engine: a cube rotating at the origin, a
//! fly-style camera driven by WASD plus right-mouse-drag look, and looping
//! background music if an audio device and track are available.
//!
//! Controls: WASD move, Space/LeftShift rise/sink, hold right mouse to look,
//! R/F dolly in/out, M toggles music, Escape quits.

use kestrel_engine::prelude::*;
use kestrel_engine::MouseConfig;

const MOVE_SPEED: f32 = 4.0;
const ZOOM_SPEED: f32 = 6.0;
const BGM_PATH: &str = "resources/audio/bgm.ogg";
const CONFIG_PATH: &str = "config.toml";

struct CubeApp {
    mouse: MouseConfig,
    angle: f32,
}

impl CubeApp {
    fn new(mouse: MouseConfig) -> Self {
        Self { mouse, angle: 0.0 }
    }
}

/// Start or stop the looping track; failures are logged and the demo plays on
fn toggle_music(engine: &mut Engine) {
    let Some(audio) = engine.audio_mut() else {
        return;
    };
    if audio.is_music_playing() {
        audio.stop_music();
    } else if let Err(err) = audio.play_looping_music(BGM_PATH) {
        log::warn!("background music unavailable: {err}");
    }
}

impl Application for CubeApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        engine
            .camera_mut()
            .set_position(Vec3::new(0.0, 2.0, 5.0));
        engine.camera_mut().set_target(Vec3::zeros());

        toggle_music(engine);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        self.angle += delta_time;

        let input = engine.input();
        if input.is_key_pressed(Key::Escape) {
            engine.stop();
            return Ok(());
        }

        // Movement along the camera basis
        let mut movement = Vec3::zeros();
        let (front, right, up) = {
            let camera = engine.camera();
            (camera.front(), camera.right(), camera.up())
        };
        let input = engine.input();
        if input.is_key_down(Key::W) {
            movement += front;
        }
        if input.is_key_down(Key::S) {
            movement -= front;
        }
        if input.is_key_down(Key::D) {
            movement += right;
        }
        if input.is_key_down(Key::A) {
            movement -= right;
        }
        if input.is_key_down(Key::Space) {
            movement += up;
        }
        if input.is_key_down(Key::LeftShift) {
            movement -= up;
        }

        let zoom = f32::from(input.is_key_down(Key::R)) - f32::from(input.is_key_down(Key::F));

        // Mouse look while the right button is held
        let look = if input.is_mouse_button_down(MouseButton::Button2) {
            input.look_delta() * self.mouse.look_sensitivity
        } else {
            Vec2::zeros()
        };

        let music_toggled = input.is_key_pressed(Key::M);

        let camera = engine.camera_mut();
        if movement.norm_squared() > 0.0 {
            camera.translate(movement.normalize() * MOVE_SPEED * delta_time);
        }
        if zoom != 0.0 {
            camera.zoom(zoom * ZOOM_SPEED * delta_time);
        }
        if look.x != 0.0 {
            camera.rotate_yaw(look.x);
        }
        if look.y != 0.0 {
            // Screen Y grows downward; dragging up pitches up
            camera.rotate_pitch(-look.y);
        }

        if music_toggled {
            toggle_music(engine);
        }

        Ok(())
    }

    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let model = Mat4::from_axis_angle(&Vec3::y_axis(), self.angle)
            * Mat4::from_axis_angle(&Vec3::x_axis(), self.angle * 0.5);

        engine
            .renderer_mut()
            .draw_primitive(PrimitiveKind::Cube, &model)
            .map_err(|e| AppError::Custom(e.to_string()))
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        log::info!("cube demo exiting");
    }
}

fn main() -> Result<(), EngineError> {
    kestrel_engine::foundation::logging::init();

    let config = match EngineConfig::from_file(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            log::debug!("no usable {CONFIG_PATH} ({err}), using defaults");
            EngineConfig::default()
        }
    };

    let mut app = CubeApp::new(config.mouse.clone());
    Engine::run(config, &mut app)
}
