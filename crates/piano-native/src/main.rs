use piano_core::constants::CAMERA_FOVY_RADIANS;
use piano_core::input::InputEvent;
use piano_core::{AppConfig, PianoApp, PointScene};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::*;
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

mod audio;
mod gpu;
mod input;

const MAX_FRAME_DT_SEC: f32 = 0.1;
const STATS_LOG_SEC: f32 = 5.0;

type SharedScene = Rc<RefCell<PointScene>>;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let scene: SharedScene = Rc::new(RefCell::new(PointScene::new()));
    let synth = audio::CpalSynth::start();
    let mut app = PianoApp::new(scene.clone(), synth, AppConfig::seeded())?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Star Piano (native)")
        .with_inner_size(LogicalSize::new(1280.0, 720.0))
        .build(&event_loop)?;

    let mut state = pollster::block_on(gpu::GpuState::new(&window))?;
    {
        let (w, h) = state.size();
        app.set_viewport(w as f32, h as f32);
    }
    log::info!(
        "[app] ready, fov {:.0} deg; Esc quits, Home resets the camera",
        CAMERA_FOVY_RADIANS.to_degrees()
    );

    let mut cursor = PhysicalPosition::new(0.0f64, 0.0f64);
    let mut dragging = false;
    let mut last_frame = Instant::now();
    let mut stats_accum = 0.0f32;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                state.resize(size);
                let (w, h) = state.size();
                app.set_viewport(w as f32, h as f32);
            }
            WindowEvent::CursorMoved { position, .. } => {
                cursor = position;
                if dragging {
                    app.push(InputEvent::DragMove {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => match button_state {
                ElementState::Pressed => {
                    dragging = true;
                    app.push(InputEvent::DragStart {
                        x: cursor.x as f32,
                        y: cursor.y as f32,
                    });
                }
                ElementState::Released => {
                    if std::mem::take(&mut dragging) {
                        app.push(InputEvent::DragEnd);
                    }
                }
            },
            WindowEvent::MouseWheel { delta, .. } => app.push(input::scroll_event(delta)),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => elwt.exit(),
                Key::Named(NamedKey::Home) => app.reset_camera(),
                ref key => {
                    if let Some(key) = input::key_name(key) {
                        app.push(InputEvent::KeyDown { key, repeat });
                    }
                }
            },
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let dt_sec = (now - last_frame).as_secs_f32().min(MAX_FRAME_DT_SEC);
            last_frame = now;
            app.tick(dt_sec);

            let frame = app.frame_instances(&scene.borrow());
            let uniforms = app.uniforms();
            match state.render(&uniforms, &frame) {
                Ok(draws) => {
                    app.stats_mut()
                        .set_geometry(draws.draw_calls, draws.triangles);
                    state.window.request_redraw();
                }
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    state.resize(state.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    elwt.exit()
                }
                Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
            }

            stats_accum += dt_sec;
            if stats_accum >= STATS_LOG_SEC {
                stats_accum = 0.0;
                let s = app.stats();
                log::info!(
                    "[stats] {:.0} fps, {} draws, {} tris, {} particles",
                    s.fps,
                    s.draw_calls,
                    s.triangles,
                    app.animator().active_particle_count()
                );
            }
        }
        _ => {}
    })?;
    Ok(())
}
