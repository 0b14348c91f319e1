//! 01 - Two Windows
//!
//! The smallest multi-window setup: two windows side by side, each with its
//! own render context and its own copy of the sprite texture. One sprite
//! drifts right in the first window and down in the second; each window
//! closes independently and the program exits when both are gone.
//!
//! Run with: `cargo run --example 01_two_windows`

use std::collections::HashMap;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use multiwin_core::{Body2D, EdgeBehavior, FrameClock, PixelData, Scene, Sprite, Vec2};
use multiwin_render::{pipeline::SpriteInstance, RenderContext, WindowRenderer};

/// One window plus everything created against its context
struct DemoWindow {
    window: Arc<Window>,
    ctx: RenderContext,
    renderer: WindowRenderer,
    texture: multiwin_render::SpriteTexture,
    scene: Scene,
    clock: FrameClock,
    background: [f32; 4],
}

#[derive(Default)]
struct Demo {
    windows: HashMap<WindowId, DemoWindow>,
}

impl Demo {
    fn open_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        title: &str,
        x: i32,
        background: [f32; 4],
        velocity: Vec2,
    ) {
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(title)
                        .with_inner_size(LogicalSize::new(800, 450))
                        .with_position(PhysicalPosition::new(x, 40)),
                )
                .expect("Failed to create window"),
        );

        let ctx = pollster::block_on(RenderContext::new(window.clone()))
            .expect("Failed to create render context");
        let renderer = WindowRenderer::new(&ctx);

        // Each context uploads its own copy of the same pixels
        let pixels = PixelData::checkerboard(64, 64, 8, [178, 34, 34, 255], [245, 245, 245, 255]);
        let texture = renderer.create_texture(&ctx, &pixels);

        let mut scene = Scene::new();
        scene.add_sprite(
            Sprite::new(Body2D::at(Vec2::new(300.0, 300.0)).with_velocity(velocity))
                .with_edge(EdgeBehavior::Drift),
        );

        window.request_redraw();
        self.windows.insert(
            window.id(),
            DemoWindow {
                window: window.clone(),
                ctx,
                renderer,
                texture,
                scene,
                clock: FrameClock::new(),
                background,
            },
        );
    }
}

impl ApplicationHandler for Demo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.windows.is_empty() {
            return;
        }
        self.open_window(
            event_loop,
            "two windows - window 1",
            10,
            [0.96, 0.96, 0.96, 1.0],
            Vec2::new(100.0, 0.0),
        );
        self.open_window(
            event_loop,
            "two windows - window 2",
            820,
            [0.0, 0.0, 0.0, 1.0],
            Vec2::new(0.0, 100.0),
        );
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(closed) = self.windows.remove(&id) {
                    // Texture goes before its owning context
                    closed.texture.unload();
                }
                if self.windows.is_empty() {
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(entry) = self.windows.get_mut(&id) {
                    entry.ctx.resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(entry) = self.windows.get_mut(&id) else {
                    return;
                };

                let dt = entry.clock.tick();
                let sprite_size = entry.texture.size();
                entry.scene.update(dt, sprite_size, entry.ctx.bounds());

                let instances: Vec<SpriteInstance> = entry
                    .scene
                    .iter()
                    .map(|(_key, sprite)| SpriteInstance::from_sprite(sprite, sprite_size))
                    .collect();

                if let Err(e) = entry.renderer.render_frame(
                    &entry.ctx,
                    &entry.texture,
                    &instances,
                    &[],
                    entry.background,
                ) {
                    log::warn!("Render error: {}", e);
                }

                entry.window.request_redraw();
            }

            _ => {}
        }
    }
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut demo = Demo::default();
    event_loop.run_app(&mut demo).expect("Event loop error");
}
