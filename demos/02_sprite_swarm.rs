//! 02 - Sprite Swarm
//!
//! One window, many bouncing sprites. Every sprite starts from the window
//! center with a different heading and reflects off the framebuffer edges;
//! the smoothed frame rate is shown in the title.
//!
//! Run with: `cargo run --example 02_sprite_swarm`

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use multiwin_core::{Body2D, FpsCounter, FrameClock, PixelData, Scene, Sprite, Tint, Vec2};
use multiwin_render::{pipeline::SpriteInstance, RenderContext, SpriteTexture, WindowRenderer};

const SPRITE_COUNT: u32 = 100;
const SPEED: f32 = 180.0;
const GOLDEN_ANGLE: f32 = 2.399_963;

struct Swarm {
    window: Option<Arc<Window>>,
    ctx: Option<RenderContext>,
    renderer: Option<WindowRenderer>,
    texture: Option<SpriteTexture>,
    scene: Scene,
    clock: FrameClock,
    fps: FpsCounter,
}

impl Swarm {
    fn new() -> Self {
        let mut scene = Scene::new();
        let center = Vec2::new(400.0, 225.0);
        for i in 0..SPRITE_COUNT {
            let angle = i as f32 * GOLDEN_ANGLE;
            let dir = Vec2::new(angle.cos(), angle.sin());
            // Fade the tint with the spawn index so the swarm shimmers
            let shade = 0.5 + 0.5 * (i as f32 / SPRITE_COUNT as f32);
            scene.add_sprite(
                Sprite::new(Body2D::at(center).with_velocity(dir * SPEED))
                    .with_tint(Tint::from_rgb(shade, shade, 1.0)),
            );
        }
        Self {
            window: None,
            ctx: None,
            renderer: None,
            texture: None,
            scene,
            clock: FrameClock::new(),
            fps: FpsCounter::new(),
        }
    }
}

impl ApplicationHandler for Swarm {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("sprite swarm")
                        .with_inner_size(LogicalSize::new(800, 450)),
                )
                .expect("Failed to create window"),
        );

        let ctx = pollster::block_on(RenderContext::new(window.clone()))
            .expect("Failed to create render context");
        let renderer = WindowRenderer::new(&ctx);

        let pixels = PixelData::checkerboard(32, 32, 4, [30, 30, 60, 255], [220, 220, 255, 255]);
        let texture = renderer.create_texture(&ctx, &pixels);

        window.request_redraw();
        self.window = Some(window);
        self.ctx = Some(ctx);
        self.renderer = Some(renderer);
        self.texture = Some(texture);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(ctx) = &mut self.ctx {
                    ctx.resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                let (Some(window), Some(ctx), Some(renderer), Some(texture)) = (
                    &self.window,
                    &self.ctx,
                    &mut self.renderer,
                    &self.texture,
                ) else {
                    return;
                };

                let dt = self.clock.tick();
                self.fps.sample(dt);

                let sprite_size = texture.size();
                self.scene.update(dt, sprite_size, ctx.bounds());

                let instances: Vec<SpriteInstance> = self
                    .scene
                    .iter()
                    .map(|(_key, sprite)| SpriteInstance::from_sprite(sprite, sprite_size))
                    .collect();

                if let Err(e) =
                    renderer.render_frame(ctx, texture, &instances, &[], [0.02, 0.02, 0.08, 1.0])
                {
                    log::warn!("Render error: {}", e);
                }

                if self.fps.frame_count() % 30 == 0 {
                    window.set_title(&format!(
                        "sprite swarm - {} sprites ({:.0} FPS)",
                        self.scene.sprite_count(),
                        self.fps.fps()
                    ));
                }

                window.request_redraw();
            }

            _ => {}
        }
    }
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut swarm = Swarm::new();
    event_loop.run_app(&mut swarm).expect("Event loop error");
}
