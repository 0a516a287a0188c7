use std::time::Instant;

use glutin::context::PossiblyCurrentContext;

use thiserror::Error;

use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use gl_kit::geometry::{Geometry, GeometryBuilder, GeometryError, VertexAttribute};
use gl_kit::program::{Program, ProgramBuilder, ShaderError, StageKind, UniformValue};
use gl_kit::renderer::GlRenderer;

use glsketch_common::config::SketchConfig;
use glsketch_common::source::{SourceError, SourceSpec};
use glsketch_common::window::{create_gl_window, GlWindow, WindowError};

use crate::args::Args;

#[rustfmt::skip]
const TRIANGLE: [f32; 9] = [
     0.5, -0.5, 0.0,
    -0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

pub struct App {
    event_loop: EventLoop<()>,
    gl_window: GlWindow,
    gl_context: PossiblyCurrentContext,
    renderer: GlRenderer,
    geometry: Geometry,
    program: Program,
    clear_color: [f32; 3],
}

impl App {
    pub fn new(config: &SketchConfig, args: &Args) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();

        let (gl_window, gl_context) = create_gl_window(&event_loop, &config.window)?;

        let vert = SourceSpec::from_override(
            include_str!("gl_shaders/triangle.glsl"),
            args.vert.clone().or_else(|| config.shaders.vertex.clone()),
        );
        let frag = SourceSpec::from_override(
            include_str!("gl_shaders/pulse.glsl"),
            args.frag.clone().or_else(|| config.shaders.fragment.clone()),
        );

        let program = ProgramBuilder::new()
            .with_stage(StageKind::Vertex, &vert.load()?)
            .with_stage(StageKind::Fragment, &frag.load()?)
            .build()?;

        let geometry = GeometryBuilder::new(&TRIANGLE)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        Ok(Self {
            event_loop,
            gl_window,
            gl_context,
            renderer: GlRenderer::new(),
            geometry,
            program,
            clear_color: config.clear_color,
        })
    }

    pub fn run(self) -> ! {
        let Self {
            event_loop,
            gl_window,
            gl_context,
            renderer,
            geometry,
            program,
            clear_color,
        } = self;

        let started = Instant::now();

        event_loop.run(move |event, _window_target, control_flow| {
            *control_flow = ControlFlow::Poll;

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => control_flow.set_exit(),
                    WindowEvent::KeyboardInput { input, .. } => {
                        if input.virtual_keycode == Some(VirtualKeyCode::Escape)
                            && input.state == ElementState::Pressed
                        {
                            control_flow.set_exit();
                        }
                    }
                    WindowEvent::Resized(size) => {
                        if size.width != 0 && size.height != 0 {
                            gl_window.resize(&gl_context, size.width, size.height);
                            renderer.resize(size.width, size.height);
                        }
                    }
                    _ => (),
                },
                Event::MainEventsCleared => {
                    gl_window.window.request_redraw();
                }
                Event::RedrawRequested(_) => {
                    let [r, g, b] = clear_color;
                    renderer.clear_color(r, g, b);

                    let t = started.elapsed().as_secs_f32();
                    let green = t.sin() / 2.0 + 0.5;
                    program.set_uniform("ourColor", UniformValue::Vec4([0.0, green, 0.0, 1.0]));

                    renderer.draw(&geometry, &program);

                    if let Err(e) = gl_window.swap(&gl_context) {
                        log::error!("could not swap buffers: {e}");
                        control_flow.set_exit();
                    }
                }
                _ => (),
            }
        })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Window(#[from] WindowError),
    #[error("{0}")]
    Source(#[from] SourceError),
    #[error("{0}")]
    Shader(#[from] ShaderError),
    #[error("{0}")]
    Geometry(#[from] GeometryError),
}
