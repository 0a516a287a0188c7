use std::path::Path;
use std::time::Instant;

use cgmath::{Matrix4, Rad, Vector3};

use glutin::context::PossiblyCurrentContext;

use thiserror::Error;

use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use gl_kit::geometry::{Geometry, GeometryBuilder, GeometryError, VertexAttribute};
use gl_kit::program::{Program, ProgramBuilder, ShaderError, StageKind, UniformValue};
use gl_kit::renderer::GlRenderer;
use gl_kit::texture::{Texture2D, TextureError, TextureFilter, TextureFormat, TextureWrap};

use glsketch_common::config::SketchConfig;
use glsketch_common::image::{Image, ImageError};
use glsketch_common::source::{SourceError, SourceSpec};
use glsketch_common::window::{create_gl_window, GlWindow, WindowError};

use crate::args::Args;

#[rustfmt::skip]
const QUAD_VERTICES: [f32; 32] = [
    // position        color            uv
     0.5,  0.5, 0.0,   1.0, 0.0, 0.0,   1.0, 1.0,
     0.5, -0.5, 0.0,   0.0, 1.0, 0.0,   1.0, 0.0,
    -0.5, -0.5, 0.0,   0.0, 0.0, 1.0,   0.0, 0.0,
    -0.5,  0.5, 0.0,   1.0, 1.0, 0.0,   0.0, 1.0,
];

#[rustfmt::skip]
const QUAD_INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

const PATTERN_SIZE: u32 = 256;

pub struct App {
    event_loop: EventLoop<()>,
    gl_window: GlWindow,
    gl_context: PossiblyCurrentContext,
    renderer: GlRenderer,
    geometry: Geometry,
    program: Program,
    base: Texture2D,
    overlay: Texture2D,
    clear_color: [f32; 3],
}

impl App {
    pub fn new(config: &SketchConfig, args: &Args) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();

        let (gl_window, gl_context) = create_gl_window(&event_loop, &config.window)?;

        let vert = SourceSpec::from_override(
            include_str!("gl_shaders/quad.glsl"),
            args.vert.clone().or_else(|| config.shaders.vertex.clone()),
        );
        let frag = SourceSpec::from_override(
            include_str!("gl_shaders/blend.glsl"),
            args.frag.clone().or_else(|| config.shaders.fragment.clone()),
        );

        let program = ProgramBuilder::new()
            .with_stage(StageKind::Vertex, &vert.load()?)
            .with_stage(StageKind::Fragment, &frag.load()?)
            .build()?;

        // sampler units are fixed for the lifetime of the program
        program.set_uniform("baseTexture", UniformValue::Int(0));
        program.set_uniform("overlayTexture", UniformValue::Int(1));

        let geometry = GeometryBuilder::new(&QUAD_VERTICES)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec2)
            .with_indices(&QUAD_INDICES)
            .build()?;

        let base = upload(&base_image(config.textures.base.as_deref())?)?;
        let overlay = upload(&overlay_image(config.textures.overlay.as_deref())?)?;

        Ok(Self {
            event_loop,
            gl_window,
            gl_context,
            renderer: GlRenderer::new(),
            geometry,
            program,
            base,
            overlay,
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
            base,
            overlay,
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
                    let transform = Matrix4::from_translation(Vector3::new(0.5, -0.5, 0.0))
                        * Matrix4::from_angle_z(Rad(t));
                    program.set_uniform("transform", UniformValue::Mat4(transform.into()));

                    base.bind(0);
                    overlay.bind(1);

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

fn base_image(path: Option<&Path>) -> Result<Image, ImageError> {
    match path {
        Some(path) => Image::from_png(path),
        None => Ok(Image::checkerboard(
            PATTERN_SIZE,
            8,
            [230, 230, 230],
            [25, 25, 25],
        )),
    }
}

fn overlay_image(path: Option<&Path>) -> Result<Image, ImageError> {
    match path {
        Some(path) => Image::from_png(path),
        None => Ok(Image::radial_glow(PATTERN_SIZE, [255, 180, 60])),
    }
}

fn upload(image: &Image) -> Result<Texture2D, TextureError> {
    Texture2D::new(
        image.width,
        image.height,
        &image.pixels,
        TextureFormat::Rgba,
        TextureFilter::Linear,
        TextureWrap::Repeat,
    )
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
    #[error("{0}")]
    Image(#[from] ImageError),
    #[error("{0}")]
    Texture(#[from] TextureError),
}
