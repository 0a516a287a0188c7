use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::config::WindowConfig;

pub struct GlWindow {
    // field order matters: the surface has to drop before the window
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    fn new(window: Window, config: &Config) -> Result<Self, WindowError> {
        let (width, height): (u32, u32) = window.inner_size().into();

        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window.raw_window_handle(),
            NonZeroU32::new(width).ok_or(WindowError::ZeroSize)?,
            NonZeroU32::new(height).ok_or(WindowError::ZeroSize)?,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { surface, window })
    }

    pub fn resize(&self, context: &PossiblyCurrentContext, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(context, width, height);
        }
    }

    pub fn swap(&self, context: &PossiblyCurrentContext) -> Result<(), WindowError> {
        self.surface.swap_buffers(context)?;

        Ok(())
    }
}

/// Opens a window, creates a current GL 3.3 core context for it and loads
/// the GL function pointers. Everything the GL object layer does afterwards
/// assumes this succeeded, so any failure here is final.
pub fn create_gl_window(
    event_loop: &EventLoop<()>,
    config: &WindowConfig,
) -> Result<(GlWindow, PossiblyCurrentContext), WindowError> {
    let window_builder = WindowBuilder::new()
        .with_inner_size(Size::Physical(PhysicalSize::new(config.width, config.height)))
        .with_title(&config.title);
    let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
    let template = ConfigTemplateBuilder::new();

    let (window, gl_config) = display_builder
        .build(event_loop, template, |mut configs| configs.next().unwrap())
        .map_err(|e| WindowError::Display(e.to_string()))?;

    let window = window.ok_or_else(|| WindowError::Display("no window was created".to_string()))?;

    let gl_display = gl_config.display();

    let context_attr = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(window.raw_window_handle()));

    let gl_window = GlWindow::new(window, &gl_config)?;

    let context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
        .make_current(&gl_window.surface)?;

    gl::load_with(|s| {
        gl_display
            .get_proc_address(CString::new(s).unwrap().as_c_str())
            .cast()
    });

    if !loader_complete() {
        return Err(WindowError::MissingSymbols);
    }

    log::info!(
        "created {}x{} GL window \"{}\"",
        config.width,
        config.height,
        config.title
    );

    Ok((gl_window, context))
}

/// Spot check of the entry points the object layer relies on. A display
/// that cannot provide these cannot run any sketch.
fn loader_complete() -> bool {
    gl::CreateShader::is_loaded()
        && gl::CreateProgram::is_loaded()
        && gl::GetUniformLocation::is_loaded()
        && gl::GenVertexArrays::is_loaded()
        && gl::GenTextures::is_loaded()
        && gl::DrawArrays::is_loaded()
        && gl::DrawElements::is_loaded()
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("could not create window and display: {0}")]
    Display(String),
    #[error("{0}")]
    Context(#[from] glutin::error::Error),
    #[error("window surface has zero size")]
    ZeroSize,
    #[error("OpenGL loader is missing required functions")]
    MissingSymbols,
}
