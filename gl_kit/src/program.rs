use std::ffi::{c_char, CString};
use std::fmt;

use gl::types::{GLenum, GLuint};
use thiserror::Error;

/// Driver info logs are read into a buffer of this size and truncated there.
const INFO_LOG_BUF: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    fn gl_kind(self) -> GLenum {
        match self {
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A compiled shader object. Only useful as input to [`Program::link`],
/// which consumes and deletes it whatever the link outcome.
pub struct ShaderStage {
    id: GLuint,
    kind: StageKind,
}

impl ShaderStage {
    pub fn compile(kind: StageKind, source: &str) -> Result<Self, ShaderError> {
        let source = CString::new(source).map_err(|_| ShaderError::Compile {
            stage: kind,
            log: "source contains a NUL byte".to_string(),
        })?;

        let mut success = 0;

        unsafe {
            let id = gl::CreateShader(kind.gl_kind());

            gl::ShaderSource(
                id,
                1,
                (&source.as_ptr()) as *const *const c_char,
                std::ptr::null(),
            );

            gl::CompileShader(id);
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);

            if success != 1 {
                let log = stage_log(id);
                gl::DeleteShader(id);

                return Err(ShaderError::Compile { stage: kind, log });
            }

            Ok(Self { id, kind })
        }
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }
}

impl Drop for ShaderStage {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) }
    }
}

/// A value uploadable to a named uniform slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    /// Column-major, as produced by `cgmath::Matrix4::into()`.
    Mat4([[f32; 4]; 4]),
}

/// A linked shader program. The GL object is deleted on drop.
pub struct Program {
    id: GLuint,
}

impl Program {
    /// Links the given stages into a program. The stage objects are
    /// single-use and are deleted here, on failure as well as on success.
    pub fn link(stages: Vec<ShaderStage>) -> Result<Self, ShaderError> {
        if stages.is_empty() {
            return Err(ShaderError::NoStages);
        }

        let mut success = 0;

        unsafe {
            let id = gl::CreateProgram();

            for stage in &stages {
                gl::AttachShader(id, stage.id);
            }

            gl::LinkProgram(id);
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);

            for stage in &stages {
                gl::DetachShader(id, stage.id);
            }
            drop(stages);

            if success != 1 {
                let log = program_log(id);
                gl::DeleteProgram(id);

                return Err(ShaderError::Link { log });
            }

            Ok(Self { id })
        }
    }

    /// Makes this program the active one on the current context.
    /// Last bind wins.
    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) }
    }

    /// Uploads `value` to the uniform named `name` (exact, case-sensitive
    /// match against the shader source). A name that is not an active
    /// uniform of this program resolves to the sentinel location, which the
    /// upload calls ignore, so this is silently a no-op.
    pub fn set_uniform(&self, name: &str, value: UniformValue) {
        let name = match CString::new(name) {
            Ok(name) => name,
            // GLSL identifiers cannot contain NUL
            Err(_) => return,
        };

        unsafe {
            gl::UseProgram(self.id);
            let location = gl::GetUniformLocation(self.id, name.as_ptr());

            match value {
                UniformValue::Int(v) => gl::Uniform1i(location, v),
                UniformValue::Float(v) => gl::Uniform1f(location, v),
                UniformValue::Vec3([x, y, z]) => gl::Uniform3f(location, x, y, z),
                UniformValue::Vec4([x, y, z, w]) => gl::Uniform4f(location, x, y, z, w),
                UniformValue::Mat4(m) => {
                    gl::UniformMatrix4fv(location, 1, gl::FALSE, m.as_ptr() as *const f32)
                }
            }
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

/// Source-level builder: collects stage sources, then compiles and links
/// them in order with one call.
pub struct ProgramBuilder {
    stages: Vec<(StageKind, String)>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn with_stage(mut self, kind: StageKind, source: &str) -> Self {
        self.stages.push((kind, source.to_string()));
        self
    }

    pub fn build(self) -> Result<Program, ShaderError> {
        let mut compiled = Vec::with_capacity(self.stages.len());

        for (kind, source) in &self.stages {
            compiled.push(ShaderStage::compile(*kind, source)?);
        }

        Program::link(compiled)
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: StageKind, log: String },
    #[error("program linking failed: {log}")]
    Link { log: String },
    #[error("cannot link a program with no stages")]
    NoStages,
}

unsafe fn stage_log(id: GLuint) -> String {
    let mut buf = [0_u8; INFO_LOG_BUF];

    gl::GetShaderInfoLog(
        id,
        INFO_LOG_BUF as i32,
        std::ptr::null_mut(),
        buf.as_mut_ptr() as *mut c_char,
    );

    trim_log(&buf)
}

unsafe fn program_log(id: GLuint) -> String {
    let mut buf = [0_u8; INFO_LOG_BUF];

    gl::GetProgramInfoLog(
        id,
        INFO_LOG_BUF as i32,
        std::ptr::null_mut(),
        buf.as_mut_ptr() as *mut c_char,
    );

    trim_log(&buf)
}

fn trim_log(buf: &[u8]) -> String {
    let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());

    String::from_utf8_lossy(&buf[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_trimmed_at_first_nul() {
        let mut buf = [0_u8; 16];
        buf[..5].copy_from_slice(b"0:1: ");

        assert_eq!(trim_log(&buf), "0:1: ");
    }

    #[test]
    fn log_without_nul_keeps_whole_buffer() {
        let buf = [b'x'; 8];

        assert_eq!(trim_log(&buf), "xxxxxxxx");
    }

    #[test]
    fn log_with_invalid_utf8_is_lossy_not_panicking() {
        let buf = [b'e', b'r', b'r', 0xFF, 0];

        assert_eq!(trim_log(&buf), "err\u{FFFD}");
    }

    #[test]
    fn stage_kinds_map_to_gl_enums() {
        assert_eq!(StageKind::Vertex.gl_kind(), gl::VERTEX_SHADER);
        assert_eq!(StageKind::Fragment.gl_kind(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn stage_kinds_display_for_diagnostics() {
        let err = ShaderError::Compile {
            stage: StageKind::Fragment,
            log: "0:3: syntax error".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "fragment shader compilation failed: 0:3: syntax error"
        );
    }
}
