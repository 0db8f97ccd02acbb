use std::ffi::{CStr, CString, c_void};
use std::ptr;

use anyhow::{Context, anyhow};
use cgmath::{Matrix, Matrix4};
use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};

pub struct VertexArray {
    id: u32,
    vbos: Vec<VertexBuffer>,
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
        }
        tracing::debug!("Created vertex array with id: {}", id);

        Self {
            id,
            vbos: Vec::new(),
        }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::BindVertexArray(0);
        }
    }

    /// Must be called while this vertex array is bound.
    pub fn bind_vertex_buffer(&mut self, vbo: VertexBuffer) {
        vbo.bind();
        vbo.bind_vertex_attributes();
        self.vbos.push(vbo)
    }

    pub fn vertex_buffer(&self, index: usize) -> Option<&VertexBuffer> {
        self.vbos.get(index)
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            tracing::debug!("Deleting vertex array with id: {}", self.id);
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub enum GLDataType {
    Float = gl::FLOAT as isize,
}

pub struct VertexAttribute {
    pub(crate) index: u32,
    pub(crate) size: i32,
    pub(crate) data_type: GLDataType,
    pub(crate) normalized: bool,
    pub(crate) stride: GLint,
    pub(crate) offset: usize,
}

impl VertexAttribute {
    /// A tightly packed float attribute inside an interleaved vertex of
    /// `stride_floats` floats.
    pub fn float(index: u32, size: i32, stride_floats: usize, offset_floats: usize) -> Self {
        Self {
            index,
            size,
            data_type: GLDataType::Float,
            normalized: false,
            stride: (stride_floats * size_of::<f32>()) as GLint,
            offset: offset_floats * size_of::<f32>(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times.
    Static = gl::STATIC_DRAW as isize,
    /// Rewritten before every draw.
    Stream = gl::STREAM_DRAW as isize,
}

pub struct VertexBuffer {
    id: u32,
    usage: BufferUsage,
    capacity: usize,
    vertex_attributes: Vec<VertexAttribute>,
}

impl VertexBuffer {
    pub fn new<T>(data: &[T]) -> Self {
        let vbo = Self::generate(BufferUsage::Static, size_of_val(data));

        vbo.bind();
        vbo.buffer_data(data);
        vbo.unbind();

        vbo
    }

    /// Allocates `capacity` bytes of uninitialized storage meant to be
    /// refilled with [`VertexBuffer::buffer_sub_data`].
    pub fn with_capacity(capacity: usize) -> Self {
        let vbo = Self::generate(BufferUsage::Stream, capacity);

        vbo.bind();
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                capacity as isize,
                ptr::null(),
                vbo.usage as GLenum,
            );
        }
        vbo.unbind();

        vbo
    }

    fn generate(usage: BufferUsage, capacity: usize) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
        }
        tracing::debug!(
            "Created vertex buffer with id: {} ({:?}, {} bytes)",
            id,
            usage,
            capacity
        );

        Self {
            id,
            usage,
            capacity,
            vertex_attributes: Vec::new(),
        }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, self.id);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn buffer_data<T>(&self, data: &[T]) {
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                size_of_val(data) as isize,
                data.as_ptr() as *const _,
                self.usage as GLenum,
            );
        }
    }

    /// Must be called while this buffer is bound.
    pub fn buffer_sub_data<T>(&self, offset: isize, data: &[T]) -> anyhow::Result<()> {
        let size = size_of_val(data);
        if offset < 0 || offset as usize + size > self.capacity {
            return Err(anyhow!(
                "Write of {} bytes at offset {} overflows vertex buffer {} ({} bytes)",
                size,
                offset,
                self.id,
                self.capacity
            ));
        }

        unsafe {
            gl::BufferSubData(
                gl::ARRAY_BUFFER,
                offset,
                size as isize,
                data.as_ptr() as *const _,
            );
        }

        Ok(())
    }

    pub fn add_vertex_attribute(&mut self, attribute: VertexAttribute) {
        self.vertex_attributes.push(attribute);
    }

    pub fn bind_vertex_attributes(&self) {
        for attr in &self.vertex_attributes {
            unsafe {
                gl::VertexAttribPointer(
                    attr.index,
                    attr.size,
                    attr.data_type as GLenum,
                    if attr.normalized { gl::TRUE } else { gl::FALSE },
                    attr.stride,
                    attr.offset as *const c_void,
                );
                gl::EnableVertexAttribArray(attr.index);
            }
        }
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe {
            tracing::debug!("Deleting vertex buffer with id: {}", self.id);
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

pub struct Shader {
    id: u32,
}

impl Shader {
    pub fn new(vertex_shader_source: &str, fragment_shader_source: &str) -> anyhow::Result<Self> {
        let vertex_shader = Shader::compile_shader(gl::VERTEX_SHADER, vertex_shader_source)
            .context("Vertex shader compilation failed")?;
        let fragment_shader =
            match Shader::compile_shader(gl::FRAGMENT_SHADER, fragment_shader_source) {
                Ok(shader) => shader,
                Err(err) => {
                    unsafe { gl::DeleteShader(vertex_shader) };
                    return Err(err.context("Fragment shader compilation failed"));
                }
            };

        let id = unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vertex_shader);
            gl::AttachShader(program, fragment_shader);
            gl::LinkProgram(program);

            // Shaders are no longer needed once the program is linked
            gl::DeleteShader(vertex_shader);
            gl::DeleteShader(fragment_shader);

            let mut status = gl::FALSE as GLint;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

            if status != (gl::TRUE as GLint) {
                let mut len: GLint = 0;
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
                let mut buf = vec![0u8; len.max(1) as usize];
                let mut written: GLsizei = 0;
                gl::GetProgramInfoLog(
                    program,
                    len,
                    &mut written,
                    buf.as_mut_ptr() as *mut GLchar,
                );
                gl::DeleteProgram(program);

                let log = info_log_to_string(buf, written);
                tracing::error!("Shader program linking failed:\n{}", log);
                return Err(anyhow!("Shader program linking failed: {}", log));
            }

            program
        };

        tracing::debug!("Created shader program with id: {}", id);

        Ok(Self { id })
    }

    fn compile_shader(shader_type: GLenum, source: &str) -> anyhow::Result<GLuint> {
        let c_str = CString::new(source).context("Shader source contains a nul byte")?;
        let shader = unsafe { gl::CreateShader(shader_type) };
        unsafe {
            gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
            gl::CompileShader(shader);
        }

        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        }
        if status != (gl::TRUE as GLint) {
            let mut len = 0;
            unsafe {
                gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            }
            let mut buf = vec![0u8; len.max(1) as usize];
            let mut written: GLsizei = 0;
            unsafe {
                gl::GetShaderInfoLog(
                    shader,
                    len,
                    &mut written,
                    buf.as_mut_ptr() as *mut GLchar,
                );
                gl::DeleteShader(shader);
            }

            let log = info_log_to_string(buf, written);
            tracing::error!("Shader compilation failed:\n{}", log);
            return Err(anyhow!("{}", log));
        }

        Ok(shader)
    }

    pub fn use_program(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::UseProgram(0);
        }
    }

    /// Uploads `matrix` to the uniform called `name` of the bound program.
    /// Programs that don't declare the uniform ignore it.
    pub fn set_mat4(&self, name: &CStr, matrix: &Matrix4<f32>) {
        unsafe {
            let location = gl::GetUniformLocation(self.id, name.as_ptr());
            if location != -1 {
                gl::UniformMatrix4fv(location, 1, gl::FALSE, matrix.as_ptr());
            }
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            tracing::debug!("Deleting shader program with id: {}", self.id);
            gl::DeleteProgram(self.id);
        }
    }
}

fn info_log_to_string(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).trim_end().to_owned()
}
