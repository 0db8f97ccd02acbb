/// Positions are already in clip space, no transform is applied.
pub(crate) const PASSTHROUGH_VERTEX_SHADER_SRC: &str = r#"
    #version 330 core

    layout (location = 0) in vec2 aPos;
    layout (location = 1) in vec3 aColor;

    out vec3 vertex_color;

    void main()
    {
        gl_Position = vec4(aPos, 0.0, 1.0);
        vertex_color = aColor;
    }
"#;

pub(crate) const TRANSFORM_VERTEX_SHADER_SRC: &str = r#"
    #version 330 core

    layout (location = 0) in vec3 aPos;
    layout (location = 1) in vec3 aColor;

    uniform mat4 projection;
    uniform mat4 model_view;

    out vec3 vertex_color;

    void main()
    {
        gl_Position = projection * model_view * vec4(aPos, 1.0);
        vertex_color = aColor;
    }
"#;

pub(crate) const COLOR_FRAGMENT_SHADER_SRC: &str = r#"
    #version 330 core

    in vec3 vertex_color;

    out vec4 out_color;

    void main()
    {
        out_color = vec4(vertex_color, 1.0);
    }
"#;
