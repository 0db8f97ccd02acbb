use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gl_demos_renderer::SceneKind;
use gl_demos_shared::config::DemoConfig;
use gl_demos_shared::projection::{FrustumBounds, Viewport};

#[derive(Parser)]
#[command(name = "gl-demos", about = "Small OpenGL demo scenes")]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(short, long, help = "Path to a JSON config file", global = true)]
    config: Option<PathBuf>,
    #[arg(long, help = "Initial window width in pixels", global = true)]
    width: Option<u32>,
    #[arg(long, help = "Initial window height in pixels", global = true)]
    height: Option<u32>,
    #[arg(long, default_value_t = false, help = "Disable vsync", global = true)]
    no_vsync: bool,
    #[arg(
        short,
        long,
        default_value_t = false,
        help = "Output in JSON format",
        global = true
    )]
    json_output: bool,
    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the red triangle
    Triangle {
        /// Re-submit the vertices every frame instead of using a static buffer
        #[arg(long)]
        immediate: bool,
    },
    /// Draw the spinning cube
    Cube,
    /// Draw two crossed lines
    Cross,
    /// Print the projection for a framebuffer size without opening a window
    Projection {
        /// Framebuffer width in pixels
        #[arg(value_name = "WIDTH")]
        framebuffer_width: u32,
        /// Framebuffer height in pixels
        #[arg(value_name = "HEIGHT")]
        framebuffer_height: u32,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(args.verbosity.tracing_level_filter().into())
        .from_env_lossy();

    if args.json_output {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init()
    } else {
        tracing_subscriber::fmt()
            .without_time()
            .with_target(false)
            .with_env_filter(filter)
            .init()
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            report_error(&args, "invalid_config", &err);
            return ExitCode::FAILURE;
        }
    };

    let kind = match &args.commands {
        Commands::Triangle { immediate: false } => SceneKind::Triangle,
        Commands::Triangle { immediate: true } => SceneKind::ImmediateTriangle,
        Commands::Cube => SceneKind::SpinningCube,
        Commands::Cross => SceneKind::Cross,
        Commands::Projection {
            framebuffer_width,
            framebuffer_height,
        } => {
            return print_projection(&args, &config, *framebuffer_width, *framebuffer_height);
        }
    };

    info!("Starting {}", kind.title());
    match gl_demos_renderer::run(kind, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&args, "render_failed", &format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<DemoConfig, String> {
    let mut config = DemoConfig::load(args.config.as_deref()).map_err(|err| err.to_string())?;

    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    if args.no_vsync {
        config.window.vsync = false;
    }

    config.validate().map_err(|err| err.to_string())?;

    Ok(config)
}

fn print_projection(args: &Args, config: &DemoConfig, width: u32, height: u32) -> ExitCode {
    let viewport = match Viewport::new(width, height) {
        Ok(viewport) => viewport,
        Err(err) => {
            report_error(args, "invalid_viewport", &err.to_string());
            return ExitCode::FAILURE;
        }
    };

    let bounds = FrustumBounds::perspective(&viewport, &config.camera);
    let columns: [[f32; 4]; 4] = bounds.to_matrix().into();

    if args.json_output {
        println!(
            "{}",
            serde_json::json!({
                "success": true,
                "aspect_ratio": viewport.aspect_ratio(),
                "frustum": bounds,
                "matrix_columns": columns,
            })
        );
    } else {
        println!("viewport: {}x{} (aspect {:.4})", width, height, viewport.aspect_ratio());
        println!(
            "frustum: left {:.6}, right {:.6}, bottom {:.6}, top {:.6}, near {}, far {}",
            bounds.left, bounds.right, bounds.bottom, bounds.top, bounds.near, bounds.far
        );
        println!("matrix:");
        for row in 0..4 {
            println!(
                "  | {:>10.6} {:>10.6} {:>10.6} {:>10.6} |",
                columns[0][row], columns[1][row], columns[2][row], columns[3][row]
            );
        }
    }

    ExitCode::SUCCESS
}

fn report_error(args: &Args, error_kind: &str, message: &str) {
    if args.json_output {
        println!(
            "{}",
            serde_json::json!({
                "success": false,
                "error": error_kind,
                "message": message,
            })
        );
    } else {
        error!("{message}");
    }
}
