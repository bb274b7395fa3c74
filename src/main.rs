use std::env;
use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use pollster::block_on;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use volumen_lab::{app, preview, Computation, FormState, Renderer, ShapeKind, ViewerState};

const USAGE: &str =
    "Usage: volumen-lab [--list] [--shape <figura> [--set <campo>=<valor>]...] [--json]";

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;

    if options.help {
        println!("{USAGE}");
        return Ok(());
    }
    if options.list {
        return run_list(options.json);
    }
    if let Some(shape) = &options.shape {
        return run_compute(shape, &options.sets, options.json);
    }

    match run_interactive() {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --list mode (set DISPLAY or install X11 libs to enable rendering)."
                );
                run_list(false)
            } else {
                Err(err)
            }
        }
    }
}

fn run_list(json: bool) -> Result<()> {
    if json {
        let catalog: Vec<_> = ShapeKind::ALL.iter().map(|kind| kind.definition()).collect();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }
    println!("Figuras disponibles:");
    for kind in ShapeKind::ALL {
        println!(
            " - {}: {} ({})",
            kind.id(),
            kind.display_name(),
            kind.formula()
        );
    }
    Ok(())
}

fn run_compute(shape: &str, sets: &[(String, String)], json: bool) -> Result<()> {
    let kind = ShapeKind::from_id(shape).map_err(|err| {
        let known: Vec<&str> = ShapeKind::ALL.iter().map(|kind| kind.id()).collect();
        anyhow!("{err}. Known shapes: {}", known.join(", "))
    })?;

    let mut form = FormState::new(kind);
    for (field, value) in sets {
        if !form.set_raw(field, value) {
            let expected: Vec<&str> = kind.fields().iter().map(|spec| spec.id).collect();
            return Err(anyhow!(
                "unknown field {field} for {}. Expected: {}",
                kind.id(),
                expected.join(", ")
            ));
        }
    }

    let outcome = form.compute();

    if json {
        let payload = match &outcome {
            Computation::Volume {
                rounded, display, ..
            } => serde_json::json!({
                "figura": kind.id(),
                "ok": true,
                "volumen": rounded,
                "texto": display,
            }),
            Computation::Invalid { labels } => serde_json::json!({
                "figura": kind.id(),
                "ok": false,
                "campos": labels,
            }),
        };
        println!("{payload}");
    } else {
        println!("Figura: {}", kind.display_name());
        println!("Fórmula: {}", kind.formula());
        println!("{}", outcome.result_line());
        if let Some(error) = outcome.error_line() {
            println!("{error}");
        }
    }

    if !outcome.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_interactive() -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| WindowInitError::from_error("event loop", err))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    if let Some(err) = app.error.take() {
        return Err(err);
    }
    Ok(())
}

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    viewer: ViewerState,
    error: Option<anyhow::Error>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            renderer: None,
            viewer: ViewerState::new(),
            error: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("Calculadora de Volúmenes 3D")
            .with_inner_size(LogicalSize::new(1280.0, 720.0));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.error = Some(WindowInitError::from_error("window", err).into());
                event_loop.exit();
                return;
            }
        };

        let initial = preview::model_for(&self.viewer.form);
        match block_on(Renderer::new(Arc::clone(&window), &initial)) {
            Ok(renderer) => {
                info!("Renderer ready");
                window.request_redraw();
                self.renderer = Some(renderer);
                self.window = Some(window);
            }
            Err(err) => {
                self.error = Some(WindowInitError::from_error("renderer", err).into());
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut())
        else {
            return;
        };
        if window.id() != window_id {
            return;
        }
        if renderer.handle_event(window, &event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        logical_key: Key::Named(NamedKey::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => renderer.resize(size),
            WindowEvent::RedrawRequested => {
                self.viewer.tick();
                let size = window.inner_size();
                let aspect = if size.height == 0 {
                    1.0
                } else {
                    size.width as f32 / size.height as f32
                };
                renderer.update_globals(&app::camera_params(aspect), &app::light_params());
                if let Err(err) = renderer.render(window, &mut self.viewer) {
                    match err {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            renderer.resize(window.inner_size());
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            self.error = Some(anyhow!("GPU is out of memory"));
                            event_loop.exit();
                        }
                        wgpu::SurfaceError::Timeout => {
                            info!("Surface timeout; retrying next frame");
                        }
                        wgpu::SurfaceError::Other => {
                            warn!("Surface error; retrying next frame");
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

#[derive(Debug)]
struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn from_error(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

struct CliOptions {
    list: bool,
    shape: Option<String>,
    sets: Vec<(String, String)>,
    json: bool,
    help: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut options = Self {
            list: false,
            shape: None,
            sets: Vec::new(),
            json: false,
            help: false,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--list" => options.list = true,
                "--json" => options.json = true,
                "--help" | "-h" => options.help = true,
                "--shape" => {
                    let Some(shape) = args.next() else {
                        return Err(anyhow!("--shape needs a value. {USAGE}"));
                    };
                    options.shape = Some(shape);
                }
                "--set" => {
                    let Some(pair) = args.next() else {
                        return Err(anyhow!("--set needs <campo>=<valor>. {USAGE}"));
                    };
                    let Some((field, value)) = pair.split_once('=') else {
                        return Err(anyhow!("--set expects <campo>=<valor>, got {pair}"));
                    };
                    options.sets.push((field.to_string(), value.to_string()));
                }
                other => {
                    return Err(anyhow!("Unknown argument: {other}. {USAGE}"));
                }
            }
        }
        if !options.sets.is_empty() && options.shape.is_none() {
            return Err(anyhow!("--set requires --shape. {USAGE}"));
        }
        if options.json && !options.list && options.shape.is_none() {
            return Err(anyhow!("--json requires --list or --shape. {USAGE}"));
        }
        Ok(options)
    }
}
