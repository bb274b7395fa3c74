//! Browser entry point: the calculator attached to the page canvas.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::web::{EventLoopExtWebSys, WindowAttributesExtWebSys};
use winit::window::{Window, WindowId};

use crate::app::{self, ViewerState};
use crate::preview;
use crate::render::Renderer;

const CANVAS_ID: &str = "viewer";

struct App {
    window: Option<Arc<Window>>,
    renderer: Rc<RefCell<Option<Renderer>>>,
    viewer: ViewerState,
    init_pending: bool,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            renderer: Rc::new(RefCell::new(None)),
            viewer: ViewerState::new(),
            init_pending: false,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_pending {
            return;
        }
        self.init_pending = true;

        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CANVAS_ID))
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
            .expect("could not find canvas element with id 'viewer'");

        let width = canvas.width().max(1);
        let height = canvas.height().max(1);
        let attributes = Window::default_attributes()
            .with_canvas(Some(canvas))
            .with_inner_size(PhysicalSize::new(width, height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("could not create window"),
        );
        self.window = Some(window.clone());

        let initial = preview::model_for(&self.viewer.form);
        let slot = Rc::clone(&self.renderer);
        wasm_bindgen_futures::spawn_local(async move {
            match Renderer::new(Arc::clone(&window), &initial).await {
                Ok(renderer) => {
                    *slot.borrow_mut() = Some(renderer);
                    window.request_redraw();
                }
                Err(err) => log::error!("renderer init failed: {err:?}"),
            }
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.id() != id {
            return;
        }

        let mut slot = self.renderer.borrow_mut();
        let Some(renderer) = slot.as_mut() else {
            // renderer still initializing, keep the loop alive
            if matches!(event, WindowEvent::RedrawRequested) {
                window.request_redraw();
            }
            return;
        };
        if renderer.handle_event(window, &event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
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
                        other => log::warn!("surface error: {other:?}"),
                    }
                }
                window.request_redraw();
            }
            _ => {}
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("failed to init logger");

    let event_loop = EventLoop::new().expect("could not create event loop");
    event_loop.spawn_app(App::new());
}
