//! Browser host: mounts a game on a canvas and drives it with
//! `requestAnimationFrame`.
//!
//! Everything registered here is owned by [`GameView`] and released when it
//! is dropped.

pub mod canvas;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
};

use crate::catalog::{GAMES, Route};
use crate::input::{InputEvent, Key};
use crate::persistence::{KeyValueStore, LocalStorage, MemoryStore};
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::Game;

use canvas::ImageAssets;

/// A DOM listener that unregisters itself on drop
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn new(target: &EventTarget, kind: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Self {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Per-view state shared between the listeners and the frame callback
struct Host<G: Game> {
    session: Session<G>,
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    assets: ImageAssets,
}

impl<G: Game> Host<G> {
    fn frame(&mut self, now_ms: f64) {
        if self.ctx.is_none() {
            self.ctx = context_2d(&self.canvas);
        }
        let Some(ctx) = &self.ctx else {
            log::debug!("{}: no 2D context, skipping frame", G::TITLE);
            return;
        };
        let frame = self.session.frame(now_ms, &self.assets);
        if let Err(e) = canvas::draw(ctx, &frame, &self.assets) {
            log::warn!("{}: draw failed: {:?}", G::TITLE, e);
        }
    }

    fn fit(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (vw, vh) = inner_size(&window);
        let surface = G::fit_surface(vw, vh);
        self.canvas.set_width(surface.width as u32);
        self.canvas.set_height(surface.height as u32);
        self.session.resize(surface);
    }
}

/// A mounted game: canvas, listeners and the animation-frame loop
pub struct GameView<G: Game + 'static> {
    host: Rc<RefCell<Host<G>>>,
    root: Element,
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    // The frame callback reschedules itself from this slot
    frame_callback: FrameSlot,
    _listeners: Vec<Listener>,
}

impl<G: Game + 'static> GameView<G> {
    /// Build the canvas under `root` and start the loop
    pub fn mount(document: &Document, root: &Element, settings: Settings, seed: u64) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let back = document.create_element("a")?;
        back.set_attribute("href", Route::List.path())?;
        back.set_attribute("class", "back-link")?;
        back.set_text_content(Some("Back to games"));
        root.append_child(&back)?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_attribute("class", "game-canvas")?;
        root.append_child(&canvas)?;

        let (vw, vh) = inner_size(&window);
        let surface = G::fit_surface(vw, vh);
        canvas.set_width(surface.width as u32);
        canvas.set_height(surface.height as u32);

        let session = Session::<G>::new(surface, open_store(), settings, seed);
        let ctx = context_2d(&canvas);
        let host = Rc::new(RefCell::new(Host {
            session,
            canvas: canvas.clone(),
            ctx,
            assets: ImageAssets::load()?,
        }));

        let listeners = listeners(&window, &canvas, &host);
        let view = Self {
            host,
            root: root.clone(),
            running: Rc::new(Cell::new(true)),
            frame_id: Rc::new(Cell::new(None)),
            frame_callback: Rc::new(RefCell::new(None)),
            _listeners: listeners,
        };
        view.start_loop();
        log::info!("{} mounted", G::TITLE);
        Ok(view)
    }

    fn start_loop(&self) {
        let host = Rc::clone(&self.host);
        let running = Rc::clone(&self.running);
        let frame_id = Rc::clone(&self.frame_id);
        let slot = Rc::clone(&self.frame_callback);
        *self.frame_callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if !running.get() {
                return;
            }
            host.borrow_mut().frame(time);
            request_frame(&slot, &frame_id);
        }));
        request_frame(&self.frame_callback, &self.frame_id);
    }
}

impl<G: Game + 'static> Drop for GameView<G> {
    fn drop(&mut self) {
        self.running.set(false);
        if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        // Releases the callback and with it the host it captured
        self.frame_callback.borrow_mut().take();
        self.root.set_inner_html("");
        log::info!("{} unmounted", G::TITLE);
    }
}

fn listeners<G: Game + 'static>(
    window: &web_sys::Window,
    canvas: &HtmlCanvasElement,
    host: &Rc<RefCell<Host<G>>>,
) -> Vec<Listener> {
    let mut out = Vec::new();

    // Keyboard
    for (kind, down) in [("keydown", true), ("keyup", false)] {
        let host = host.clone();
        out.push(Listener::new(window, kind, move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(key) = Key::from_dom_key(&event.key()) else {
                return;
            };
            // Keep arrows and space from scrolling the page
            event.prevent_default();
            let input = if down { InputEvent::KeyDown(key) } else { InputEvent::KeyUp(key) };
            host.borrow_mut().session.handle_event(input);
        }));
    }

    // Mouse
    {
        let host = host.clone();
        out.push(Listener::new(canvas, "click", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let at = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                host.borrow_mut().session.handle_event(InputEvent::Click(at));
            }
        }));
    }

    // Touch
    for (kind, start) in [("touchstart", true), ("touchmove", false)] {
        let host = host.clone();
        let bounds = canvas.clone();
        out.push(Listener::new(canvas, kind, move |event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            event.prevent_default();
            let Some(touch) = event.touches().get(0) else {
                return;
            };
            let rect = bounds.get_bounding_client_rect();
            let at = Vec2::new(
                (f64::from(touch.client_x()) - rect.left()) as f32,
                (f64::from(touch.client_y()) - rect.top()) as f32,
            );
            let input = if start { InputEvent::TouchStart(at) } else { InputEvent::TouchMove(at) };
            host.borrow_mut().session.handle_event(input);
        }));
    }

    // Resize
    {
        let host = host.clone();
        out.push(Listener::new(window, "resize", move |_| host.borrow_mut().fit()));
    }

    // Focus loss drops held keys and the frame timer
    {
        let host = host.clone();
        out.push(Listener::new(window, "blur", move |_| {
            host.borrow_mut().session.suspend();
            log::debug!("{} suspended (window blur)", G::TITLE);
        }));
    }

    out
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(slot: &FrameSlot, frame_id: &Cell<Option<i32>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let slot = slot.borrow();
    let Some(callback) = slot.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => frame_id.set(Some(id)),
        Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn inner_size(window: &web_sys::Window) -> (f32, f32) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (read(window.inner_width()), read(window.inner_height()))
}

fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStorage::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("LocalStorage unavailable ({}), scores will not persist", e);
            Box::new(MemoryStore::new())
        }
    }
}

/// Render the game list into `root`
pub fn mount_game_list(document: &Document, root: &Element) -> Result<(), JsValue> {
    let heading = document.create_element("h2")?;
    heading.set_text_content(Some("CHOOSE YOUR EXPERIENCE"));
    root.append_child(&heading)?;

    let grid = document.create_element("div")?;
    grid.set_attribute("class", "game-grid")?;
    for card in GAMES.iter() {
        let item = document.create_element(if card.route().is_some() { "a" } else { "div" })?;
        if let Some(route) = card.route() {
            item.set_attribute("href", route.path())?;
            item.set_attribute("class", "game-card")?;
        } else {
            item.set_attribute("class", "game-card closed")?;
        }

        let title = document.create_element("h3")?;
        title.set_text_content(Some(card.title));
        item.append_child(&title)?;

        let description = document.create_element("p")?;
        description.set_text_content(Some(card.description));
        item.append_child(&description)?;

        if !card.is_open {
            let badge = document.create_element("span")?;
            badge.set_text_content(Some("Coming soon"));
            item.append_child(&badge)?;
        }
        grid.append_child(&item)?;
    }
    root.append_child(&grid)?;
    log::info!("Game list mounted ({} cards)", GAMES.len());
    Ok(())
}

/// Root element for the hub, `#app` or the body
pub fn app_root(document: &Document) -> Option<Element> {
    document
        .get_element_by_id("app")
        .or_else(|| document.body().map(Element::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::RunAway;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_unmount_releases_host() {
        let document = web_sys::window().and_then(|w| w.document()).unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        let view = GameView::<RunAway>::mount(&document, &root, Settings::default(), 7).unwrap();
        let host = Rc::downgrade(&view.host);
        assert!(view.frame_callback.borrow().is_some());
        drop(view);

        assert!(host.upgrade().is_none());
        assert_eq!(root.child_element_count(), 0);
    }
}
