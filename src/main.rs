//! Arcade Hub entry point
//!
//! The browser build mounts the page for the current location. The native
//! build plays each game headless with a scripted input pattern.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::any::Any;
    use std::cell::RefCell;

    use arcade_hub::Route;
    use arcade_hub::games::{FlyToTheSky, GoHigh, RunAway};
    use arcade_hub::persistence::LocalStorage;
    use arcade_hub::platform::web::{GameView, app_root, mount_game_list};
    use arcade_hub::settings::Settings;

    thread_local! {
        // Keeps the mounted view (listeners, loop) alive for the page lifetime
        static MOUNTED: RefCell<Option<Box<dyn Any>>> = const { RefCell::new(None) };
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Arcade Hub starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let root = app_root(&document).expect("no root element");

        let path = window.location().pathname().unwrap_or_default();
        let route = Route::from_path(&path).unwrap_or_else(|| {
            log::info!("Unknown path {:?}, showing the game list", path);
            Route::List
        });

        let settings = LocalStorage::open().map(|s| Settings::load(&s)).unwrap_or_default();
        let seed = js_sys::Date::now() as u64;

        let mounted: Result<Option<Box<dyn Any>>, _> = match route {
            Route::List => mount_game_list(&document, &root).map(|_| None),
            Route::RunAway => GameView::<RunAway>::mount(&document, &root, settings, seed)
                .map(|v| Some(Box::new(v) as Box<dyn Any>)),
            Route::FlyToTheSky => GameView::<FlyToTheSky>::mount(&document, &root, settings, seed)
                .map(|v| Some(Box::new(v) as Box<dyn Any>)),
            Route::GoHigh => GameView::<GoHigh>::mount(&document, &root, settings, seed)
                .map(|v| Some(Box::new(v) as Box<dyn Any>)),
        };

        match mounted {
            Ok(view) => {
                MOUNTED.with(|m| *m.borrow_mut() = view);
                log::info!("Arcade Hub running at {}", route.path());
            }
            Err(e) => log::error!("Failed to mount {}: {:?}", route.path(), e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arcade Hub (native) starting...");
    log::info!("The native build runs headless demos - build for wasm32 to play");

    println!("\nRunning scripted demos...");
    headless::run_all();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use arcade_hub::Session;
    use arcade_hub::games::{FlyToTheSky, GoHigh, RunAway};
    use arcade_hub::input::{InputEvent, Key};
    use arcade_hub::persistence::MemoryStore;
    use arcade_hub::settings::Settings;
    use arcade_hub::sim::{Game, GameEvent};

    const MAX_TICKS: u32 = 20_000;

    pub fn run_all() {
        // Jump on a fixed beat
        demo::<RunAway>(|t| {
            if t % 45 == 0 {
                vec![InputEvent::KeyDown(Key::Space), InputEvent::KeyUp(Key::Space)]
            } else {
                Vec::new()
            }
        });

        // Weave up and down
        demo::<FlyToTheSky>(|t| match t % 80 {
            0 => vec![InputEvent::KeyUp(Key::Down), InputEvent::KeyDown(Key::Up)],
            40 => vec![InputEvent::KeyUp(Key::Up), InputEvent::KeyDown(Key::Down)],
            _ => Vec::new(),
        });

        // Sweep left and right
        demo::<GoHigh>(|t| match t % 120 {
            0 => vec![InputEvent::KeyUp(Key::Right), InputEvent::KeyDown(Key::Left)],
            60 => vec![InputEvent::KeyUp(Key::Left), InputEvent::KeyDown(Key::Right)],
            _ => Vec::new(),
        });
    }

    fn demo<G: Game>(script: impl Fn(u32) -> Vec<InputEvent>) {
        let surface = G::fit_surface(1280.0, 800.0);
        let mut session = Session::<G>::new(surface, Box::new(MemoryStore::new()), Settings::default(), 42);

        session.handle_event(InputEvent::KeyDown(Key::Space));
        session.step();
        session.handle_event(InputEvent::KeyUp(Key::Space));

        for t in 1..=MAX_TICKS {
            for event in script(t) {
                session.handle_event(event);
            }
            let events = session.step();
            if let Some(GameEvent::GameOver { score, new_record }) =
                events.iter().find(|e| matches!(e, GameEvent::GameOver { .. })).copied()
            {
                println!(
                    "✓ {}: game over after {} ticks, score {} (record: {})",
                    G::TITLE,
                    t,
                    score,
                    new_record
                );
                return;
            }
        }
        println!(
            "✓ {}: still running after {} ticks, score {}",
            G::TITLE,
            MAX_TICKS,
            session.game().score()
        );
    }
}
