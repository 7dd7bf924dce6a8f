//! Gym Dash entry point
//!
//! On the web this mounts the runner onto the host page's canvas and wires up
//! the keyboard and frame loop. Natively it plays a short headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

    use gym_dash::consts::*;
    use gym_dash::input::{GateDecision, gate_key};
    use gym_dash::platform::web::{FrameCallback, RafScheduler, key_press};
    use gym_dash::renderer::canvas::CanvasRenderer;
    use gym_dash::renderer::{build_frame, idle_frame};
    use gym_dash::{CommandQueue, GameSession, MountError, Tuning};

    thread_local! {
        static RUNNER: RefCell<Option<Rc<RefCell<Runner>>>> = const { RefCell::new(None) };
    }

    /// Mounted runner state
    struct Runner {
        session: GameSession<RafScheduler>,
        commands: CommandQueue,
        renderer: Option<CanvasRenderer>,
        window: Window,
        document: Document,
        frame_slot: FrameCallback,
        key_listener: Option<Closure<dyn FnMut(KeyboardEvent)>>,
        last_hud: Option<gym_dash::Hud>,
    }

    impl Runner {
        /// Frame callback: one tick, one draw
        fn frame(&mut self) {
            if self.session.advance().is_none() {
                return;
            }
            self.render();
            self.update_hud();
        }

        /// Apply key commands right away
        fn pump(&mut self) {
            self.session.drain_commands();
            let state = self.session.state();
            if state.is_running() && state.frame_counter == 0 {
                // Fresh run: show the reset surface until the first tick lands
                self.draw_idle();
            }
            self.update_hud();
        }

        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                let frame = build_frame(self.session.state(), self.session.tuning(), &renderer.atlas());
                renderer.draw(&frame);
            }
        }

        fn draw_idle(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.draw(&idle_frame(self.session.tuning(), &renderer.atlas()));
            }
        }

        /// Redraw after a sprite settles, unless a run is painting frames anyway
        fn on_assets_changed(&self) {
            let Some(renderer) = &self.renderer else {
                return;
            };
            // Nothing new to show while every sheet is still pending or failed
            if !renderer.atlas().any_loaded() {
                return;
            }
            if !self.session.state().is_running() {
                if self.session.hud().game_over {
                    self.render();
                } else {
                    self.draw_idle();
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let hud = self.session.hud();
            if self.last_hud == Some(hud) {
                return;
            }
            self.last_hud = Some(hud);

            if let Some(el) = self.document.get_element_by_id(HUD_SCORE_ID) {
                el.set_text_content(Some(&hud.score.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id(HUD_START_PROMPT_ID) {
                let _ = el.class_list().toggle_with_force("hidden", hud.started);
            }
            if let Some(el) = self.document.get_element_by_id(HUD_GAME_OVER_ID) {
                let _ = el.class_list().toggle_with_force("hidden", !hud.game_over);
            }
            if hud.game_over {
                if let Some(el) = self.document.get_element_by_id(HUD_FINAL_SCORE_ID) {
                    el.set_text_content(Some(&hud.score.to_string()));
                }
            }
        }

        fn destroy(&mut self) {
            self.session.teardown();
            if let Some(listener) = self.key_listener.take() {
                let _ = self
                    .window
                    .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            }
            self.frame_slot.borrow_mut().take();
            // Detaches the sprite images' load handlers
            self.renderer.take();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        match mount(CANVAS_ID) {
            Ok(runner) => {
                RUNNER.with(|slot| *slot.borrow_mut() = Some(runner));
                log::info!("Gym Dash mounted");
            }
            // Stay dark; never throw into the host page
            Err(e) => log::error!("Gym Dash not mounted: {e}"),
        }
    }

    fn load_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        let Some(json) = canvas.get_attribute(TUNING_ATTR) else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using tuning override from {}", TUNING_ATTR);
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Tuning::default()
            }
        }
    }

    fn mount(canvas_id: &str) -> Result<Rc<RefCell<Runner>>, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| MountError::CanvasNotFound(canvas_id.to_string()))?
            .dyn_into()
            .map_err(|_| MountError::NotACanvas(canvas_id.to_string()))?;

        let tuning = load_tuning(&canvas);
        let asset_base = canvas
            .get_attribute(ASSETS_ATTR)
            .unwrap_or_else(|| DEFAULT_ASSET_BASE.to_string());

        let scheduler = RafScheduler::new(window.clone());
        let frame_slot = scheduler.callback_slot();
        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(tuning.clone(), scheduler, seed);
        let commands = session.commands();
        log::info!("Session created with seed: {}", seed);

        let runner = Rc::new(RefCell::new(Runner {
            session,
            commands,
            renderer: None,
            window: window.clone(),
            document,
            frame_slot: frame_slot.clone(),
            key_listener: None,
            last_hud: None,
        }));
        let weak = Rc::downgrade(&runner);

        let on_change: Rc<dyn Fn()> = {
            let weak = weak.clone();
            Rc::new(move || {
                if let Some(runner) = weak.upgrade() {
                    if let Ok(r) = runner.try_borrow() {
                        r.on_assets_changed();
                    }
                }
            })
        };
        let renderer = CanvasRenderer::new(&canvas, &tuning, &asset_base, on_change)?;

        {
            let mut r = runner.borrow_mut();
            r.renderer = Some(renderer);
            r.draw_idle();
            r.update_hud();
        }

        *frame_slot.borrow_mut() = Some(frame_closure(weak.clone()));
        let listener = key_listener(weak, window.clone());
        window
            .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
            .map_err(|e| MountError::Listener(format!("{:?}", e)))?;
        runner.borrow_mut().key_listener = Some(listener);

        Ok(runner)
    }

    fn frame_closure(weak: Weak<RefCell<Runner>>) -> Closure<dyn FnMut(f64)> {
        Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            if let Some(runner) = weak.upgrade() {
                runner.borrow_mut().frame();
            }
        })
    }

    fn key_listener(weak: Weak<RefCell<Runner>>, window: Window) -> Closure<dyn FnMut(KeyboardEvent)> {
        Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(runner) = weak.upgrade() else {
                return;
            };
            let (phase, commands) = match runner.try_borrow() {
                Ok(r) => (r.session.phase(), r.commands.clone()),
                Err(_) => return,
            };

            match gate_key(&key_press(&event, &window), phase) {
                GateDecision::Ignore => {}
                GateDecision::Dispatch(command) => {
                    event.prevent_default();
                    commands.push(command);
                    if let Ok(mut r) = runner.try_borrow_mut() {
                        r.pump();
                    }
                }
            }
        })
    }

    /// Current HUD as JSON, for the host page
    #[wasm_bindgen]
    pub fn runner_hud() -> Option<String> {
        RUNNER.with(|slot| {
            let slot = slot.borrow();
            let runner = slot.as_ref()?;
            let hud = runner.try_borrow().ok()?.session.hud();
            serde_json::to_string(&hud).ok()
        })
    }

    /// Unmount: cancel the pending frame, detach the key listener and image handlers
    #[wasm_bindgen]
    pub fn destroy_runner() {
        if let Some(runner) = RUNNER.with(|slot| slot.borrow_mut().take()) {
            runner.borrow_mut().destroy();
            log::info!("Gym Dash unmounted");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gym Dash (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable version");

    let hud = demo::play(2024, 5000);
    match serde_json::to_string(&hud) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not encode HUD: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use gym_dash::platform::ManualScheduler;
    use gym_dash::sim::{GameState, ObstacleKind};
    use gym_dash::{Command, GameSession, Hud, Tuning};

    /// Ticks of lead before a low obstacle reaches the runner
    const JUMP_LEAD_TICKS: f32 = 10.0;

    /// Jump for the nearest low obstacle ahead when it is about to arrive
    fn wants_jump(state: &GameState, tuning: &Tuning) -> bool {
        if state.player.jumping {
            return false;
        }
        let front = tuning.player_hitbox_right();
        state
            .obstacles
            .iter()
            .find(|o| o.x >= front)
            .is_some_and(|o| {
                o.kind == ObstacleKind::Low && o.x - front <= JUMP_LEAD_TICKS * state.scroll_speed
            })
    }

    /// Let a simple bot play one run
    pub fn play(seed: u64, max_ticks: u32) -> Hud {
        let mut session = GameSession::new(Tuning::default(), ManualScheduler::new(), seed);
        let commands = session.commands();
        commands.push(Command::Start);
        session.drain_commands();

        for t in 0..max_ticks {
            if wants_jump(session.state(), session.tuning()) {
                commands.push(Command::Jump);
            }
            if session.advance().is_none() {
                break;
            }
            if t % 500 == 0 {
                log::info!("tick {}: {:?}", t, session.hud());
            }
        }
        session.teardown();
        log::info!("Demo done after {} frames", session.scheduler().requested());
        session.hud()
    }
}
