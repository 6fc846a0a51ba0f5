//! Browser shell: builds the screen, routes DOM events into the [`Game`], runs
//! fetches on the wasm executor and repaints from [`view::render`].
//!
//! All state lives in the `APP` thread-local; event closures only borrow it for
//! the duration of one handler and never across an `.await`.

use std::cell::RefCell;

use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement,
    HtmlInputElement,
};

use crate::client;
use crate::config::GameConfig;
use crate::game::{Game, RoundStart};
use crate::score::{BrowserStorage, ScoreStore};
use crate::view::{self, ButtonAction, View};

const MASK_STYLE: &str = "width:240px; height:240px; filter:brightness(0); transition:filter 0.4s;";
const REVEAL_STYLE: &str = "width:240px; height:240px; filter:none; transition:filter 0.4s;";

/// Handles to every element the view writes to.
struct Ui {
    score_panel: HtmlElement,
    score_correct: Element,
    score_incorrect: Element,
    image: HtmlImageElement,
    name: Element,
    banner: Element,
    input: HtmlInputElement,
    input_error: HtmlElement,
    button: HtmlButtonElement,
    fetch_error: HtmlElement,
    fetch_error_text: Element,
    retry: HtmlButtonElement,
}

struct App {
    game: Game,
    ui: Ui,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub fn start(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let ui = build_ui(&doc)?;
    let store = if config.track_score {
        ScoreStore::new(BrowserStorage::new())
    } else {
        ScoreStore::in_memory()
    };
    // A remount keeps counting tickets so the old mount's fetches land as stale.
    let prior = with_game(|game| game.current_ticket().generation()).unwrap_or(0);
    let mut game = Game::new(config, store).continuing_after(prior);
    let first = game.start();
    info!("creature guess mounted");

    wire_events(&ui)?;
    APP.with(|cell| cell.replace(Some(App { game, ui })));
    launch_round(first);
    repaint();
    Ok(())
}

// --- Screen construction -----------------------------------------------------

fn build_ui(doc: &Document) -> Result<Ui, JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let root = match doc.get_element_by_id("cg-root") {
        Some(el) => el,
        None => {
            let el = doc.create_element("main")?;
            el.set_id("cg-root");
            el.set_attribute("style", "max-width:420px; margin:24px auto; font-family:'Press Start 2P', monospace; text-align:center;")?;
            body.append_child(&el)?;
            el
        }
    };
    root.set_inner_html("");

    let score_panel: HtmlElement = child(doc, &root, "section", "cg-score")?;
    score_panel.set_attribute("style", "display:flex; justify-content:space-between; padding:8px 12px; border:2px solid #222; border-radius:8px;")?;
    let correct_line = child::<Element>(doc, score_panel.as_ref(), "p", "cg-score-correct-line")?;
    correct_line.set_attribute("class", "is-success")?;
    correct_line.set_text_content(Some("Correct: "));
    let score_correct = child::<Element>(doc, &correct_line, "span", "cg-score-correct")?;
    let incorrect_line = child::<Element>(doc, score_panel.as_ref(), "p", "cg-score-incorrect-line")?;
    incorrect_line.set_attribute("class", "is-error")?;
    incorrect_line.set_text_content(Some("Wrong: "));
    let score_incorrect = child::<Element>(doc, &incorrect_line, "span", "cg-score-incorrect")?;

    let title = child::<Element>(doc, &root, "h1", "cg-title")?;
    title.set_text_content(Some(view::TITLE));

    let image: HtmlImageElement = child(doc, &root, "img", "cg-image")?;
    image.set_attribute("style", MASK_STYLE)?;
    let name = child::<Element>(doc, &root, "h3", "cg-name")?;
    let banner = child::<Element>(doc, &root, "section", "cg-banner")?;

    let input: HtmlInputElement = child(doc, &root, "input", "cg-input")?;
    input.set_type("text");
    input.set_placeholder(view::INPUT_PLACEHOLDER);
    let input_error: HtmlElement = child(doc, &root, "span", "cg-input-error")?;
    input_error.set_attribute("style", "display:block; color:#e76e55; font-size:12px;")?;
    let button: HtmlButtonElement = child(doc, &root, "button", "cg-button")?;
    button.set_type("button");

    let fetch_error: HtmlElement = child(doc, &root, "section", "cg-fetch-error")?;
    fetch_error.set_attribute("style", "margin-top:12px; color:#e76e55;")?;
    let fetch_error_text = child::<Element>(doc, fetch_error.as_ref(), "p", "cg-fetch-error-text")?;
    let retry: HtmlButtonElement = child(doc, fetch_error.as_ref(), "button", "cg-retry")?;
    retry.set_type("button");
    retry.set_text_content(Some(view::LABEL_RETRY));

    Ok(Ui {
        score_panel,
        score_correct,
        score_incorrect,
        image,
        name,
        banner,
        input,
        input_error,
        button,
        fetch_error,
        fetch_error_text,
        retry,
    })
}

fn child<T: JsCast>(doc: &Document, parent: &Element, tag: &str, id: &str) -> Result<T, JsValue> {
    let el = doc.create_element(tag)?;
    el.set_id(id);
    parent.append_child(&el)?;
    el.dyn_into::<T>().map_err(|_| JsValue::from_str("unexpected element type"))
}

// --- Events ------------------------------------------------------------------

fn wire_events(ui: &Ui) -> Result<(), JsValue> {
    // Text edits
    {
        let input = ui.input.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let text = input.value();
            with_game(|game| game.on_input_change(&text));
            repaint();
        }) as Box<dyn FnMut(_)>);
        ui.input
            .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Enter submits, same as pressing "Guess"
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Enter" {
                evt.prevent_default();
                press_main_button();
            }
        }) as Box<dyn FnMut(_)>);
        ui.input
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Dual-purpose button
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            press_main_button();
        }) as Box<dyn FnMut(_)>);
        ui.button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Retry after a failed fetch
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(next) = with_game(|game| game.retry()).flatten() {
                launch_round(next);
            }
            repaint();
        }) as Box<dyn FnMut(_)>);
        ui.retry
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn press_main_button() {
    let next = with_game(|game| match view::render(game).button {
        ButtonAction::Submit => {
            let outcome = game.submit();
            debug!("submit -> {:?}", outcome);
            None
        }
        ButtonAction::PlayAgain => Some(game.play_again()),
    })
    .flatten();
    if let Some(next) = next {
        launch_round(next);
    }
    repaint();
}

fn with_game<R>(f: impl FnOnce(&mut Game) -> R) -> Option<R> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(|app| f(&mut app.game)))
}

/// Run the fetch for a round transition and hand the result back tagged with its ticket.
fn launch_round(start: RoundStart) {
    let Some(config) = with_game(|game| game.config().clone()) else {
        return;
    };
    if start.focus_input {
        APP.with(|cell| {
            if let Some(app) = cell.borrow().as_ref() {
                // Disabled inputs reject focus.
                app.ui.input.set_disabled(false);
                if let Err(e) = app.ui.input.focus() {
                    debug!("focusing guess input failed: {:?}", e);
                }
            }
        });
    }
    spawn_local(async move {
        let result = client::fetch_random_creature(&config).await;
        with_game(|game| game.on_fetch_complete(start.ticket, result));
        repaint();
    });
}

// --- Painting ----------------------------------------------------------------

fn repaint() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow().as_ref() {
            paint(&app.ui, &view::render(&app.game));
        }
    });
}

fn paint(ui: &Ui, v: &View) {
    match v.score {
        Some(tally) => {
            ui.score_panel.set_hidden(false);
            ui.score_correct.set_text_content(Some(&tally.correct.to_string()));
            ui.score_incorrect.set_text_content(Some(&tally.incorrect.to_string()));
        }
        None => ui.score_panel.set_hidden(true),
    }

    match &v.image {
        Some(img) => {
            ui.image.set_hidden(false);
            if ui.image.src() != img.src {
                ui.image.set_src(&img.src);
            }
            ui.image.set_alt(&img.alt);
            let style = if img.masked { MASK_STYLE } else { REVEAL_STYLE };
            if let Err(e) = ui.image.set_attribute("style", style) {
                debug!("styling creature image failed: {:?}", e);
            }
        }
        None => ui.image.set_hidden(true),
    }

    ui.name.set_text_content(Some(v.name.as_deref().unwrap_or("")));
    ui.banner.set_text_content(Some(v.banner.text()));
    ui.banner.set_class_name(v.banner.css_class());

    if ui.input.value() != v.input.value {
        ui.input.set_value(&v.input.value);
    }
    ui.input.set_disabled(v.input.disabled);
    ui.input
        .set_class_name(if v.input.error.is_some() { "cg-input is-error" } else { "cg-input" });
    ui.input_error.set_hidden(v.input.error.is_none());
    ui.input_error.set_text_content(v.input.error);

    ui.button.set_text_content(Some(v.button.label()));

    match &v.fetch_error {
        Some(msg) => {
            ui.fetch_error.set_hidden(false);
            ui.fetch_error_text
                .set_text_content(Some(&format!("Could not load a creature: {}", msg)));
        }
        None => ui.fetch_error.set_hidden(true),
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::creature::Creature;
    use wasm_bindgen_test::*;
    use web_sys::{Event, KeyboardEvent, KeyboardEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    // Unroutable endpoint: real fetches fail, the tests hand creatures in directly.
    fn offline_config() -> GameConfig {
        GameConfig {
            track_score: false,
            api_base: "http://127.0.0.1:9/none".to_string(),
            ..GameConfig::default()
        }
    }

    fn mount() -> web_sys::Document {
        start(offline_config()).unwrap();
        with_game(|game| {
            let ticket = game.current_ticket();
            game.on_fetch_complete(ticket, Ok(Creature::new(25, "pikachu", "https://img.example/25.png")))
        });
        repaint();
        window().unwrap().document().unwrap()
    }

    fn by_id<T: JsCast>(doc: &web_sys::Document, id: &str) -> T {
        doc.get_element_by_id(id).unwrap().dyn_into::<T>().unwrap()
    }

    fn type_text(input: &HtmlInputElement, text: &str) {
        input.set_value(text);
        input.dispatch_event(&Event::new("input").unwrap()).unwrap();
    }

    #[wasm_bindgen_test]
    fn enter_on_empty_input_shows_error() {
        let doc = mount();
        let input: HtmlInputElement = by_id(&doc, "cg-input");
        let error: HtmlElement = by_id(&doc, "cg-input-error");
        assert!(error.hidden());

        let init = KeyboardEventInit::new();
        init.set_key("Enter");
        let enter = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        input.dispatch_event(&enter).unwrap();

        assert!(!error.hidden());
        assert_eq!(error.text_content().as_deref(), Some(view::INPUT_ERROR));
        assert!(!with_game(|game| game.round().revealed).unwrap());
    }

    #[wasm_bindgen_test]
    fn button_switches_between_guess_and_play_again() {
        let doc = mount();
        let input: HtmlInputElement = by_id(&doc, "cg-input");
        let button: HtmlButtonElement = by_id(&doc, "cg-button");
        assert_eq!(button.text_content().as_deref(), Some(view::LABEL_GUESS));

        type_text(&input, "Pikachu");
        button.click();
        assert_eq!(button.text_content().as_deref(), Some(view::LABEL_PLAY_AGAIN));
        assert!(input.disabled());
        let name: Element = by_id(&doc, "cg-name");
        assert_eq!(name.text_content().as_deref(), Some("pikachu"));

        button.click();
        assert_eq!(button.text_content().as_deref(), Some(view::LABEL_GUESS));
        assert!(!input.disabled());
    }

    #[wasm_bindgen_test]
    fn play_again_focuses_input() {
        let doc = mount();
        let input: HtmlInputElement = by_id(&doc, "cg-input");
        let button: HtmlButtonElement = by_id(&doc, "cg-button");
        type_text(&input, "raichu");
        button.click();
        button.focus().unwrap();

        button.click();
        let active = doc.active_element().unwrap();
        assert_eq!(active.id(), "cg-input");
    }

    #[wasm_bindgen_test]
    fn remount_drops_results_for_old_tickets() {
        mount();
        let old = with_game(|game| game.current_ticket()).unwrap();
        start(offline_config()).unwrap();
        let applied = with_game(|game| game.on_fetch_complete(old, Ok(Creature::new(6, "charizard", "c"))));
        assert_eq!(applied, Some(false));
    }
}
