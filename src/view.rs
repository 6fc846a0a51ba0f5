//! Presentation Layer as a pure function of controller state.
//!
//! `render` produces a plain description of what the screen should show; the
//! DOM shell only copies it onto elements. Nothing here holds state.

use crate::game::{FetchStatus, Game};
use crate::score::ScoreTally;

pub const TITLE: &str = "Who's that creature?";
pub const BANNER_NEUTRAL: &str = "The result of your guess shows up here";
pub const BANNER_SUCCESS: &str = "Nice.. you got it!";
pub const BANNER_FAILURE: &str = "Missed.. keep trying";
pub const INPUT_PLACEHOLDER: &str = "Enter the creature...";
pub const INPUT_ERROR: &str = "You must enter a value";
pub const LABEL_GUESS: &str = "Guess";
pub const LABEL_PLAY_AGAIN: &str = "Play again";
pub const LABEL_RETRY: &str = "Retry";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    Neutral,
    Success,
    Failure,
}

impl Banner {
    pub fn text(&self) -> &'static str {
        match self {
            Banner::Neutral => BANNER_NEUTRAL,
            Banner::Success => BANNER_SUCCESS,
            Banner::Failure => BANNER_FAILURE,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Banner::Neutral => "cg-banner",
            Banner::Success => "cg-banner is-success",
            Banner::Failure => "cg-banner is-error",
        }
    }
}

/// What the dual-purpose button does when pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Submit,
    PlayAgain,
}

impl ButtonAction {
    pub fn label(&self) -> &'static str {
        match self {
            ButtonAction::Submit => LABEL_GUESS,
            ButtonAction::PlayAgain => LABEL_PLAY_AGAIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageView {
    pub src: String,
    pub alt: String,
    /// Silhouette until the round is revealed.
    pub masked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputView {
    pub value: String,
    pub disabled: bool,
    pub error: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    pub score: Option<ScoreTally>,
    /// `None` before the first creature arrives.
    pub image: Option<ImageView>,
    /// Shown only after reveal.
    pub name: Option<String>,
    pub banner: Banner,
    pub input: InputView,
    pub button: ButtonAction,
    /// Fetch failure message; paired with a retry affordance.
    pub fetch_error: Option<String>,
}

pub fn render(game: &Game) -> View {
    let round = game.round();
    let image = round.target.as_ref().map(|c| ImageView {
        src: c.image.clone(),
        alt: if round.revealed {
            format!("Picture of {}", c.name)
        } else {
            "Hidden creature".to_string()
        },
        masked: !round.revealed,
    });
    let name = round
        .target
        .as_ref()
        .filter(|_| round.revealed)
        .map(|c| c.name.clone());
    let banner = match round.last_guess_correct {
        None => Banner::Neutral,
        Some(true) => Banner::Success,
        Some(false) => Banner::Failure,
    };
    let fetch_error = match &round.fetch {
        FetchStatus::Failed(msg) => Some(msg.clone()),
        FetchStatus::Loading | FetchStatus::Ready => None,
    };

    View {
        score: game.tally(),
        image,
        name,
        banner,
        input: InputView {
            value: round.input_text.clone(),
            disabled: round.revealed,
            error: round.input_has_error.then_some(INPUT_ERROR),
        },
        button: if round.revealed {
            ButtonAction::PlayAgain
        } else {
            ButtonAction::Submit
        },
        fetch_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::creature::Creature;
    use crate::error::FetchError;
    use crate::score::ScoreStore;

    fn loaded(config: GameConfig) -> Game {
        let mut game = Game::new(config, ScoreStore::in_memory());
        let start = game.start();
        game.on_fetch_complete(start.ticket, Ok(Creature::new(4, "charmander", "https://img/4.png")));
        game
    }

    #[test]
    fn startup_shows_nothing_to_guess_yet() {
        let mut game = Game::new(GameConfig::default(), ScoreStore::in_memory());
        game.start();
        let v = render(&game);
        assert!(v.image.is_none());
        assert!(v.name.is_none());
        assert_eq!(v.banner, Banner::Neutral);
        assert_eq!(v.button, ButtonAction::Submit);
        assert_eq!(v.score, Some(ScoreTally::default()));
    }

    #[test]
    fn unrevealed_round_is_masked() {
        let v = render(&loaded(GameConfig::default()));
        let img = v.image.unwrap();
        assert!(img.masked);
        assert_eq!(img.src, "https://img/4.png");
        assert!(!img.alt.contains("charmander"));
        assert!(v.name.is_none());
        assert!(!v.input.disabled);
    }

    #[test]
    fn reveal_shows_name_and_switches_button() {
        let mut game = loaded(GameConfig::default());
        game.on_input_change("squirtle");
        game.submit();
        let v = render(&game);
        assert!(!v.image.unwrap().masked);
        assert_eq!(v.name.as_deref(), Some("charmander"));
        assert_eq!(v.banner, Banner::Failure);
        assert!(v.input.disabled);
        assert_eq!(v.button, ButtonAction::PlayAgain);
        assert_eq!(v.button.label(), LABEL_PLAY_AGAIN);
        assert_eq!(v.score, Some(ScoreTally::new(0, 1)));
    }

    #[test]
    fn empty_submit_shows_inline_error() {
        let mut game = loaded(GameConfig::default());
        game.submit();
        assert_eq!(render(&game).input.error, Some(INPUT_ERROR));
        game.on_input_change("c");
        assert_eq!(render(&game).input.error, None);
    }

    #[test]
    fn score_hidden_when_not_tracking() {
        assert_eq!(render(&loaded(GameConfig::basic())).score, None);
    }

    #[test]
    fn fetch_failure_is_visible() {
        let mut game = Game::new(GameConfig::default(), ScoreStore::in_memory());
        let start = game.start();
        game.on_fetch_complete(start.ticket, Err(FetchError::Status(500)));
        let v = render(&game);
        assert_eq!(v.fetch_error.as_deref(), Some("unexpected HTTP status 500"));
    }
}
