use clap::{Parser, ValueEnum};
use wasm_bindgen::prelude::*;
use woodland_bingo_core as game;

mod board;
mod transcript;
mod utils;

#[derive(Copy, Clone, Debug, Default, PartialEq, ValueEnum)]
enum PlayersArg {
    One,
    #[default]
    Two,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, ValueEnum)]
enum SideArg {
    #[default]
    Mouse,
    Gruffalo,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, ValueEnum)]
enum DifficultyArg {
    #[default]
    Standard,
    Easy,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of human players
    #[arg(short, long, value_enum, default_value_t)]
    players: PlayersArg,

    /// Side the human plays in one-player games
    #[arg(long, value_enum, default_value_t)]
    human: SideArg,

    /// Easy leaves the two rarest pictures off the boards
    #[arg(short, long, value_enum, default_value_t)]
    difficulty: DifficultyArg,

    /// Cover and pass without waiting for a tap
    #[arg(long)]
    quick: bool,

    /// Start on the printed boards instead of random ones
    #[arg(long)]
    classic: bool,
}

impl Args {
    fn game_config(&self) -> game::GameConfig {
        let mode = match self.players {
            PlayersArg::Two => game::Mode::TwoPlayer,
            PlayersArg::One => game::Mode::OnePlayer {
                human: match self.human {
                    SideArg::Mouse => game::Player::Mouse,
                    SideArg::Gruffalo => game::Player::Gruffalo,
                },
            },
        };
        let difficulty = match self.difficulty {
            DifficultyArg::Standard => game::Difficulty::Standard,
            DifficultyArg::Easy => game::Difficulty::Restricted,
        };
        let confirm = if self.quick {
            game::ConfirmPolicy::Automatic
        } else {
            game::ConfirmPolicy::Required
        };
        game::GameConfig::new(mode, difficulty).with_confirm(confirm)
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let props = board::GameProps {
        config: args.game_config(),
        seed: args.seed.unwrap_or_else(utils::js_random_seed),
        classic: args.classic,
    };

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<board::GameView>::with_root_and_props(root, props).render();
}
