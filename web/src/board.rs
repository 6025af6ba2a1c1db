use crate::game::{self, GameObserverExt, Player};
use crate::transcript::Transcript;
use crate::utils::js_random_seed;
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Roll(Player),
    Cover(Player, game::Picture),
    Pass(Player),
    ComputerTurn(game::ScheduledTurn),
    Reset,
    NewBoards,
    SetMode(game::Mode),
    SetDifficulty(game::Difficulty),
    ToggleQuick,
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub config: game::GameConfig,
    pub seed: u64,
    #[prop_or_default]
    pub classic: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Open,
    Covered,
    LatestCover,
    Target,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    picture: game::Picture,
    cell_state: ViewCellState,
    callback: Callback<game::Picture>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCellState::*;

    let CellProps {
        picture,
        cell_state,
        callback,
    } = props.clone();

    let class = classes!(
        "item",
        match cell_state {
            Open => classes!(),
            Covered => classes!("covered"),
            LatestCover => classes!("covered", "latest"),
            Target => classes!("target"),
        }
    );
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("tap {:?}", picture);
        callback.emit(picture)
    });

    html! {
        <div {class} {onclick}>{picture.to_string()}</div>
    }
}

fn dice_label(dice: Option<(u8, u8)>) -> String {
    match dice {
        Some((a, b)) => format!("{} {}", game::die_face(a), game::die_face(b)),
        None => "Roll Dice".to_string(),
    }
}

pub(crate) struct GameView {
    session: game::GameSession,
    driver: game::OpponentDriver,
    transcript: Transcript,
    computer_timer: Option<Timeout>,
}

impl GameView {
    fn new_session(props: &GameProps) -> game::GameSession {
        let config = props.config;
        let session = if props.classic {
            game::GameSession::generate(config, game::ClassicBoards, props.seed)
        } else {
            game::GameSession::generate(config, game::RandomBoardGenerator::new(props.seed), props.seed)
        };

        session
            .or_else(|err| {
                log::warn!("falling back to random boards: {}", err);
                game::GameSession::generate(
                    config,
                    game::RandomBoardGenerator::new(props.seed),
                    props.seed,
                )
            })
            .expect("full picture pool always fits a board")
    }

    fn cell_state(&self, player: Player, picture: game::Picture) -> ViewCellState {
        let state = self.session.player(player);
        if state.is_covered(picture) {
            if state.last_covered() == Some(picture) {
                ViewCellState::LatestCover
            } else {
                ViewCellState::Covered
            }
        } else if state
            .pending()
            .is_some_and(|pending| pending.classification == game::Classification::Coverable(picture))
        {
            ViewCellState::Target
        } else {
            ViewCellState::Open
        }
    }

    fn is_roll_enabled(&self, player: Player) -> bool {
        !self.session.is_game_over() && !self.session.mode().is_computer(player)
    }

    fn roll(&mut self, player: Player) -> game::Result<()> {
        if self.session.mode().is_computer(player) {
            self.transcript
                .note("In 1-player mode only your board can be used.");
            return Ok(());
        }
        self.session.submit_roll(player).map(|_| ())
    }

    /// Pushes queued session events to the transcript and keeps the computer
    /// timer in line with whose turn it is.
    fn sync(&mut self, ctx: &Context<Self>) {
        let events = self.session.take_events();
        self.transcript.observe_all(&events);

        if let Some(turn) = self.driver.schedule(&self.session) {
            let link = ctx.link().clone();
            let millis = turn.delay().as_millis() as u32;
            self.computer_timer = Some(Timeout::new(millis, move || {
                link.send_message(Msg::ComputerTurn(turn))
            }));
        } else if self.driver.scheduled().is_none() {
            // dropping the handle cancels the browser timeout
            self.computer_timer = None;
        }
    }

    fn view_board(&self, ctx: &Context<Self>, player: Player) -> Html {
        let is_current = !self.session.is_game_over() && self.session.active_player() == player;
        let is_winner = self.session.winner() == Some(player);
        let board_log = self.transcript.board(player);
        let awaiting_pass = self
            .session
            .pending(player)
            .is_some_and(|pending| pending.resolution() == game::Resolution::AwaitingPass);

        let on_roll = ctx.link().callback(move |_: MouseEvent| Msg::Roll(player));
        let on_pass = ctx.link().callback(move |_: MouseEvent| Msg::Pass(player));
        let on_cover = ctx
            .link()
            .callback(move |picture: game::Picture| Msg::Cover(player, picture));

        html! {
            <section class={classes!("board", is_current.then_some("current-turn"), is_winner.then_some("winner"))}>
                <h2>{player.to_string()}</h2>
                <div class="items">
                    {
                        for self.session.board(player).pictures().iter().map(|&picture| {
                            let cell_state = self.cell_state(player, picture);
                            let callback = on_cover.clone();
                            html! {
                                <CellView {picture} {cell_state} {callback}/>
                            }
                        })
                    }
                </div>
                <button class="boardRollBtn" onclick={on_roll} disabled={!self.is_roll_enabled(player)}>
                    {dice_label(board_log.dice())}
                </button>
                if awaiting_pass {
                    <button class="passBtn" onclick={on_pass}>{"Pass"}</button>
                }
                <pre class="boardLog">{board_log.text()}</pre>
            </section>
        }
    }

    fn view_dice_key(&self) -> Html {
        let key: Vec<_> = self.session.difficulty().dice_key().collect();
        html! {
            <table class="key">
                <tr>
                    <th/>
                    { for key.iter().map(|(total, _)| html! { <th>{total.to_string()}</th> }) }
                </tr>
                <tr>
                    <th>{"Picture"}</th>
                    {
                        for key.iter().map(|(_, picture)| html! {
                            <td>{picture.map_or_else(|| "-".to_string(), |p| p.to_string())}</td>
                        })
                    }
                </tr>
            </table>
        }
    }

    fn view_controls(&self, ctx: &Context<Self>) -> Html {
        use game::{Difficulty, Mode};

        let mode = self.session.mode();
        let difficulty = self.session.difficulty();
        let quick = self.session.config().confirm == game::ConfirmPolicy::Automatic;

        let mode_button = |label: &'static str, target: Mode| {
            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::SetMode(target));
            html! {
                <button class={classes!((mode == target).then_some("selected"))} {onclick}>{label}</button>
            }
        };
        let difficulty_button = |label: &'static str, target: Difficulty| {
            let onclick = ctx
                .link()
                .callback(move |_: MouseEvent| Msg::SetDifficulty(target));
            html! {
                <button class={classes!((difficulty == target).then_some("selected"))} {onclick}>{label}</button>
            }
        };

        html! {
            <nav>
                {mode_button("2 players", Mode::TwoPlayer)}
                {mode_button("Play as Mouse", Mode::OnePlayer { human: Player::Mouse })}
                {mode_button("Play as Gruffalo", Mode::OnePlayer { human: Player::Gruffalo })}
                {difficulty_button("Standard", Difficulty::Standard)}
                {difficulty_button("Easy", Difficulty::Restricted)}
                <label>
                    <input type="checkbox" checked={quick} onclick={ctx.link().callback(|_: MouseEvent| Msg::ToggleQuick)}/>
                    {"Quick play"}
                </label>
                <button onclick={ctx.link().callback(|_: MouseEvent| Msg::Reset)}>{"Reset"}</button>
                <button onclick={ctx.link().callback(|_: MouseEvent| Msg::NewBoards)}>{"New boards"}</button>
            </nav>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let session = Self::new_session(ctx.props());
        let transcript = Transcript::new(Transcript::intro(session.mode()));
        let mut view = Self {
            session,
            driver: game::OpponentDriver::new(),
            transcript,
            computer_timer: None,
        };
        view.sync(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        log::debug!("msg: {:?}", msg);
        let result = match msg {
            Roll(player) => self.roll(player),
            Cover(player, picture) => self.session.confirm_cover(player, picture).map(|_| ()),
            Pass(player) => self.session.confirm_pass(player).map(|_| ()),
            ComputerTurn(turn) => {
                let wake = self.driver.wake(&mut self.session, turn);
                log::debug!("computer turn: {:?}", wake);
                Ok(())
            }
            Reset => {
                self.driver.cancel();
                self.session.reset_game();
                Ok(())
            }
            NewBoards => {
                let generator = game::RandomBoardGenerator::new(js_random_seed());
                self.session
                    .regenerate_boards(self.session.difficulty(), generator)
            }
            SetMode(mode) => {
                self.driver.cancel();
                self.session.set_mode(mode);
                Ok(())
            }
            SetDifficulty(difficulty) => self.session.set_difficulty(difficulty),
            ToggleQuick => {
                let confirm = match self.session.config().confirm {
                    game::ConfirmPolicy::Required => game::ConfirmPolicy::Automatic,
                    game::ConfirmPolicy::Automatic => game::ConfirmPolicy::Required,
                };
                self.session.set_confirm_policy(confirm);
                Ok(())
            }
        };

        if let Err(err) = result {
            log::info!("rejected {:?}: {}", msg, err);
            self.transcript.note(err.to_string());
        }
        self.sync(ctx);
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let status = match self.session.winner() {
            Some(winner) => format!("{winner} wins!"),
            None => format!("Current player: {}", self.session.active_player()),
        };

        html! {
            <div class="bingo">
                {self.view_controls(ctx)}
                <p class="status">{status}</p>
                {self.view_dice_key()}
                <div class="boards">
                    { for Player::BOTH.into_iter().map(|player| self.view_board(ctx, player)) }
                </div>
                <pre class="log">
                    { for self.transcript.lines().iter().map(|line| html! { <>{format!("{line}\n")}</> }) }
                </pre>
            </div>
        }
    }
}
