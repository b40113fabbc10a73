use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use board_engine::ai::{Agent, NegamaxAgent, RandomAgent};
use board_engine::config::EngineConfig;
use board_engine::game::{GameKind, GameOutcome, Player, Rules};
use board_engine::players::Mode;
use board_engine::session::Session;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameArg {
    ConnectFour,
    TicTacToe,
}

impl From<GameArg> for GameKind {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::ConnectFour => GameKind::ConnectFour,
            GameArg::TicTacToe => GameKind::TicTacToe,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OpponentArg {
    /// The session AI plays both seats
    Engine,
    Negamax,
    Random,
}

/// Play headless matches between the engine and an opponent.
#[derive(Parser)]
#[command(name = "board-engine", about = "Headless match runner for the board engine")]
struct Cli {
    /// Game to play
    #[arg(long, value_enum, default_value = "connect-four")]
    game: GameArg,

    /// Opponent for the engine
    #[arg(long, value_enum, default_value = "random")]
    opponent: OpponentArg,

    /// Search depth of a negamax opponent
    #[arg(long, default_value_t = 4)]
    opponent_depth: u32,

    /// Number of games; the engine alternates seats
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Path to TOML configuration file
    #[arg(long, default_value = "engine.toml")]
    config: PathBuf,

    /// Override the engine's search depth for the chosen game
    #[arg(long)]
    depth: Option<u32>,

    /// Print the final board of every game
    #[arg(long)]
    show_boards: bool,
}

#[derive(Debug, Default)]
struct Tally {
    engine_wins: usize,
    opponent_wins: usize,
    draws: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.games == 0 {
        bail!("--games must be at least 1");
    }

    let mut config = EngineConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let kind = GameKind::from(cli.game);
    if let Some(depth) = cli.depth {
        match kind {
            GameKind::ConnectFour => config.search.connect_four_depth = depth,
            GameKind::TicTacToe => config.search.tic_tac_toe_depth = depth,
        }
        config.validate().context("invalid --depth")?;
    }

    let mut session = Session::new(config);
    let mut tally = Tally::default();

    for game in 0..cli.games {
        let engine_seat = if game % 2 == 0 { Player::First } else { Player::Second };
        let outcome = play_game(&mut session, kind, engine_seat, &cli)?;
        match outcome {
            GameOutcome::Winner(p) if p == engine_seat => tally.engine_wins += 1,
            GameOutcome::Winner(_) => tally.opponent_wins += 1,
            GameOutcome::Draw => tally.draws += 1,
        }
        info!(game, engine = engine_seat.name(), ?outcome, "game finished");
        if cli.show_boards {
            if let Some(state) = session.game() {
                println!("{}", state.board());
            }
        }
    }

    println!(
        "{}: engine {} / opponent {} / draws {} over {} games",
        kind.name(),
        tally.engine_wins,
        tally.opponent_wins,
        tally.draws,
        cli.games
    );
    Ok(())
}

fn opponent_for(cli: &Cli, kind: GameKind) -> Option<Box<dyn Agent>> {
    match cli.opponent {
        OpponentArg::Engine => None,
        OpponentArg::Negamax => Some(Box::new(NegamaxAgent::new(
            Rules::for_kind(kind),
            cli.opponent_depth,
        ))),
        OpponentArg::Random => Some(Box::new(RandomAgent::new())),
    }
}

/// Run one game to completion. The opponent agent stands in for the
/// human seat and feeds its moves through the ordinary move path.
fn play_game(
    session: &mut Session,
    kind: GameKind,
    engine_seat: Player,
    cli: &Cli,
) -> Result<GameOutcome> {
    let mut opponent = opponent_for(cli, kind);
    session.set_mode(match opponent {
        Some(_) => Mode::HumanVsAi(engine_seat),
        None => Mode::AiVsAi,
    });
    session.start(kind);

    loop {
        let Some(state) = session.game() else {
            bail!("no active game");
        };
        if let Some(outcome) = state.outcome() {
            return Ok(outcome);
        }
        if session.tick()? {
            continue;
        }
        let Some(state) = session.game() else {
            bail!("no active game");
        };
        let agent = opponent
            .as_mut()
            .context("human seat to move without an opponent agent")?;
        let mv = agent
            .select_action(state)
            .with_context(|| format!("{} found no move", agent.name()))?;
        session.attempt_move(mv)?;
    }
}
