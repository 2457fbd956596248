//! Play command - a line-oriented game against the agent
//!
//! The agent can be trained in the background while games continue; its
//! moves come from whatever it has learned so far.

use std::{
    io::{BufRead, Write},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    adapters::StdRandom,
    app::{App, TrainingConfig},
    cli::config::AgentArgs,
    q_learning::{
        QLearningAgent, TrainingHandle, TrainingLaunch, TrainingReport, TrainingSupervisor,
    },
    tictactoe::{Board, Game, Token},
};

const HELP: &str = "\
Commands:
  <row> <col>   place your mark (rows and columns 0-2)
  <cell>        place your mark by cell index (0-8, row-major)
  new           start a new game
  train         train the agent in the background
  status        show training progress
  board         show the board
  help          show this message
  quit          leave";

/// Which side the human plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HumanSide {
    X,
    O,
    /// Pick a side at random for every new game
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Play against the agent")]
pub struct PlayArgs {
    /// Side played by the human
    #[arg(long, value_enum, default_value_t = HumanSide::Random)]
    pub human: HumanSide,

    /// Self-play games run by the `train` command
    #[arg(long, default_value_t = TrainingConfig::default().games)]
    pub train_games: usize,

    /// Start background training immediately
    #[arg(long, default_value_t = false)]
    pub train: bool,

    #[command(flatten)]
    pub agent: AgentArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move { row: i32, col: i32 },
    New,
    Train,
    Status,
    Board,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["new" | "n"] => Some(Command::New),
        ["train" | "t"] => Some(Command::Train),
        ["status" | "s"] => Some(Command::Status),
        ["board" | "b"] => Some(Command::Board),
        ["help" | "h" | "?"] => Some(Command::Help),
        ["quit" | "q" | "exit"] => Some(Command::Quit),
        [row, col] => Some(Command::Move {
            row: row.parse().ok()?,
            col: col.parse().ok()?,
        }),
        [cell] => {
            let cell: usize = cell.parse().ok()?;
            let (row, col) = Board::coords_of(cell)?;
            Some(Command::Move {
                row: row as i32,
                col: col as i32,
            })
        }
        _ => None,
    }
}

/// An interactive session writing to `out`
pub struct PlaySession<W: Write> {
    agent: Arc<QLearningAgent>,
    supervisor: TrainingSupervisor,
    training: Option<TrainingHandle>,
    train_games: usize,
    side: HumanSide,
    human: Token,
    game: Game,
    rng: StdRandom,
    out: W,
}

impl<W: Write> PlaySession<W> {
    pub fn new(
        supervisor: TrainingSupervisor,
        side: HumanSide,
        train_games: usize,
        rng: StdRandom,
        out: W,
    ) -> Self {
        Self {
            agent: Arc::clone(supervisor.agent()),
            supervisor,
            training: None,
            train_games,
            side,
            human: Token::First,
            game: Game::new(),
            rng,
            out,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn human(&self) -> Token {
        self.human
    }

    /// Read commands until `quit` or end of input, then wait for a
    /// background run started by this session
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.new_game()?;
        for line in input.lines() {
            let line = line.context("reading input")?;
            self.poll_training()?;
            let Some(command) = parse_command(&line) else {
                if !line.trim().is_empty() {
                    writeln!(self.out, "Unknown command '{}'. Type 'help'.", line.trim())?;
                }
                continue;
            };
            match command {
                Command::Move { row, col } => self.human_move(row, col)?,
                Command::New => self.new_game()?,
                Command::Train => self.train()?,
                Command::Status => self.status()?,
                Command::Board => self.show_board()?,
                Command::Help => writeln!(self.out, "{HELP}")?,
                Command::Quit => break,
            }
        }
        self.finish_training()?;
        Ok(())
    }

    /// Block until a background run started by this session finishes, and
    /// announce it. Returns `None` if the session has no unannounced run.
    pub fn finish_training(&mut self) -> Result<Option<TrainingReport>> {
        let Some(handle) = self.training.take() else {
            return Ok(None);
        };
        if !handle.is_finished() {
            writeln!(
                self.out,
                "Waiting for background training to finish ({}/{} games played)...",
                self.supervisor.progress().0,
                handle.total_games()
            )?;
        }
        let report = handle.join()?;
        writeln!(
            self.out,
            "Training completed. The agent saved {} state-action pairs in its memory.",
            report.memory_size
        )?;
        Ok(Some(report))
    }

    fn new_game(&mut self) -> Result<()> {
        self.game = Game::new();
        self.human = match self.side {
            HumanSide::X => Token::First,
            HumanSide::O => Token::Second,
            HumanSide::Random if self.rng.coin_flip() => Token::First,
            HumanSide::Random => Token::Second,
        };
        writeln!(self.out, "New game. You play {}.", self.human)?;
        if self.game.current_player() != self.human {
            self.agent_move()?;
        }
        self.show_board()
    }

    fn human_move(&mut self, row: i32, col: i32) -> Result<()> {
        if self.game.is_terminal() {
            writeln!(self.out, "The game is over. Type 'new' to play again.")?;
            return Ok(());
        }
        if !self.game.submit_move(row, col, self.human) {
            writeln!(self.out, "Invalid move ({row}, {col}).")?;
            return Ok(());
        }
        if !self.game.is_terminal() {
            self.agent_move()?;
        }
        self.show_board()?;
        if self.game.is_terminal() {
            writeln!(self.out, "{}", self.game.status().message())?;
        }
        Ok(())
    }

    fn agent_move(&mut self) -> Result<()> {
        let token = self.human.opponent();
        let Some(cell) = self.agent.choose_move(&self.game, false, &mut self.rng) else {
            return Ok(());
        };
        if self.game.submit_cell(cell, token) {
            writeln!(self.out, "Agent plays {} at {} {}.", token, cell / 3, cell % 3)?;
        }
        Ok(())
    }

    fn train(&mut self) -> Result<()> {
        if self.supervisor.is_training() {
            return self.report_running();
        }
        if self.agent.memory_size() != 0 {
            writeln!(
                self.out,
                "The agent is already trained ({} state-action pairs in memory).",
                self.agent.memory_size()
            )?;
            return Ok(());
        }

        match self.supervisor.start(self.train_games, self.rng.fork())? {
            TrainingLaunch::Started(handle) => {
                self.training = Some(handle);
                writeln!(
                    self.out,
                    "Training started in the background ({} games).",
                    self.train_games
                )?;
                Ok(())
            }
            TrainingLaunch::AlreadyRunning { .. } => self.report_running(),
        }
    }

    fn report_running(&mut self) -> Result<()> {
        let (current, total) = self.supervisor.progress();
        writeln!(
            self.out,
            "The agent is currently training ({current}/{total} games played). Please wait until it is done."
        )?;
        Ok(())
    }

    fn status(&mut self) -> Result<()> {
        if self.supervisor.is_training() {
            return self.report_running();
        }
        writeln!(
            self.out,
            "{} state-action pairs in memory.",
            self.agent.memory_size()
        )?;
        Ok(())
    }

    fn show_board(&mut self) -> Result<()> {
        writeln!(self.out, "{}", self.game.board())?;
        Ok(())
    }

    /// Announce a finished background run once
    fn poll_training(&mut self) -> Result<()> {
        if self.training.as_ref().is_some_and(TrainingHandle::is_finished) {
            self.finish_training()?;
        }
        Ok(())
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.agent.to_config();
    let app = App::new();
    let agent = app
        .create_agent(&config)
        .context("creating Q-learning agent")?;
    let supervisor = app.create_supervisor(agent);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = PlaySession::new(
        supervisor,
        args.human,
        args.train_games,
        app.random_source(&config),
        stdout.lock(),
    );
    if args.train {
        session.train()?;
    }
    writeln!(session.out, "{HELP}")?;
    session.run(stdin.lock())
}
