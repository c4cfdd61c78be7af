//! Prompt loop between the player and a [`Game`].

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use minefield_core::{Coord, Game, GameConfig, GameState, RevealOutcome};

use crate::input::{self, InputError};
use crate::render::Renderer;

pub struct Console<R, W> {
    input: R,
    output: W,
    renderer: Renderer,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, renderer: Renderer) -> Self {
        Self {
            input,
            output,
            renderer,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Could not read from input")?;
        if read == 0 {
            bail!("Input closed before the game ended");
        }
        Ok(line)
    }

    /// Prompts until `parse` accepts a line, printing each rejection.
    fn ask<T>(
        &mut self,
        prompt: &str,
        newline: bool,
        mut parse: impl FnMut(&str) -> Result<T, InputError>,
    ) -> Result<T> {
        loop {
            if newline {
                writeln!(self.output, "{prompt}")?;
            } else {
                write!(self.output, "{prompt}")?;
            }
            let line = self.read_line()?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    log::debug!("Rejected input {:?}: {:?}", line.trim_end(), err);
                    writeln!(self.output, "{err}")?;
                }
            }
        }
    }

    pub fn ask_size(&mut self) -> Result<Coord> {
        self.ask(
            "Enter the size of the grid (e.g. 4 for a 4x4 grid): ",
            true,
            input::parse_size,
        )
    }

    pub fn ask_mines(&mut self, size: Coord) -> Result<GameConfig> {
        self.ask(
            "Enter the number of mines to place on the grid (maximum is 35% of the total squares): ",
            true,
            |line| input::parse_mines(line, size),
        )
    }

    fn ask_reveal(&mut self, game: &mut Game) -> Result<RevealOutcome> {
        self.ask("Select a square to reveal (e.g. A1): ", false, |line| {
            let coords = input::parse_coords(line, game.board().total_cells())?;
            Ok(game.reveal(coords)?)
        })
    }

    /// Plays `game` until it is won or lost.
    pub fn play(&mut self, game: &mut Game) -> Result<GameState> {
        self.renderer.draw(&mut self.output, game, None)?;

        while !game.is_finished() {
            let outcome = self.ask_reveal(game)?;
            self.renderer
                .draw(&mut self.output, game, Some(outcome.adjacent_mines()))?;
        }

        let state = game.state();
        match state {
            GameState::Loss => writeln!(self.output, "You lose!")?,
            _ => writeln!(self.output, "You win!")?,
        }
        self.output.flush()?;
        Ok(state)
    }
}
