use std::io::stdout;

use crossterm::{
    cursor::MoveToColumn,
    execute,
    style::Print,
    terminal::{Clear, ClearType},
};

use common::protocol::ServerMessage;

/// Console presentation: server events print as scrolling lines, and a
/// single status line at the bottom shows the clock, the current
/// problem, and whatever the player has typed so far.
pub struct View {
    problem: Option<String>,
    remaining_secs: Option<u32>,
    input: String,
}

impl View {
    pub fn new() -> Self {
        Self {
            problem: None,
            remaining_secs: None,
            input: String::new(),
        }
    }

    pub fn apply(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Error { message } => {
                self.print_line(&format!("Error: {}", message));
            }
            ServerMessage::PlayerList { names } => {
                self.print_line(&format!("Players in lobby: {}", names.join(", ")));
            }
            ServerMessage::Countdown { seconds } => {
                self.overwrite_status(&format!("Game starts in: {}s", seconds));
            }
            ServerMessage::GameStarted {
                duration_secs,
                problem,
            } => {
                self.print_line(&format!("Round started! {}s on the clock.", duration_secs));
                self.problem = Some(problem);
                self.remaining_secs = Some(duration_secs);
                self.input.clear();
                self.redraw_status();
            }
            ServerMessage::RoundTimer { seconds } => {
                self.remaining_secs = Some(seconds);
                self.redraw_status();
            }
            ServerMessage::NewProblem { problem } => {
                self.problem = Some(problem);
                self.input.clear();
                self.redraw_status();
            }
            ServerMessage::AnswerResult {
                correct,
                correct_answer,
            } => {
                if correct {
                    self.print_line("Correct!");
                } else if let Some(answer) = correct_answer {
                    self.print_line(&format!("Wrong! Correct answer: {}", answer));
                } else {
                    self.print_line("Wrong!");
                }
            }
            ServerMessage::GameOver { leaderboard } => {
                self.problem = None;
                self.remaining_secs = None;
                self.input.clear();

                self.print_line("Round over! Final scores:");
                for (place, entry) in leaderboard.iter().enumerate() {
                    self.print_line(&format!("  {}. {}: {}", place + 1, entry.name, entry.score));
                }
                self.print_line("Waiting in the lobby for the next round...");
            }
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.redraw_status();
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.redraw_status();
    }

    /// Takes and parses the typed answer. Non-numeric input is thrown
    /// away with a hint instead of being sent to the server.
    pub fn take_submission(&mut self) -> Option<i32> {
        let text = std::mem::take(&mut self.input);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.parse::<i32>() {
            Ok(answer) => Some(answer),
            Err(_) => {
                self.print_line("Please enter a whole number.");
                None
            }
        }
    }

    /// Prints a scrolling line above the status line.
    pub fn print_line(&mut self, text: &str) {
        execute!(
            stdout(),
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(text),
            Print("\r\n")
        )
        .expect("failed to print line");
        self.redraw_status();
    }

    fn redraw_status(&mut self) {
        let status = match (&self.problem, self.remaining_secs) {
            (Some(problem), Some(secs)) => {
                format!("[{:>3}s] {} = {}", secs, problem, self.input)
            }
            (Some(problem), None) => format!("{} = {}", problem, self.input),
            _ => String::new(),
        };
        self.overwrite_status(&status);
    }

    fn overwrite_status(&mut self, text: &str) {
        execute!(
            stdout(),
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(text)
        )
        .expect("failed to draw status line");
    }
}
