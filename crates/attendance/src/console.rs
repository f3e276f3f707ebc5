//! Menu-driven console front end.
//!
//! The controller walks a small state machine, reading one line per prompt.
//! Bad input and failing store operations are reported and the menu comes
//! back; only the Exit choice or the end of input stops the loop.

use std::io::{BufRead, Write};

use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::logging::LogContext;
use crate::record::Status;
use crate::service::{AttendanceService, AttendanceView};
use crate::store::InitOutcome;

const MENU: &str = "\n--- Main Menu ---\n1. Log Attendance\n2. View Attendance Logs\n3. Exit";
const CHOICE_PROMPT: &str = "Enter your choice (1/2/3): ";
const EMPLOYEE_ID_PROMPT: &str = "Enter your Employee ID: ";
const NAME_PROMPT: &str = "Enter your Name: ";
const STATUS_PROMPT: &str = "Enter your Attendance Status (Present/Absent): ";
const GOODBYE: &str = "Exiting the Attendance Management System. Goodbye!";

/// Where the controller is in the menu cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// Print the menu.
    MenuPrompt,
    /// Read and parse a menu choice.
    AwaitChoice,
    /// Collect and log one attendance entry.
    LogAttendanceFlow,
    /// List stored entries.
    ViewFlow,
    /// Terminal state.
    Exit,
}

/// A valid menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Option 1.
    LogAttendance,
    /// Option 2.
    ViewAttendance,
    /// Option 3.
    Exit,
}

impl MenuChoice {
    /// Parse a menu line as an integer choice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the line is not an integer and
    /// [`Error::InvalidMenuChoice`] when it is outside 1..=3.
    pub fn parse(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        let number: i64 = trimmed
            .parse()
            .map_err(|_| Error::invalid_input(trimmed))?;
        match number {
            1 => Ok(Self::LogAttendance),
            2 => Ok(Self::ViewAttendance),
            3 => Ok(Self::Exit),
            other => Err(Error::InvalidMenuChoice(other)),
        }
    }

    fn next_state(self) -> MenuState {
        match self {
            Self::LogAttendance => MenuState::LogAttendanceFlow,
            Self::ViewAttendance => MenuState::ViewFlow,
            Self::Exit => MenuState::Exit,
        }
    }
}

/// Interactive controller over an input and an output stream.
///
/// Errors returned from [`Console::run`] come only from the console streams
/// themselves; everything else is reported to the user and logged.
#[derive(Debug)]
pub struct Console<C, R, W> {
    service: AttendanceService<C>,
    input: R,
    output: W,
    logging: Option<LogContext>,
}

impl<C: Clock, R: BufRead, W: Write> Console<C, R, W> {
    /// Create a controller reading from `input` and writing to `output`.
    #[must_use]
    pub fn new(service: AttendanceService<C>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
            logging: None,
        }
    }

    /// Hand the log sinks to the controller; they are closed on exit.
    #[must_use]
    pub fn with_logging(mut self, logging: LogContext) -> Self {
        self.logging = Some(logging);
        self
    }

    /// The attendance service behind the menu.
    #[must_use]
    pub fn service(&self) -> &AttendanceService<C> {
        &self.service
    }

    /// Consume the controller and return its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from or writing to the console fails.
    pub fn run(&mut self) -> Result<()> {
        self.initialize_store()?;
        info!("Attendance Management System started");

        let mut state = MenuState::MenuPrompt;
        while state != MenuState::Exit {
            state = self.step(state)?;
        }

        if let Some(logging) = self.logging.take() {
            logging.shutdown();
        }
        Ok(())
    }

    /// Perform the work of `state` and return the state to move to.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from or writing to the console fails.
    pub fn step(&mut self, state: MenuState) -> Result<MenuState> {
        match state {
            MenuState::MenuPrompt => {
                writeln!(self.output, "{MENU}")?;
                Ok(MenuState::AwaitChoice)
            }
            MenuState::AwaitChoice => self.await_choice(),
            MenuState::LogAttendanceFlow => self.log_attendance_flow(),
            MenuState::ViewFlow => {
                self.view_flow()?;
                Ok(MenuState::MenuPrompt)
            }
            MenuState::Exit => Ok(MenuState::Exit),
        }
    }

    fn initialize_store(&mut self) -> Result<()> {
        match self.service.store().initialize() {
            Ok(InitOutcome::Created | InitOutcome::AlreadyExists) => {}
            Err(err) => {
                error!("Failed to initialize attendance file: {err}");
                writeln!(
                    self.output,
                    "An error occurred while preparing the attendance file: {err}"
                )?;
            }
        }
        Ok(())
    }

    fn await_choice(&mut self) -> Result<MenuState> {
        let choice = self
            .prompt(CHOICE_PROMPT)
            .and_then(|line| line.as_deref().map(MenuChoice::parse).transpose());

        match choice {
            Ok(None) => self.end_of_input(),
            Ok(Some(MenuChoice::Exit)) => {
                info!("Exiting the Attendance Management System");
                writeln!(self.output, "{GOODBYE}")?;
                Ok(MenuState::Exit)
            }
            Ok(Some(choice)) => Ok(choice.next_state()),
            Err(err @ Error::InvalidMenuChoice(_)) => {
                warn!("Invalid menu choice entered: {err}");
                writeln!(self.output, "Invalid choice. Please enter 1, 2, or 3.")?;
                Ok(MenuState::MenuPrompt)
            }
            Err(err) if err.is_user_input() => {
                warn!("Invalid menu choice entered: {err}");
                writeln!(self.output, "Invalid choice. Please enter a number (1/2/3).")?;
                Ok(MenuState::MenuPrompt)
            }
            Err(err) => Err(err),
        }
    }

    fn log_attendance_flow(&mut self) -> Result<MenuState> {
        let (employee_id, name, status) = match self.read_entry() {
            Ok(Some(entry)) => entry,
            Ok(None) => return self.end_of_input(),
            Err(err) if err.is_user_input() => {
                warn!("Invalid input: {err}");
                let reason = match err {
                    Error::InvalidStatus { .. } => {
                        "Invalid status. Please enter 'Present' or 'Absent'."
                    }
                    _ => "Entries must be valid text. Please try again.",
                };
                writeln!(self.output, "Invalid input: {reason}")?;
                return Ok(MenuState::MenuPrompt);
            }
            Err(err) => return Err(err),
        };

        match self.service.log_attendance(&employee_id, &name, status) {
            Ok(record) => writeln!(
                self.output,
                "Attendance logged for Employee {} ({}): {}",
                record.employee_id, record.name, record.status
            )?,
            Err(err) => {
                error!("Failed to log attendance for Employee {employee_id} ({name}): {err}");
                writeln!(
                    self.output,
                    "An error occurred while logging attendance. Please try again."
                )?;
            }
        }
        Ok(MenuState::MenuPrompt)
    }

    /// Ask for the three fields of an entry. `None` at end of input.
    fn read_entry(&mut self) -> Result<Option<(String, String, Status)>> {
        let Some(employee_id) = self.prompt(EMPLOYEE_ID_PROMPT)? else {
            return Ok(None);
        };
        let Some(name) = self.prompt(NAME_PROMPT)? else {
            return Ok(None);
        };
        let Some(raw_status) = self.prompt(STATUS_PROMPT)? else {
            return Ok(None);
        };
        let status = raw_status.parse::<Status>()?;
        Ok(Some((employee_id, name, status)))
    }

    fn view_flow(&mut self) -> Result<()> {
        match self.service.view_attendance() {
            Ok(AttendanceView::Missing) => {
                writeln!(
                    self.output,
                    "No attendance records file found. Please log attendance first."
                )?;
            }
            Ok(AttendanceView::Empty) => {
                writeln!(self.output, "No attendance records found.")?;
            }
            Ok(AttendanceView::Records(lines)) => {
                writeln!(self.output, "\n--- Attendance Records ---")?;
                for line in lines {
                    writeln!(self.output, "{line}")?;
                }
            }
            Err(err) => {
                error!("Error reading attendance logs: {err}");
                writeln!(
                    self.output,
                    "An error occurred while viewing attendance logs. Please try again."
                )?;
            }
        }
        Ok(())
    }

    fn end_of_input(&mut self) -> Result<MenuState> {
        info!("Input closed, exiting the Attendance Management System");
        writeln!(self.output)?;
        writeln!(self.output, "{GOODBYE}")?;
        Ok(MenuState::Exit)
    }

    /// Print `message` and read one trimmed line. `None` at end of input.
    ///
    /// A line that is not UTF-8 is consumed and reported as
    /// [`Error::InvalidEncoding`].
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        match String::from_utf8(bytes) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(err) => Err(Error::InvalidEncoding {
                input: String::from_utf8_lossy(err.as_bytes()).trim().to_string(),
            }),
        }
    }
}
