//! Interactive menu session.
//!
//! ```text
//! 1) Normalize data
//! 2) Generate CSV
//! 3) List heroes from the CSV file by height ASC
//! 4) Generate JSON
//! 5) List heroes from the JSON file by weight DESC
//! 6) Sort list by strength
//! 7) Exit
//! ```
//!
//! Options 2 to 6 are refused until the roster has been normalized. Failed
//! imports and exports are reported to the user and the session goes on;
//! only terminal IO errors end it early.

use std::io::{BufRead, Write};
use tracing::warn;

use crate::config::{SessionConfig, CSV_LIST_FIELD, JSON_LIST_FIELD, SORT_FIELD};
use crate::error::SessionResult;
use crate::files::{read_csv, read_json, write_csv, write_json};
use crate::models::{display_value, Collection, Record};
use crate::normalize::{normalize_collection, restore_collection};
use crate::ordering::{sort_ascending, sort_by_field, sort_descending, SortOrder};

/// Menu lines, in display order.
pub const MENU: [&str; 7] = [
    "1) Normalize data",
    "2) Generate CSV",
    "3) List heroes from the CSV file by height ASC",
    "4) Generate JSON",
    "5) List heroes from the JSON file by weight DESC",
    "6) Sort list by strength",
    "7) Exit",
];

const NOT_NORMALIZED: &str = "ERROR. The data must be normalized first.";
const ALREADY_NORMALIZED: &str = "There was an error normalizing the data. Check that the list is \
                                  not empty and that the data has not been normalized already.";

/// One menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Normalize,
    GenerateCsv,
    ListCsvByHeight,
    GenerateJson,
    ListJsonByWeight,
    SortByStrength,
    Exit,
}

impl MenuOption {
    pub const CHOICES: [&'static str; 7] = ["1", "2", "3", "4", "5", "6", "7"];

    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::Normalize),
            "2" => Some(Self::GenerateCsv),
            "3" => Some(Self::ListCsvByHeight),
            "4" => Some(Self::GenerateJson),
            "5" => Some(Self::ListJsonByWeight),
            "6" => Some(Self::SortByStrength),
            "7" => Some(Self::Exit),
            _ => None,
        }
    }

    /// Everything except normalizing and leaving needs normalized data.
    pub fn requires_normalized(&self) -> bool {
        !matches!(self, Self::Normalize | Self::Exit)
    }
}

/// Ask until the answer is one of `valid`. `None` when input ends.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    retry: &str,
    valid: &[&str],
) -> SessionResult<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim().to_lowercase();
        if valid.contains(&answer.as_str()) {
            return Ok(Some(answer));
        }
        write!(output, "{}", retry)?;
        output.flush()?;
    }
}

/// Print `Name: <nombre> - <key>: <value>` for every record.
pub fn list_records<W: Write>(output: &mut W, records: &[Record], key: &str) -> SessionResult<()> {
    for record in records {
        let name = record.get("nombre").map(display_value).unwrap_or_else(|| "-".into());
        let value = record.get(key).map(display_value).unwrap_or_else(|| "-".into());
        writeln!(output, "Name: {} - {}: {}", name, key, value)?;
    }
    Ok(())
}

/// A menu session over one roster.
pub struct Session {
    roster: Collection,
    config: SessionConfig,
    normalized: bool,
}

impl Session {
    pub fn new(roster: Collection, config: SessionConfig) -> Self {
        Self {
            roster,
            config,
            normalized: false,
        }
    }

    pub fn roster(&self) -> &[Record] {
        &self.roster
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Run the menu until the user exits or the input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> SessionResult<()> {
        loop {
            for line in MENU {
                writeln!(output, "{}", line)?;
            }
            let Some(choice) = prompt(
                input,
                output,
                "Choose an option: ",
                "Error. Choose a valid option: ",
                &MenuOption::CHOICES,
            )?
            else {
                writeln!(output)?;
                return Ok(());
            };

            let Some(option) = MenuOption::from_choice(&choice) else {
                continue;
            };
            if !self.handle(option, input, output)? {
                return Ok(());
            }
        }
    }

    /// Execute one option. Returns `false` when the session should end.
    pub fn handle<R: BufRead, W: Write>(
        &mut self,
        option: MenuOption,
        input: &mut R,
        output: &mut W,
    ) -> SessionResult<bool> {
        if option.requires_normalized() && !self.normalized {
            writeln!(output, "{}", NOT_NORMALIZED)?;
            return Ok(true);
        }

        match option {
            MenuOption::Normalize => self.normalize(output)?,
            MenuOption::GenerateCsv => {
                match write_csv(&self.config.csv_path, &self.roster) {
                    Ok(()) => writeln!(output, "Created file: {}", self.config.csv_path.display())?,
                    Err(e) => report(output, &e)?,
                }
            }
            MenuOption::ListCsvByHeight => self.list_csv(output)?,
            MenuOption::GenerateJson => {
                match write_json(&self.config.json_path, &self.roster, &self.config.list_key) {
                    Ok(()) => writeln!(output, "Generated JSON file: {}", self.config.json_path.display())?,
                    Err(e) => report(output, &e)?,
                }
            }
            MenuOption::ListJsonByWeight => self.list_json(output)?,
            MenuOption::SortByStrength => {
                let Some(answer) = prompt(
                    input,
                    output,
                    "How do you want to sort? (asc - desc): ",
                    "Error. How do you want to sort? (asc - desc): ",
                    &["asc", "desc"],
                )?
                else {
                    return Ok(false);
                };
                let order: SortOrder = answer.parse().unwrap_or(SortOrder::Ascending);
                sort_by_field(&mut self.roster, SORT_FIELD, order);
                list_records(output, &self.roster, SORT_FIELD)?;
            }
            MenuOption::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn normalize<W: Write>(&mut self, output: &mut W) -> SessionResult<()> {
        if self.normalized || self.roster.is_empty() {
            writeln!(output, "{}", ALREADY_NORMALIZED)?;
            return Ok(());
        }
        normalize_collection(&mut self.roster);
        self.normalized = true;
        writeln!(output, "Data normalized.")?;
        Ok(())
    }

    fn list_csv<W: Write>(&self, output: &mut W) -> SessionResult<()> {
        match read_csv(&self.config.csv_path) {
            Ok(mut heroes) if !heroes.is_empty() => {
                restore_collection(&mut heroes);
                sort_ascending(&mut heroes, CSV_LIST_FIELD);
                list_records(output, &heroes, CSV_LIST_FIELD)
            }
            Ok(_) => Ok(writeln!(output, "The CSV file has no heroes.")?),
            Err(e) if e.is_missing_file() => Ok(writeln!(output, "The CSV file does not exist.")?),
            Err(e) => report(output, &e),
        }
    }

    fn list_json<W: Write>(&self, output: &mut W) -> SessionResult<()> {
        match read_json(&self.config.json_path, &self.config.list_key) {
            Ok(mut heroes) if !heroes.is_empty() => {
                sort_descending(&mut heroes, JSON_LIST_FIELD);
                list_records(output, &heroes, JSON_LIST_FIELD)
            }
            Ok(_) => Ok(writeln!(output, "The JSON file has no heroes.")?),
            Err(e) if e.is_missing_file() => Ok(writeln!(output, "The JSON file does not exist.")?),
            Err(e) => report(output, &e),
        }
    }
}

/// Tell the user about a recoverable failure.
fn report<W: Write, E: std::fmt::Display>(output: &mut W, err: &E) -> SessionResult<()> {
    warn!("{}", err);
    writeln!(output, "Error: {}", err)?;
    Ok(())
}
