//! Interactive menu over a ledger.
//!
//! The shell owns no ledger logic: it parses what the user types, calls the
//! engine and intake, and prints what comes back. Input and output are generic
//! so a session can be scripted.

use crate::blockchain::{validate_chain, Block, Blockchain};
use crate::config::DisplayConfig;
use crate::error::{ChainError, Result};
use crate::intake;
use crate::transaction::parse_transfer;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::warn;

pub const VALID_MESSAGE: &str = "Blockchain valid!";
pub const COMPROMISED_MESSAGE: &str = "Blockchain compromised!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTransaction,
    DisplayBlocks,
    Corrupt,
    CheckValidity,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(MenuChoice::AddTransaction),
            "2" => Ok(MenuChoice::DisplayBlocks),
            "3" => Ok(MenuChoice::Corrupt),
            "4" => Ok(MenuChoice::CheckValidity),
            "0" => Ok(MenuChoice::Exit),
            other => Err(ChainError::InvalidInput(format!("unknown menu option '{}'", other))),
        }
    }
}

/// Parses a block index as typed by the user.
pub fn parse_index(input: &str) -> Result<u64> {
    let input = input.trim();
    input
        .parse::<u64>()
        .map_err(|_| ChainError::InvalidInput(format!("block index '{}' is not a number", input)))
}

/// Renders the chain as a table, one row per block.
pub fn render_blocks(blocks: &[Block], display: &DisplayConfig) -> String {
    let mut header = vec![
        Cell::new("Block").add_attribute(Attribute::Bold),
        Cell::new("Timestamp").add_attribute(Attribute::Bold),
        Cell::new("Proof").add_attribute(Attribute::Bold),
        Cell::new("Previous Hash").add_attribute(Attribute::Bold),
    ];
    if display.show_hashes {
        header.push(Cell::new("Hash").add_attribute(Attribute::Bold));
    }
    if display.show_transactions {
        header.push(Cell::new("Transactions").add_attribute(Attribute::Bold));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(header);

    for block in blocks {
        let mut row = vec![
            Cell::new(format!("#{}", block.index())).fg(TableColor::Cyan),
            Cell::new(block.timestamp()),
            Cell::new(block.proof()),
            Cell::new(block.prev_hash()),
        ];
        if display.show_hashes {
            row.push(Cell::new(block.hash()));
        }
        if display.show_transactions {
            let entries = block
                .transactions()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            let cell = if block.transactions().iter().any(|e| e.is_tampered()) {
                Cell::new(entries).fg(TableColor::Red)
            } else {
                Cell::new(entries)
            };
            row.push(cell);
        }
        table.add_row(row);
    }

    table.to_string()
}

pub struct Shell<'a, R, W> {
    chain: &'a mut Blockchain,
    input: R,
    output: W,
    display: DisplayConfig,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(chain: &'a mut Blockchain, input: R, output: W, display: DisplayConfig) -> Self {
        Shell {
            chain,
            input,
            output,
            display,
        }
    }

    /// Runs the menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                break;
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::AddTransaction) => {
                    if !self.add_transaction()? {
                        break;
                    }
                }
                Ok(MenuChoice::DisplayBlocks) => {
                    let table = render_blocks(self.chain.blocks(), &self.display);
                    writeln!(self.output, "{}", table)?;
                }
                Ok(MenuChoice::Corrupt) => {
                    if !self.corrupt()? {
                        break;
                    }
                }
                Ok(MenuChoice::CheckValidity) => {
                    if validate_chain(self.chain.blocks()) {
                        writeln!(self.output, "{}", VALID_MESSAGE.green().bold())?;
                    } else {
                        writeln!(self.output, "{}", COMPROMISED_MESSAGE.red().bold())?;
                    }
                }
                Ok(MenuChoice::Exit) => break,
                Err(_) => {
                    writeln!(self.output, "{}", "Invalid option. Please try again.".yellow())?;
                }
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "1. Add a transaction")?;
        writeln!(self.output, "2. Display all blocks")?;
        writeln!(self.output, "3. Corrupt the Blockchain")?;
        writeln!(self.output, "4. Check Blockchain validity")?;
        writeln!(self.output, "0. Exit")?;
        Ok(())
    }

    /// Writes `message` and reads one line. `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Returns `false` when input ended mid-dialogue.
    fn add_transaction(&mut self) -> Result<bool> {
        let Some(sender) = self.prompt("Enter sender name: ")? else {
            return Ok(false);
        };
        let Some(recipient) = self.prompt("Enter recipient name: ")? else {
            return Ok(false);
        };
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(false);
        };

        match parse_transfer(&sender, &recipient, &amount) {
            Ok(transaction) => {
                let index = intake::submit(transaction, self.chain);
                writeln!(
                    self.output,
                    "{}",
                    format!("Transaction added to block #{}!", index).green()
                )?;
            }
            Err(e) => {
                warn!(error = %e, "transaction rejected");
                writeln!(self.output, "{}", e.to_string().red())?;
            }
        }
        Ok(true)
    }

    /// Returns `false` when input ended mid-dialogue.
    fn corrupt(&mut self) -> Result<bool> {
        let Some(raw) = self.prompt("Enter the index of the block to corrupt: ")? else {
            return Ok(false);
        };

        let outcome = parse_index(&raw).and_then(|index| {
            intake::corrupt(self.chain, index)?;
            Ok(index)
        });
        match outcome {
            Ok(index) => {
                writeln!(
                    self.output,
                    "{}",
                    format!("Blockchain corrupted at block index {}!", index).magenta()
                )?;
            }
            Err(e @ ChainError::InvalidIndex { .. }) => {
                writeln!(self.output, "{} {}", "Invalid block index.".red(), e)?;
            }
            Err(e) => {
                writeln!(self.output, "{}", e.to_string().red())?;
            }
        }
        Ok(true)
    }
}
