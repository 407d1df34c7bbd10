//! Scripted sessions against the interactive shell

use powledger::blockchain::Blockchain;
use powledger::cli::{Shell, COMPROMISED_MESSAGE, VALID_MESSAGE};
use powledger::config::DisplayConfig;
use std::io::Cursor;

fn run(chain: &mut Blockchain, script: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut output = Vec::new();
    Shell::new(chain, Cursor::new(script.as_bytes()), &mut output, DisplayConfig::default()).run()?;
    Ok(String::from_utf8(output)?)
}

#[test]
fn test_full_session() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new();
    let script = "\
1\nA\nB\n1\n\
1\nA\nB\n2\n\
1\nA\nB\n3\n\
4\n\
3\n1\n\
4\n\
2\n\
0\n";
    let output = run(&mut chain, script)?;

    assert!(output.contains("Transaction added to block #1!"));
    assert!(output.contains("Transaction added to block #2!"));

    let valid_at = output.find(VALID_MESSAGE).ok_or("no valid verdict")?;
    let corrupted_at = output
        .find("Blockchain corrupted at block index 1!")
        .ok_or("no corruption notice")?;
    let compromised_at = output.find(COMPROMISED_MESSAGE).ok_or("no compromised verdict")?;
    assert!(valid_at < corrupted_at && corrupted_at < compromised_at);

    assert!(output.contains("<corrupted: true>"));
    assert!(output.contains("A -> B: 3"));
    assert_eq!(chain.len(), 2);
    Ok(())
}

#[test]
fn test_menu_is_printed_each_round() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new();
    let output = run(&mut chain, "4\n0\n")?;
    assert_eq!(output.matches("Choose an option: ").count(), 2);
    assert!(output.contains("1. Add a transaction"));
    assert!(output.contains("0. Exit"));
    Ok(())
}

#[test]
fn test_exit_on_end_of_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new();
    let output = run(&mut chain, "")?;
    assert_eq!(output.matches("Choose an option: ").count(), 1);
    Ok(())
}
