use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::InputError;
use crate::model::Portion;


// Everything the user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // 1-based number on the menu
    Select(usize),
    // 1-based number on the order summary
    Remove(usize),
    Portion(Portion),
    Cancel,
    Reset,
    Help,
    Quit,
}


/// Parse one line of user input.
///
/// Accepted forms: `<n>`, `x<n>`, `rm <n>`, `l`/`light`, `n`/`normal`,
/// `h`/`heavy`, `c`/`cancel`, `reset`, `?`/`help`, `q`/`quit`.
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let text = line.trim().to_ascii_lowercase();
    if text.is_empty() {
        return Err(InputError::Empty);
    }

    let command = match text.as_str() {
        "l" | "light" => Command::Portion(Portion::Light),
        "n" | "normal" => Command::Portion(Portion::Normal),
        "h" | "heavy" => Command::Portion(Portion::Heavy),
        "c" | "cancel" => Command::Cancel,
        "reset" => Command::Reset,
        "?" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => {
            if let Some(rest) = other.strip_prefix("rm ").or_else(|| other.strip_prefix('x')) {
                Command::Remove(parse_number(rest)?)
            } else if other.starts_with(|c: char| c.is_ascii_digit()) {
                Command::Select(parse_number(other)?)
            } else {
                return Err(InputError::Unrecognized(line.trim().to_string()));
            }
        }
    };
    Ok(command)
}

fn parse_number(text: &str) -> Result<usize, InputError> {
    let text = text.trim();
    let n: usize = text
        .parse()
        .map_err(|_| InputError::BadNumber(text.to_string()))?;
    if n == 0 {
        return Err(InputError::ZeroIndex);
    }
    Ok(n)
}


// Input read from the terminal, parsed or not
pub type InputEvent = Result<Command, InputError>;


/// Read stdin line by line and forward parsed commands until EOF.
pub async fn input_task(tx: mpsc::Sender<InputEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let parsed = parse_command(&line);
                if matches!(parsed, Err(InputError::Empty)) {
                    continue;
                }
                if tx.send(parsed).await.is_err() {
                    break;
                }
            }
            Ok(None) => {
                debug!("stdin closed");
                let _ = tx.send(Ok(Command::Quit)).await;
                break;
            }
            Err(e) => {
                debug!(error = %e, "stdin read failed");
                let _ = tx.send(Ok(Command::Quit)).await;
                break;
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_select_menu_items() {
        assert_eq!(parse_command("3"), Ok(Command::Select(3)));
        assert_eq!(parse_command("  12 \n"), Ok(Command::Select(12)));
    }

    #[test]
    fn removal_forms() {
        assert_eq!(parse_command("x2"), Ok(Command::Remove(2)));
        assert_eq!(parse_command("X 4"), Ok(Command::Remove(4)));
        assert_eq!(parse_command("rm 1"), Ok(Command::Remove(1)));
    }

    #[test]
    fn modal_answers() {
        assert_eq!(parse_command("l"), Ok(Command::Portion(Portion::Light)));
        assert_eq!(parse_command("Normal"), Ok(Command::Portion(Portion::Normal)));
        assert_eq!(parse_command("HEAVY"), Ok(Command::Portion(Portion::Heavy)));
        assert_eq!(parse_command("cancel"), Ok(Command::Cancel));
    }

    #[test]
    fn misc_commands() {
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("reset"), Ok(Command::Reset));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
    }

    #[test]
    fn bad_input() {
        assert_eq!(parse_command("   "), Err(InputError::Empty));
        assert_eq!(parse_command("0"), Err(InputError::ZeroIndex));
        assert_eq!(parse_command("x"), Err(InputError::BadNumber(String::new())));
        assert_eq!(parse_command("3a"), Err(InputError::BadNumber("3a".into())));
        assert_eq!(parse_command("guac"), Err(InputError::Unrecognized("guac".into())));
    }
}
