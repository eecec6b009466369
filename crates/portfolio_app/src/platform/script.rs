//! Line-oriented input driver standing in for user interaction.

use anyhow::{anyhow, bail, Context};
use portfolio_core::ContactField;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScriptCommand {
    /// User scrolls the page to an absolute offset.
    Scroll(f64),
    /// Let the page run for a number of milliseconds.
    Wait(u64),
    /// Header link click.
    Navigate(String),
    /// Mobile menu button.
    Menu,
    /// Link click inside the mobile menu.
    MenuNavigate(String),
    /// The intro's "contact me" button.
    ContactCta,
    Type(ContactField, String),
    Submit,
    Download,
    Show,
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub(crate) fn parse_command(line: &str) -> anyhow::Result<Option<ScriptCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "scroll" => ScriptCommand::Scroll(
            rest.parse()
                .with_context(|| format!("scroll offset {rest:?}"))?,
        ),
        "wait" => ScriptCommand::Wait(
            rest.parse()
                .with_context(|| format!("wait duration {rest:?}"))?,
        ),
        "nav" => ScriptCommand::Navigate(required(word, rest)?),
        "menu" => ScriptCommand::Menu,
        "menu-nav" => ScriptCommand::MenuNavigate(required(word, rest)?),
        "cta" => ScriptCommand::ContactCta,
        "type" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = match field {
                "name" => ContactField::Name,
                "email" => ContactField::Email,
                "message" => ContactField::Message,
                other => bail!("unknown field {other:?}"),
            };
            ScriptCommand::Type(field, value.trim().to_string())
        }
        "submit" => ScriptCommand::Submit,
        "download" => ScriptCommand::Download,
        "show" => ScriptCommand::Show,
        "quit" | "exit" => ScriptCommand::Quit,
        other => bail!("unknown command {other:?}"),
    };
    Ok(Some(command))
}

fn required(word: &str, rest: &str) -> anyhow::Result<String> {
    if rest.is_empty() {
        return Err(anyhow!("{word} needs a section id"));
    }
    Ok(rest.to_string())
}
