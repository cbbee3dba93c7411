use rustyline::{
    Config as RustyConfig, Editor, error::ReadlineError,
    completion::{Completer, Pair},
    hint::{Hinter, HistoryHinter},
    highlight::{Highlighter, MatchingBracketHighlighter, CmdKind},
    validate::Validator,
    Helper, history::FileHistory
};
use colored::Colorize;
use crate::{
    gateway::TextGenerator,
    message::{Message, Role},
    widget::{ChatWidget, Visibility},
};

const COMMANDS: [&str; 5] = ["close", "context", "exit", "help", "open"];

struct ChatHelper {
    hinter: HistoryHinter,
    bracket_highlighter: MatchingBracketHighlighter,
}

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Commands are only recognised as the whole line.
        let before_cursor = &line[..pos];
        if before_cursor.contains(' ') {
            return Ok((pos, Vec::new()));
        }
        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(before_cursor))
            .map(|cmd| Pair { display: cmd.to_string(), replacement: cmd.to_string() })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &rustyline::Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ChatHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> std::borrow::Cow<'h, str> {
        std::borrow::Cow::Owned(hint.truecolor(128, 128, 128).to_string())
    }

    fn highlight<'l>(&self, line: &'l str, pos: usize) -> std::borrow::Cow<'l, str> {
        self.bracket_highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: CmdKind) -> bool {
        self.bracket_highlighter.highlight_char(line, pos, forced)
    }
}

impl Validator for ChatHelper {}

fn print_message(message: &Message) {
    match message.role() {
        Role::Model => println!("{} {}", "Assistente:".cyan().bold(), message.text().yellow()),
        Role::User => println!("{} {}", "Você:".green().bold(), message.text().white()),
    }
}

fn print_transcript(messages: &[Message]) {
    println!("{}", "--- Conversa ---".yellow());
    for message in messages {
        print_message(message);
    }
    println!("{}", "--- Fim ---".yellow());
}

pub fn run_cli<G: TextGenerator>(mut widget: ChatWidget<G>) -> Result<(), Box<dyn std::error::Error>> {
    let rusty_config = RustyConfig::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl: Editor<ChatHelper, FileHistory> = Editor::with_config(rusty_config)?;
    rl.set_helper(Some(ChatHelper {
        hinter: HistoryHinter {},
        bracket_highlighter: MatchingBracketHighlighter::new(),
    }));

    println!("{}", "Alan Wesdra Advocacia & Consultoria (type 'help' for commands)".blue().bold());
    widget.open();
    if let Some(greeting) = widget.messages().first() {
        print_message(greeting);
    }

    loop {
        let prompt = match widget.state().visibility {
            Visibility::Open => "você> ".green(),
            Visibility::Closed => "[fechado]> ".truecolor(128, 128, 128),
        };
        match rl.readline(&prompt.to_string()) {
            Ok(line) => {
                let input = line.trim();
                if !input.is_empty() {
                    rl.add_history_entry(input)?;
                }
                match input {
                    "exit" => break,
                    "help" => println!(
                        "{}",
                        "Workflow:\n\
                        - Type your question and press Enter to send it to the assistant\n\
                        \n\
                        Available commands:\n\
                        - open: Open the chat\n\
                        - close: Close the chat (the conversation is kept)\n\
                        - context: Show the conversation so far\n\
                        - exit: Exit the program\n\
                        - help: Show this help message\n"
                            .blue()
                    ),
                    "open" => {
                        widget.open();
                        print_transcript(widget.messages());
                    },
                    "close" => {
                        widget.close();
                        println!("{}", "Chat closed. Type 'open' to continue.".truecolor(128, 128, 128));
                    },
                    "context" => print_transcript(widget.messages()),
                    _ if !widget.is_open() => {
                        println!("{}", "The chat is closed. Type 'open' to talk to the assistant.".truecolor(128, 128, 128));
                    },
                    _ => {
                        let Some(turn) = widget.send(input) else { continue };
                        println!("{}", "Digitando...".truecolor(128, 128, 128));
                        let reply = widget.resolve(turn);
                        print_message(&Message::model(reply));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(Box::new(e)),
        }
    }
    Ok(())
}
