//! Easter eggs
//!
//! Small novelty commands. Several pick a random line; `party` also asks
//! the desktop for its celebration animation.

use super::{joined, pick};
use crate::shell::markup::{command, comment, escape, highlight};
use crate::shell::registry::{CommandContext, CommandOutput, Effect};

const GREETINGS: &[&str] = &[
    "Hey there! Welcome to my corner of the internet.",
    "Hi! Thanks for stopping by. Type 'help' to see what you can do here.",
    "Hello! I'm Emily. Feel free to explore with 'ls' or 'ask' me something!",
];

const COFFEES: &[&str] = &[
    "☕ Brewing a fresh cup of coffee...\n\n<span class=\"highlight\">Perfect!</span> Now let's get coding.",
    "☕ *coffee machine noises*\n\nHere's your coffee! Fun fact: I'm powered by caffeine and curiosity.",
    "☕ One oat milk latte, coming right up!\n\n...okay, it's just regular coffee. But pretend it's fancy.",
];

const FORTUNES: &[&str] = &[
    "A beautiful, smart, and loving person will be coming into your life.",
    "Your code will compile on the first try today.",
    "The bug you're looking for is on line 42.",
    "A journey of a thousand miles begins with a single 'git init'.",
    "Today is a good day to push to production. Just kidding. Never push on Friday.",
    "You will find joy in the small things. Like when tests pass.",
    "The best time to plant a tree was 20 years ago. The second best time is now. Same goes for learning Rust.",
    "Your future is bright, like an unthemed terminal with a white background.",
];

const CLAUDE_REPLIES: &[&str] = &[
    "Interesting! But I'm off-duty. Try <span class=\"command\">ask</span> to chat with Emily!",
    "*pretends to think deeply* ...Have you tried <span class=\"command\">fortune</span>?",
    "I'm flattered you want to talk! But <span class=\"command\">coffee</span> first?",
    "Beep boop. AI processing... Just kidding. Try <span class=\"command\">help</span>!",
    "I'm in read-only mode on this site. But I did help build it! 🎨",
];

/// hi - say hello
pub fn prog_hi(_args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    CommandOutput::text(pick(GREETINGS))
}

/// coffee - brew some coffee
pub fn prog_coffee(_args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    CommandOutput::text(pick(COFFEES))
}

/// fortune - get a random fortune
pub fn prog_fortune(_args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    CommandOutput::text(format!("🔮 {}", pick(FORTUNES)))
}

/// party - start a party
pub fn prog_party(_args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    ctx.effect(Effect::Flourish);
    CommandOutput::text("🎉 🎊 🥳 Party mode activated! 🥳 🎊 🎉")
}

/// matrix - enter the matrix
pub fn prog_matrix(_args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    CommandOutput::text(format!(
        "{}\n{}\n{}\n\n{}",
        command("Wake up, Neo..."),
        comment("The Matrix has you..."),
        highlight("Follow the white rabbit."),
        comment("# Just kidding. But wouldn't that be cool?")
    ))
}

/// cowsay - have a cow say something
pub fn prog_cowsay(args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    let message = if args.is_empty() {
        "Moo!".to_string()
    } else {
        joined(args)
    };
    let rule = "─".repeat(message.chars().count() + 2);
    let cow = format!(
        "
 ╭{rule}╮
 │ {msg} │
 ╰{rule}╯
        \\   ^__^
         \\  (oo)\\_______
            (__)\\       )\\/\\
                ||----w |
                ||     ||",
        rule = rule,
        msg = escape(&message)
    );
    CommandOutput::text(command(&cow))
}

/// neofetch - display system info
pub fn prog_neofetch(_args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    let banner = format!(
        "\n   ╭──────────────────╮\n   │  {}  │\n   ╰──────────────────╯",
        command(&format!("{}@portfolio", escape(ctx.user)))
    );
    let rows = [
        ("OS:", "Emily's Cozy Terminal v1.0".to_string()),
        ("Host:", "GitHub Pages".to_string()),
        ("Shell:", "custom-bash".to_string()),
        ("Theme:", ctx.theme.to_string()),
        ("Terminal:", "VT323".to_string()),
        ("CPU:", "Caffeine-powered".to_string()),
        ("Memory:", "Full of dreams".to_string()),
    ];
    let info: Vec<String> = rows
        .iter()
        .map(|(label, value)| format!("   {} {}", comment(label), value))
        .collect();
    CommandOutput::text(format!("{}\n{}", highlight(&banner), info.join("\n")))
}

/// sudo - superuser do
pub fn prog_sudo(args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    match words.as_slice() {
        ["hire", "emily", ..] => CommandOutput::text(format!(
            "{}\n\nGreat choice. Let's connect:\n• linkedin: linkedin.com/in/nguyen-emily\n• github: github.com/nEmily",
            highlight("Permission granted!")
        )),
        ["make", "me", "a", "sandwich", ..] => CommandOutput::text("Okay."),
        _ => CommandOutput::text(
            "Sorry, user is not in the sudoers file. This incident will be reported.",
        ),
    }
}

/// claude - talk to Claude
pub fn prog_claude(args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    if args.is_empty() {
        return CommandOutput::text(format!(
            "{} {}\n\nHi! I'm Claude, but I'm currently on coffee break. ☕\n\n{} I helped build this website!\n\nTry {} to chat with Emily instead,\nor {} if you're recruiting.",
            highlight("Claude Code"),
            comment("v1.0.0"),
            comment("# Fun fact:"),
            command("ask"),
            command("sudo hire emily")
        ));
    }

    let message = joined(args).to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| message.contains(w));

    if has(&["help", "how"]) {
        return CommandOutput::text(format!(
            "I'd love to help, but I'm just an easter egg here! 🥚\n\nTry these instead:\n  {}     - see all commands\n  {}      - ask Emily a question\n  {}      - read files",
            command("help"),
            command("ask"),
            command("cat")
        ));
    }
    if has(&["hello", "hi"]) {
        return CommandOutput::text(format!(
            "Hello! 👋 Nice to meet you!\n\nI helped Emily build this portfolio. Pretty cool, right?\nType {} to explore!",
            command("help")
        ));
    }
    if has(&["build", "make", "code"]) {
        return CommandOutput::text(format!(
            "{}\n\nI'd write some code for you, but Emily said I need to take a break.\nSomething about \"AI boundaries\" and \"work-life balance\"? 🤷\n\nCheck out {} to see what we built together!",
            comment("# thinking..."),
            command("ls projects/")
        ));
    }
    CommandOutput::text(pick(CLAUDE_REPLIES))
}

/// chatgpt - wrong AI
pub fn prog_chatgpt(_args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    CommandOutput::text(format!(
        "{}\n\nThis site was made with {}, not ChatGPT!\nTry {} instead. 😉",
        comment("# error: wrong AI"),
        highlight("Claude"),
        command("claude")
    ))
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    #[test]
    fn test_random_picks_come_from_tables() {
        let mut h = Harness::new();
        for _ in 0..5 {
            let out = h.text("hi", &[]);
            assert!(GREETINGS.contains(&out.as_str()));
            let out = h.text("coffee", &[]);
            assert!(COFFEES.contains(&out.as_str()));
            let out = h.text("fortune", &[]);
            assert!(out.starts_with("🔮 "));
        }
    }

    #[test]
    fn test_party_requests_flourish() {
        let mut h = Harness::new();
        h.text("party", &[]);
        assert_eq!(h.effects, vec![Effect::Flourish]);
    }

    #[test]
    fn test_cowsay_box_fits_message() {
        let mut h = Harness::new();
        let out = h.text("cowsay", &["hello"]);
        assert!(out.contains(" ╭───────╮"));
        assert!(out.contains(" │ hello │"));

        let out = h.text("cowsay", &[]);
        assert!(out.contains("│ Moo! │"));
    }

    #[test]
    fn test_cowsay_escapes() {
        let mut h = Harness::new();
        let out = h.text("cowsay", &["<3"]);
        assert!(out.contains("│ &lt;3 │"));
        assert!(out.contains("╭────╮"));
    }

    #[test]
    fn test_neofetch_shows_theme() {
        let mut h = Harness::new();
        let out = h.text("neofetch", &[]);
        assert!(out.contains("emily@portfolio"));
        assert!(out.contains("<span class=\"comment\">Theme:</span> meadow"));
    }

    #[test]
    fn test_sudo() {
        let mut h = Harness::new();
        assert!(h.text("sudo", &["hire", "emily"]).contains("Permission granted!"));
        assert_eq!(h.text("sudo", &["make", "me", "a", "sandwich"]), "Okay.");
        assert!(h.text("sudo", &["rm", "-rf"]).contains("sudoers"));
    }

    #[test]
    fn test_claude_keywords() {
        let mut h = Harness::new();
        assert!(h.text("claude", &[]).contains("coffee break"));
        assert!(h.text("claude", &["how", "are", "you"]).contains("easter egg"));
        assert!(h.text("claude", &["Hello"]).contains("Nice to meet you"));
        assert!(h.text("claude", &["write", "code"]).contains("# thinking..."));
        let out = h.text("claude", &["xyz"]);
        assert!(CLAUDE_REPLIES.contains(&out.as_str()));
    }

    #[test]
    fn test_ai_alias() {
        let mut h = Harness::new();
        assert!(h.text("ai", &[]).contains("coffee break"));
    }

    #[test]
    fn test_chatgpt() {
        let mut h = Harness::new();
        assert!(h.text("chatgpt", &[]).contains("# error: wrong AI"));
    }
}
