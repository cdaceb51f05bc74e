//! Content discovery programs
//!
//! - `search`: full-text search over file contents and directory blurbs
//! - `ask`: canned answers to natural-language questions

use super::joined;
use crate::shell::markup::{command, comment, escape};
use crate::shell::registry::{CommandContext, CommandOutput};

/// search - search content for keywords
pub fn prog_search(args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    if args.is_empty() {
        return CommandOutput::text("search: missing keyword");
    }

    let phrase = joined(args);
    let keyword = phrase.to_lowercase();
    let results: Vec<&str> = ctx
        .fs
        .iter()
        .filter(|node| {
            node.text()
                .is_some_and(|text| text.to_lowercase().contains(&keyword))
        })
        .map(|node| node.path.as_str())
        .collect();

    if results.is_empty() {
        return CommandOutput::text(format!("No results for \"{}\"", escape(&phrase)));
    }

    let listing: Vec<String> = results.iter().map(|path| command(path)).collect();
    CommandOutput::text(format!(
        "{}\n\n{}",
        comment(&format!("# found {} result(s)", results.len())),
        listing.join("\n")
    ))
}

/// A canned answer and the phrases that trigger it
pub struct AskRule {
    pub triggers: &'static [&'static str],
    pub response: &'static str,
}

/// Checked in order; the first rule with a trigger contained in the
/// question wins.
pub const ASK_RULES: &[AskRule] = &[
    AskRule {
        triggers: &["who are you", "about you", "tell me about yourself", "introduce yourself"],
        response: "I'm Emily Nguyen, a software engineer specializing in developer tooling, CI/CD infrastructure, and AI-integrated engineering workflows.

UC Berkeley CS grad with 5+ years of experience. Currently at Meta building test infrastructure for Reality Labs. Before that, Dolby Laboratories — shipped the Dolby Atmos Plugin for Unreal Engine with Epic Games.

I'm also into game dev and autonomous coding agents.",
    },
    AskRule {
        triggers: &["what do you do", "your job", "your work", "current role", "where do you work"],
        response: "I'm a Senior Software Engineer at Meta, working on test infrastructure and release tooling for Reality Labs.

My work includes:
• Building AI-powered developer tools (LLM IDE plugins, agent pipelines)
• Designing end-to-end test automation for wearable devices
• CI/CD systems, quality gating, and release qualification",
    },
    AskRule {
        triggers: &["projects", "what have you built", "portfolio", "your work"],
        response: r#"Here are some things I've worked on:

<span class="highlight">AI-Powered Developer Tooling</span> - LLM orchestration framework, multi-agent system, pre-push review gate
<span class="highlight">Pixietown</span> - Multi-agent orchestration visualizer with pixel-art frontend
<span class="highlight">Dolby Atmos for Unreal</span> - Cross-platform audio SDK, shipped with Epic Games
<span class="highlight">ArkAngel</span> - 2D adventure RPG with dialogue system
<span class="highlight">VR Escape Room</span> - Interactive puzzle game for Oculus

Type 'ls projects/' to see more, or 'cat ~/projects/[name]' for details."#,
    },
    AskRule {
        triggers: &["skills", "languages", "tech stack", "technologies", "what can you code"],
        response: r#"<span class="comment"># languages</span>
Python, TypeScript, JavaScript, C++, C#, Java

<span class="comment"># frameworks & tools</span>
FastAPI, Node.js, Playwright, asyncio, NumPy, Pandas

<span class="comment"># infrastructure & ai tooling</span>
Git, GitLab CI/CD, Docker, AWS, Claude Code, LLM tooling, prompt engineering"#,
    },
    AskRule {
        triggers: &["games", "game dev", "video games", "game development"],
        response: r#"I love making games! I've built:

• <span class="highlight">VR Escape Room</span> - Puzzle game for Oculus with minigames
• <span class="highlight">ArkAngel</span> - 2D RPG with branching dialogue
• <span class="highlight">Crowd Simulation</span> - AI pedestrian behavior study

At Dolby, I also worked closely with game studios and Epic Games on audio technology."#,
    },
    AskRule {
        triggers: &["education", "school", "university", "degree", "berkeley"],
        response: r#"I graduated from <span class="highlight">UC Berkeley</span> with a B.S. in Computer Science in 2020.

While there, I was also a teaching assistant and XR/VR course facilitator."#,
    },
    AskRule {
        triggers: &["ai", "llm", "machine learning", "agent", "claude", "prompt"],
        response: "I've been building AI-powered developer tooling since 2025 — hook-based orchestration, multi-agent frameworks, automated code review gates using LLMs, and prompt-engineered iteration loops.

At Meta, I also built an AI agent pipeline that automatically generates team wiki docs from code changes.

This portfolio itself was built with Claude Code, including some of the automation infrastructure running behind it.",
    },
    AskRule {
        triggers: &["contact", "reach you", "hire", "get in touch", "email"],
        response: r#"You can reach me at:

<span class="command">github</span>   github.com/nEmily
<span class="command">linkedin</span> linkedin.com/in/nguyen-emily

Or just type 'github' or 'linkedin' to open directly!"#,
    },
    AskRule {
        triggers: &["teaching", "teach", "educator", "coder school"],
        response: r#"I taught programming at <span class="highlight">the Coder School</span> from 2019-2021, working with students ages 7-16.

I led personalized sessions in Python, Java, Scratch, and C#, and ran week-long camps with 12-14 students each.

I also facilitated a VR development course at UC Berkeley, teaching Unity and C#."#,
    },
    AskRule {
        triggers: &["dolby", "atmos", "audio"],
        response: r#"At <span class="highlight">Dolby Laboratories</span> (2021-2023), I was a Senior Software Engineer on the Games & Audio team.

Key work:
• Released the Dolby Atmos Plugin for Unreal Engine with Epic Games
• Built Python interfaces for the real-time audio C++/C SDK
• Optimized CI/CD pipelines, improving speed by 33%
• Authored game levels for testing and visualization"#,
    },
    AskRule {
        triggers: &["meta", "reality labs", "facebook"],
        response: r#"I joined <span class="highlight">Meta</span> in 2024 as a Senior Software Engineer.

I design test automation pipelines for wearable devices, lead a 3-engineer testing team, and build AI-powered developer tools — including an LLM IDE plugin and an AI agent pipeline that auto-generates wiki docs from code changes.

Also surfaced 72 bugs pre-release and helped define the org's first structured software test strategy."#,
    },
    AskRule {
        triggers: &["hobby", "hobbies", "fun", "free time", "interests"],
        response: "When I'm not coding, I enjoy:
• Playing games (Animal Crossing, Rune Factory, Stardew Valley)
• Game development as a creative outlet
• Exploring local food scenes
• Teaching and mentoring",
    },
];

pub const ASK_FALLBACK: &str = "Hmm, I'm not sure about that. Try asking about:
• my projects or work
• my skills and tech stack
• my education
• how to contact me

Or use 'search [keyword]' to find specific content.";

/// Answer a lowercased question from the rule table
pub fn answer(question: &str) -> &'static str {
    ASK_RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|t| question.contains(t)))
        .map_or(ASK_FALLBACK, |rule| rule.response)
}

/// ask - ask a question (natural language)
pub fn prog_ask(args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    if args.is_empty() {
        return CommandOutput::text(format!(
            "{}\n\nTry: ask what do you do?\n     ask tell me about your projects",
            comment("# ask me anything!")
        ));
    }
    CommandOutput::text(answer(&joined(args).to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    #[test]
    fn test_search_finds_matches() {
        let mut h = Harness::new();
        let out = h.text("search", &["Unreal"]);
        assert!(out.starts_with("<span class=\"comment\"># found "));
        assert!(out.contains("<span class=\"command\">~/projects/dolby-atmos-unreal</span>"));
        assert!(out.contains("<span class=\"command\">~/experience.txt</span>"));
    }

    #[test]
    fn test_search_is_case_insensitive_phrase() {
        let mut h = Harness::new();
        let upper = h.text("search", &["EPIC", "GAMES"]);
        let lower = h.text("search", &["epic", "games"]);
        assert_eq!(upper, lower);
        assert!(upper.contains("# found"));
    }

    #[test]
    fn test_search_no_results() {
        let mut h = Harness::new();
        assert_eq!(
            h.text("search", &["zzzz", "<q>"]),
            "No results for \"zzzz &lt;q&gt;\""
        );
        assert_eq!(h.text("search", &[]), "search: missing keyword");
    }

    #[test]
    fn test_ask_rules_in_order() {
        assert!(answer("who are you?").starts_with("I'm Emily Nguyen"));
        // "your work" is claimed by the earlier rule
        assert!(answer("what is your work like").starts_with("I'm a Senior Software Engineer"));
        assert!(answer("what projects?").starts_with("Here are some things"));
        assert_eq!(answer("xyzzy"), ASK_FALLBACK);
    }

    #[test]
    fn test_ask_lowercases_question() {
        let mut h = Harness::new();
        let out = h.text("ask", &["Where", "did", "you", "go", "to", "SCHOOL?"]);
        assert!(out.contains("UC Berkeley"));
    }

    #[test]
    fn test_ask_without_question() {
        let mut h = Harness::new();
        let out = h.text("ask", &[]);
        assert!(out.contains("# ask me anything!"));
        assert!(out.contains("Try: ask what do you do?"));
    }
}
