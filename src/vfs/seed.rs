//! Seed content for the portfolio filesystem

use super::FsNode;

const ABOUT: &str = r#"<span class="comment"># hello world</span>

I'm <span class="highlight">Emily Nguyen</span>, a UC Berkeley CS grad with 5+ years
building CI/CD systems, test frameworks, and LLM-powered automation.
Currently at Meta working on test infrastructure for Reality Labs.

Building autonomous coding agents and AI-integrated dev tools."#;

const EXPERIENCE: &str = r#"<span class="comment"># work experience</span>

<span class="highlight">Meta</span> — Senior Software Engineer, Reality Labs  <span class="comment">2022–present</span>
  Test infrastructure for wearable devices. AI-powered developer tooling:
  LLM IDE plugins, agent pipeline for auto-generating wiki docs from code.
  Led 3-engineer testing team; surfaced 72 bugs pre-release.
  Tags: Python, CI/CD, LLM tooling, Test Infrastructure

<span class="highlight">Dolby Laboratories</span> — Senior Software Engineer  <span class="comment">2021–2022</span>
  Shipped Dolby Atmos Plugin for Unreal Engine with Epic Games.
  Python interfaces for real-time audio C++/C SDK.
  Optimized CI/CD pipelines — 33% faster builds.
  Tags: Python, C++, Unreal Engine, CI/CD

<span class="highlight">UC Berkeley</span> — B.S. Computer Science  <span class="comment">2017–2021</span>
  TA and VR/XR course facilitator. Taught Unity + C# to students.

Open to new opportunities → linkedin.com/in/nguyen-emily"#;

const CONTACT: &str = "# let's connect

github:   github.com/nEmily
linkedin: linkedin.com/in/nguyen-emily";

const RESUME: &str = "[Binary file - use \"open resume.pdf\" to download]";

const AI_TOOLING: &str = "AI-Powered Developer Tooling
LLM tool-use automation system for autonomous coding agents
Hook-based orchestration, real-time terminal status indicators
Dual-agent pre-push code review gate and prompt-engineered iteration loops
Multi-agent framework with persistent cross-session memory

Tags: TypeScript, JavaScript, Claude Code, LLM, Orchestration";

const PIXIETOWN: &str = "Pixietown
Multi-agent orchestration visualizer with real-time state management
Python bridge polls task state files and broadcasts over WebSocket
Pixel-art frontend renders live orchestration status

Tags: Python, JavaScript, WebSocket, Multi-agent";

const DOLBY_ATMOS: &str = "Dolby Atmos Plugin for Unreal Engine
Cross-platform real-time audio processing SDK
Released in collaboration with Epic Games

Tags: C++, Unreal, Audio
Link: https://news.dolby.com/en-WW/227541-dolby-releases-native-dolby-vision-and-dolby-atmos-plug-ins-for-unreal-engine";

const ARKANGEL: &str = "ArkAngel
2D top-down adventure RPG
Features dialogue branching and minigames

Tags: Unity, C#, Game Dev";

const VR_ESCAPE_ROOM: &str = "VR Escape Room
Interactive escape room with puzzles and minigames
Built for Oculus VR

Tags: Unity, C#, VR";

/// Every node of the seed tree, root first
pub fn nodes() -> Vec<FsNode> {
    vec![
        FsNode::dir(
            "~",
            &[
                "about.txt",
                "experience.txt",
                "skills/",
                "projects/",
                "games/",
                "contact.txt",
                "resume.pdf",
            ],
        ),
        FsNode::file("~/about.txt", ABOUT),
        FsNode::dir("~/skills", &["languages/", "frameworks/", "tools/"]),
        FsNode::dir(
            "~/skills/languages",
            &["python", "typescript", "javascript", "cpp", "csharp", "java"],
        ),
        FsNode::dir(
            "~/skills/frameworks",
            &["fastapi", "nodejs", "playwright", "asyncio", "numpy", "pandas"],
        ),
        FsNode::dir(
            "~/skills/tools",
            &["git", "gitlab-ci", "docker", "aws", "claude-code", "llm-tooling"],
        ),
        FsNode::dir(
            "~/projects",
            &[
                "ai-powered-dev-tooling/",
                "pixietown/",
                "dolby-atmos-unreal/",
                "arkangel/",
                "vr-escape-room/",
            ],
        ),
        FsNode::dir("~/projects/ai-powered-dev-tooling", &[]).with_blurb(AI_TOOLING),
        FsNode::dir("~/projects/pixietown", &[]).with_blurb(PIXIETOWN),
        FsNode::dir("~/projects/dolby-atmos-unreal", &[]).with_blurb(DOLBY_ATMOS),
        FsNode::dir("~/projects/arkangel", &[]).with_blurb(ARKANGEL),
        FsNode::dir("~/projects/vr-escape-room", &[]).with_blurb(VR_ESCAPE_ROOM),
        FsNode::dir("~/games", &["arkangel/", "vr-escape-room/", "crowd-sim/"]),
        FsNode::file("~/contact.txt", CONTACT),
        FsNode::file("~/experience.txt", EXPERIENCE),
        FsNode::file("~/resume.pdf", RESUME),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::VirtualFs;

    #[test]
    fn test_root_children_listed_in_display_order() {
        let fs = VirtualFs::seeded();
        let root = fs.lookup("~").expect("root");
        assert_eq!(root.children()[0], "about.txt");
        assert_eq!(root.children()[2], "skills/");
        assert_eq!(root.children().len(), 7);
    }

    #[test]
    fn test_listed_subdirectories_exist() {
        let fs = VirtualFs::seeded();
        for dir in ["~/skills", "~/skills/tools", "~/projects", "~/games"] {
            assert!(fs.directory(dir).is_ok(), "{dir}");
        }
    }

    #[test]
    fn test_project_directories_carry_blurbs() {
        let fs = VirtualFs::seeded();
        let node = fs.lookup("~/projects/dolby-atmos-unreal").expect("dolby");
        assert!(node.is_dir());
        assert!(node.text().is_some_and(|t| t.contains("Link: https://")));
    }

    #[test]
    fn test_no_duplicate_paths() {
        let nodes = nodes();
        let fs = VirtualFs::seeded();
        assert_eq!(fs.len(), nodes.len());
    }
}
