#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadmeSignals {
    pub has_readme: bool,
    pub heading_count: usize,
    pub words: usize,
    pub sections: Vec<String>,
    pub intro_has_what_who_platform: bool,
}

/// Intro lines longer than this count as substantive on their own.
const SUBSTANTIVE_INTRO_CHARS: usize = 80;

pub fn detect_readme(text: Option<&str>) -> ReadmeSignals {
    let Some(text) = text else {
        return ReadmeSignals::default();
    };

    let mut signals = ReadmeSignals {
        has_readme: !text.trim().is_empty(),
        ..ReadmeSignals::default()
    };

    for line in text.lines() {
        signals.words += line.split_whitespace().count();

        let trimmed = line.trim();
        if trimmed.starts_with("# ") || trimmed.starts_with("## ") {
            signals.heading_count += 1;
            signals.sections.push(
                trimmed
                    .trim_start_matches(|c| c == '#' || c == ' ')
                    .trim()
                    .to_string(),
            );
        }
    }

    // Only H1/H2 count as headings, but any `#` line is skipped when looking
    // for the opening paragraph.
    let intro = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or_default();
    let lowered = intro.to_lowercase();
    signals.intro_has_what_who_platform = lowered.contains("what")
        || lowered.contains("who")
        || intro.chars().count() > SUBSTANTIVE_INTRO_CHARS;

    signals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_readme_yields_empty_signals() {
        let signals = detect_readme(None);
        assert!(!signals.has_readme);
        assert_eq!(signals.words, 0);
        assert_eq!(signals.heading_count, 0);
        assert!(signals.sections.is_empty());
        assert!(!signals.intro_has_what_who_platform);
    }

    #[test]
    fn whitespace_only_readme_is_not_a_readme() {
        let signals = detect_readme(Some("  \n\t\n"));
        assert!(!signals.has_readme);
        assert_eq!(signals.words, 0);
    }

    #[test]
    fn counts_h1_and_h2_but_not_deeper_headings() {
        let text = "# Title\n\nIntro text here.\n\n## Install\n\n### Details\n  ## Usage  \n";
        let signals = detect_readme(Some(text));
        assert!(signals.has_readme);
        assert_eq!(signals.heading_count, 3);
        assert_eq!(signals.sections, vec!["Title", "Install", "Usage"]);
    }

    #[test]
    fn words_include_heading_lines() {
        let signals = detect_readme(Some("# My Repo\n\nThis is the intro."));
        assert_eq!(signals.words, 7);
    }

    #[test]
    fn heading_without_space_is_not_counted() {
        let signals = detect_readme(Some("#Title\n##Also not\n"));
        assert_eq!(signals.heading_count, 0);
    }

    #[test]
    fn intro_matches_what_or_who_case_insensitively() {
        let signals = detect_readme(Some("# Tool\n\nWHAT this does, briefly."));
        assert!(signals.intro_has_what_who_platform);

        let signals = detect_readme(Some("# Tool\n### Sub\nBuilt for those WHO ship."));
        assert!(signals.intro_has_what_who_platform);
    }

    #[test]
    fn long_intro_counts_without_keywords() {
        let intro = "x".repeat(81);
        let signals = detect_readme(Some(&format!("# Tool\n\n{intro}\n")));
        assert!(signals.intro_has_what_who_platform);

        let intro = "x".repeat(80);
        let signals = detect_readme(Some(&format!("# Tool\n\n{intro}\n")));
        assert!(!signals.intro_has_what_who_platform);
    }

    #[test]
    fn only_first_paragraph_line_is_considered() {
        let signals = detect_readme(Some("# Tool\n\nShort line.\nWhat comes next.\n"));
        assert!(!signals.intro_has_what_who_platform);
    }

    #[test]
    fn headings_only_readme_has_no_intro() {
        let signals = detect_readme(Some("# One\n## Two\n"));
        assert!(signals.has_readme);
        assert!(!signals.intro_has_what_who_platform);
    }
}
