//! Reading-level catalog: the fixed system-prompt fragments that steer a
//! provider toward a target Lexile band.

use std::collections::HashMap;

use serde::Serialize;

/// Framing text prepended to every rewrite instruction. The trailing space
/// is deliberate so the level instruction concatenates cleanly.
pub const LEXILE_PREAMBLE: &str = "A Lexile measure is defined as the numeric representation of an individual's reading ability or a text's readability (or difficulty), followed by an 'L' (Lexile). Lexile measures range from below 200L for beginning readers and text to 2000L for advanced readers. ";

/// One target reading level.
#[derive(Debug, Clone, Serialize)]
pub struct LevelSpec {
    pub code: &'static str,
    pub lexile: &'static str,
    pub ages: &'static str,
    pub grades: &'static str,
    #[serde(skip)]
    pub instruction: &'static str,
}

/// The six supported levels, easiest first.
pub static LEVELS: &[LevelSpec] = &[
    LevelSpec {
        code: "L1",
        lexile: "190L",
        ages: "6-8",
        grades: "1-2",
        instruction: "Rewrite the given text to Lexile text measure of 190L such that a student between 6-8 years old and in grade 1-2 can understand",
    },
    LevelSpec {
        code: "L2",
        lexile: "520L",
        ages: "8-10",
        grades: "3-4",
        instruction: "Rewrite the given text to Lexile text measure of 520L such that a student between 8-10 years old and in grade 3-4 can understand.",
    },
    LevelSpec {
        code: "L3",
        lexile: "830L",
        ages: "10-12",
        grades: "5-6",
        instruction: "Rewrite the given text to Lexile text measure of 830L such that a student between 10-12 years old and in grade 5-6 can understand.",
    },
    LevelSpec {
        code: "L4",
        lexile: "970L",
        ages: "12-14",
        grades: "7-8",
        instruction: "Rewrite the given text to Lexile text measure of 970L such that a student between 12-14 years old and in grade 7-8 can understand.",
    },
    LevelSpec {
        code: "L5",
        lexile: "1150L",
        ages: "14-16",
        grades: "9-10",
        instruction: "Rewrite the given text to Lexile text measure of 1150L such that a student between 14-16 years old and in grade 9-10 can understand.",
    },
    LevelSpec {
        code: "L6",
        lexile: "1185L",
        ages: "16-18",
        grades: "11-12",
        instruction: "Rewrite the given text to Lexile text measure of 1185L such that a student between 16-18 years old and in grade 11-12 can understand.",
    },
];

/// Read-only lookup from level code to instruction, built once at startup
/// and shared across requests.
pub struct PromptCatalog {
    entries: HashMap<&'static str, &'static str>,
}

impl PromptCatalog {
    /// The stock catalog over [`LEVELS`].
    pub fn standard() -> Self {
        let entries = LEVELS
            .iter()
            .map(|level| (level.code, level.instruction))
            .collect();
        Self { entries }
    }

    /// Instruction for a level code. Unknown codes resolve to the empty
    /// instruction rather than an error, leaving just the preamble.
    pub fn instruction(&self, code: &str) -> &'static str {
        self.entries.get(code).copied().unwrap_or("")
    }

    /// Full system prompt for a level code: preamble plus instruction.
    pub fn system_prompt(&self, code: &str) -> String {
        format!("{}{}", LEXILE_PREAMBLE, self.instruction(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_covers_six_distinct_levels() {
        let catalog = PromptCatalog::standard();

        assert_eq!(LEVELS.len(), 6);

        let codes: HashSet<_> = LEVELS.iter().map(|level| level.code).collect();
        assert_eq!(codes.len(), 6);

        let instructions: HashSet<_> =
            LEVELS.iter().map(|level| catalog.instruction(level.code)).collect();
        assert_eq!(instructions.len(), 6);
    }

    #[test]
    fn instructions_name_their_lexile_target() {
        let catalog = PromptCatalog::standard();
        for level in LEVELS {
            let instruction = catalog.instruction(level.code);
            assert!(
                instruction.contains(level.lexile),
                "{} instruction should mention {}",
                level.code,
                level.lexile
            );
        }
    }

    #[test]
    fn system_prompt_prepends_preamble() {
        let catalog = PromptCatalog::standard();
        let prompt = catalog.system_prompt("L2");

        assert!(prompt.starts_with(LEXILE_PREAMBLE));
        assert!(prompt.ends_with("can understand."));
        assert!(prompt.contains("520L"));
    }

    #[test]
    fn unknown_code_degrades_to_bare_preamble() {
        let catalog = PromptCatalog::standard();

        assert_eq!(catalog.instruction("L99"), "");
        assert_eq!(catalog.system_prompt("L99"), LEXILE_PREAMBLE);
        assert_eq!(catalog.system_prompt(""), LEXILE_PREAMBLE);
    }
}
