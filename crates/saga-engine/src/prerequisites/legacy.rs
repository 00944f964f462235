//! Legacy free-text prerequisite adapter.
//!
//! Splits rules text into clauses and maps each recognized clause onto a
//! `Condition`. Recognized forms:
//! - ability scores: `Dex 13`, `Strength 15+`
//! - base attack bonus: `Base attack bonus +5`, `BAB +2`
//! - level: `Level 7`, `Character level 7`, `7th-level`
//! - skills: `Trained in Stealth`
//! - named abilities: `Requires Weapon Focus` (feat or talent)
//!
//! Anything else lands in `unparsed` and is treated as met by the evaluator.

use std::sync::LazyLock;

use regex::Regex;
use saga_core::prerequisite::{Condition, Expression};
use saga_core::snapshot::Ability;

static ABILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(str|dex|con|int|wis|cha)[a-z]*\s+(\d{1,2})\s*\+?$").unwrap()
});

static BAB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:base\s+attack\s+bonus|bab)\s*\+?\s*(\d{1,2})$").unwrap()
});

static LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:minimum|character|heroic)\s+)?level\s+(\d{1,2})(?:\s*\+)?$").unwrap()
});

static ORDINAL_LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)[\s-]+level$").unwrap()
});

static TRAINED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^trained\s+in\s+(?:the\s+)?(.+)$").unwrap());

static REQUIRES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^requires?\s+(?:the\s+)?(.+)$").unwrap());

/// Result of parsing one legacy prerequisite string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyParse {
    /// ALL-of the recognized clauses.
    pub expression: Expression,
    /// Clauses that matched no pattern.
    pub unparsed: Vec<String>,
}

/// Parse a legacy prerequisite string.
pub fn parse_legacy(text: &str) -> LegacyParse {
    let mut items = Vec::new();
    let mut unparsed = Vec::new();

    for clause in split_clauses(text) {
        match parse_clause(&clause) {
            Some(expr) => items.push(expr),
            None => unparsed.push(clause),
        }
    }

    LegacyParse {
        expression: Expression::all(items),
        unparsed,
    }
}

/// Split on `,` and `;` outside parentheses, trimming a trailing period.
fn split_clauses(text: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in text.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' | ';' if depth == 0 => {
                push_clause(&mut clauses, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_clause(&mut clauses, &current);
    clauses
}

fn push_clause(clauses: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim().trim_end_matches('.').trim();
    if !trimmed.is_empty() {
        clauses.push(trimmed.to_string());
    }
}

fn parse_clause(clause: &str) -> Option<Expression> {
    if let Some(caps) = ABILITY_RE.captures(clause) {
        let ability = Ability::parse(&caps[1])?;
        let min = caps[2].parse::<u8>().ok()?;
        return Some(Expression::attribute(ability, min));
    }
    if let Some(caps) = BAB_RE.captures(clause) {
        let min = caps[1].parse::<i32>().ok()?;
        return Some(Expression::bab(min));
    }
    if let Some(caps) = LEVEL_RE
        .captures(clause)
        .or_else(|| ORDINAL_LEVEL_RE.captures(clause))
    {
        let min = caps[1].parse::<u32>().ok()?;
        return Some(Expression::level(min));
    }
    if let Some(caps) = TRAINED_RE.captures(clause) {
        return Some(Expression::trained(caps[1].trim()));
    }
    if let Some(caps) = REQUIRES_RE.captures(clause) {
        let name = caps[1].trim();
        return Some(Expression::any(vec![
            Expression::cond(Condition::Feat {
                name: name.to_string(),
            }),
            Expression::cond(Condition::Talent {
                name: name.to_string(),
            }),
        ]));
    }
    None
}
