use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use regexpy::Regex;

const ATOMS: &[&str] = &["a", "b", "[1]", ".", "[ab]", "[^a]", r"\d", r"\S", "^", "$"];
const QUANTIFIERS: &[&str] = &["?", "*", "+", "{2}", "{0,2}", "{1,}"];

/// A small, always valid pattern over the alphabet `a b 1`. A bare `1`
/// would run into a preceding backreference, so it only appears in a class.
#[derive(Clone, Debug)]
struct Pattern(String);

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Pattern {
        let mut out = String::new();
        let mut groups = 0;
        push_alternation(g, &mut out, &mut groups, 2);
        Pattern(out)
    }
}

fn push_alternation(g: &mut Gen, out: &mut String, groups: &mut usize, depth: u32) {
    let branches = 1 + usize::arbitrary(g) % 2;
    for i in 0..branches {
        if i > 0 {
            out.push('|');
        }
        for _ in 0..usize::arbitrary(g) % 4 {
            push_piece(g, out, groups, depth);
        }
    }
}

fn push_piece(g: &mut Gen, out: &mut String, groups: &mut usize, depth: u32) {
    let atom = g.choose(ATOMS).copied().unwrap_or("a");
    let quantifiable = match usize::arbitrary(g) % 6 {
        0 if depth > 0 => {
            *groups += 1;
            out.push('(');
            push_alternation(g, out, groups, depth - 1);
            out.push(')');
            true
        }
        1 if *groups > 0 => {
            out.push_str(&format!("\\{}", 1 + usize::arbitrary(g) % *groups));
            true
        }
        _ => {
            out.push_str(atom);
            atom != "^" && atom != "$"
        }
    };
    if quantifiable && bool::arbitrary(g) {
        out.push_str(g.choose(QUANTIFIERS).copied().unwrap_or("?"));
    }
}

/// A short subject over the same alphabet as [`Pattern`].
#[derive(Clone, Debug)]
struct Subject(String);

impl Arbitrary for Subject {
    fn arbitrary(g: &mut Gen) -> Subject {
        let len = usize::arbitrary(g) % 7;
        Subject((0..len).map(|_| *g.choose(&['a', 'b', '1']).unwrap_or(&'a')).collect())
    }
}

fn escape(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        if r"\.[]{}()|?*+^$".contains(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[test]
fn test_generated_patterns_compile() {
    fn prop(p: Pattern) -> bool {
        Regex::new(&p.0).is_ok()
    }
    QuickCheck::new().quickcheck(prop as fn(Pattern) -> bool);
}

#[test]
fn test_matching_is_deterministic() {
    fn prop(p: Pattern, s: Subject) -> TestResult {
        let re = match Regex::new(&p.0) {
            Ok(re) => re,
            Err(_) => return TestResult::discard(),
        };
        let first = re.matches(&s.0);
        TestResult::from_bool((0..3).all(|_| re.matches(&s.0) == first))
    }
    QuickCheck::new().quickcheck(prop as fn(Pattern, Subject) -> TestResult);
}

#[test]
fn test_reused_matcher_agrees_with_fresh_ones() {
    fn prop(p: Pattern, subjects: Vec<Subject>) -> TestResult {
        let re = match Regex::new(&p.0) {
            Ok(re) => re,
            Err(_) => return TestResult::discard(),
        };
        let mut reused = re.matcher();
        let same = subjects
            .iter()
            .all(|s| reused.matches(&s.0) == re.matcher().matches(&s.0));
        TestResult::from_bool(same)
    }
    QuickCheck::new().quickcheck(prop as fn(Pattern, Vec<Subject>) -> TestResult);
}

#[test]
fn test_captured_group_zero_is_the_subject() {
    fn prop(p: Pattern, s: Subject) -> TestResult {
        let re = match Regex::new(&p.0) {
            Ok(re) => re,
            Err(_) => return TestResult::discard(),
        };
        match re.captures(&s.0) {
            Some(caps) => TestResult::from_bool(caps.get(0) == Some(s.0.as_str())),
            None => TestResult::from_bool(!re.matches(&s.0)),
        }
    }
    QuickCheck::new().quickcheck(prop as fn(Pattern, Subject) -> TestResult);
}

#[test]
fn test_escaped_literal_is_string_equality() {
    fn prop(literal: String, other: String) -> bool {
        let re = Regex::new(&escape(&literal)).unwrap();
        re.matches(&literal) && re.matches(&other) == (literal == other)
    }
    QuickCheck::new().quickcheck(prop as fn(String, String) -> bool);
}
