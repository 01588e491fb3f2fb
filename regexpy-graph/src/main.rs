use std::sync::Arc;

use regexpy_graph::{Compiler, Graph, Matcher};

const USAGE: &str = "usage: regexpy-graph <pattern> [subject]...";

fn main() {
    let mut args = std::env::args().skip(1);
    let pattern = match args.next() {
        Some(pattern) if pattern != "-h" && pattern != "--help" => pattern,
        Some(_) => {
            println!("{}", USAGE);
            return;
        }
        None => {
            demo();
            return;
        }
    };
    let subjects: Vec<String> = args.collect();

    let graph = match Compiler::new().compile(&pattern) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };
    print_graph(&pattern, &graph);

    let mut matcher = Matcher::new(Arc::new(graph));
    let mut all_matched = true;
    for subject in &subjects {
        all_matched &= print_match(&mut matcher, subject);
    }
    if !all_matched {
        std::process::exit(1);
    }
}

/// Print the graphs of a few representative patterns.
fn demo() {
    println!("Backtracking Node Graph - Structure Demo");
    println!("========================================");

    let patterns = [
        "ab",
        "a*",
        "a+",
        "a?",
        "a|b",
        "[^a-c]",
        "[--]",
        "a{2,3}",
        "(a|b)\\1",
        "(b$|c)a*",
        "()*",
        "(a{2}b){2,}",
        "a{3,2}",
    ];
    for pattern in patterns {
        match Compiler::new().compile(pattern) {
            Ok(graph) => print_graph(pattern, &graph),
            Err(err) => println!("\n=== Pattern: '{}' ===\n{}", pattern, err),
        }
    }
}

fn print_graph(pattern: &str, graph: &Graph) {
    println!("\n=== Pattern: '{}' ===", pattern);
    print!("{}", graph);
}

fn print_match(matcher: &mut Matcher, subject: &str) -> bool {
    let matched = matcher.matches(subject);
    println!("\n{:?}: {}", subject, if matched { "match" } else { "no match" });
    if matched {
        for id in 0..=matcher.group_count() {
            match matcher.group(id).and_then(|span| span.range()) {
                Some(range) => {
                    let text: String = subject.chars().skip(range.start).take(range.len()).collect();
                    println!("  group {}: {:?} {:?}", id, range, text);
                }
                None => println!("  group {}: unset", id),
            }
        }
    }
    matched
}
