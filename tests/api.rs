use anyhow::Result;
use regexpy::{Regex, RegexBuilder};

#[test]
fn test_compile_then_match() -> Result<()> {
    crate::init_logging();
    let re = Regex::new("a*(b|c)")?;
    assert!(re.matches("aab"));
    assert!(!re.matches("aabb"));
    Ok(())
}

#[test]
fn test_pattern_round_trips_through_display() -> Result<()> {
    let re: Regex = r"(\d+)\.(\d+)".parse()?;
    assert_eq!(re.as_str(), r"(\d+)\.(\d+)");
    assert_eq!(re.to_string(), re.as_str());
    assert_eq!(format!("{:?}", re), r#"Regex("(\\d+)\\.(\\d+)")"#);
    Ok(())
}

#[test]
fn test_group_count_excludes_whole_match() -> Result<()> {
    assert_eq!(Regex::new("abc")?.group_count(), 0);
    assert_eq!(Regex::new("(a)(b(c))")?.group_count(), 3);
    Ok(())
}

#[test]
fn test_matcher_is_reusable() -> Result<()> {
    let re = Regex::new(r"(a|b)\1")?;
    let mut m = re.matcher();
    for _ in 0..3 {
        assert!(m.matches("aa"));
        assert!(!m.matches("ab"));
        assert!(m.matches("bb"));
    }
    Ok(())
}

#[test]
fn test_cloned_regex_shares_graph() -> Result<()> {
    let re = Regex::new("x{2,}")?;
    let copy = re.clone();
    assert!(std::ptr::eq(re.graph(), copy.graph()));
    assert!(copy.matches("xxx"));
    Ok(())
}

#[test]
fn test_builder_limits() -> Result<()> {
    assert!(RegexBuilder::new("((a))").nest_limit(2).build().is_ok());
    assert!(RegexBuilder::new("(((a)))").nest_limit(2).build().is_err());
    assert!(RegexBuilder::new("abc").size_limit(3).build().is_err());
    let re = RegexBuilder::new("abc").size_limit(5).build()?;
    assert!(re.matches("abc"));
    Ok(())
}

#[test]
fn test_graph_is_inspectable() -> Result<()> {
    let re = Regex::new("a|b")?;
    let graph = re.graph();
    assert_eq!(graph.node(graph.start()).next().len(), 2);
    let printed = graph.to_string();
    assert!(printed.contains("TERMINAL"), "{}", printed);
    Ok(())
}
