//! Output formats for the `parse` command.

use std::io::{self, Write};

use clap::ValueEnum;
use serde_json::{json, Value};
use unitconf_parser::{Line, Section, Unit};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Writes one block per section, each line indented under its header.
pub fn write_text<W: Write>(out: &mut W, unit: &Unit<Line>) -> io::Result<()> {
    if let Some(top_level) = unit.top_level() {
        writeln!(out, "[top-level]")?;
        write_lines(out, top_level)?;
    }
    for (index, section) in unit.sections().iter().enumerate() {
        writeln!(out, "[section {}]", index + 1)?;
        write_lines(out, section)?;
    }
    Ok(())
}

fn write_lines<W: Write>(out: &mut W, section: &Section<Line>) -> io::Result<()> {
    for line in section {
        writeln!(out, "    {}", line.join(" "))?;
    }
    Ok(())
}

pub fn to_json(unit: &Unit<Line>) -> Value {
    let sections: Vec<&[Line]> = unit.sections().iter().map(Section::lines).collect();
    json!({
        "top_level": unit.top_level().map(Section::lines),
        "sections": sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unit() -> Unit<Line> {
        let line = |fields: &[&str]| fields.iter().map(|f| f.to_string()).collect::<Line>();
        let mut unit = Unit::new();
        unit.push(Section::from(vec![line(&["version", "1"])]));
        unit.push(Section::from(vec![line(&["service", "a"]), line(&["class", "\"x y\""])]));
        unit
    }

    #[test]
    fn test_text_output() {
        let mut out = Vec::new();
        write_text(&mut out, &unit()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[top-level]\n    version 1\n[section 1]\n    service a\n    class \"x y\"\n"
        );
    }

    #[test]
    fn test_json_output() {
        assert_eq!(
            to_json(&unit()),
            json!({
                "top_level": [["version", "1"]],
                "sections": [[["service", "a"], ["class", "\"x y\""]]],
            })
        );
    }

    #[test]
    fn test_empty_unit() {
        let unit = Unit::new();
        assert_eq!(to_json(&unit), json!({ "top_level": null, "sections": [] }));
        let mut out = Vec::new();
        write_text(&mut out, &unit).unwrap();
        assert!(out.is_empty());
    }
}
