use anyhow::{Context, Result, anyhow, bail};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::space1,
    combinator::{map, map_opt},
    sequence::{pair, preceded},
};
use std::fs;
use std::path::Path;

use qmem_core::code::CodeSpec;
use qmem_core::pauli::PauliString;

enum Directive<'a> {
    Name(&'a str),
    Stabilizer(PauliString),
    Logical(PauliString),
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)
}

fn pauli_string(input: &str) -> IResult<&str, PauliString> {
    map_opt(
        take_while1(|c| matches!(c, 'I' | 'X' | 'Y' | 'Z')),
        PauliString::parse,
    )(input)
}

fn directive(input: &str) -> IResult<&str, Directive<'_>> {
    alt((
        map(
            preceded(pair(tag("code"), space1), identifier),
            Directive::Name,
        ),
        map(
            preceded(pair(tag("stabilizer"), space1), pauli_string),
            Directive::Stabilizer,
        ),
        map(
            preceded(pair(tag("logical"), space1), pauli_string),
            Directive::Logical,
        ),
    ))(input)
}

/// Parses a code description and runs it through the core validator.
pub fn parse_code(text: &str) -> Result<CodeSpec> {
    let mut name = None;
    let mut generators = Vec::new();
    let mut logicals = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (rest, parsed) = directive(line)
            .map_err(|_| anyhow!("line {}: unrecognized directive {:?}", idx + 1, line))?;
        if !rest.trim().is_empty() {
            bail!("line {}: trailing input {:?}", idx + 1, rest);
        }
        match parsed {
            Directive::Name(n) => name = Some(n.to_string()),
            Directive::Stabilizer(s) => generators.push(s),
            Directive::Logical(l) => logicals.push(l),
        }
    }

    let spec = CodeSpec::new(name.as_deref().unwrap_or("unnamed"), generators, logicals)?;
    Ok(spec)
}

/// Loads and parses a code description file.
pub fn load_code_file<P: AsRef<Path>>(path: P) -> Result<CodeSpec> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read code file {}", path.as_ref().display()))?;
    parse_code(&text)
        .with_context(|| format!("Failed to parse code file {}", path.as_ref().display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmem_core::codes;

    #[test]
    fn parses_the_five_qubit_description() {
        let text = "\
# the [[5,1,3]] code
code five_qubit

stabilizer XZZXI
stabilizer IXZZX
stabilizer XIXZZ
stabilizer ZXIXZ
logical XXXXX
";
        let spec = parse_code(text).unwrap();
        assert_eq!(spec, codes::five_qubit());
    }

    #[test]
    fn rejects_unknown_directives_and_bad_letters() {
        assert!(parse_code("measure XZZXI\n").is_err());
        assert!(parse_code("stabilizer XQZXI\n").is_err());
        assert!(parse_code("stabilizer XZZXI extra\n").is_err());
    }

    #[test]
    fn inconsistent_algebra_is_rejected_after_parsing() {
        let err = parse_code("stabilizer ZII\nstabilizer XII\n").unwrap_err();
        assert!(err.to_string().contains("anticommute"));
    }
}
