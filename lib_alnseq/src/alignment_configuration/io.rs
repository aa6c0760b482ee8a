use std::io::Read;

use log::trace;
use nom::{
    IResult, Parser,
    character::complete::{char, digit1, one_of, satisfy, space1},
    combinator::{opt, recognize},
    sequence::pair,
};

use super::{AlignmentConfiguration, MATRIX_DIM, base_index};
use crate::error::{Error, Result};

impl AlignmentConfiguration {
    /// Loads substitution scores from a matrix file.
    ///
    /// The format is line oriented: `// comment` lines (the slashes must be
    /// the first bytes of the line), blank lines, and
    /// `<base> <base> <signed score>` entries. An entry is inserted for the
    /// pair and mirrored onto the transposed pair unless the transpose was
    /// itself loaded from the file.
    ///
    /// The matrix is cleared before loading and entries are applied left to
    /// right; on a malformed line the error carries the byte offset of the
    /// first offending character and the entries parsed so far stay in
    /// place.
    pub fn load_scores(&mut self, mut reader: impl Read) -> Result<()> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.load_scores_from_str(&text)
    }

    /// [`AlignmentConfiguration::load_scores`] over an in-memory string.
    pub fn load_scores_from_str(&mut self, text: &str) -> Result<()> {
        self.clear_scores();
        let mut explicit = vec![false; MATRIX_DIM * MATRIX_DIM];
        let mut entries = 0usize;

        each_entry(text, parse_score, |qry, reff, score| {
            let cell = base_index(qry) * MATRIX_DIM + base_index(reff);
            let mirror = base_index(reff) * MATRIX_DIM + base_index(qry);
            self.substitution_scores[cell] = score;
            explicit[cell] = true;
            if !explicit[mirror] {
                self.substitution_scores[mirror] = score;
            }
            entries += 1;
        })
        .map_err(|offset| Error::ScoreFileFormat { offset })?;

        trace!("Loaded {entries} substitution score entries");
        Ok(())
    }

    /// Loads the match/snp bit matrix from a file of the same shape as the
    /// score files, with `0` or `1` as the third token. Same error and
    /// mirroring behaviour as [`AlignmentConfiguration::load_scores`].
    pub fn load_matches(&mut self, mut reader: impl Read) -> Result<()> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.load_matches_from_str(&text)
    }

    /// [`AlignmentConfiguration::load_matches`] over an in-memory string.
    pub fn load_matches_from_str(&mut self, text: &str) -> Result<()> {
        self.clear_matches();
        let mut explicit = vec![false; MATRIX_DIM * MATRIX_DIM];
        let mut entries = 0usize;

        each_entry(text, parse_match, |qry, reff, is_match| {
            let cell = base_index(qry) * MATRIX_DIM + base_index(reff);
            let mirror = base_index(reff) * MATRIX_DIM + base_index(qry);
            self.match_flags[cell] = is_match;
            explicit[cell] = true;
            if !explicit[mirror] {
                self.match_flags[mirror] = is_match;
            }
            entries += 1;
        })
        .map_err(|offset| Error::MatchFileFormat { offset })?;

        trace!("Loaded {entries} match matrix entries");
        Ok(())
    }
}

/// Walks the line-oriented matrix format, calling `apply` for every data
/// entry. On a malformed line returns the byte offset where parsing failed.
fn each_entry<T>(
    text: &str,
    parse_value: fn(&str) -> IResult<&str, T>,
    mut apply: impl FnMut(u8, u8, T),
) -> std::result::Result<(), usize> {
    let total = text.len();
    let mut input = text;

    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("//") {
            input = skip_line(rest);
            continue;
        }
        if let Some(rest) = input.strip_prefix('\n') {
            input = rest;
            continue;
        }
        if let Some(rest) = input.strip_prefix("\r\n") {
            input = rest;
            continue;
        }

        match parse_entry(input, parse_value) {
            Ok((rest, (qry, reff, value))) => {
                apply(qry, reff, value);
                input = skip_line(rest);
            }
            Err(nom::Err::Error(failure) | nom::Err::Failure(failure)) => {
                return Err(total - failure.input.len());
            }
            Err(nom::Err::Incomplete(_)) => return Err(total),
        }
    }

    Ok(())
}

/// `<base> <base> <value>`; anything after the value up to the line break is
/// ignored.
fn parse_entry<T>(
    input: &str,
    parse_value: fn(&str) -> IResult<&str, T>,
) -> IResult<&str, (u8, u8, T)> {
    let (input, qry) = satisfy(|c| c.is_ascii_alphabetic())(input)?;
    let (input, _) = space1(input)?;
    let (input, reff) = satisfy(|c| c.is_ascii_alphabetic())(input)?;
    let (input, _) = space1(input)?;
    let (input, value) = parse_value(input)?;
    Ok((input, (qry as u8, reff as u8, value)))
}

fn parse_score(input: &str) -> IResult<&str, i32> {
    let (rest, text) = recognize(pair(opt(char('-')), digit1)).parse(input)?;
    match text.parse::<i32>() {
        Ok(score) => Ok((rest, score)),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        ))),
    }
}

fn parse_match(input: &str) -> IResult<&str, bool> {
    let (rest, flag) = one_of("01")(input)?;
    Ok((rest, flag == '1'))
}

fn skip_line(input: &str) -> &str {
    match input.find('\n') {
        Some(line_break) => &input[line_break + 1..],
        None => "",
    }
}
