//! Reader for KNP `-tab` output
//!
//! The tabular format is line oriented:
//!
//! ```text
//! # S-ID:1 KNP:5.0
//! * 1D <文頭><ヲ><助詞><体言>
//! + 1D <文頭><ヲ><助詞><体言>
//! 勉強 べんきょう 勉強 名詞 6 サ変名詞 2 * 0 * 0 "代表表記:勉強/べんきょう" <自立><内容語>
//! を を を 助詞 9 格助詞 1 * 0 * 0 NIL <付属>
//! * -1D <文末><用言:動>
//! + -1D <文末><用言:動><態:未定>
//! する する する 動詞 2 * 0 サ変動詞 16 基本形 2 "代表表記:する/する" <自立><内容語>
//! EOS
//! ```
//!
//! `*` lines open a phrase (bunsetsu) and are only validated, `+` lines open
//! a basic phrase (tag), every other line before `EOS` is a morpheme of the
//! current tag. Lines starting with `;;` are analyzer diagnostics.

use super::{DependencyType, Morpheme, ParsedSentence, Tag};
use crate::error::FormatError;

const END_OF_SENTENCE: &str = "EOS";
const NO_SEMANTICS: &str = "NIL";
/// Number of space separated fixed fields on a morpheme line
const MORPHEME_FIELDS: usize = 11;

/// Parse exactly one sentence
pub fn parse_sentence(input: &str) -> Result<ParsedSentence, FormatError> {
    let mut sentences = parse_document(input)?;
    match sentences.len() {
        1 => Ok(sentences.remove(0)),
        0 => Err(FormatError::new(1, "no sentence found")),
        n => Err(FormatError::new(1, format!("expected one sentence, found {n}"))),
    }
}

/// Parse zero or more `EOS` terminated sentences
pub fn parse_document(input: &str) -> Result<Vec<ParsedSentence>, FormatError> {
    let mut sentences = Vec::new();
    let mut current = SentenceBuilder::default();

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(";;") {
            tracing::warn!(line = line_no, message = %line, "analyzer diagnostic");
            continue;
        }

        if line == END_OF_SENTENCE {
            sentences.push(current.finish(line_no)?);
            current = SentenceBuilder::default();
        } else if let Some(comment) = line.strip_prefix('#') {
            current.comment(comment.trim());
        } else if let Some(rest) = line.strip_prefix("* ") {
            parse_head(first_token(rest), line_no)?;
        } else if let Some(rest) = line.strip_prefix("+ ") {
            current.open_tag(parse_tag_line(rest, line_no)?);
        } else {
            let morpheme = parse_morpheme_line(line, line_no)?;
            current.push_morpheme(morpheme, line_no)?;
        }
    }

    if !current.is_empty() {
        return Err(FormatError::new(
            input.lines().count(),
            "missing EOS after last sentence",
        ));
    }

    Ok(sentences)
}

#[derive(Default)]
struct SentenceBuilder {
    comment: Option<String>,
    tags: Vec<Tag>,
}

impl SentenceBuilder {
    fn is_empty(&self) -> bool {
        self.comment.is_none() && self.tags.is_empty()
    }

    fn comment(&mut self, comment: &str) {
        // Only the first comment (the sentence id) is kept
        if self.comment.is_none() {
            self.comment = Some(comment.to_string());
        }
    }

    fn open_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    fn push_morpheme(&mut self, morpheme: Morpheme, line_no: usize) -> Result<(), FormatError> {
        let tag = self
            .tags
            .last_mut()
            .ok_or_else(|| FormatError::new(line_no, "morpheme outside of a tag"))?;
        tag.morphemes.push(morpheme);
        Ok(())
    }

    fn finish(self, line_no: usize) -> Result<ParsedSentence, FormatError> {
        let count = self.tags.len();
        for (index, tag) in self.tags.iter().enumerate() {
            if tag.morphemes.is_empty() {
                return Err(FormatError::new(
                    line_no,
                    format!("tag {index} has no morphemes"),
                ));
            }
            if let Some(head) = tag.head {
                if head >= count {
                    return Err(FormatError::new(
                        line_no,
                        format!("tag {index} depends on missing tag {head}"),
                    ));
                }
            }
        }

        Ok(ParsedSentence {
            comment: self.comment,
            tags: self.tags,
        })
    }
}

fn first_token(rest: &str) -> &str {
    rest.split_whitespace().next().unwrap_or("")
}

/// Parse a dependency token such as `2D` or `-1D`
fn parse_head(token: &str, line_no: usize) -> Result<(Option<usize>, DependencyType), FormatError> {
    let symbol = token
        .chars()
        .last()
        .ok_or_else(|| FormatError::new(line_no, "missing dependency"))?;
    let dependency = DependencyType::from_symbol(symbol).ok_or_else(|| {
        FormatError::new(line_no, format!("unknown dependency type `{symbol}`"))
    })?;

    let index = &token[..token.len() - symbol.len_utf8()];
    let head = match index.parse::<i64>() {
        Ok(-1) => None,
        Ok(n) if n >= 0 => Some(n as usize),
        _ => {
            return Err(FormatError::new(
                line_no,
                format!("invalid dependency head `{index}`"),
            ))
        }
    };

    Ok((head, dependency))
}

fn parse_tag_line(rest: &str, line_no: usize) -> Result<Tag, FormatError> {
    let rest = rest.trim_start();
    let (token, features) = rest.split_once(' ').unwrap_or((rest, ""));
    let (head, dependency) = parse_head(token, line_no)?;

    Ok(Tag {
        head,
        dependency,
        features: parse_features(features, line_no)?,
        morphemes: Vec::new(),
    })
}

fn parse_morpheme_line(line: &str, line_no: usize) -> Result<Morpheme, FormatError> {
    let (fields, rest) = split_fields(line, MORPHEME_FIELDS);
    let mut fields = fields.into_iter();
    let mut next = |name: &str| {
        fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| FormatError::new(line_no, format!("missing {name} field")))
    };

    let surface = next("surface")?;
    let reading = next("reading")?;
    let lemma = next("lemma")?;
    let pos = next("part of speech")?;
    next("part of speech id")?;
    let subpos = next("sub part of speech")?;
    next("sub part of speech id")?;
    let conjugation_type = next("conjugation type")?;
    next("conjugation type id")?;
    let conjugation_form = next("conjugation form")?;
    next("conjugation form id")?;
    let rest = rest.trim();

    let (semantics, features) = split_semantics(rest, line_no)?;

    Ok(Morpheme {
        surface,
        reading,
        lemma,
        pos,
        subpos,
        conjugation_type,
        conjugation_form,
        semantics,
        features: parse_features(features, line_no)?,
    })
}

/// Split off up to `count` space separated fields and return the remainder
///
/// Juman writes a half-width space morpheme as `\ `, so an escaped space
/// belongs to the field. Empty fields are kept so that callers can report
/// them.
fn split_fields(line: &str, count: usize) -> (Vec<String>, &str) {
    let mut fields = Vec::with_capacity(count);
    let mut field = String::new();
    let mut escaped = false;

    for (index, c) in line.char_indices() {
        if fields.len() == count {
            return (fields, &line[index..]);
        }
        if escaped {
            if c != ' ' && c != '\\' {
                field.push('\\');
            }
            field.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ' ' {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }

    if escaped {
        field.push('\\');
    }
    if !field.is_empty() && fields.len() < count {
        fields.push(field);
    }
    (fields, "")
}

/// Split the trailing `NIL` or `"..."` semantic field from the features
fn split_semantics(rest: &str, line_no: usize) -> Result<(Vec<String>, &str), FormatError> {
    if let Some(after) = rest.strip_prefix(NO_SEMANTICS) {
        return Ok((Vec::new(), after));
    }

    if let Some(quoted) = rest.strip_prefix('"') {
        let end = quoted
            .find('"')
            .ok_or_else(|| FormatError::new(line_no, "unterminated semantic field"))?;
        let semantics = quoted[..end]
            .split_whitespace()
            .map(str::to_string)
            .collect();
        return Ok((semantics, &quoted[end + 1..]));
    }

    Ok((Vec::new(), rest))
}

/// Parse `<a><b:c>` into `["a", "b:c"]`
fn parse_features(input: &str, line_no: usize) -> Result<Vec<String>, FormatError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let inner = input
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .ok_or_else(|| FormatError::new(line_no, format!("malformed features `{input}`")))?;

    Ok(inner
        .split("><")
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect())
}
