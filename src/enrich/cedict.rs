use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use crate::enrich::{DefinitionProvider, EnrichmentError};

lazy_static! {
    static ref SYLLABLE_RE: Regex = Regex::new(r"^([a-z:]+)([1-5])$").unwrap();
}

#[derive(Clone, Debug)]
pub struct DictEntry {
    pub traditional: String,
    pub simplified: String,
    pub pinyin: String,
    pub definitions: Vec<String>,
}

/// In-memory CC-CEDICT dictionary, indexed by both simplified and
/// traditional headwords.
pub struct Cedict {
    entries: HashMap<String, Vec<DictEntry>>,
    max_key_len: usize,
}

impl Cedict {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Cedict> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read cedict file {}", path.display()))?;
        Ok(Cedict::parse(&content))
    }

    pub fn parse(content: &str) -> Cedict {
        let mut entries: HashMap<String, Vec<DictEntry>> = HashMap::new();
        let mut max_key_len = 0;

        for line in content.lines() {
            if line.starts_with('#') || line.is_empty() {
                continue;
            }

            let parts: Vec<_> = line.split(" /").collect();
            if parts.len() < 2 {
                continue;
            }

            let chars_pinyin: Vec<_> = parts[0].split('[').collect();
            if chars_pinyin.len() < 2 {
                continue;
            }
            let chars: Vec<_> = chars_pinyin[0].split_whitespace().collect();
            if chars.len() < 2 {
                continue;
            }

            let entry = DictEntry {
                traditional: chars[0].to_string(),
                simplified: chars[1].to_string(),
                pinyin: chars_pinyin[1].trim_end_matches(']').to_string(),
                definitions: parts[1..]
                    .iter()
                    .flat_map(|s| s.split('/'))
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            };

            max_key_len = max_key_len.max(entry.simplified.chars().count());

            entries
                .entry(entry.simplified.clone())
                .or_default()
                .push(entry.clone());
            if entry.traditional != entry.simplified {
                entries
                    .entry(entry.traditional.clone())
                    .or_default()
                    .push(entry);
            }
        }

        Cedict {
            entries,
            max_key_len,
        }
    }

    pub fn lookup(&self, word: &str) -> Option<&[DictEntry]> {
        self.entries.get(word).map(|v| v.as_slice())
    }

    /// All definitions recorded for a word, across homographs.
    pub fn definitions(&self, word: &str) -> Option<Vec<String>> {
        let defs: Vec<String> = self
            .lookup(word)?
            .iter()
            .flat_map(|e| e.definitions.iter().cloned())
            .collect();

        if defs.is_empty() { None } else { Some(defs) }
    }

    /// Tone-marked pinyin for arbitrary text. Greedy longest match
    /// against the dictionary; characters with no entry pass through
    /// unchanged.
    pub fn romanize(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut syllables: Vec<String> = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let longest = self.max_key_len.min(chars.len() - i);
            let mut matched = None;

            for len in (1..=longest).rev() {
                let candidate: String = chars[i..i + len].iter().collect();
                if let Some(entries) = self.entries.get(&candidate) {
                    matched = Some((len, entries[0].pinyin.clone()));
                    break;
                }
            }

            match matched {
                Some((len, pinyin)) => {
                    syllables.push(mark_tones(&pinyin));
                    i += len;
                }
                None => {
                    syllables.push(chars[i].to_string());
                    i += 1;
                }
            }
        }

        syllables.join(" ")
    }
}

/// Converts numbered CEDICT pinyin ("ni3 hao3") to tone marks
/// ("nǐ hǎo"). Syllables that do not look like numbered pinyin are
/// left as they are.
pub fn mark_tones(pinyin: &str) -> String {
    pinyin
        .split_whitespace()
        .map(mark_syllable)
        .collect::<Vec<_>>()
        .join(" ")
}

fn mark_syllable(syllable: &str) -> String {
    let Some(caps) = SYLLABLE_RE.captures(syllable) else {
        return syllable.to_string();
    };

    let body = caps[1].replace("u:", "ü");
    let tone: usize = caps[2].parse().unwrap_or(5);
    if tone == 5 {
        return body;
    }

    let chars: Vec<char> = body.chars().collect();
    let Some(pos) = mark_position(&chars) else {
        return body;
    };

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| if i == pos { accented(c, tone) } else { c })
        .collect()
}

// Standard placement rule: a or e always take the mark, "ou" marks the
// o, otherwise the last vowel takes it.
fn mark_position(chars: &[char]) -> Option<usize> {
    if let Some(i) = chars.iter().position(|&c| c == 'a' || c == 'e') {
        return Some(i);
    }
    if let Some(i) = chars.windows(2).position(|w| w == ['o', 'u']) {
        return Some(i);
    }
    chars.iter().rposition(|&c| "iouü".contains(c))
}

fn accented(vowel: char, tone: usize) -> char {
    let marks = match vowel {
        'a' => ['ā', 'á', 'ǎ', 'à'],
        'e' => ['ē', 'é', 'ě', 'è'],
        'i' => ['ī', 'í', 'ǐ', 'ì'],
        'o' => ['ō', 'ó', 'ǒ', 'ò'],
        'u' => ['ū', 'ú', 'ǔ', 'ù'],
        'ü' => ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
        other => return other,
    };
    marks[tone - 1]
}

/// Local dictionary as the first definition provider in the chain.
pub struct CedictDefinitions(pub Arc<Cedict>);

#[async_trait]
impl DefinitionProvider for CedictDefinitions {
    fn name(&self) -> &'static str {
        "cedict"
    }

    async fn definitions(&self, chinese: &str) -> Result<Option<Vec<String>>, EnrichmentError> {
        Ok(self.0.definitions(chinese))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# CC-CEDICT sample
你好 你好 [ni3 hao3] /hello/hi/
愛 爱 [ai4] /to love/affection/
提供 提供 [ti2 gong1] /to offer/to supply/to provide/
";

    #[test]
    fn parses_entries_and_indexes_both_scripts() {
        let dict = Cedict::parse(SAMPLE);

        let entry = &dict.lookup("你好").unwrap()[0];
        assert_eq!(entry.pinyin, "ni3 hao3");
        assert_eq!(entry.definitions, vec!["hello", "hi"]);

        // traditional headword resolves too
        assert!(dict.lookup("愛").is_some());
        assert!(dict.lookup("爱").is_some());
        assert!(dict.lookup("不存在").is_none());
    }

    #[test]
    fn skips_comments_and_malformed_lines() {
        let dict = Cedict::parse("# comment\ngarbage line\n你好 你好 [ni3 hao3] /hello/\n");
        assert!(dict.lookup("你好").is_some());
        assert!(dict.lookup("garbage").is_none());
    }

    #[test]
    fn tone_marks() {
        assert_eq!(mark_tones("ni3 hao3"), "nǐ hǎo");
        assert_eq!(mark_tones("ai4"), "ài");
        assert_eq!(mark_tones("lu:4"), "lǜ");
        assert_eq!(mark_tones("dou1"), "dōu");
        assert_eq!(mark_tones("ma5"), "ma");
        // not numbered pinyin, untouched
        assert_eq!(mark_tones("xyz"), "xyz");
    }

    #[test]
    fn romanizes_with_longest_match() {
        let dict = Cedict::parse(SAMPLE);
        assert_eq!(dict.romanize("你好"), "nǐ hǎo");
        // unknown characters pass through
        assert_eq!(dict.romanize("你好吗"), "nǐ hǎo 吗");
    }
}
