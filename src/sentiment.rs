//! Text sentiment: a pluggable `(polarity, subjectivity)` scorer and the
//! three-way label derived from polarity.

use crate::extractor::Column;
use crate::json_utils::text_of;
use ahash::{AHashMap, AHashSet};
use indicatif::ProgressBar;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// [-1, 1], negative to positive.
    pub polarity: f64,
    /// [0, 1], factual to opinionated.
    pub subjectivity: f64,
}

impl Sentiment {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self { polarity, subjectivity }
    }
}

/// Anything that maps free text to a `Sentiment`. Closures qualify, which is
/// how tests pin scores.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> Sentiment;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> Sentiment,
{
    fn score(&self, text: &str) -> Sentiment {
        self(text)
    }
}

/// Discrete label. The neutral value `-1` is a sentinel, not "more negative
/// than negative"; compare variants, not numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_i8(self) -> i8 {
        match self {
            SentimentLabel::Positive => 1,
            SentimentLabel::Negative => 0,
            SentimentLabel::Neutral => -1,
        }
    }
}

/// `> 0` positive, `< 0` negative, everything else (zero, NaN) neutral.
pub fn sentiment_label(polarity: f64) -> SentimentLabel {
    if polarity > 0.0 {
        SentimentLabel::Positive
    } else if polarity < 0.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub fn sentiment_labels(polarity: &[f64]) -> Vec<i8> {
    polarity.iter().map(|p| sentiment_label(*p).as_i8()).collect()
}

/// Score every text in order, one call per record. Returns `(polarity, subjectivity)`.
pub fn score_column<S: SentimentScorer + ?Sized>(
    scorer: &S,
    text: &Column,
    pb: Option<&ProgressBar>,
) -> (Vec<f64>, Vec<f64>) {
    let mut polarity = Vec::with_capacity(text.len());
    let mut subjectivity = Vec::with_capacity(text.len());
    for v in &text.values {
        let s = scorer.score(text_of(v));
        polarity.push(s.polarity);
        subjectivity.push(s.subjectivity);
        if let Some(pb) = pb { pb.inc(1); }
    }
    (polarity, subjectivity)
}

// ----------------------------- Lexicon scorer ------------------------------------

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z]+(?:'[a-z]+)?|!").expect("static token regex"))
}

/// Word-lexicon scorer in the spirit of pattern/TextBlob: each known adjective
/// carries `(polarity, subjectivity)`, an intensifier scales the next word, a
/// negation flips and damps it, and the text score is the mean over hits.
#[derive(Clone, Debug)]
pub struct LexiconScorer {
    words: AHashMap<&'static str, (f64, f64)>,
    intensifiers: AHashMap<&'static str, f64>,
    negations: AHashSet<&'static str>,
    /// Polarity boost per `!`, capped at three.
    exclamation_boost: f64,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        let words: &[(&str, f64, f64)] = &[
            ("good", 0.7, 0.6), ("great", 0.8, 0.75), ("excellent", 1.0, 1.0),
            ("amazing", 0.6, 0.9), ("awesome", 1.0, 1.0), ("best", 1.0, 0.3),
            ("better", 0.5, 0.5), ("happy", 0.8, 1.0), ("love", 0.5, 0.6),
            ("nice", 0.6, 1.0), ("positive", 0.23, 0.55), ("strong", 0.43, 0.73),
            ("growth", 0.3, 0.4), ("recovery", 0.3, 0.4), ("gain", 0.3, 0.4),
            ("gains", 0.3, 0.4), ("win", 0.8, 0.4), ("hope", 0.3, 0.6),
            ("fantastic", 0.4, 0.9), ("wonderful", 1.0, 1.0), ("glad", 0.5, 1.0),
            ("success", 0.6, 0.6), ("successful", 0.75, 0.95), ("safe", 0.5, 0.5),
            ("bad", -0.7, 0.67), ("worse", -0.4, 0.6), ("worst", -1.0, 1.0),
            ("terrible", -1.0, 1.0), ("awful", -1.0, 1.0), ("horrible", -1.0, 1.0),
            ("poor", -0.4, 0.6), ("sad", -0.5, 1.0), ("hate", -0.8, 0.9),
            ("negative", -0.3, 0.4), ("weak", -0.38, 0.63), ("crisis", -0.5, 0.5),
            ("recession", -0.4, 0.4), ("inflation", -0.2, 0.3), ("loss", -0.4, 0.4),
            ("losses", -0.4, 0.4), ("crash", -0.6, 0.5), ("fear", -0.5, 0.7),
            ("angry", -0.5, 1.0), ("wrong", -0.5, 0.9), ("fail", -0.5, 0.5),
            ("failed", -0.5, 0.5), ("debt", -0.2, 0.3), ("unemployment", -0.3, 0.3),
            ("high", 0.16, 0.54), ("low", 0.0, 0.3), ("new", 0.14, 0.45),
            ("free", 0.4, 0.8), ("important", 0.4, 1.0), ("real", 0.2, 0.3),
            ("stupid", -0.8, 1.0), ("crazy", -0.6, 0.9), ("dangerous", -0.6, 0.9),
        ];
        let intensifiers: &[(&str, f64)] = &[
            ("very", 1.3), ("really", 1.2), ("extremely", 1.5), ("so", 1.2),
            ("too", 1.2), ("quite", 1.1), ("pretty", 1.1), ("slightly", 0.5),
            ("somewhat", 0.7), ("barely", 0.4),
        ];
        let negations = ["not", "no", "never", "isn't", "don't", "doesn't", "didn't", "wasn't", "aren't", "won't", "can't"];

        Self {
            words: words.iter().map(|(w, p, s)| (*w, (*p, *s))).collect(),
            intensifiers: intensifiers.iter().copied().collect(),
            negations: negations.into_iter().collect(),
            exclamation_boost: 0.1,
        }
    }

    /// Add or override a lexicon entry.
    pub fn with_word(mut self, word: &'static str, polarity: f64, subjectivity: f64) -> Self {
        self.words.insert(word, (polarity, subjectivity));
        self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Sentiment {
        let lower = text.to_lowercase();
        let mut hits: Vec<(f64, f64)> = Vec::new();
        let mut negate = false;
        let mut intensity = 1.0;
        let mut exclamations = 0u32;

        for m in token_re().find_iter(&lower) {
            let tok = m.as_str();
            if tok == "!" {
                exclamations += 1;
            } else if self.negations.contains(tok) {
                negate = true;
            } else if let Some(f) = self.intensifiers.get(tok) {
                intensity *= f;
            } else {
                if let Some(&(p, s)) = self.words.get(tok) {
                    let mut p = p * intensity;
                    if negate {
                        p *= -0.5;
                    }
                    hits.push((p, (s * intensity).min(1.0)));
                }
                // Modifiers only reach the word right after them.
                negate = false;
                intensity = 1.0;
            }
        }

        if hits.is_empty() {
            return Sentiment::default();
        }
        let n = hits.len() as f64;
        let mut polarity = hits.iter().map(|h| h.0).sum::<f64>() / n;
        let subjectivity = hits.iter().map(|h| h.1).sum::<f64>() / n;
        if exclamations > 0 {
            polarity *= 1.0 + self.exclamation_boost * exclamations.min(3) as f64;
        }
        Sentiment::new(polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0))
    }
}
