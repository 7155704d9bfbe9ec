//! # Response Format Negotiation
//!
//! Picks one of the two supported representations from the request's
//! `Accept` header, honouring quality values and wildcards.

use axum::http::{HeaderMap, header};

/// Representation of an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// `Error <status> - <name>: <message>`
    #[default]
    Text,
    /// `{"status": .., "name": .., "message": ..}`
    Json,
}

impl ResponseFormat {
    /// Offered formats, in order of preference on ties.
    const OFFERED: [(ResponseFormat, &'static str, &'static str); 2] = [
        (ResponseFormat::Text, "text", "plain"),
        (ResponseFormat::Json, "application", "json"),
    ];

    /// Negotiates from a raw `Accept` header value.
    ///
    /// No header selects text. When nothing offered is acceptable, text is
    /// used as well rather than refusing with 406.
    pub fn negotiate(accept: Option<&str>) -> Self {
        let Some(accept) = accept.filter(|value| !value.trim().is_empty()) else {
            return Self::default();
        };

        let ranges: Vec<MediaRange<'_>> = accept
            .split(',')
            .enumerate()
            .filter_map(|(index, entry)| MediaRange::parse(index, entry))
            .collect();

        // (quality, client order) of the most specific range matching each offer
        let mut best: Option<(Self, f32, usize)> = None;
        for (format, kind, subtype) in Self::OFFERED {
            let Some(range) = ranges
                .iter()
                .filter(|range| range.matches(kind, subtype))
                .max_by_key(|range| range.specificity())
            else {
                continue;
            };
            if range.quality <= 0.0 {
                continue;
            }

            let better = match best {
                None => true,
                Some((_, quality, index)) => {
                    range.quality > quality || (range.quality == quality && range.index < index)
                }
            };
            if better {
                best = Some((format, range.quality, range.index));
            }
        }

        best.map(|(format, _, _)| format).unwrap_or_default()
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::negotiate(
            headers
                .get(header::ACCEPT)
                .and_then(|value| value.to_str().ok()),
        )
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

struct MediaRange<'a> {
    kind: &'a str,
    subtype: &'a str,
    quality: f32,
    index: usize,
}

impl<'a> MediaRange<'a> {
    fn parse(index: usize, entry: &'a str) -> Option<Self> {
        let mut parts = entry.split(';');
        let (kind, subtype) = parts.next()?.trim().split_once('/')?;
        let quality = parts
            .filter_map(|param| param.trim().strip_prefix("q="))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        Some(Self {
            kind: kind.trim(),
            subtype: subtype.trim(),
            quality,
            index,
        })
    }

    fn matches(&self, kind: &str, subtype: &str) -> bool {
        (self.kind == "*" || self.kind.eq_ignore_ascii_case(kind))
            && (self.subtype == "*" || self.subtype.eq_ignore_ascii_case(subtype))
    }

    fn specificity(&self) -> u8 {
        u8::from(self.kind != "*") + u8::from(self.subtype != "*")
    }
}
