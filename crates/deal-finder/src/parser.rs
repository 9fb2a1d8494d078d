//! Reply Parser
//!
//! Best-effort extraction of picks from the model's freeform reply. The
//! expected shape is one block per coin, blocks separated by blank lines:
//!
//! ```text
//! Chainlink:
//! Decentralized oracle network with wide DeFi adoption.
//! Simpler terms: it lets smart contracts read real-world data.
//! ```
//!
//! Parsing never fails. Segments that do not open with a `Name:` header are
//! kept verbatim, in order, so nothing the model said is dropped. Picks keep
//! their header line as written next to the cleaned name.

use crate::model::{AiPick, AiPickBlock};

/// Marker separating the detailed and the plain-language explanation
pub const SIMPLER_MARKER: &str = "simpler terms:";

/// Parse a reply into display blocks
pub fn parse(reply: &str) -> Vec<AiPickBlock> {
    segments(reply)
        .iter()
        .filter_map(|segment| parse_segment(segment))
        .collect()
}

/// Group consecutive non-blank lines; whitespace-only lines separate segments
fn segments(reply: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in reply.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                segments.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        segments.push(current.join("\n"));
    }

    segments
}

fn parse_segment(segment: &str) -> Option<AiPickBlock> {
    let mut lines = segment.lines();
    let first = lines.next()?.trim();

    // "**Chainlink:**" counts as a header just like "Chainlink:"
    let header = first
        .trim_end_matches(['*', '_'])
        .strip_suffix(':')
        .map(clean_name)
        .filter(|name| !name.is_empty());

    let Some(name) = header else {
        return Some(AiPickBlock::Verbatim {
            text: segment.trim().to_string(),
        });
    };

    let details = lines.collect::<Vec<_>>().join("\n");
    let (detailed_text, simpler_text) = split_details(&details);

    Some(AiPickBlock::Pick(AiPick {
        name,
        header: first.to_string(),
        detailed_text: detailed_text.to_string(),
        simpler_text: simpler_text.to_string(),
    }))
}

/// Split on the first case-insensitive [`SIMPLER_MARKER`]
fn split_details(details: &str) -> (&str, &str) {
    // ASCII lowercasing keeps byte offsets aligned with `details`
    let lowered = details.to_ascii_lowercase();
    match lowered.find(SIMPLER_MARKER) {
        Some(at) => (
            details[..at].trim(),
            details[at + SIMPLER_MARKER.len()..].trim(),
        ),
        None => (details.trim(), ""),
    }
}

/// Strip list numbering, bullets and markdown emphasis around a coin name
fn clean_name(header: &str) -> String {
    let mut name = header.trim();

    name = name.trim_start_matches(['-', '•', '#', '>']).trim_start();

    let digits = name.len() - name.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = name[digits..]
            .strip_prefix('.')
            .or_else(|| name[digits..].strip_prefix(')'))
        {
            name = rest;
        }
    }

    name.trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '_' | '#'))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(block: &AiPickBlock) -> &AiPick {
        block.as_pick().expect("expected a structured pick")
    }

    #[test]
    fn test_structured_block() {
        let blocks = parse("Chainlink:\nGreat oracle.\nSimpler terms: it connects data.\n\n");
        assert_eq!(blocks.len(), 1);
        let p = pick(&blocks[0]);
        assert_eq!(p.name, "Chainlink");
        assert_eq!(p.detailed_text, "Great oracle.");
        assert_eq!(p.simpler_text, "it connects data.");
    }

    #[test]
    fn test_header_without_colon_is_verbatim() {
        let input = "Random text with no colon header\n\n";
        let blocks = parse(input);
        assert_eq!(
            blocks,
            vec![AiPickBlock::Verbatim {
                text: input.trim().to_string()
            }]
        );
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let blocks = parse("Osmosis:\nCosmos DEX.\nSIMPLER TERMS: swap tokens across chains.");
        let p = pick(&blocks[0]);
        assert_eq!(p.detailed_text, "Cosmos DEX.");
        assert_eq!(p.simpler_text, "swap tokens across chains.");
    }

    #[test]
    fn test_missing_marker_keeps_all_details() {
        let blocks = parse("Akash:\nDecentralized cloud.\nCheap GPUs.");
        let p = pick(&blocks[0]);
        assert_eq!(p.detailed_text, "Decentralized cloud.\nCheap GPUs.");
        assert_eq!(p.simpler_text, "");
    }

    #[test]
    fn test_header_only_block() {
        let blocks = parse("Injective:");
        let p = pick(&blocks[0]);
        assert_eq!(p.name, "Injective");
        assert!(p.detailed_text.is_empty());
    }

    #[test]
    fn test_mixed_reply_preserves_order() {
        let reply = "Here are my picks.\n\n\
                     Chainlink:\nOracles.\nSimpler terms: data bridge.\n\n\
                     \n\n\
                     Render:\nGPU network.\n\n\
                     Not financial advice.";
        let blocks = parse(reply);
        assert_eq!(blocks.len(), 4);
        assert!(blocks[0].is_verbatim());
        assert_eq!(pick(&blocks[1]).name, "Chainlink");
        assert_eq!(pick(&blocks[2]).name, "Render");
        assert_eq!(
            blocks[3],
            AiPickBlock::Verbatim {
                text: "Not financial advice.".into()
            }
        );
    }

    #[test]
    fn test_whitespace_only_lines_separate_and_crlf() {
        let blocks = parse("Akash:\r\nCloud.\r\n   \r\nOsmosis:\r\nDEX.\r\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(pick(&blocks[0]).detailed_text, "Cloud.");
        assert_eq!(pick(&blocks[1]).name, "Osmosis");
    }

    #[test]
    fn test_numbered_and_emphasized_headers() {
        let blocks = parse("1. **Chainlink (LINK)**:\nOracles.\n\n2) Render:\nGPUs.\n\n**Akash:**\nCloud.");
        let names: Vec<_> = blocks.iter().map(|b| pick(b).name.as_str()).collect();
        assert_eq!(names, ["Chainlink (LINK)", "Render", "Akash"]);
        assert_eq!(pick(&blocks[0]).header, "1. **Chainlink (LINK)**:");
        assert_eq!(pick(&blocks[2]).header, "**Akash:**");
    }

    #[test]
    fn test_bare_colon_is_verbatim() {
        let blocks = parse("**:**\nnothing here");
        assert!(blocks[0].is_verbatim());
    }

    #[test]
    fn test_empty_and_blank_inputs() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_no_text_is_lost() {
        fn non_ws(s: &str) -> usize {
            s.chars().filter(|c| !c.is_whitespace()).count()
        }

        let reply = "Intro line\n\n1. **Chainlink:**\nOracles everywhere.\nSimpler terms: a data bridge.\n\n\
                     - _Render_:\nGPU rendering.\n\n2) Akash:\n\nclosing remark";
        let blocks = parse(reply);

        let mut covered = 0;
        for block in &blocks {
            match block {
                AiPickBlock::Verbatim { text } => covered += non_ws(text),
                AiPickBlock::Pick(p) => {
                    covered += non_ws(&p.header);
                    covered += non_ws(&p.detailed_text) + non_ws(&p.simpler_text);
                    if !p.simpler_text.is_empty() {
                        covered += non_ws(SIMPLER_MARKER);
                    }
                }
            }
        }
        assert_eq!(covered, non_ws(reply));
    }
}
